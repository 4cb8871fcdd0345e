//! Shared Dioxus components and chart bridge for the yield dashboard app.
//!
//! This crate provides:
//! - `state`: Reactive AppState with Dioxus Signals
//! - `fetch`: Browser fetch adapter and cascade chain driver
//! - `js_bridge`: Rust wrappers for the host page's chart functions via `js_sys::eval()`
//! - `components`: Reusable RSX components (selectors, containers, etc.)

pub mod components;
pub mod fetch;
pub mod js_bridge;
pub mod state;
