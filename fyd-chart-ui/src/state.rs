//! Application state managed via Dioxus context.
//!
//! `AppState` bundles all reactive signals into a single struct provided via
//! `use_context_provider`. Child components retrieve it with `use_context::<AppState>()`.

use dioxus::prelude::*;
use fyd_api::trend::DashboardData;
use fyd_filter::FilterCascade;

/// Shared application state for the yield dashboard app.
#[derive(Clone, Copy)]
pub struct AppState {
    /// The filter cascade (options + selections for every stage)
    pub cascade: Signal<FilterCascade>,
    /// Last fetched dashboard payload (None until the first Apply)
    pub dashboard: Signal<Option<DashboardData>>,
    /// Whether the initial filter chain is still loading
    pub loading: Signal<bool>,
    /// Whether a dashboard query is in flight
    pub querying: Signal<bool>,
    /// Error message if something went wrong
    pub error_msg: Signal<Option<String>>,
    /// Base URL of the backend API
    pub base_url: Signal<String>,
    /// Bearer token supplied by whatever signed the user in
    pub token: Signal<Option<String>>,
}

impl AppState {
    /// Create a new AppState with default signal values.
    pub fn new() -> Self {
        Self {
            cascade: Signal::new(FilterCascade::new()),
            dashboard: Signal::new(None),
            loading: Signal::new(true),
            querying: Signal::new(false),
            error_msg: Signal::new(None),
            base_url: Signal::new("http://127.0.0.1:8000".to_string()),
            token: Signal::new(None),
        }
    }
}
