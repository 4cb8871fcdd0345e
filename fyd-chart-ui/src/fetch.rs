//! Browser fetch adapter for the dashboard API.
//!
//! Thin wrapper over `window.fetch` returning deserialized JSON, plus the
//! chain driver that walks a cascade's fetch plans to completion. All
//! requests are GETs carrying an optional bearer token.

use crate::state::AppState;
use dioxus::prelude::WritableExt;
use fyd_api::query::{self, TrendQuery, TREND_ENDPOINT};
use fyd_api::trend::DashboardData;
use fyd_filter::{FetchPlan, FetchRequest};
use log::debug;
use serde::de::DeserializeOwned;
use thiserror::Error;
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;
use web_sys::{Request, Response};

/// Failures of a browser-side API request.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FetchError {
    /// The request could not complete (network down, CORS, bad URL).
    #[error("request failed: {0}")]
    Network(String),

    /// API reachable but returned a non-success status.
    #[error("API returned status {status}: {detail}")]
    Status { status: u16, detail: String },

    /// Response body did not match the expected shape.
    #[error("failed to parse response: {0}")]
    Parse(String),
}

fn js_message(value: &JsValue) -> String {
    value
        .as_string()
        .unwrap_or_else(|| format!("{value:?}"))
}

/// GET a JSON payload from the API.
pub async fn get_json<T: DeserializeOwned>(
    base_url: &str,
    path: &str,
    pairs: &[(&'static str, String)],
    token: Option<&str>,
) -> Result<T, FetchError> {
    let query = query::query_string(pairs);
    let url = if query.is_empty() {
        format!("{base_url}{path}")
    } else {
        format!("{base_url}{path}?{query}")
    };
    debug!("GET {url}");

    let request =
        Request::new_with_str(&url).map_err(|err| FetchError::Network(js_message(&err)))?;
    if let Some(token) = token {
        request
            .headers()
            .set("Authorization", &format!("Bearer {token}"))
            .map_err(|err| FetchError::Network(js_message(&err)))?;
    }

    let window =
        web_sys::window().ok_or_else(|| FetchError::Network("no window object".to_string()))?;
    let response = JsFuture::from(window.fetch_with_request(&request))
        .await
        .map_err(|err| FetchError::Network(js_message(&err)))?;
    let response: Response = response
        .dyn_into()
        .map_err(|_| FetchError::Network("fetch did not return a Response".to_string()))?;

    let status = response.status();
    let body = JsFuture::from(
        response
            .text()
            .map_err(|err| FetchError::Network(js_message(&err)))?,
    )
    .await
    .map_err(|err| FetchError::Network(js_message(&err)))?
    .as_string()
    .unwrap_or_default();

    if !response.ok() {
        return Err(FetchError::Status {
            status,
            detail: fyd_api::error::error_detail(&body),
        });
    }

    serde_json::from_str(&body).map_err(|err| FetchError::Parse(err.to_string()))
}

/// Issue the request a [`FetchRequest`] describes; every filter endpoint
/// returns a plain list of identifiers.
pub async fn fetch_options(
    base_url: &str,
    token: Option<&str>,
    request: &FetchRequest,
) -> Result<Vec<String>, FetchError> {
    get_json(base_url, request.path(), &request.query_pairs(), token).await
}

/// Fetch the dashboard payload for an assembled query.
pub async fn fetch_trend(
    base_url: &str,
    token: Option<&str>,
    query: &TrendQuery,
) -> Result<DashboardData, FetchError> {
    get_json(base_url, TREND_ENDPOINT, &query.to_query_pairs(), token).await
}

/// Walk a cascade chain to completion: issue each plan, apply the response,
/// follow the chained plan.
///
/// The first fetch failure stops the chain and is surfaced in
/// `state.error_msg`; the stages below the failing one stay empty until the
/// user re-triggers an ancestor. A response for a superseded generation is
/// discarded inside the cascade, so rapid re-triggers are safe.
pub async fn run_chain(mut state: AppState, mut plan: Option<FetchPlan>) {
    while let Some(current) = plan.take() {
        let base_url = (state.base_url)();
        let token = (state.token)();
        let values = match fetch_options(&base_url, token.as_deref(), &current.request).await {
            Ok(values) => values,
            Err(err) => {
                state.error_msg.set(Some(err.to_string()));
                return;
            }
        };
        plan = match current.request {
            FetchRequest::Dates => state
                .cascade
                .write()
                .apply_dates(current.generation, values),
            FetchRequest::Stations { .. } => state
                .cascade
                .write()
                .apply_stations(current.generation, values),
            FetchRequest::Recipes { .. } => state
                .cascade
                .write()
                .apply_recipes(current.generation, values),
            FetchRequest::Lots { select_all, .. } => {
                state
                    .cascade
                    .write()
                    .apply_lots(current.generation, select_all, values);
                None
            }
        };
    }
}
