//! The terminal query action.

use crate::fetch;
use crate::state::AppState;
use dioxus::prelude::*;

/// Assembles the dashboard query from the cascade and fetches the payload.
///
/// An incomplete date range surfaces as an inline validation message; the
/// API is not called in that case.
#[component]
pub fn ApplyButton() -> Element {
    let mut state = use_context::<AppState>();
    let querying = *state.querying.read();

    let on_click = move |_| {
        let assembled = state.cascade.read().assemble_query_parameters();
        match assembled {
            Ok(query) => {
                state.error_msg.set(None);
                state.querying.set(true);
                spawn(async move {
                    let base_url = (state.base_url)();
                    let token = (state.token)();
                    match fetch::fetch_trend(&base_url, token.as_deref(), &query).await {
                        Ok(data) => state.dashboard.set(Some(data)),
                        Err(err) => state.error_msg.set(Some(err.to_string())),
                    }
                    state.querying.set(false);
                });
            }
            Err(err) => state.error_msg.set(Some(err.to_string())),
        }
    };

    rsx! {
        button {
            style: "margin: 8px 0; padding: 6px 18px; font-weight: bold; cursor: pointer;",
            disabled: querying,
            onclick: on_click,
            if querying {
                "Querying..."
            } else {
                "Apply"
            }
        }
    }
}
