//! Date range picker: two dropdowns fed by the `/filter/dates` stage.

use crate::fetch;
use crate::state::AppState;
use dioxus::prelude::*;

/// Date range selection for the filter cascade.
///
/// Both dropdowns share the cascade's date option list. Changing either end
/// re-triggers the station reload chain.
#[component]
pub fn DateRangePicker() -> Element {
    let mut state = use_context::<AppState>();
    let cascade = state.cascade.read().clone();
    let from = cascade.date_from().to_string();
    let to = cascade.date_to().to_string();

    let on_from_change = move |evt: Event<FormData>| {
        let plan = state.cascade.write().select_date_from(evt.value());
        state.error_msg.set(None);
        spawn(fetch::run_chain(state, plan));
    };

    let on_to_change = move |evt: Event<FormData>| {
        let plan = state.cascade.write().select_date_to(evt.value());
        state.error_msg.set(None);
        spawn(fetch::run_chain(state, plan));
    };

    rsx! {
        div {
            style: "margin: 8px 0; display: flex; gap: 12px; align-items: center;",
            label {
                style: "font-weight: bold;",
                "From: "
                select {
                    onchange: on_from_change,
                    for date in cascade.date_options().iter() {
                        option {
                            value: "{date}",
                            selected: *date == from,
                            "{date}"
                        }
                    }
                }
            }
            label {
                style: "font-weight: bold;",
                "To: "
                select {
                    onchange: on_to_change,
                    for date in cascade.date_options().iter() {
                        option {
                            value: "{date}",
                            selected: *date == to,
                            "{date}"
                        }
                    }
                }
            }
        }
    }
}
