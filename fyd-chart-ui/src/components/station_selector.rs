//! Dropdown selector for choosing a station.

use crate::fetch;
use crate::state::AppState;
use dioxus::prelude::*;

/// Station dropdown selector.
/// Reads available stations from the cascade and re-triggers the recipe
/// reload chain on change.
#[component]
pub fn StationSelector() -> Element {
    let mut state = use_context::<AppState>();
    let cascade = state.cascade.read().clone();
    let selected = cascade.station().to_string();

    let on_change = move |evt: Event<FormData>| {
        let plan = state.cascade.write().select_station(evt.value());
        state.error_msg.set(None);
        spawn(fetch::run_chain(state, plan));
    };

    rsx! {
        div {
            style: "margin: 8px 0;",
            label {
                r#for: "station-select",
                style: "font-weight: bold; margin-right: 8px;",
                "Station: "
            }
            select {
                id: "station-select",
                onchange: on_change,
                for station in cascade.station_options().iter() {
                    option {
                        value: "{station}",
                        selected: *station == selected,
                        "{station}"
                    }
                }
            }
        }
    }
}
