//! Multi-select checkbox list for the Lot stage.

use crate::state::AppState;
use dioxus::prelude::*;

/// Lot multi-select.
///
/// Toggling lots adjusts the selection only; the Lot stage has no
/// descendants, so no reload chain fires.
#[component]
pub fn LotSelector() -> Element {
    let mut state = use_context::<AppState>();
    let cascade = state.cascade.read().clone();

    rsx! {
        div {
            style: "margin: 8px 0;",
            label {
                style: "font-weight: bold;",
                "Lots: "
            }
            div {
                style: "max-height: 160px; overflow-y: auto; border: 1px solid #ccc; border-radius: 4px; padding: 4px 8px;",
                if cascade.lot_options().is_empty() {
                    p {
                        style: "margin: 4px 0; font-size: 12px; color: #888;",
                        "No lots for the current filters."
                    }
                }
                for lot in cascade.lot_options().iter() {
                    label {
                        style: "display: block; font-size: 13px;",
                        input {
                            r#type: "checkbox",
                            checked: cascade.is_lot_selected(lot),
                            onchange: {
                                let lot = lot.clone();
                                move |_| state.cascade.write().toggle_lot(&lot)
                            },
                        }
                        " {lot}"
                    }
                }
            }
        }
    }
}
