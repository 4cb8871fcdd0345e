//! Defect detail table.

use crate::state::AppState;
use dioxus::prelude::*;

/// Table of sampled defect positions for the last dashboard query.
#[component]
pub fn DetailTable() -> Element {
    let state = use_context::<AppState>();
    let details = state
        .dashboard
        .read()
        .as_ref()
        .map(|data| data.defect_details.clone())
        .unwrap_or_default();

    rsx! {
        div {
            style: "margin-top: 12px; max-height: 260px; overflow-y: auto;",
            table {
                style: "width: 100%; border-collapse: collapse; font-size: 12px;",
                thead {
                    tr {
                        style: "text-align: left; border-bottom: 1px solid #ccc;",
                        th { "Lot" }
                        th { "Defect" }
                        th { "X" }
                        th { "Y" }
                        th { "Severity" }
                        th { "Wafer" }
                    }
                }
                tbody {
                    for detail in details.iter() {
                        tr {
                            style: "border-bottom: 1px solid #eee;",
                            td { "{detail.lot_id}" }
                            td { "{detail.defect_type}" }
                            td { "{detail.x}" }
                            td { "{detail.y}" }
                            td { {detail.severity.clone().unwrap_or_default()} }
                            td { {detail.wafer.map(|w| w.to_string()).unwrap_or_default()} }
                        }
                    }
                }
            }
            if details.is_empty() {
                p {
                    style: "font-size: 12px; color: #888; text-align: center;",
                    "No defect details."
                }
            }
        }
    }
}
