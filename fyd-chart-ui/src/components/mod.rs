//! Reusable Dioxus RSX components for the yield dashboard.

mod apply_button;
mod chart_container;
mod chart_header;
mod date_range_picker;
mod detail_table;
mod error_display;
mod loading_spinner;
mod lot_selector;
mod recipe_selector;
mod station_selector;

pub use apply_button::ApplyButton;
pub use chart_container::ChartContainer;
pub use chart_header::ChartHeader;
pub use date_range_picker::DateRangePicker;
pub use detail_table::DetailTable;
pub use error_display::ErrorDisplay;
pub use loading_spinner::LoadingSpinner;
pub use lot_selector::LotSelector;
pub use recipe_selector::RecipeSelector;
pub use station_selector::StationSelector;
