//! Command implementations for the yield dashboard CLI.
//!
//! Provides subcommands for walking the filter cascade against the live
//! API and for fetching yield trend data, with optional CSV export.

use clap::Subcommand;

pub mod filters;
pub mod trend;

#[derive(Subcommand)]
pub enum Command {
    /// Walk the filter cascade against the API and print each stage
    Filters {
        /// Backend base URL
        #[arg(long, default_value = "http://127.0.0.1:8000")]
        base_url: String,

        /// Bearer token for the API
        #[arg(long)]
        token: Option<String>,

        /// Override the defaulted range start (YYYY-MM-DD)
        #[arg(long)]
        date_from: Option<String>,

        /// Override the defaulted range end (YYYY-MM-DD)
        #[arg(long)]
        date_to: Option<String>,

        /// Override the defaulted station
        #[arg(long)]
        station: Option<String>,

        /// Override the defaulted recipe
        #[arg(long)]
        recipe: Option<String>,
    },

    /// Fetch the yield trend and defect summary for a filter selection
    Trend {
        /// Backend base URL
        #[arg(long, default_value = "http://127.0.0.1:8000")]
        base_url: String,

        /// Bearer token for the API
        #[arg(long)]
        token: Option<String>,

        /// Range start (YYYY-MM-DD)
        #[arg(long)]
        date_from: String,

        /// Range end (YYYY-MM-DD)
        #[arg(long)]
        date_to: String,

        /// Station filter (all stations when omitted)
        #[arg(long, default_value = "")]
        station: String,

        /// Recipe filter (all recipes when omitted)
        #[arg(long, default_value = "")]
        recipe: String,

        /// Lot filter (repeatable; no lot filter when omitted)
        #[arg(long = "lot")]
        lots: Vec<String>,

        /// Write defect details to this CSV path
        #[arg(short = 'o', long)]
        output: Option<String>,
    },
}

pub async fn run(command: Command) -> anyhow::Result<()> {
    match command {
        Command::Filters {
            base_url,
            token,
            date_from,
            date_to,
            station,
            recipe,
        } => {
            filters::run_filters(
                &base_url,
                token.as_deref(),
                date_from.as_deref(),
                date_to.as_deref(),
                station.as_deref(),
                recipe.as_deref(),
            )
            .await
        }
        Command::Trend {
            base_url,
            token,
            date_from,
            date_to,
            station,
            recipe,
            lots,
            output,
        } => {
            let query = fyd_api::query::TrendQuery {
                date_from,
                date_to,
                station,
                recipe,
                lots,
            };
            trend::run_trend(&base_url, token.as_deref(), query, output.as_deref()).await
        }
    }
}
