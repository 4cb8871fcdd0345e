//! Non-interactive walk of the filter cascade against the live API.
//!
//! Uses the same [`FilterCascade`] as the dashboard app: the initial chain
//! populates every stage with its default selection, then each override
//! flag re-enters the cascade exactly like a UI event.

use anyhow::{bail, Context};
use fyd_api::client::DashboardClient;
use fyd_api::query::parse_date;
use fyd_filter::{FetchPlan, FetchRequest, FilterCascade};
use log::info;

/// Drive one cascade chain to completion against the API.
pub async fn run_chain(
    client: &DashboardClient,
    cascade: &mut FilterCascade,
    mut plan: Option<FetchPlan>,
) -> anyhow::Result<()> {
    while let Some(current) = plan.take() {
        let values = match &current.request {
            FetchRequest::Dates => client.fetch_dates().await,
            FetchRequest::Stations { date_from, date_to } => {
                client.fetch_stations(date_from, date_to).await
            }
            FetchRequest::Recipes {
                date_from,
                date_to,
                station,
            } => client.fetch_recipes(date_from, date_to, station).await,
            FetchRequest::Lots {
                date_from,
                date_to,
                station,
                recipe,
                ..
            } => client.fetch_lots(date_from, date_to, station, recipe).await,
        }
        .with_context(|| format!("fetching {}", current.request.path()))?;

        plan = match current.request {
            FetchRequest::Dates => cascade.apply_dates(current.generation, values),
            FetchRequest::Stations { .. } => cascade.apply_stations(current.generation, values),
            FetchRequest::Recipes { .. } => cascade.apply_recipes(current.generation, values),
            FetchRequest::Lots { select_all, .. } => {
                cascade.apply_lots(current.generation, select_all, values);
                None
            }
        };
    }
    Ok(())
}

/// Run the `filters` subcommand.
pub async fn run_filters(
    base_url: &str,
    token: Option<&str>,
    date_from: Option<&str>,
    date_to: Option<&str>,
    station: Option<&str>,
    recipe: Option<&str>,
) -> anyhow::Result<()> {
    let mut client = DashboardClient::new(base_url)?;
    if let Some(token) = token {
        client = client.with_token(token);
    }

    info!("Loading filter stages from {base_url}");
    let mut cascade = FilterCascade::new();
    let plan = cascade.begin();
    run_chain(&client, &mut cascade, Some(plan)).await?;

    if let Some(value) = date_from {
        parse_date(value).with_context(|| format!("invalid --date-from '{value}'"))?;
        ensure_option("date", cascade.date_options(), value)?;
        let plan = cascade.select_date_from(value);
        run_chain(&client, &mut cascade, plan).await?;
    }
    if let Some(value) = date_to {
        parse_date(value).with_context(|| format!("invalid --date-to '{value}'"))?;
        ensure_option("date", cascade.date_options(), value)?;
        let plan = cascade.select_date_to(value);
        run_chain(&client, &mut cascade, plan).await?;
    }
    if let Some(value) = station {
        ensure_option("station", cascade.station_options(), value)?;
        let plan = cascade.select_station(value);
        run_chain(&client, &mut cascade, plan).await?;
    }
    if let Some(value) = recipe {
        ensure_option("recipe", cascade.recipe_options(), value)?;
        let plan = cascade.select_recipe(value);
        run_chain(&client, &mut cascade, plan).await?;
    }

    print_stages(&cascade);
    Ok(())
}

fn ensure_option(stage: &str, options: &[String], value: &str) -> anyhow::Result<()> {
    if options.iter().any(|option| option == value) {
        return Ok(());
    }
    bail!(
        "{stage} '{value}' is not available; choose from: {}",
        options.join(", ")
    );
}

fn print_stages(cascade: &FilterCascade) {
    println!(
        "Date range: {} .. {} ({} dates with data)",
        cascade.date_from(),
        cascade.date_to(),
        cascade.date_options().len()
    );
    print_single("Stations", cascade.station_options(), cascade.station());
    print_single("Recipes", cascade.recipe_options(), cascade.recipe());
    println!(
        "Lots ({} available, {} selected):",
        cascade.lot_options().len(),
        cascade.selected_lots().len()
    );
    for lot in cascade.lot_options() {
        let marker = if cascade.is_lot_selected(lot) { "*" } else { " " };
        println!("  {marker} {lot}");
    }
}

fn print_single(title: &str, options: &[String], selected: &str) {
    println!("{title} ({}):", options.len());
    for option in options {
        let marker = if option == selected { "*" } else { " " };
        println!("  {marker} {option}");
    }
}

#[cfg(test)]
mod test {
    use super::ensure_option;

    #[test]
    fn test_ensure_option_accepts_known_values() {
        let options = vec!["M1".to_string(), "M2".to_string()];
        assert!(ensure_option("station", &options, "M2").is_ok());
    }

    #[test]
    fn test_ensure_option_rejects_unknown_values() {
        let options = vec!["M1".to_string()];
        let err = ensure_option("station", &options, "M9").unwrap_err();
        assert!(err.to_string().contains("M9"));
        assert!(err.to_string().contains("M1"));
    }
}
