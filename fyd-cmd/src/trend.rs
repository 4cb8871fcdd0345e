//! Trend query implementation: fetch, summarize, optionally export CSV.

use anyhow::{bail, Context};
use fyd_api::client::DashboardClient;
use fyd_api::query::{parse_date, TrendQuery};
use fyd_api::trend::DefectDetail;
use log::info;

/// Run the `trend` subcommand.
///
/// Station, recipe and lots may be empty - an empty field widens the query
/// rather than failing it. Only the date range is required.
pub async fn run_trend(
    base_url: &str,
    token: Option<&str>,
    query: TrendQuery,
    output: Option<&str>,
) -> anyhow::Result<()> {
    let from = parse_date(&query.date_from)
        .with_context(|| format!("invalid --date-from '{}'", query.date_from))?;
    let to = parse_date(&query.date_to)
        .with_context(|| format!("invalid --date-to '{}'", query.date_to))?;
    if to < from {
        bail!("--date-to {} precedes --date-from {}", query.date_to, query.date_from);
    }

    let mut client = DashboardClient::new(base_url)?;
    if let Some(token) = token {
        client = client.with_token(token);
    }

    info!(
        "Querying yield trend {} .. {}",
        query.date_from, query.date_to
    );
    let data = client.fetch_trend(&query).await?;

    if data.is_empty() {
        println!("No yield data matched the query.");
        return Ok(());
    }

    println!("Daily average yield:");
    for (date, avg) in data.dates.iter().zip(&data.avg_yield) {
        println!("  {date}  {avg:>6.2}%");
    }

    if !data.defect_pareto.is_empty() {
        println!("Defect pareto:");
        for entry in &data.defect_pareto {
            println!("  {:<16} {:>6}", entry.defect_type, entry.count);
        }
    }

    if let Some(path) = output {
        let csv = defect_csv(&data.defect_details)?;
        std::fs::write(path, csv)
            .with_context(|| format!("writing defect details to {path}"))?;
        info!(
            "{} defect details written to {}",
            data.defect_details.len(),
            path
        );
    }

    Ok(())
}

/// Render defect details as CSV: `lot_id,defect_type,x,y,severity,wafer`.
/// Missing severity/wafer become empty fields.
fn defect_csv(details: &[DefectDetail]) -> anyhow::Result<String> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.write_record(["lot_id", "defect_type", "x", "y", "severity", "wafer"])?;
    for detail in details {
        writer.write_record(&[
            detail.lot_id.clone(),
            detail.defect_type.clone(),
            detail.x.to_string(),
            detail.y.to_string(),
            detail.severity.clone().unwrap_or_default(),
            detail.wafer.map(|w| w.to_string()).unwrap_or_default(),
        ])?;
    }
    writer.flush()?;
    let bytes = writer
        .into_inner()
        .map_err(|err| anyhow::anyhow!("finalizing CSV writer: {err}"))?;
    Ok(String::from_utf8(bytes)?)
}

#[cfg(test)]
mod test {
    use super::defect_csv;
    use fyd_api::trend::DefectDetail;

    #[test]
    fn test_defect_csv_rows_and_optional_fields() {
        let details = vec![
            DefectDetail {
                lot_id: "L1".to_string(),
                defect_type: "scratch".to_string(),
                x: 12.5,
                y: 88.25,
                severity: Some("H".to_string()),
                wafer: Some(7),
            },
            DefectDetail {
                lot_id: "L2".to_string(),
                defect_type: "particle".to_string(),
                x: 3.0,
                y: 41.75,
                severity: None,
                wafer: None,
            },
        ];

        let csv = defect_csv(&details).unwrap();
        let mut lines = csv.lines();
        assert_eq!(
            lines.next(),
            Some("lot_id,defect_type,x,y,severity,wafer")
        );
        assert_eq!(lines.next(), Some("L1,scratch,12.5,88.25,H,7"));
        assert_eq!(lines.next(), Some("L2,particle,3,41.75,,"));
        assert_eq!(lines.next(), None);
    }

    #[test]
    fn test_defect_csv_empty_input_is_header_only() {
        let csv = defect_csv(&[]).unwrap();
        assert_eq!(csv.trim_end(), "lot_id,defect_type,x,y,severity,wafer");
    }
}
