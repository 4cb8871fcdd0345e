use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Date format used for API query parameters and responses: "YYYY-MM-DD"
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// `GET /filter/dates` -> ordered list of dates with data.
pub const DATES_ENDPOINT: &str = "/filter/dates";

/// `GET /filter/machines?date_from&date_to` -> station identifiers.
pub const MACHINES_ENDPOINT: &str = "/filter/machines";

/// `GET /filter/recipes?date_from&date_to&station` -> recipe identifiers.
pub const RECIPES_ENDPOINT: &str = "/filter/recipes";

/// `GET /filter/lots?date_from&date_to&station&product` -> lot identifiers.
pub const LOTS_ENDPOINT: &str = "/filter/lots";

/// `GET /yield/trend?...` -> [`crate::trend::DashboardData`].
pub const TREND_ENDPOINT: &str = "/yield/trend";

/// Parse an API date string ("YYYY-MM-DD").
pub fn parse_date(s: &str) -> Result<NaiveDate, chrono::ParseError> {
    NaiveDate::parse_from_str(s, DATE_FORMAT)
}

/// The assembled parameters for the terminal dashboard query.
///
/// `station`, `recipe` and `lots` may be empty; an empty field is simply
/// omitted from the request, widening the query rather than failing it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrendQuery {
    pub date_from: String,
    pub date_to: String,
    pub station: String,
    pub recipe: String,
    pub lots: Vec<String>,
}

impl TrendQuery {
    /// Render the query as URL parameter pairs.
    ///
    /// Empty values are skipped, the recipe travels under the backend's
    /// wire name `product`, and `lots` repeats as a multi-value key.
    pub fn to_query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::new();
        push_nonempty(&mut pairs, "date_from", &self.date_from);
        push_nonempty(&mut pairs, "date_to", &self.date_to);
        push_nonempty(&mut pairs, "station", &self.station);
        push_nonempty(&mut pairs, "product", &self.recipe);
        for lot in &self.lots {
            pairs.push(("lots", lot.clone()));
        }
        pairs
    }
}

fn push_nonempty(pairs: &mut Vec<(&'static str, String)>, key: &'static str, value: &str) {
    if !value.is_empty() {
        pairs.push((key, value.to_string()));
    }
}

/// Join parameter pairs into a query string.
///
/// Values are ISO dates and plant identifiers, so no percent-encoding is
/// applied.
pub fn query_string(pairs: &[(&'static str, String)]) -> String {
    pairs
        .iter()
        .map(|(key, value)| format!("{key}={value}"))
        .collect::<Vec<_>>()
        .join("&")
}

#[cfg(test)]
mod test {
    use super::{parse_date, query_string, TrendQuery};

    #[test]
    fn test_query_pairs_skip_empty_fields() {
        let query = TrendQuery {
            date_from: "2024-01-01".to_string(),
            date_to: "2024-01-31".to_string(),
            station: String::new(),
            recipe: String::new(),
            lots: Vec::new(),
        };
        assert_eq!(
            query.to_query_pairs(),
            vec![
                ("date_from", "2024-01-01".to_string()),
                ("date_to", "2024-01-31".to_string()),
            ]
        );
    }

    #[test]
    fn test_query_pairs_repeat_lots_and_rename_recipe() {
        let query = TrendQuery {
            date_from: "2024-01-01".to_string(),
            date_to: "2024-01-02".to_string(),
            station: "M1".to_string(),
            recipe: "R1".to_string(),
            lots: vec!["L1".to_string(), "L2".to_string()],
        };
        assert_eq!(
            query_string(&query.to_query_pairs()),
            "date_from=2024-01-01&date_to=2024-01-02&station=M1&product=R1&lots=L1&lots=L2"
        );
    }

    #[test]
    fn test_parse_date() {
        assert!(parse_date("2024-02-29").is_ok());
        assert!(parse_date("2024-13-01").is_err());
        assert!(parse_date("20240101").is_err());
    }
}
