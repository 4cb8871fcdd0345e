//! Native HTTP client for the yield dashboard backend.
//!
//! Only built with the `api` feature; the WASM dashboard uses its own
//! fetch adapter against the same endpoints.

use crate::error::{ApiError, Result};
use crate::query::{
    TrendQuery, DATES_ENDPOINT, LOTS_ENDPOINT, MACHINES_ENDPOINT, RECIPES_ENDPOINT, TREND_ENDPOINT,
};
use crate::trend::DashboardData;
use log::debug;
use serde::de::DeserializeOwned;

/// Async client for the dashboard REST API.
///
/// Carries the base URL and an optional bearer token. The token comes from
/// whatever signed the caller in; a missing or expired one surfaces as an
/// ordinary [`ApiError::Status`] failure.
#[derive(Debug, Clone)]
pub struct DashboardClient {
    http: reqwest::Client,
    base_url: String,
    token: Option<String>,
}

impl DashboardClient {
    pub fn new(base_url: impl Into<String>) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(60))
            .build()?;
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Ok(DashboardClient {
            http,
            base_url,
            token: None,
        })
    }

    /// Attach a bearer token to every request.
    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&'static str, String)],
    ) -> Result<T> {
        let url = format!("{}{}", self.base_url, path);
        debug!("GET {url} {query:?}");

        let mut request = self.http.get(&url).query(query);
        if let Some(token) = &self.token {
            request = request.bearer_auth(token);
        }

        let response = request.send().await?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ApiError::from_status_body(status.as_u16(), &body));
        }

        response.json::<T>().await.map_err(ApiError::from)
    }

    /// `GET /filter/dates` - every date with yield data, ascending.
    pub async fn fetch_dates(&self) -> Result<Vec<String>> {
        self.get_json(DATES_ENDPOINT, &[]).await
    }

    /// `GET /filter/machines` - stations with lots in the date range.
    pub async fn fetch_stations(&self, date_from: &str, date_to: &str) -> Result<Vec<String>> {
        self.get_json(
            MACHINES_ENDPOINT,
            &[
                ("date_from", date_from.to_string()),
                ("date_to", date_to.to_string()),
            ],
        )
        .await
    }

    /// `GET /filter/recipes` - recipes run on the station in the range.
    pub async fn fetch_recipes(
        &self,
        date_from: &str,
        date_to: &str,
        station: &str,
    ) -> Result<Vec<String>> {
        self.get_json(
            RECIPES_ENDPOINT,
            &[
                ("date_from", date_from.to_string()),
                ("date_to", date_to.to_string()),
                ("station", station.to_string()),
            ],
        )
        .await
    }

    /// `GET /filter/lots` - lots for the station/recipe in the range.
    /// The recipe travels as `product` on the wire.
    pub async fn fetch_lots(
        &self,
        date_from: &str,
        date_to: &str,
        station: &str,
        recipe: &str,
    ) -> Result<Vec<String>> {
        self.get_json(
            LOTS_ENDPOINT,
            &[
                ("date_from", date_from.to_string()),
                ("date_to", date_to.to_string()),
                ("station", station.to_string()),
                ("product", recipe.to_string()),
            ],
        )
        .await
    }

    /// `GET /yield/trend` - the dashboard payload for an assembled query.
    pub async fn fetch_trend(&self, query: &TrendQuery) -> Result<DashboardData> {
        self.get_json(TREND_ENDPOINT, &query.to_query_pairs()).await
    }
}

#[cfg(test)]
mod test {
    use super::DashboardClient;

    #[test]
    fn test_base_url_trailing_slash_trimmed() {
        let client = DashboardClient::new("http://127.0.0.1:8000/").unwrap();
        assert_eq!(client.base_url, "http://127.0.0.1:8000");
    }
}
