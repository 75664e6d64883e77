//! Wind API Client
//!
//! A reqwest client for the wind generation service: bound discovery and series retrieval.

use crate::api::WindApi;
use crate::api::error::ApiError;
use crate::consts::cli_consts::{INPUT_DATE_FORMAT, network};
use crate::date_range::{DateBounds, Selection};
use crate::environment::Environment;
use crate::series::{Sample, parse_api_datetime};
use log::debug;
use reqwest::{Client, ClientBuilder, Response};
use serde::Deserialize;
use serde::de::DeserializeOwned;

// User-Agent string with CLI version
const USER_AGENT: &str = concat!("wind-dashboard/", env!("CARGO_PKG_VERSION"));

/// Body of `GET /cap-dates/`.
#[derive(Debug, Deserialize)]
struct CapDatesResponse {
    min_date: String,
    max_date: String,
}

impl CapDatesResponse {
    fn into_bounds(self) -> Result<DateBounds, ApiError> {
        let min = parse_api_datetime(&self.min_date).map_err(ApiError::InvalidDate)?;
        let max = parse_api_datetime(&self.max_date).map_err(ApiError::InvalidDate)?;
        DateBounds::new(min.date_naive(), max.date_naive())
            .map_err(|e| ApiError::InvalidDate(e.to_string()))
    }
}

#[derive(Debug, Clone)]
pub struct WindApiClient {
    client: Client,
    environment: Environment,
}

impl WindApiClient {
    pub fn new(environment: Environment) -> Result<Self, ApiError> {
        let client = ClientBuilder::new()
            .connect_timeout(network::connect_timeout())
            .timeout(network::request_timeout())
            .user_agent(USER_AGENT)
            .build()?;
        Ok(Self {
            client,
            environment,
        })
    }

    fn build_url(&self, endpoint: &str) -> String {
        format!(
            "{}/{}",
            self.environment.api_url().trim_end_matches('/'),
            endpoint.trim_start_matches('/')
        )
    }

    fn decode_response<T: DeserializeOwned>(bytes: &[u8]) -> Result<T, ApiError> {
        serde_json::from_slice(bytes).map_err(ApiError::Decode)
    }

    async fn handle_response_status(response: Response) -> Result<Response, ApiError> {
        if !response.status().is_success() {
            return Err(ApiError::from_response(response).await);
        }
        Ok(response)
    }

    async fn get_request<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        query: &[(&str, String)],
    ) -> Result<T, ApiError> {
        let url = self.build_url(endpoint);
        debug!("GET {} {:?}", url, query);
        let response = self.client.get(&url).query(query).send().await?;

        let response = Self::handle_response_status(response).await?;
        let response_bytes = response.bytes().await?;
        Self::decode_response(&response_bytes)
    }
}

#[async_trait::async_trait]
impl WindApi for WindApiClient {
    fn environment(&self) -> &Environment {
        &self.environment
    }

    async fn discover_bounds(&self) -> Result<DateBounds, ApiError> {
        let response: CapDatesResponse = self.get_request("cap-dates/", &[]).await?;
        response.into_bounds()
    }

    async fn fetch_series(&self, selection: Selection) -> Result<Vec<Sample>, ApiError> {
        let query = [
            (
                "start_date",
                selection.start().format(INPUT_DATE_FORMAT).to_string(),
            ),
            (
                "end_date",
                selection.end().format(INPUT_DATE_FORMAT).to_string(),
            ),
        ];
        self.get_request("/", &query).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn client(url: &str) -> WindApiClient {
        WindApiClient::new(url.parse().unwrap()).unwrap()
    }

    #[test]
    fn test_build_url() {
        let client = client("http://localhost:8000/api/");
        assert_eq!(
            client.build_url("cap-dates/"),
            "http://localhost:8000/api/cap-dates/"
        );
        assert_eq!(client.build_url("/"), "http://localhost:8000/api/");
    }

    #[test]
    fn test_cap_dates_into_bounds() {
        let response: CapDatesResponse = WindApiClient::decode_response(
            br#"{"min_date": "2020-09-20T00:00:00", "max_date": "2024-01-18T23:30:00Z"}"#,
        )
        .unwrap();
        let bounds = response.into_bounds().unwrap();
        assert_eq!(bounds.min(), NaiveDate::from_ymd_opt(2020, 9, 20).unwrap());
        assert_eq!(bounds.max(), NaiveDate::from_ymd_opt(2024, 1, 18).unwrap());
    }

    #[test]
    fn test_cap_dates_rejects_bad_dates() {
        let response = CapDatesResponse {
            min_date: "2024-02-01".to_string(),
            max_date: "not a date".to_string(),
        };
        assert!(matches!(
            response.into_bounds(),
            Err(ApiError::InvalidDate(_))
        ));

        let reversed = CapDatesResponse {
            min_date: "2024-02-01".to_string(),
            max_date: "2024-01-01".to_string(),
        };
        assert!(matches!(
            reversed.into_bounds(),
            Err(ApiError::InvalidDate(_))
        ));
    }

    #[test]
    fn test_decode_rejects_malformed_series() {
        let result: Result<Vec<Sample>, ApiError> =
            WindApiClient::decode_response(br#"{"detail": "Not Found"}"#);
        assert!(matches!(result, Err(ApiError::Decode(_))));
    }

    #[tokio::test]
    async fn test_unreachable_server_is_reqwest_error() {
        // Port 9 (discard) on localhost is not expected to serve HTTP.
        let client = client("http://127.0.0.1:9/api");
        let result = client.discover_bounds().await;
        assert!(matches!(result, Err(ApiError::Reqwest(_))));
    }
}
