use crate::config::AppConfig;
use crate::models::{
    aggregate::RawDataPoint,
    error::AppError,
    options::{
        Dimension, DimensionOptions, DimensionRow, FilterOption, FrequencyRow, FuelRow, MetricRow,
        PrimeMoverRow, StateRow, normalize,
    },
    selection::AggregateQuery,
};
use reqwest::Url;
use serde::de::DeserializeOwned;

const AGGREGATE_PATH: &str = "/data/aggregate";

/// Read access to the aggregation backend.
///
/// The dashboard only talks to the backend through this trait, so the
/// controller flow can be driven by an in-memory implementation in tests.
#[allow(async_fn_in_trait)]
pub trait EnergyApi {
    /// Fetches all five dimension lists. Fails as a whole if any list fails.
    async fn fetch_filter_options(&self) -> Result<DimensionOptions, AppError>;

    /// Fetches aggregated data points for a query.
    async fn fetch_aggregate(&self, query: &AggregateQuery)
    -> Result<Vec<RawDataPoint>, AppError>;
}

/// Builds the full `/data/aggregate` URL, repeating multi-valued keys.
pub fn aggregate_url(config: &AppConfig, query: &AggregateQuery) -> Result<Url, AppError> {
    Url::parse_with_params(
        &config.endpoint(AGGREGATE_PATH),
        query.pairs().iter().map(|(k, v)| (*k, v.as_str())),
    )
    .map_err(|e| AppError::ConfigError(format!("Invalid aggregate URL: {e}")))
}

// ENERGY CLIENT
/// HTTP client for the energy aggregation API.
#[derive(Clone)]
pub struct EnergyClient {
    http: reqwest::Client,
    config: AppConfig,
}

impl EnergyClient {
    /// Creates a new client with the specified configuration.
    pub fn with_config(config: AppConfig) -> Result<Self, AppError> {
        let http = reqwest::Client::builder()
            .build()
            .map_err(|e| AppError::ConfigError(format!("Failed to create HTTP client: {e}")))?;

        Ok(Self { http, config })
    }

    /// Returns a reference to the client's configuration.
    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    async fn fetch_dimension<R: DimensionRow>(
        &self,
        dimension: Dimension,
    ) -> Result<Vec<FilterOption>, AppError> {
        let rows: Vec<R> = self
            .get_json(&self.config.endpoint(dimension.path()))
            .await
            .map_err(|e| AppError::ApiError(format!("Failed to load {dimension}: {e}")))?;

        Ok(normalize(rows))
    }

    /// Executes a single GET and decodes the JSON body.
    async fn get_json<T: DeserializeOwned>(&self, url: &str) -> Result<T, AppError> {
        let response = self
            .http
            .get(url)
            .send()
            .await
            .map_err(|e| self.classify_error(e))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(self.error_for_status(status, &body));
        }

        response
            .json()
            .await
            .map_err(|e| AppError::ApiError(format!("Failed to parse response: {e}")))
    }

    /// Converts a reqwest error into an appropriate AppError.
    fn classify_error(&self, error: reqwest::Error) -> AppError {
        if error.is_timeout() {
            AppError::ApiError(format!("Request timeout: {error}"))
        } else if error.is_request() {
            AppError::ApiError(format!("Request error: {error}"))
        } else {
            AppError::ApiError(format!("Network error: {error}"))
        }
    }

    /// Creates an error based on HTTP status code.
    fn error_for_status(&self, status: reqwest::StatusCode, body: &str) -> AppError {
        match status.as_u16() {
            401 | 403 => AppError::AuthError(format!("Authentication failed: {status}")),
            404 => AppError::NotFound(format!("Resource not found: {body}")),
            400..=499 => AppError::ApiError(format!("Client error {status}: {body}")),
            500..=599 => AppError::ApiError(format!("Server error {status}: {body}")),
            _ => AppError::ApiError(format!("Unexpected status {status}: {body}")),
        }
    }
}

impl PartialEq for EnergyClient {
    fn eq(&self, other: &Self) -> bool {
        self.config == other.config
    }
}

impl EnergyApi for EnergyClient {
    async fn fetch_filter_options(&self) -> Result<DimensionOptions, AppError> {
        let (frequencies, metrics, fuel_codes, prime_movers, states) = futures::try_join!(
            self.fetch_dimension::<FrequencyRow>(Dimension::Frequencies),
            self.fetch_dimension::<MetricRow>(Dimension::Metrics),
            self.fetch_dimension::<FuelRow>(Dimension::FuelCodes),
            self.fetch_dimension::<PrimeMoverRow>(Dimension::PrimeMovers),
            self.fetch_dimension::<StateRow>(Dimension::States),
        )?;

        Ok(DimensionOptions {
            frequencies,
            metrics,
            fuel_codes,
            prime_movers,
            states,
        })
    }

    async fn fetch_aggregate(
        &self,
        query: &AggregateQuery,
    ) -> Result<Vec<RawDataPoint>, AppError> {
        let url = aggregate_url(&self.config, query)?;
        self.get_json(url.as_str()).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::selection::SelectionState;
    use chrono::NaiveDate;

    fn selection() -> SelectionState {
        let mut selection = SelectionState::new(NaiveDate::from_ymd_opt(2026, 10, 17).unwrap());
        selection.frequency = Some("M".to_string());
        selection.metric = Some("GEN".to_string());
        selection
    }

    #[test]
    fn test_client_creation() {
        let client = EnergyClient::with_config(AppConfig::default());
        assert!(client.is_ok());
    }

    #[test]
    fn test_aggregate_url_scalar_params() {
        let query = AggregateQuery::from_selection(&selection()).unwrap();
        let url = aggregate_url(&AppConfig::default(), &query).unwrap();

        assert_eq!(
            url.as_str(),
            "http://localhost:8000/data/aggregate?start_date=2025-10-17&end_date=2026-10-17&frequency_code=M&metric_codes=GEN"
        );
    }

    #[test]
    fn test_aggregate_url_repeats_codes() {
        let mut selection = selection();
        selection.fuel_codes.insert("NG".to_string());
        selection.fuel_codes.insert("COL".to_string());
        selection.state_codes.insert("TX".to_string());

        let query = AggregateQuery::from_selection(&selection).unwrap();
        let config = AppConfig::builder()
            .base_url("https://api.example.com/")
            .build()
            .unwrap();
        let url = aggregate_url(&config, &query).unwrap();

        assert!(url.as_str().starts_with("https://api.example.com/data/aggregate?"));
        let fuels: Vec<String> = url
            .query_pairs()
            .filter(|(k, _)| k == "fuel_codes")
            .map(|(_, v)| v.into_owned())
            .collect();
        assert_eq!(fuels, vec!["COL", "NG"]);
        assert_eq!(url.query_pairs().filter(|(k, _)| k == "state_codes").count(), 1);
        assert_eq!(
            url.query_pairs()
                .filter(|(k, _)| k == "prime_mover_codes")
                .count(),
            0
        );
    }

    #[test]
    fn test_error_for_status_mapping() {
        let client = EnergyClient::with_config(AppConfig::default()).unwrap();

        assert!(matches!(
            client.error_for_status(reqwest::StatusCode::UNAUTHORIZED, ""),
            AppError::AuthError(_)
        ));
        assert!(matches!(
            client.error_for_status(reqwest::StatusCode::NOT_FOUND, "missing"),
            AppError::NotFound(_)
        ));
        assert_eq!(
            client
                .error_for_status(reqwest::StatusCode::INTERNAL_SERVER_ERROR, "boom")
                .to_string(),
            "API error: Server error 500 Internal Server Error: boom"
        );
    }
}
