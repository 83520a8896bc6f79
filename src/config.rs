use crate::models::error::AppError;

/// Configuration constants for the application
pub struct Config;

impl Config {
    /// Frequency code selected by default when the backend offers it
    pub const DEFAULT_FREQUENCY: &'static str = "M";

    /// Metric code selected by default when the backend offers it
    pub const DEFAULT_METRIC: &'static str = "GEN";

    /// Length of the default date range, ending today
    pub const DEFAULT_RANGE_MONTHS: u32 = 12;

    /// Number of descriptions shown in a filter trigger before "+N more"
    pub const SUMMARY_LABEL_LIMIT: usize = 2;

    /// Maximum rows rendered by the data table
    pub const TABLE_ROW_LIMIT: usize = 100;
}

const DEFAULT_BASE_URL: &str = "http://localhost:8000";

/// Runtime configuration, resolved once when the app starts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    base_url: String,
}

impl AppConfig {
    /// Creates a builder for constructing an `AppConfig`.
    pub fn builder() -> AppConfigBuilder {
        AppConfigBuilder::default()
    }

    /// Resolves the configuration from the build environment.
    ///
    /// WASM has no process environment, so `DASHBOARD_API_URL` is read at
    /// compile time.
    pub fn from_env() -> Result<Self, AppError> {
        let mut builder = Self::builder();
        if let Some(url) = option_env!("DASHBOARD_API_URL") {
            builder = builder.base_url(url);
        }
        builder.build()
    }

    /// Base URL of the aggregation API, without a trailing slash.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Joins an endpoint path onto the base URL.
    pub fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
        }
    }
}

/// Builder for constructing an `AppConfig` with custom settings.
#[derive(Debug, Default)]
pub struct AppConfigBuilder {
    base_url: Option<String>,
}

impl AppConfigBuilder {
    /// Sets the base URL of the aggregation API.
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = Some(url.into());
        self
    }

    /// Builds the `AppConfig`, rejecting URLs that are not http(s).
    pub fn build(self) -> Result<AppConfig, AppError> {
        let raw = self.base_url.unwrap_or_else(|| DEFAULT_BASE_URL.to_string());
        let base_url = raw.trim().trim_end_matches('/').to_string();

        if !(base_url.starts_with("http://") || base_url.starts_with("https://")) {
            return Err(AppError::ConfigError(format!(
                "Base URL must start with http:// or https://, got '{raw}'"
            )));
        }

        Ok(AppConfig { base_url })
    }
}
