use crate::config::Config;
use serde::Deserialize;
use serde::de::DeserializeOwned;

/// A selectable filter value: backend code plus human-readable label.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Deserialize)]
pub struct FilterOption {
    pub code: String,
    pub description: String,
}

impl FilterOption {
    pub fn new(code: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            description: description.into(),
        }
    }

    fn from_parts(code: Option<String>, description: Option<String>) -> Option<Self> {
        let code = code?;
        let description = description.unwrap_or_else(|| code.clone());
        Some(Self { code, description })
    }
}

/// The five filter dimensions served by the backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Dimension {
    Frequencies,
    Metrics,
    FuelCodes,
    PrimeMovers,
    States,
}

impl Dimension {
    /// Endpoint path relative to the API base URL.
    pub fn path(&self) -> &'static str {
        match self {
            Dimension::Frequencies => "/dimensions/frequencies",
            Dimension::Metrics => "/dimensions/metrics",
            Dimension::FuelCodes => "/dimensions/fuel_codes",
            Dimension::PrimeMovers => "/dimensions/prime_movers",
            Dimension::States => "/dimensions/states",
        }
    }

    /// Plural label used in empty-state messages ("No fuel types found").
    pub fn label(&self) -> &'static str {
        match self {
            Dimension::Frequencies => "frequencies",
            Dimension::Metrics => "metrics",
            Dimension::FuelCodes => "fuel types",
            Dimension::PrimeMovers => "prime movers",
            Dimension::States => "states",
        }
    }

    pub fn all() -> &'static [Dimension] {
        &[
            Dimension::Frequencies,
            Dimension::Metrics,
            Dimension::FuelCodes,
            Dimension::PrimeMovers,
            Dimension::States,
        ]
    }
}

impl std::fmt::Display for Dimension {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

// BACKEND ROW TYPES
/// A row of a dimension endpoint, in the backend's own field names.
pub trait DimensionRow: DeserializeOwned {
    /// Maps the row onto a `FilterOption`; `None` when the code is null.
    fn into_option(self) -> Option<FilterOption>;
}

#[derive(Deserialize, Debug)]
pub struct FrequencyRow {
    frequency_code: Option<String>,
    #[serde(default)]
    frequency_description: Option<String>,
}

impl DimensionRow for FrequencyRow {
    fn into_option(self) -> Option<FilterOption> {
        FilterOption::from_parts(self.frequency_code, self.frequency_description)
    }
}

#[derive(Deserialize, Debug)]
pub struct MetricRow {
    metric_code: Option<String>,
    #[serde(default)]
    metric_name: Option<String>,
}

impl DimensionRow for MetricRow {
    fn into_option(self) -> Option<FilterOption> {
        FilterOption::from_parts(self.metric_code, self.metric_name)
    }
}

#[derive(Deserialize, Debug)]
pub struct FuelRow {
    fuel_code: Option<String>,
    #[serde(default)]
    fuel_description: Option<String>,
}

impl DimensionRow for FuelRow {
    fn into_option(self) -> Option<FilterOption> {
        FilterOption::from_parts(self.fuel_code, self.fuel_description)
    }
}

#[derive(Deserialize, Debug)]
pub struct PrimeMoverRow {
    prime_mover_code: Option<String>,
    #[serde(default)]
    prime_mover_description: Option<String>,
}

impl DimensionRow for PrimeMoverRow {
    fn into_option(self) -> Option<FilterOption> {
        FilterOption::from_parts(self.prime_mover_code, self.prime_mover_description)
    }
}

#[derive(Deserialize, Debug)]
pub struct StateRow {
    code: Option<String>,
    #[serde(default)]
    description: Option<String>,
}

impl DimensionRow for StateRow {
    fn into_option(self) -> Option<FilterOption> {
        FilterOption::from_parts(self.code, self.description)
    }
}

/// Normalizes backend rows, dropping entries with a null code.
pub fn normalize<R: DimensionRow>(rows: Vec<R>) -> Vec<FilterOption> {
    rows.into_iter().filter_map(DimensionRow::into_option).collect()
}

/// All five option lists. Only ever committed together.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct DimensionOptions {
    pub frequencies: Vec<FilterOption>,
    pub metrics: Vec<FilterOption>,
    pub fuel_codes: Vec<FilterOption>,
    pub prime_movers: Vec<FilterOption>,
    pub states: Vec<FilterOption>,
}

impl DimensionOptions {
    pub fn get(&self, dimension: Dimension) -> &[FilterOption] {
        match dimension {
            Dimension::Frequencies => &self.frequencies,
            Dimension::Metrics => &self.metrics,
            Dimension::FuelCodes => &self.fuel_codes,
            Dimension::PrimeMovers => &self.prime_movers,
            Dimension::States => &self.states,
        }
    }

    /// Monthly if offered, else the first frequency.
    pub fn default_frequency(&self) -> Option<String> {
        preferred_or_first(&self.frequencies, Config::DEFAULT_FREQUENCY)
    }

    /// Net generation if offered, else the first metric.
    pub fn default_metric(&self) -> Option<String> {
        preferred_or_first(&self.metrics, Config::DEFAULT_METRIC)
    }
}

fn preferred_or_first(options: &[FilterOption], preferred: &str) -> Option<String> {
    options
        .iter()
        .find(|o| o.code == preferred)
        .or_else(|| options.first())
        .map(|o| o.code.clone())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_frequency_rows_drop_null_codes() {
        let json = r#"[
            {"frequency_code": "M", "frequency_description": "Monthly"},
            {"frequency_code": null, "frequency_description": "Broken"},
            {"frequency_code": "A", "frequency_description": null}
        ]"#;

        let rows: Vec<FrequencyRow> = serde_json::from_str(json).unwrap();
        let options = normalize(rows);

        assert_eq!(
            options,
            vec![FilterOption::new("M", "Monthly"), FilterOption::new("A", "A")]
        );
    }

    #[test]
    fn test_metric_rows_use_metric_name() {
        let json = r#"[{"metric_code": "GEN", "metric_name": "Net generation"}]"#;
        let rows: Vec<MetricRow> = serde_json::from_str(json).unwrap();
        assert_eq!(
            normalize(rows),
            vec![FilterOption::new("GEN", "Net generation")]
        );
    }

    #[test]
    fn test_state_rows_use_plain_field_names() {
        let json = r#"[{"code": "TX", "description": "Texas"}, {"code": null}]"#;
        let rows: Vec<StateRow> = serde_json::from_str(json).unwrap();
        assert_eq!(normalize(rows), vec![FilterOption::new("TX", "Texas")]);
    }

    #[test]
    fn test_default_frequency_prefers_monthly() {
        let options = DimensionOptions {
            frequencies: vec![
                FilterOption::new("A", "Annual"),
                FilterOption::new("M", "Monthly"),
            ],
            ..Default::default()
        };
        assert_eq!(options.default_frequency().as_deref(), Some("M"));
    }

    #[test]
    fn test_default_falls_back_to_first() {
        let options = DimensionOptions {
            frequencies: vec![
                FilterOption::new("Q", "Quarterly"),
                FilterOption::new("A", "Annual"),
            ],
            metrics: vec![FilterOption::new("CONS", "Consumption")],
            ..Default::default()
        };
        assert_eq!(options.default_frequency().as_deref(), Some("Q"));
        assert_eq!(options.default_metric().as_deref(), Some("CONS"));
    }

    #[test]
    fn test_default_metric_prefers_generation() {
        let options = DimensionOptions {
            metrics: vec![
                FilterOption::new("CONS", "Consumption"),
                FilterOption::new("GEN", "Net generation"),
            ],
            ..Default::default()
        };
        assert_eq!(options.default_metric().as_deref(), Some("GEN"));
    }

    #[test]
    fn test_defaults_empty_lists() {
        let options = DimensionOptions::default();
        assert_eq!(options.default_frequency(), None);
        assert_eq!(options.default_metric(), None);
    }

    #[test]
    fn test_dimension_paths() {
        assert_eq!(Dimension::all().len(), 5);
        assert_eq!(Dimension::FuelCodes.path(), "/dimensions/fuel_codes");
        assert_eq!(Dimension::PrimeMovers.to_string(), "prime movers");
    }
}
