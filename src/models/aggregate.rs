use super::error::AppError;
use super::selection::GroupBy;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

/// Label for points that carry no value for the grouping field.
pub const UNSPECIFIED: &str = "Unspecified";

/// One row of `/data/aggregate`, exactly as the backend sends it.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RawDataPoint {
    pub timestamp: String,
    pub metric_code: String,
    #[serde(default)]
    pub value: Option<f64>,
    #[serde(default)]
    pub unit_code: Option<String>,
    #[serde(default)]
    pub fuel_code: Option<String>,
    #[serde(default)]
    pub prime_mover_code: Option<String>,
    #[serde(default)]
    pub state_code: Option<String>,
    #[serde(default)]
    pub sector_code: Option<String>,
    #[serde(default)]
    pub region_code: Option<String>,
    #[serde(default)]
    pub subdivision_code: Option<String>,
    #[serde(default)]
    pub detail_raw: Option<serde_json::Value>,
}

/// Chart-ready time series: shared x axis, one value column per group.
#[derive(Clone, Debug, PartialEq)]
pub struct SeriesData {
    pub timestamps: Vec<String>,
    pub series: Vec<(String, Vec<Option<f64>>)>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct DataStats {
    pub count: usize,
    pub total: f64,
    pub min: f64,
    pub max: f64,
    pub unit: Option<String>,
}

fn group_label(point: &RawDataPoint, group_by: GroupBy) -> String {
    group_by.key_of(point).unwrap_or(UNSPECIFIED).to_string()
}

/// Pivots points into one series per group value, summing duplicates that
/// share a timestamp and group.
pub fn time_series(points: &[RawDataPoint], group_by: GroupBy) -> SeriesData {
    let timestamps: Vec<String> = points
        .iter()
        .map(|p| p.timestamp.clone())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect();

    let index: BTreeMap<&str, usize> = timestamps
        .iter()
        .enumerate()
        .map(|(i, ts)| (ts.as_str(), i))
        .collect();

    let mut columns: BTreeMap<String, Vec<Option<f64>>> = BTreeMap::new();
    for point in points {
        let column = columns
            .entry(group_label(point, group_by))
            .or_insert_with(|| vec![None; timestamps.len()]);

        if let (Some(value), Some(&i)) = (point.value, index.get(point.timestamp.as_str())) {
            column[i] = Some(column[i].unwrap_or(0.0) + value);
        }
    }

    SeriesData {
        timestamps,
        series: columns.into_iter().collect(),
    }
}

/// Total value per group, largest first.
pub fn composition(points: &[RawDataPoint], group_by: GroupBy) -> Vec<(String, f64)> {
    let mut totals: BTreeMap<String, f64> = BTreeMap::new();
    for point in points {
        if let Some(value) = point.value {
            *totals.entry(group_label(point, group_by)).or_default() += value;
        }
    }

    let mut slices: Vec<(String, f64)> = totals.into_iter().collect();
    slices.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal));
    slices
}

pub fn stats(points: &[RawDataPoint]) -> Result<DataStats, AppError> {
    let values: Vec<f64> = points.iter().filter_map(|p| p.value).collect();
    if values.is_empty() {
        return Err(AppError::DataError("No values available".to_string()));
    }

    let min = values.iter().fold(f64::INFINITY, |a, &b| a.min(b));
    let max = values.iter().fold(f64::NEG_INFINITY, |a, &b| a.max(b));
    let total: f64 = values.iter().sum();
    let unit = points.iter().find_map(|p| p.unit_code.clone());

    Ok(DataStats {
        count: points.len(),
        total,
        min,
        max,
        unit,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn point(ts: &str, fuel: Option<&str>, value: Option<f64>) -> RawDataPoint {
        RawDataPoint {
            timestamp: ts.to_string(),
            metric_code: "GEN".to_string(),
            value,
            unit_code: Some("MWh".to_string()),
            fuel_code: fuel.map(str::to_string),
            prime_mover_code: None,
            state_code: None,
            sector_code: None,
            region_code: None,
            subdivision_code: None,
            detail_raw: None,
        }
    }

    #[test]
    fn test_deserialize_minimal_point() {
        let json = r#"{"timestamp": "2024-01-01T00:00:00", "metric_code": "GEN", "value": 12.5}"#;
        let p: RawDataPoint = serde_json::from_str(json).unwrap();
        assert_eq!(p.value, Some(12.5));
        assert_eq!(p.fuel_code, None);
        assert_eq!(p.detail_raw, None);
    }

    #[test]
    fn test_deserialize_null_value_and_detail() {
        let json = r#"{
            "timestamp": "2024-01-01",
            "metric_code": "GEN",
            "value": null,
            "fuel_code": "NG",
            "detail_raw": {"source": "923"}
        }"#;
        let p: RawDataPoint = serde_json::from_str(json).unwrap();
        assert_eq!(p.value, None);
        assert_eq!(p.fuel_code.as_deref(), Some("NG"));
        assert!(p.detail_raw.is_some());
    }

    #[test]
    fn test_time_series_pivots_by_group() {
        let points = vec![
            point("2024-02", Some("NG"), Some(5.0)),
            point("2024-01", Some("NG"), Some(3.0)),
            point("2024-01", Some("COL"), Some(2.0)),
            point("2024-01", Some("COL"), Some(1.0)),
        ];

        let data = time_series(&points, GroupBy::FuelCode);

        assert_eq!(data.timestamps, vec!["2024-01", "2024-02"]);
        assert_eq!(
            data.series,
            vec![
                ("COL".to_string(), vec![Some(3.0), None]),
                ("NG".to_string(), vec![Some(3.0), Some(5.0)]),
            ]
        );
    }

    #[test]
    fn test_time_series_unspecified_group() {
        let points = vec![point("2024-01", None, Some(1.0))];
        let data = time_series(&points, GroupBy::PrimeMover);
        assert_eq!(data.series[0].0, UNSPECIFIED);
    }

    #[test]
    fn test_composition_sorted_descending() {
        let points = vec![
            point("2024-01", Some("NG"), Some(3.0)),
            point("2024-02", Some("NG"), Some(4.0)),
            point("2024-01", Some("SUN"), Some(10.0)),
            point("2024-01", Some("WND"), None),
        ];

        let slices = composition(&points, GroupBy::FuelCode);
        assert_eq!(
            slices,
            vec![("SUN".to_string(), 10.0), ("NG".to_string(), 7.0)]
        );
    }

    #[test]
    fn test_stats() {
        let points = vec![
            point("2024-01", Some("NG"), Some(3.0)),
            point("2024-02", Some("NG"), Some(9.0)),
            point("2024-03", Some("NG"), None),
        ];

        let s = stats(&points).unwrap();
        assert_eq!(s.count, 3);
        assert_eq!(s.total, 12.0);
        assert_eq!(s.min, 3.0);
        assert_eq!(s.max, 9.0);
        assert_eq!(s.unit.as_deref(), Some("MWh"));
    }

    #[test]
    fn test_stats_without_values() {
        assert!(stats(&[]).is_err());
    }
}
