use super::aggregate::RawDataPoint;
use super::options::DimensionOptions;
use crate::config::Config;
use chrono::{Months, NaiveDate};
use std::collections::BTreeSet;

const DATE_FORMAT: &str = "%Y-%m-%d";

/// Inclusive calendar date range.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateRange {
    /// The default range: one year back from `today`, through `today`.
    pub fn ending(today: NaiveDate) -> Self {
        let start = today
            .checked_sub_months(Months::new(Config::DEFAULT_RANGE_MONTHS))
            .unwrap_or(today);
        Self { start, end: today }
    }

    /// `start <= end`; the UI only advises this, it is never enforced.
    pub fn is_ordered(&self) -> bool {
        self.start <= self.end
    }

    pub fn start_param(&self) -> String {
        self.start.format(DATE_FORMAT).to_string()
    }

    pub fn end_param(&self) -> String {
        self.end.format(DATE_FORMAT).to_string()
    }
}

/// Parses the value of an `<input type="date">`.
pub fn parse_date(value: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(value, DATE_FORMAT).ok()
}

/// Everything the user can adjust. Fully reconstructable from its fields.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SelectionState {
    pub date_range: DateRange,
    pub frequency: Option<String>,
    pub metric: Option<String>,
    pub fuel_codes: BTreeSet<String>,
    pub prime_movers: BTreeSet<String>,
    pub state_codes: BTreeSet<String>,
}

impl SelectionState {
    /// Defaults before any options are known: no frequency or metric yet.
    pub fn new(today: NaiveDate) -> Self {
        Self {
            date_range: DateRange::ending(today),
            frequency: None,
            metric: None,
            fuel_codes: BTreeSet::new(),
            prime_movers: BTreeSet::new(),
            state_codes: BTreeSet::new(),
        }
    }

    /// Defaults resolved against loaded option lists.
    pub fn defaults(today: NaiveDate, options: &DimensionOptions) -> Self {
        Self {
            frequency: options.default_frequency(),
            metric: options.default_metric(),
            ..Self::new(today)
        }
    }

    pub fn group_by(&self) -> GroupBy {
        GroupBy::for_selection(self)
    }
}

/// Which dimension the charts break their series down by.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum GroupBy {
    #[default]
    FuelCode,
    PrimeMover,
}

impl GroupBy {
    /// Fuel if any fuel is selected, else prime mover if any prime mover is
    /// selected, else fuel.
    pub fn for_selection(selection: &SelectionState) -> Self {
        if !selection.fuel_codes.is_empty() {
            GroupBy::FuelCode
        } else if !selection.prime_movers.is_empty() {
            GroupBy::PrimeMover
        } else {
            GroupBy::FuelCode
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            GroupBy::FuelCode => "Fuel Type",
            GroupBy::PrimeMover => "Prime Mover",
        }
    }

    /// Group value of a point, if it carries one.
    pub fn key_of<'a>(&self, point: &'a RawDataPoint) -> Option<&'a str> {
        match self {
            GroupBy::FuelCode => point.fuel_code.as_deref(),
            GroupBy::PrimeMover => point.prime_mover_code.as_deref(),
        }
    }
}

/// Query string of `/data/aggregate`. Multi-valued filters repeat their key.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AggregateQuery {
    pairs: Vec<(&'static str, String)>,
}

impl AggregateQuery {
    /// Builds the query, or `None` when no metric is selected.
    pub fn from_selection(selection: &SelectionState) -> Option<Self> {
        let metric = selection.metric.as_ref()?;

        let mut pairs = vec![
            ("start_date", selection.date_range.start_param()),
            ("end_date", selection.date_range.end_param()),
        ];
        if let Some(frequency) = &selection.frequency {
            pairs.push(("frequency_code", frequency.clone()));
        }
        pairs.push(("metric_codes", metric.clone()));

        let repeated = [
            ("fuel_codes", &selection.fuel_codes),
            ("prime_mover_codes", &selection.prime_movers),
            ("state_codes", &selection.state_codes),
        ];
        for (key, codes) in repeated {
            pairs.extend(codes.iter().map(|code| (key, code.clone())));
        }

        Some(Self { pairs })
    }

    pub fn pairs(&self) -> &[(&'static str, String)] {
        &self.pairs
    }

    /// All values given for `key`, in order.
    pub fn values(&self, key: &str) -> Vec<&str> {
        self.pairs
            .iter()
            .filter(|(k, _)| *k == key)
            .map(|(_, v)| v.as_str())
            .collect()
    }

    pub fn count(&self, key: &str) -> usize {
        self.pairs.iter().filter(|(k, _)| *k == key).count()
    }
}
