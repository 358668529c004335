//! Progression series derived from ledger histories.

use crate::{Error, Result, TrainingEntry, Tracked};
use chrono::NaiveDate;
use serde::Serialize;
use std::fmt;
use std::str::FromStr;

/// Scalar derived from one history entry
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub enum Metric {
    /// Heaviest weight lifted
    #[default]
    Weight,
    /// Total reps
    Reps,
    /// Total volume (reps × weight)
    Volume,
    /// Number of sets
    Sets,
}

impl Metric {
    pub const ALL: [Metric; 4] = [Metric::Weight, Metric::Reps, Metric::Volume, Metric::Sets];

    pub fn as_str(&self) -> &'static str {
        match self {
            Metric::Weight => "weight",
            Metric::Reps => "reps",
            Metric::Volume => "volume",
            Metric::Sets => "sets",
        }
    }

    pub fn value(&self, entry: &TrainingEntry) -> f64 {
        match self {
            Metric::Weight => entry.max_weight(),
            Metric::Reps => entry.total_reps() as f64,
            Metric::Volume => entry.total_volume(),
            Metric::Sets => f64::from(entry.sets),
        }
    }
}

impl fmt::Display for Metric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Metric {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "weight" => Ok(Metric::Weight),
            "reps" => Ok(Metric::Reps),
            "volume" => Ok(Metric::Volume),
            "sets" => Ok(Metric::Sets),
            _ => Err(Error::InvalidMetric(s.to_string())),
        }
    }
}

/// One point of a progression series
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct DataPoint {
    pub date: NaiveDate,
    pub value: f64,
}

/// Project a ledger's history onto a metric, one point per date
///
/// Entries are sorted by date (stable, so same-day entries keep their
/// logging order) and entries sharing a date are summed into one point.
pub fn project<T: Tracked + ?Sized>(ledger: &T, metric: Metric) -> Vec<DataPoint> {
    let mut entries: Vec<&TrainingEntry> = ledger.history().iter().collect();
    entries.sort_by_key(|e| e.date);

    let mut series: Vec<DataPoint> = Vec::new();
    for entry in entries {
        let value = metric.value(entry);
        match series.last_mut() {
            Some(last) if last.date == entry.date => last.value += value,
            _ => series.push(DataPoint {
                date: entry.date,
                value,
            }),
        }
    }
    series
}

/// Like [`project`], with the metric given by name
pub fn project_named<T: Tracked + ?Sized>(ledger: &T, metric: &str) -> Result<Vec<DataPoint>> {
    Ok(project(ledger, metric.parse()?))
}
