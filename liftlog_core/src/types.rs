//! Core domain types shared by the ledgers and the session store.
//!
//! - Exercise variants (equipment, grip, execution)
//! - Training entries recorded in muscle and exercise histories

use crate::{Error, Result};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

// ============================================================================
// Variant
// ============================================================================

/// How an exercise was performed
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct Variant {
    pub equipment: String,
    pub grip: String,
    pub execution: String,
}

// ============================================================================
// Training entries
// ============================================================================

/// One applied set-group in a muscle or exercise history.
///
/// `reps[i]` pairs with `weight[i]`, and `volume[i] = reps[i] * weight[i]`.
/// Exercise histories carry the variant in effect when the entry was
/// logged; muscle histories leave it empty.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct TrainingEntry {
    pub date: NaiveDate,
    pub sets: u32,
    pub reps: Vec<u32>,
    pub weight: Vec<f64>,
    pub volume: Vec<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub variant: Option<Variant>,
}

impl TrainingEntry {
    /// Build an entry from per-set reps and weights, validating them first
    pub fn new(date: NaiveDate, reps: &[u32], weights: &[f64]) -> Result<Self> {
        validate_sets(reps, weights)?;

        let volume = reps
            .iter()
            .zip(weights)
            .map(|(r, w)| f64::from(*r) * w)
            .collect();

        Ok(Self {
            date,
            sets: reps.len() as u32,
            reps: reps.to_vec(),
            weight: weights.to_vec(),
            volume,
            variant: None,
        })
    }

    /// Same entry tagged with the variant it was performed with
    pub fn with_variant(mut self, variant: Variant) -> Self {
        self.variant = Some(variant);
        self
    }

    pub fn total_reps(&self) -> u64 {
        self.reps.iter().map(|r| u64::from(*r)).sum()
    }

    pub fn total_volume(&self) -> f64 {
        self.volume.iter().sum()
    }

    /// Heaviest weight of the entry (0 for an entry without sets)
    pub fn max_weight(&self) -> f64 {
        self.weight.iter().copied().fold(0.0, f64::max)
    }
}

/// Check that per-set reps and weights describe a loggable set-group
///
/// Rejects mismatched lengths, empty set lists and negative or
/// non-finite weights.
pub fn validate_sets(reps: &[u32], weights: &[f64]) -> Result<()> {
    if reps.len() != weights.len() {
        return Err(Error::Validation(format!(
            "{} reps but {} weights; every set needs both",
            reps.len(),
            weights.len()
        )));
    }

    if reps.is_empty() {
        return Err(Error::Validation("at least one set is required".into()));
    }

    if let Some(bad) = weights.iter().find(|w| !w.is_finite() || **w < 0.0) {
        return Err(Error::Validation(format!(
            "weight {} is not a non-negative number",
            bad
        )));
    }

    Ok(())
}
