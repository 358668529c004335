//! Muscle and exercise ledgers.
//!
//! A [`Ledgers`] value owns one [`MuscleLedger`] per canonical muscle and one
//! [`ExerciseLedger`] per catalog exercise. It is built from a validated
//! catalog and only mutated through the training engine.

use crate::catalog::{Catalog, ExerciseDefinition};
use crate::{Error, Result, TrainingEntry, Variant};
use std::collections::HashMap;
use std::fmt;

/// Anything with a name and a training history that can be projected
pub trait Tracked {
    fn name(&self) -> &str;
    fn history(&self) -> &[TrainingEntry];
}

// ============================================================================
// Muscle ledger
// ============================================================================

/// Running totals and history for one muscle group
#[derive(Clone, Debug, PartialEq)]
pub struct MuscleLedger {
    name: String,
    worked_sets: u64,
    worked_reps: u64,
    worked_volume: f64,
    history: Vec<TrainingEntry>,
}

impl MuscleLedger {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            worked_sets: 0,
            worked_reps: 0,
            worked_volume: 0.0,
            history: Vec::new(),
        }
    }

    pub fn worked_sets(&self) -> u64 {
        self.worked_sets
    }

    pub fn worked_reps(&self) -> u64 {
        self.worked_reps
    }

    pub fn worked_volume(&self) -> f64 {
        self.worked_volume
    }

    pub(crate) fn record(&mut self, entry: TrainingEntry) {
        self.worked_sets += u64::from(entry.sets);
        self.worked_reps += entry.total_reps();
        self.worked_volume += entry.total_volume();
        self.history.push(entry);
    }
}

impl Tracked for MuscleLedger {
    fn name(&self) -> &str {
        &self.name
    }

    fn history(&self) -> &[TrainingEntry] {
        &self.history
    }
}

impl fmt::Display for MuscleLedger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}: {} sets, {} reps, {} kg total",
            capitalize(&self.name),
            self.worked_sets,
            self.worked_reps,
            self.worked_volume
        )
    }
}

/// Upper-case the first character ("upper back" -> "Upper back")
pub fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

// ============================================================================
// Exercise ledger
// ============================================================================

/// Index of a resolved exercise inside a [`Ledgers`]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ExerciseId(usize);

/// History and current variant of one exercise
#[derive(Clone, Debug, PartialEq)]
pub struct ExerciseLedger {
    definition: ExerciseDefinition,
    equipment: String,
    grip: String,
    execution: String,
    history: Vec<TrainingEntry>,
    /// Positions of the definition's muscles in `Ledgers::muscles`
    muscle_slots: Vec<usize>,
}

impl ExerciseLedger {
    fn new(definition: ExerciseDefinition, muscle_slots: Vec<usize>) -> Self {
        Self {
            equipment: definition.default_equipment.clone(),
            grip: definition.default_grip.clone(),
            execution: definition.default_execution.clone(),
            definition,
            history: Vec::new(),
            muscle_slots,
        }
    }

    pub fn definition(&self) -> &ExerciseDefinition {
        &self.definition
    }

    pub fn equipment(&self) -> &str {
        &self.equipment
    }

    pub fn grip(&self) -> &str {
        &self.grip
    }

    pub fn execution(&self) -> &str {
        &self.execution
    }

    /// Snapshot of the currently configured variant
    pub fn variant(&self) -> Variant {
        Variant {
            equipment: self.equipment.clone(),
            grip: self.grip.clone(),
            execution: self.execution.clone(),
        }
    }

    pub fn set_equipment(&mut self, equipment: impl Into<String>) {
        self.equipment = equipment.into();
        if !self.definition.usual_equipment.contains(&self.equipment) {
            tracing::debug!(
                "{} set to unusual equipment '{}'",
                self.definition.name,
                self.equipment
            );
        }
    }

    pub fn set_grip(&mut self, grip: impl Into<String>) {
        self.grip = grip.into();
    }

    pub fn set_execution(&mut self, execution: impl Into<String>) {
        self.execution = execution.into();
    }

    pub(crate) fn muscle_slots(&self) -> &[usize] {
        &self.muscle_slots
    }

    pub(crate) fn record(&mut self, entry: TrainingEntry) {
        self.history.push(entry);
    }
}

impl Tracked for ExerciseLedger {
    fn name(&self) -> &str {
        &self.definition.name
    }

    fn history(&self) -> &[TrainingEntry] {
        &self.history
    }
}

// ============================================================================
// Ledgers
// ============================================================================

/// All muscle and exercise ledgers of one training log
#[derive(Clone, Debug, PartialEq)]
pub struct Ledgers {
    pub(crate) muscles: Vec<MuscleLedger>,
    pub(crate) exercises: Vec<ExerciseLedger>,
}

impl Ledgers {
    /// Build empty ledgers from a catalog
    ///
    /// Fails with [`Error::Catalog`] if the catalog is inconsistent.
    pub fn from_catalog(catalog: &Catalog) -> Result<Self> {
        let errors = catalog.validate();
        if !errors.is_empty() {
            return Err(Error::Catalog(errors.join("; ")));
        }

        let slots: HashMap<&str, usize> = catalog
            .muscles
            .iter()
            .enumerate()
            .map(|(i, name)| (name.as_str(), i))
            .collect();

        let muscles = catalog.muscles.iter().map(MuscleLedger::new).collect();

        let exercises = catalog
            .exercises
            .iter()
            .map(|def| {
                let muscle_slots = def
                    .muscles
                    .iter()
                    .map(|m| {
                        slots.get(m.as_str()).copied().ok_or_else(|| {
                            Error::Catalog(format!(
                                "Exercise '{}' references non-existent muscle '{}'",
                                def.name, m
                            ))
                        })
                    })
                    .collect::<Result<Vec<_>>>()?;
                Ok(ExerciseLedger::new(def.clone(), muscle_slots))
            })
            .collect::<Result<Vec<_>>>()?;

        tracing::debug!(
            "Built ledgers for {} muscles and {} exercises",
            catalog.muscles.len(),
            catalog.exercises.len()
        );

        Ok(Self { muscles, exercises })
    }

    pub fn muscles(&self) -> &[MuscleLedger] {
        &self.muscles
    }

    pub fn exercises(&self) -> &[ExerciseLedger] {
        &self.exercises
    }

    /// Look up a muscle ledger by name (case-insensitive)
    pub fn muscle(&self, name: &str) -> Result<&MuscleLedger> {
        let key = name.trim().to_lowercase();
        self.muscles
            .iter()
            .find(|m| m.name == key)
            .ok_or_else(|| Error::UnknownMuscle(name.to_string()))
    }

    /// Resolve an exercise name (case-insensitive) to its id
    pub fn resolve(&self, name: &str) -> Result<ExerciseId> {
        let key = name.trim().to_lowercase();
        self.exercises
            .iter()
            .position(|e| e.definition.name == key)
            .map(ExerciseId)
            .ok_or_else(|| Error::UnknownExercise(name.to_string()))
    }

    pub fn exercise(&self, id: ExerciseId) -> &ExerciseLedger {
        &self.exercises[id.0]
    }

    /// Mutable access for applying variant overrides before logging
    pub fn exercise_mut(&mut self, id: ExerciseId) -> &mut ExerciseLedger {
        &mut self.exercises[id.0]
    }

    pub fn exercise_named(&self, name: &str) -> Result<&ExerciseLedger> {
        Ok(self.exercise(self.resolve(name)?))
    }

    /// Find a muscle or an exercise by name, muscles first
    pub fn tracked(&self, name: &str) -> Result<&dyn Tracked> {
        if let Ok(muscle) = self.muscle(name) {
            return Ok(muscle as &dyn Tracked);
        }
        match self.exercise_named(name) {
            Ok(exercise) => Ok(exercise as &dyn Tracked),
            Err(_) => Err(Error::UnknownExercise(format!(
                "{} (neither a muscle nor an exercise)",
                name
            ))),
        }
    }

    /// Split borrow used by the training engine
    pub(crate) fn parts_mut(
        &mut self,
        id: ExerciseId,
    ) -> (&mut [MuscleLedger], &mut ExerciseLedger) {
        (self.muscles.as_mut_slice(), &mut self.exercises[id.0])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::build_default_catalog;
    use chrono::NaiveDate;

    #[test]
    fn test_ledgers_mirror_catalog() {
        let ledgers = Ledgers::from_catalog(&build_default_catalog()).unwrap();
        assert_eq!(ledgers.muscles().len(), 16);
        assert_eq!(ledgers.exercises().len(), 23);
        assert!(ledgers.muscles().iter().all(|m| m.history().is_empty()));
    }

    #[test]
    fn test_exercise_starts_with_default_variant() {
        let ledgers = Ledgers::from_catalog(&build_default_catalog()).unwrap();
        let pulldown = ledgers.exercise_named("pulldown").unwrap();
        assert_eq!(pulldown.equipment(), "cable");
        assert_eq!(pulldown.grip(), "overhand wide");
        assert_eq!(pulldown.execution(), "simultaneous");
    }

    #[test]
    fn test_inconsistent_catalog_is_fatal() {
        let mut catalog = build_default_catalog();
        catalog.muscles.retain(|m| m != "chest");

        let err = Ledgers::from_catalog(&catalog).unwrap_err();
        assert!(matches!(err, Error::Catalog(_)));
        assert!(err.to_string().contains("'chest'"));
    }

    #[test]
    fn test_lookup_errors() {
        let ledgers = Ledgers::from_catalog(&build_default_catalog()).unwrap();
        assert!(matches!(
            ledgers.resolve("zercher carry"),
            Err(Error::UnknownExercise(_))
        ));
        assert!(matches!(
            ledgers.muscle("neck"),
            Err(Error::UnknownMuscle(_))
        ));
        assert_eq!(ledgers.muscle("Upper Back").unwrap().name(), "upper back");
    }

    #[test]
    fn test_tracked_prefers_muscles_then_exercises() {
        let ledgers = Ledgers::from_catalog(&build_default_catalog()).unwrap();
        assert_eq!(ledgers.tracked("chest").unwrap().name(), "chest");
        assert_eq!(ledgers.tracked("Squat").unwrap().name(), "squat");
        assert!(ledgers.tracked("neck").is_err());
    }

    #[test]
    fn test_muscle_display() {
        let mut back = MuscleLedger::new("upper back");
        let date = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        back.record(TrainingEntry::new(date, &[10, 8, 6], &[60.0, 65.0, 70.0]).unwrap());
        assert_eq!(
            back.to_string(),
            "Upper back: 3 sets, 24 reps, 1540 kg total"
        );
    }
}
