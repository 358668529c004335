//! Default catalog of muscles and exercise definitions.
//!
//! Every exercise is plain data: the ledgers and the training engine treat
//! all of them the same way.

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Static description of an exercise
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct ExerciseDefinition {
    pub name: String,
    pub usual_equipment: Vec<String>,
    pub default_equipment: String,
    pub default_grip: String,
    pub default_execution: String,
    /// Names of the muscle groups trained, in display order
    pub muscles: Vec<String>,
}

/// The complete set of muscle groups and exercise definitions
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Catalog {
    pub muscles: Vec<String>,
    pub exercises: Vec<ExerciseDefinition>,
}

/// Canonical muscle groups
pub const MUSCLE_NAMES: [&str; 16] = [
    "calves",
    "hamstrings",
    "adductor",
    "abductor",
    "quads",
    "glutes",
    "lower back",
    "upper back",
    "traps",
    "obliques",
    "abs",
    "chest",
    "shoulders",
    "biceps",
    "triceps",
    "forearms",
];

/// Cached default catalog - built once and reused across all operations
static DEFAULT_CATALOG: Lazy<Catalog> = Lazy::new(build_default_catalog);

/// Get a reference to the cached default catalog
pub fn get_default_catalog() -> &'static Catalog {
    &DEFAULT_CATALOG
}

fn exercise(
    name: &str,
    usual_equipment: &[&str],
    (equipment, grip, execution): (&str, &str, &str),
    muscles: &[&str],
) -> ExerciseDefinition {
    ExerciseDefinition {
        name: name.into(),
        usual_equipment: usual_equipment.iter().map(|e| (*e).into()).collect(),
        default_equipment: equipment.into(),
        default_grip: grip.into(),
        default_execution: execution.into(),
        muscles: muscles.iter().map(|m| (*m).into()).collect(),
    }
}

/// Builds the default catalog
///
/// Prefer `get_default_catalog()`, which builds it only once.
pub fn build_default_catalog() -> Catalog {
    const SIM: &str = "simultaneous";
    const SEQ: &str = "sequential";

    let exercises = vec![
        exercise(
            "back extension",
            &["dumbbell", "bodyweight", "barbell", "machine"],
            ("dumbbell", "neutral", SIM),
            &["lower back", "glutes", "hamstrings"],
        ),
        exercise(
            "bench press",
            &["barbell", "dumbbell", "machine", "smith"],
            ("barbell", "overhand", SIM),
            &["chest", "triceps", "shoulders"],
        ),
        exercise(
            "bicep curl",
            &["dumbbell", "barbell", "cable"],
            ("dumbbell", "underhand", SIM),
            &["biceps"],
        ),
        exercise(
            "calf raise",
            &["smith", "machine", "barbell", "dumbbell"],
            ("machine", "standard", SIM),
            &["calves"],
        ),
        exercise(
            "chest fly",
            &["machine", "dumbbell", "cable"],
            ("dumbbell", "overhand", SIM),
            &["chest", "shoulders"],
        ),
        exercise(
            "deadlift",
            &["barbell", "dumbbell", "smith"],
            ("barbell", "overhand", SIM),
            &["lower back", "glutes", "hamstrings", "quads"],
        ),
        exercise(
            "hip thrust",
            &["barbell", "machine", "dumbbell", "bodyweight"],
            ("barbell", "overhand", SIM),
            &["glutes", "hamstrings"],
        ),
        exercise(
            "incline bench press",
            &["dumbbell", "barbell", "smith", "machine"],
            ("barbell", "overhand", SIM),
            &["chest", "triceps", "shoulders"],
        ),
        exercise(
            "lateral raise",
            &["cable", "dumbbell", "machine"],
            ("cable", "overhand", SIM),
            &["shoulders"],
        ),
        exercise(
            "leg press",
            &["machine"],
            ("machine", "standard", SIM),
            &["quads", "glutes", "hamstrings"],
        ),
        exercise(
            "lunge",
            &["dumbbell", "bodyweight", "barbell"],
            ("dumbbell", "neutral", SEQ),
            &["quads", "glutes", "hamstrings"],
        ),
        exercise(
            "overhead press",
            &["machine", "dumbbell", "barbell", "smith"],
            ("dumbbell", "overhand", SIM),
            &["shoulders", "triceps"],
        ),
        exercise(
            "preacher curl",
            &["barbell", "dumbbell"],
            ("barbell", "underhand", SIM),
            &["biceps", "forearms"],
        ),
        exercise(
            "pulldown",
            &["cable", "machine"],
            ("cable", "overhand wide", SIM),
            &["upper back", "biceps"],
        ),
        exercise(
            "pullup",
            &["bodyweight", "assisted", "weighted"],
            ("bodyweight", "overhand", SIM),
            &["upper back", "biceps"],
        ),
        exercise(
            "reverse fly",
            &["machine", "cable", "dumbbell"],
            ("cable", "overhand", SIM),
            &["upper back", "shoulders"],
        ),
        exercise(
            "romanian deadlift",
            &["barbell", "dumbbell", "smith"],
            ("barbell", "overhand", SIM),
            &["hamstrings", "glutes", "lower back"],
        ),
        exercise(
            "seated row",
            &["cable", "machine", "dumbbell"],
            ("dumbbell", "neutral", SEQ),
            &["upper back", "biceps", "traps"],
        ),
        exercise(
            "shoulder press",
            &["machine", "dumbbell", "barbell", "smith"],
            ("dumbbell", "overhand", SIM),
            &["shoulders", "triceps"],
        ),
        exercise(
            "shrugs",
            &["dumbbell", "barbell"],
            ("dumbbell", "neutral", SIM),
            &["traps"],
        ),
        exercise(
            "squat",
            &["barbell", "dumbbell", "smith", "bodyweight"],
            ("barbell", "overhand", SIM),
            &["quads", "glutes", "hamstrings"],
        ),
        exercise(
            "standing row",
            &["barbell", "dumbbell", "smith"],
            ("barbell", "overhand", SIM),
            &["upper back", "biceps", "traps"],
        ),
        exercise(
            "tricep pushdown",
            &["cable", "band"],
            ("cable", "neutral", SIM),
            &["triceps"],
        ),
    ];

    Catalog {
        muscles: MUSCLE_NAMES.iter().map(|m| (*m).into()).collect(),
        exercises,
    }
}

impl Catalog {
    /// Append user-defined exercises (e.g. from the config file)
    pub fn with_custom(mut self, custom: &[ExerciseDefinition]) -> Self {
        self.exercises.extend(custom.iter().cloned());
        self
    }

    /// Look up an exercise definition by name (case-insensitive)
    pub fn exercise(&self, name: &str) -> Option<&ExerciseDefinition> {
        let name = name.trim().to_lowercase();
        self.exercises.iter().find(|e| e.name == name)
    }

    /// Validate the catalog for consistency and completeness
    ///
    /// Returns a list of validation errors, or empty Vec if valid.
    pub fn validate(&self) -> Vec<String> {
        let mut errors = Vec::new();

        let mut muscles = HashSet::new();
        for muscle in &self.muscles {
            if muscle.is_empty() {
                errors.push("Muscle has empty name".to_string());
            }
            if !muscles.insert(muscle.as_str()) {
                errors.push(format!("Duplicate muscle '{}'", muscle));
            }
        }

        let mut names = HashSet::new();
        for def in &self.exercises {
            if def.name.is_empty() {
                errors.push("Exercise has empty name".to_string());
            }
            if def.name != def.name.to_lowercase() {
                errors.push(format!("Exercise name '{}' must be lower case", def.name));
            }
            if !names.insert(def.name.as_str()) {
                errors.push(format!("Duplicate exercise '{}'", def.name));
            }
            if def.muscles.is_empty() {
                errors.push(format!("Exercise '{}' trains no muscles", def.name));
            }

            // Every referenced muscle must exist
            for muscle in &def.muscles {
                if !muscles.contains(muscle.as_str()) {
                    errors.push(format!(
                        "Exercise '{}' references non-existent muscle '{}'",
                        def.name, muscle
                    ));
                }
            }

            if !def.usual_equipment.contains(&def.default_equipment) {
                errors.push(format!(
                    "Exercise '{}': default equipment '{}' not in usual equipment {:?}",
                    def.name, def.default_equipment, def.usual_equipment
                ));
            }
        }

        errors
    }
}
