//! Narrow an exercise list by its currently configured variant.

use crate::ExerciseLedger;

/// Equality predicates on equipment, grip and execution, combined with AND
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ExerciseFilter {
    pub equipment: Option<String>,
    pub grip: Option<String>,
    pub execution: Option<String>,
}

impl ExerciseFilter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn equipment(mut self, equipment: impl Into<String>) -> Self {
        self.equipment = Some(equipment.into());
        self
    }

    pub fn grip(mut self, grip: impl Into<String>) -> Self {
        self.grip = Some(grip.into());
        self
    }

    pub fn execution(mut self, execution: impl Into<String>) -> Self {
        self.execution = Some(execution.into());
        self
    }

    pub fn is_empty(&self) -> bool {
        self.equipment.is_none() && self.grip.is_none() && self.execution.is_none()
    }

    pub fn matches(&self, ledger: &ExerciseLedger) -> bool {
        fn test(wanted: &Option<String>, actual: &str) -> bool {
            wanted.as_deref().map_or(true, |w| w == actual)
        }

        test(&self.equipment, ledger.equipment())
            && test(&self.grip, ledger.grip())
            && test(&self.execution, ledger.execution())
    }
}

/// Keep the ledgers matching `filter`, in input order
pub fn filter<'a, I>(ledgers: I, filter: &ExerciseFilter) -> Vec<&'a ExerciseLedger>
where
    I: IntoIterator<Item = &'a ExerciseLedger>,
{
    ledgers.into_iter().filter(|l| filter.matches(l)).collect()
}
