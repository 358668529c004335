//! Training engine: applies logged set-groups to the ledgers.
//!
//! A set-group (reps and weights of one exercise on one date) is recorded in
//! the history of every muscle the exercise trains, then in the exercise's
//! own history together with the variant it was performed with. Input is
//! validated before anything is touched, so a rejected log never leaves a
//! ledger half-updated.

use crate::session::{load_sessions, ExerciseRecord, LoadedSession, SessionLoad, Skipped};
use crate::{types::validate_sets, ExerciseId, Ledgers, Result, TrainingEntry};
use chrono::NaiveDate;
use std::path::Path;

/// Outcome of replaying recorded sessions
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ReplayReport {
    pub sessions: usize,
    pub applied: usize,
    pub skipped: Vec<Skipped>,
}

/// Apply one set-group to an exercise and all of its muscles
///
/// Variant overrides must be set on the exercise beforehand; the current
/// variant is what gets recorded.
pub fn apply_log(
    ledgers: &mut Ledgers,
    exercise: ExerciseId,
    date: NaiveDate,
    reps: &[u32],
    weights: &[f64],
) -> Result<()> {
    let entry = TrainingEntry::new(date, reps, weights)?;

    let (muscles, ledger) = ledgers.parts_mut(exercise);
    for &slot in ledger.muscle_slots() {
        muscles[slot].record(entry.clone());
    }

    tracing::debug!(
        "Logged {} on {}: {} sets, {} reps, {} volume",
        ledger.definition().name,
        date,
        entry.sets,
        entry.total_reps(),
        entry.total_volume()
    );

    let variant = ledger.variant();
    ledger.record(entry.with_variant(variant));
    Ok(())
}

/// Apply one exercise record from a session file
///
/// Resolves the exercise, validates the sets, applies the record's variant
/// overrides and logs it. A rejected record changes nothing, overrides
/// included.
pub fn apply_record(
    ledgers: &mut Ledgers,
    date: NaiveDate,
    record: &ExerciseRecord,
) -> Result<ExerciseId> {
    let id = ledgers.resolve(&record.exercise_name)?;
    validate_sets(&record.reps, &record.weight)?;

    let ledger = ledgers.exercise_mut(id);
    if let Some(grip) = &record.grip {
        ledger.set_grip(grip.as_str());
    }
    if let Some(execution) = &record.execution {
        ledger.set_execution(execution.as_str());
    }
    if let Some(equipment) = &record.equipment {
        ledger.set_equipment(equipment.as_str());
    }

    apply_log(ledgers, id, date, &record.reps, &record.weight)?;
    Ok(id)
}

/// Replay loaded sessions in order, skipping records that fail
///
/// Files that failed to load are reported in place. A record that cannot
/// be decoded or logged is reported and skipped; the remaining records
/// still apply. Errors that are not about the record itself stop the
/// replay. Replaying the same session twice counts it twice.
pub fn replay(ledgers: &mut Ledgers, sessions: &[SessionLoad]) -> Result<ReplayReport> {
    let mut report = ReplayReport::default();
    for file in sessions {
        match file {
            Ok(session) => replay_session(ledgers, session, &mut report)?,
            Err(skipped) => report.skipped.push(skipped.clone()),
        }
    }

    tracing::info!(
        "Replayed {} sessions: {} records applied, {} skipped",
        report.sessions,
        report.applied,
        report.skipped.len()
    );
    Ok(report)
}

/// Load every session file in `dir` and replay it
pub fn replay_dir(ledgers: &mut Ledgers, dir: &Path) -> Result<ReplayReport> {
    replay(ledgers, &load_sessions(dir)?)
}

fn replay_session(
    ledgers: &mut Ledgers,
    loaded: &LoadedSession,
    report: &mut ReplayReport,
) -> Result<()> {
    report.sessions += 1;
    let source = loaded.source();
    let session = &loaded.session;

    for index in 0..session.exercises.len() {
        let applied = session
            .record(index)
            .and_then(|record| apply_record(ledgers, session.date, &record));

        match applied {
            Ok(_) => report.applied += 1,
            Err(e) if e.is_recoverable() => {
                let label = session.label(index);
                tracing::warn!("Skipping {} in {}: {}", label, source, e);
                report.skipped.push(Skipped {
                    source: format!("{} ({})", source, label),
                    reason: e.to_string(),
                });
            }
            Err(e) => return Err(e),
        }
    }
    Ok(())
}
