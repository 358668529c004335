//! Session files: one JSON document per workout session.
//!
//! Sessions live in a single directory as `<YYYY-MM-DD>.txt`. Loading walks
//! the directory in file-name order and skips unreadable files instead of
//! failing the whole load; exercise entries are decoded one by one during
//! replay. Writing goes through a temp file that is locked,
//! synced and then renamed into place without clobbering existing sessions.

use crate::{types::validate_sets, Error, Result};
use chrono::NaiveDate;
use fs2::FileExt;
use serde::{Deserialize, Serialize};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

/// File extensions recognised as session files
pub const SESSION_EXTENSIONS: [&str; 2] = ["txt", "json"];

/// One exercise performed during a session
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct ExerciseRecord {
    pub exercise_name: String,
    pub reps: Vec<u32>,
    pub weight: Vec<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub grip: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub execution: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub equipment: Option<String>,
}

impl ExerciseRecord {
    pub fn new(exercise_name: impl Into<String>, reps: Vec<u32>, weight: Vec<f64>) -> Self {
        Self {
            exercise_name: exercise_name.into(),
            reps,
            weight,
            grip: None,
            execution: None,
            equipment: None,
        }
    }
}

/// A recorded workout session
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct SessionRecord {
    pub date: NaiveDate,
    pub exercises: Vec<ExerciseRecord>,
}

impl SessionRecord {
    /// Check every exercise for a name and well-formed sets
    pub fn validate(&self) -> Result<()> {
        if self.exercises.is_empty() {
            return Err(Error::Validation(format!(
                "session {} has no exercises",
                self.date
            )));
        }
        for record in &self.exercises {
            if record.exercise_name.trim().is_empty() {
                return Err(Error::Validation("exercise name is empty".into()));
            }
            validate_sets(&record.reps, &record.weight).map_err(|e| match e {
                Error::Validation(msg) => {
                    Error::Validation(format!("{}: {}", record.exercise_name, msg))
                }
                other => other,
            })?;
        }
        Ok(())
    }
}

/// A session file as stored, exercise entries not yet decoded
///
/// Entries are kept as raw JSON so that one malformed entry can be
/// rejected without losing the rest of the file.
#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct StoredSession {
    pub date: NaiveDate,
    pub exercises: Vec<serde_json::Value>,
}

impl StoredSession {
    /// Decode the entry at `index`
    pub fn record(&self, index: usize) -> Result<ExerciseRecord> {
        let value = self.exercises.get(index).ok_or_else(|| {
            Error::Validation(format!("session {} has no exercise #{}", self.date, index + 1))
        })?;
        Ok(ExerciseRecord::deserialize(value)?)
    }

    /// Exercise name of an entry for reports, or its position if it has none
    pub fn label(&self, index: usize) -> String {
        self.exercises
            .get(index)
            .and_then(|v| v.get("exercise_name"))
            .and_then(|v| v.as_str())
            .map(str::to_string)
            .unwrap_or_else(|| format!("exercise #{}", index + 1))
    }
}

/// A session read from disk together with where it came from
#[derive(Clone, Debug)]
pub struct LoadedSession {
    pub path: PathBuf,
    pub session: StoredSession,
}

impl LoadedSession {
    /// File name used when reporting skipped entries
    pub fn source(&self) -> String {
        self.path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| self.path.display().to_string())
    }
}

/// Something that was rejected while loading or replaying
#[derive(Clone, Debug, PartialEq)]
pub struct Skipped {
    pub source: String,
    pub reason: String,
}

/// Outcome of loading one session file: the session, or why it was skipped
pub type SessionLoad = std::result::Result<LoadedSession, Skipped>;

/// Parse a single session file
pub fn load_session(path: &Path) -> Result<StoredSession> {
    let contents = std::fs::read_to_string(path)?;
    let session = serde_json::from_str(&contents)?;
    Ok(session)
}

/// Session files in `dir`, sorted by file name
///
/// A missing directory has no session files.
pub fn session_files(dir: &Path) -> Result<Vec<PathBuf>> {
    if !dir.exists() {
        tracing::info!("No session directory at {:?}", dir);
        return Ok(Vec::new());
    }

    let mut paths = Vec::new();
    for entry in std::fs::read_dir(dir)? {
        let path = entry?.path();
        let is_session = path.is_file()
            && path
                .extension()
                .and_then(|e| e.to_str())
                .is_some_and(|e| SESSION_EXTENSIONS.contains(&e));
        if is_session {
            paths.push(path);
        }
    }
    paths.sort_by(|a, b| a.file_name().cmp(&b.file_name()));
    Ok(paths)
}

/// Load every session file in `dir`, in file-name order
///
/// Each file yields either its session or the reason it was skipped;
/// a file that fails to parse never fails the whole load.
pub fn load_sessions(dir: &Path) -> Result<Vec<SessionLoad>> {
    let files = session_files(dir)?
        .into_iter()
        .map(|path| match load_session(&path) {
            Ok(session) => Ok(LoadedSession { path, session }),
            Err(e) => {
                tracing::warn!("Skipping session file {:?}: {}", path, e);
                Err(Skipped {
                    source: path.display().to_string(),
                    reason: e.to_string(),
                })
            }
        })
        .collect::<Vec<_>>();

    tracing::info!(
        "Loaded {} session files from {:?} ({} skipped)",
        files.iter().filter(|f| f.is_ok()).count(),
        dir,
        files.iter().filter(|f| f.is_err()).count()
    );

    Ok(files)
}

/// Session sink trait for persisting sessions
pub trait SessionSink {
    /// Persist a session and return where it was written
    fn append(&mut self, session: &SessionRecord) -> Result<PathBuf>;
}

/// Writes each session as its own file in a directory
pub struct SessionDir {
    dir: PathBuf,
}

impl SessionDir {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// `<date>.txt`, or `<date>_N.txt` if earlier sessions exist that day
    fn free_path(&self, date: NaiveDate) -> PathBuf {
        let stem = date.format("%Y-%m-%d").to_string();
        let mut path = self.dir.join(format!("{}.txt", stem));
        let mut n = 2;
        while path.exists() {
            path = self.dir.join(format!("{}_{}.txt", stem, n));
            n += 1;
        }
        path
    }
}

impl SessionSink for SessionDir {
    fn append(&mut self, session: &SessionRecord) -> Result<PathBuf> {
        session.validate()?;
        std::fs::create_dir_all(&self.dir)?;

        // Temp file in the same directory for atomic rename; it carries no
        // session extension so a crashed write is never loaded.
        let temp = NamedTempFile::new_in(&self.dir)?;
        temp.as_file().lock_exclusive()?;

        {
            let mut writer = BufWriter::new(temp.as_file());
            let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
            let mut ser = serde_json::Serializer::with_formatter(&mut writer, formatter);
            session.serialize(&mut ser)?;
            writer.write_all(b"\n")?;
            writer.flush()?;
        }

        temp.as_file().sync_all()?;
        temp.as_file().unlock()?;

        let path = self.free_path(session.date);
        temp.persist_noclobber(&path)
            .map_err(|e| Error::Io(e.error))?;

        tracing::info!("Saved session {} to {:?}", session.date, path);
        Ok(path)
    }
}
