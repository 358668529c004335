#![forbid(unsafe_code)]

//! Core domain model and business logic for liftlog.
//!
//! This crate provides:
//! - Muscle and exercise catalog
//! - Muscle and exercise ledgers
//! - Training engine (applying logged sets, replaying sessions)
//! - Progression projection and exercise filtering
//! - Session file persistence, chart rendering and CSV export

pub mod types;
pub mod error;
pub mod catalog;
pub mod config;
pub mod logging;
pub mod ledger;
pub mod engine;
pub mod projection;
pub mod filter;
pub mod session;
pub mod chart;
pub mod export;

// Re-export commonly used types
pub use error::{Error, Result};
pub use types::*;
pub use catalog::{build_default_catalog, get_default_catalog, Catalog, ExerciseDefinition};
pub use config::Config;
pub use ledger::{ExerciseId, ExerciseLedger, Ledgers, MuscleLedger, Tracked};
pub use engine::{apply_log, apply_record, replay, replay_dir, ReplayReport};
pub use projection::{project, project_named, DataPoint, Metric};
pub use filter::{filter, ExerciseFilter};
pub use session::{ExerciseRecord, SessionDir, SessionLoad, SessionRecord, SessionSink, StoredSession};
