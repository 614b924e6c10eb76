//! On-disk persistence of the cycles state.
//!
//! The file is a small versioned JSON document written atomically; a file
//! from an unknown version is refused rather than guessed at.

use std::io;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use pomo_types::{Cycle, CycleId};

use crate::config;
use crate::cycles::CyclesState;

pub const STORE_VERSION: u32 = 1;
const STORE_FILE_NAME: &str = "cycles.json";

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("failed to read {}: {source}", path.display())]
    Read { path: PathBuf, source: io::Error },
    #[error("failed to parse {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },
    #[error("{} has unsupported version {found} (expected {STORE_VERSION})", path.display())]
    Version { path: PathBuf, found: u32 },
    #[error("failed to serialize cycles: {0}")]
    Serialize(#[source] serde_json::Error),
    #[error("failed to write {}: {source}", path.display())]
    Write { path: PathBuf, source: io::Error },
}

#[derive(Debug, Serialize, Deserialize)]
struct StoredCycles {
    version: u32,
    #[serde(default)]
    cycles: Vec<Cycle>,
    #[serde(default)]
    active_cycle_id: Option<CycleId>,
}

#[derive(Debug, Clone)]
pub struct CycleStore {
    path: PathBuf,
}

impl CycleStore {
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// `~/.pomo/cycles.json`, or `None` when there is no home directory.
    #[must_use]
    pub fn default_path() -> Option<PathBuf> {
        config::data_dir().map(|dir| dir.join(STORE_FILE_NAME))
    }

    /// Load the saved state. A missing file is an empty state.
    pub fn load(&self) -> Result<CyclesState, StoreError> {
        pomo_utils::recover_bak_file(&self.path);

        let data = match std::fs::read_to_string(&self.path) {
            Ok(data) => data,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                tracing::debug!(path = %self.path.display(), "No saved cycles");
                return Ok(CyclesState::default());
            }
            Err(source) => {
                return Err(StoreError::Read {
                    path: self.path.clone(),
                    source,
                });
            }
        };

        let stored: StoredCycles =
            serde_json::from_str(&data).map_err(|source| StoreError::Parse {
                path: self.path.clone(),
                source,
            })?;
        if stored.version != STORE_VERSION {
            return Err(StoreError::Version {
                path: self.path.clone(),
                found: stored.version,
            });
        }

        tracing::debug!(
            path = %self.path.display(),
            cycles = stored.cycles.len(),
            "Loaded saved cycles"
        );
        Ok(CyclesState::restore(stored.cycles, stored.active_cycle_id))
    }

    pub fn save(&self, state: &CyclesState) -> Result<(), StoreError> {
        let stored = StoredCycles {
            version: STORE_VERSION,
            cycles: state.cycles().to_vec(),
            active_cycle_id: state.active_cycle_id(),
        };
        let json = serde_json::to_string_pretty(&stored).map_err(StoreError::Serialize)?;

        let write_err = |source| StoreError::Write {
            path: self.path.clone(),
            source,
        };
        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent).map_err(write_err)?;
        }
        pomo_utils::atomic_write(&self.path, json.as_bytes()).map_err(write_err)
    }
}

#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Utc};

    use pomo_types::{Cycle, CycleStatus, NewCycleFormData};

    use super::{CycleStore, StoreError};
    use crate::cycles::{CycleAction, CyclesState};

    fn cycle(task: &str) -> Cycle {
        let request = NewCycleFormData::new(task, 25).validate().expect("valid");
        Cycle::start(request, Utc.with_ymd_and_hms(2024, 3, 1, 9, 0, 0).unwrap())
    }

    #[test]
    fn missing_file_loads_empty_state() {
        let dir = tempfile::tempdir().expect("tempdir");
        let store = CycleStore::new(dir.path().join("cycles.json"));

        let state = store.load().expect("load");
        assert!(state.cycles().is_empty());
        assert!(state.active_cycle_id().is_none());
    }

    #[test]
    fn save_then_load_keeps_active_cycle() {
        let dir = tempfile::tempdir().expect("tempdir");
        let store = CycleStore::new(dir.path().join("nested").join("cycles.json"));

        let mut state = CyclesState::default();
        let first = cycle("Write report");
        let at = first.start_date;
        state.reduce(CycleAction::AddNewCycle(first));
        state.reduce(CycleAction::InterruptCurrentCycle { at });
        let second = cycle("Read paper");
        let second_id = second.id;
        state.reduce(CycleAction::AddNewCycle(second));

        store.save(&state).expect("save");
        let loaded = store.load().expect("load");

        assert_eq!(loaded, state);
        assert_eq!(loaded.active_cycle_id(), Some(second_id));
        assert_eq!(loaded.cycles()[0].status(), CycleStatus::Interrupted);
    }

    #[test]
    fn corrupt_file_is_a_parse_error() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("cycles.json");
        std::fs::write(&path, "{ not json").expect("write");

        let err = CycleStore::new(&path).load().expect_err("should fail");
        assert!(matches!(err, StoreError::Parse { .. }));
    }

    #[test]
    fn unknown_version_is_refused() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("cycles.json");
        std::fs::write(&path, r#"{"version": 9, "cycles": []}"#).expect("write");

        let err = CycleStore::new(&path).load().expect_err("should fail");
        assert!(matches!(err, StoreError::Version { found: 9, .. }));
    }

    #[test]
    fn invalid_task_in_file_is_rejected() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("cycles.json");
        std::fs::write(
            &path,
            r#"{"version":1,"cycles":[{"id":"4f6c1b6e-8f8a-4d0e-9a57-1f2d0b5c9e11","task":"ab","minutes_amount":25,"start_date":"2024-03-01T09:00:00Z"}]}"#,
        )
        .expect("write");

        let err = CycleStore::new(&path).load().expect_err("should fail");
        assert!(matches!(err, StoreError::Parse { .. }));
    }
}
