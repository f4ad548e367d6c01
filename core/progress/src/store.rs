//! Load-with-fallback and write-to-temp-then-rename persistence for the
//! progress snapshot (§4.11).

use std::fs;
use std::path::Path;
use std::path::PathBuf;
use std::sync::Mutex;

use chrono::Utc;
use conductor_protocol::snapshot::ProgressSnapshot;
use conductor_protocol::snapshot::SnapshotConfig;

use crate::error::ProgressError;

/// Holds the live snapshot behind a single serialization lock (§5 "Progress
/// snapshot: serialized through a dedicated mutex").
pub struct ProgressStore {
    path: PathBuf,
    state: Mutex<ProgressSnapshot>,
}

impl ProgressStore {
    /// Loads `path`, falling back to `legacy_path` (both hold the same JSON
    /// document, §4.11 "fall back to a legacy `progress.md`"), else starts
    /// an empty snapshot. Future saves always target `path`.
    pub fn load_or_init(
        path: impl Into<PathBuf>,
        legacy_path: impl Into<PathBuf>,
        prd_hash: Option<String>,
        config: SnapshotConfig,
    ) -> Result<Self, ProgressError> {
        let path = path.into();
        let legacy_path = legacy_path.into();

        let snapshot = match read_snapshot(&path)? {
            Some(snapshot) => snapshot,
            None => match read_snapshot(&legacy_path)? {
                Some(snapshot) => {
                    tracing::info!(path = %legacy_path.display(), "loaded progress snapshot from legacy path");
                    snapshot
                }
                None => {
                    tracing::info!("no existing progress snapshot found, starting empty");
                    ProgressSnapshot::new(prd_hash, config)
                }
            },
        };

        Ok(Self { path, state: Mutex::new(snapshot) })
    }

    /// A value-copy of the current snapshot (§3 "Snapshots return
    /// value-copies").
    pub fn snapshot(&self) -> ProgressSnapshot {
        self.state.lock().expect("progress lock poisoned").clone()
    }

    /// Mutates the snapshot under the serialization lock and persists the
    /// result before returning (§4.11 "every state-changing event triggers
    /// a save").
    pub fn update(&self, f: impl FnOnce(&mut ProgressSnapshot)) -> Result<(), ProgressError> {
        let mut state = self.state.lock().expect("progress lock poisoned");
        f(&mut state);
        state.updated_at = Utc::now();
        persist(&self.path, &state)
    }
}

fn read_snapshot(path: &Path) -> Result<Option<ProgressSnapshot>, ProgressError> {
    match fs::read_to_string(path) {
        Ok(text) => {
            let snapshot = serde_json::from_str(&text)
                .map_err(|source| ProgressError::Parse { path: path.to_path_buf(), source })?;
            Ok(Some(snapshot))
        }
        Err(error) if error.kind() == std::io::ErrorKind::NotFound => Ok(None),
        Err(source) => Err(ProgressError::Read { path: path.to_path_buf(), source }),
    }
}

/// Write-to-temp-then-rename so a crash mid-write never corrupts the
/// previous snapshot (§5 "file writes are append-replace: write to temp,
/// rename").
fn persist(path: &Path, snapshot: &ProgressSnapshot) -> Result<(), ProgressError> {
    let tmp_path = path.with_extension("json.tmp");
    let body = serde_json::to_vec_pretty(snapshot).expect("progress snapshot always serializes");
    fs::write(&tmp_path, body).map_err(|source| ProgressError::Write { path: tmp_path.clone(), source })?;
    fs::rename(&tmp_path, path)
        .map_err(|source| ProgressError::Rename { from: tmp_path, to: path.to_path_buf(), source })
}

#[cfg(test)]
#[path = "store.test.rs"]
mod tests;
