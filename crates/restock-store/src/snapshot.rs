//! Snapshot persistence: a single JSON file mapping SKU to product state.
//!
//! Loading is infallible by contract — a missing or unparsable file yields
//! an empty snapshot so the run proceeds (and the diff's cold-start rule
//! keeps it from notifying on everything). Saving is a full replace of the
//! previous content, written to a temp file in the target directory and
//! renamed over the destination so a crash mid-write never leaves a
//! corrupt file for the next run.

use std::fs;
use std::io::Write;
use std::path::Path;

use tempfile::NamedTempFile;
use tracing::{debug, warn};

use restock_core::Snapshot;

use crate::StoreError;

/// Reads the persisted snapshot. Never fails the run: absent or corrupt
/// files come back as an empty snapshot.
#[must_use]
pub fn load_snapshot(path: &Path) -> Snapshot {
    let raw = match fs::read_to_string(path) {
        Ok(raw) => raw,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            debug!(path = %path.display(), "no snapshot file yet, starting empty");
            return Snapshot::new();
        }
        Err(e) => {
            warn!(path = %path.display(), error = %e, "failed to read snapshot file, starting empty");
            return Snapshot::new();
        }
    };

    match serde_json::from_str(&raw) {
        Ok(snapshot) => snapshot,
        Err(e) => {
            warn!(path = %path.display(), error = %e, "snapshot file is not valid JSON, starting empty");
            Snapshot::new()
        }
    }
}

/// Writes the snapshot, fully replacing any previous content.
///
/// # Errors
///
/// Returns [`StoreError::Io`] if the directory cannot be created or the
/// temp file cannot be written/renamed, [`StoreError::Serialize`] if the
/// snapshot cannot be encoded.
pub fn save_snapshot(path: &Path, snapshot: &Snapshot) -> Result<(), StoreError> {
    let dir = match path.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => dir,
        _ => Path::new("."),
    };
    fs::create_dir_all(dir)?;

    // Write-temp-then-rename keeps the old snapshot intact until the new
    // one is fully on disk. The temp file must live in the same directory
    // as the destination for the rename to stay atomic.
    let mut tmp = NamedTempFile::new_in(dir)?;
    serde_json::to_writer_pretty(&mut tmp, snapshot)?;
    tmp.flush()?;
    tmp.persist(path)?;
    Ok(())
}

#[cfg(test)]
#[path = "snapshot_test.rs"]
mod tests;
