//! WAV artifact export: save dialog, atomic write, checksum.

use std::path::PathBuf;

use chrono::{DateTime, Local};
use serde::Serialize;
use sha2::{Digest, Sha256};

use crate::models::audio::WavArtifact;
use crate::models::error::RecordError;
use crate::traits::export::{FileWriter, SaveDialog};

/// File-type filter label shown in the save dialog.
pub const WAV_FILTER_NAME: &str = "WAV Audio";

/// Extension offered by the save dialog.
pub const WAV_EXTENSION: &str = "wav";

/// What became of an export request.
///
/// A dismissed dialog is a normal outcome, not an error; write failures are
/// surfaced as `RecordError::ExportFailed` and leave in-memory state
/// untouched.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "outcome", rename_all = "kebab-case")]
pub enum ExportOutcome {
    Saved { path: PathBuf, checksum: String },
    Cancelled,
    NothingToExport,
}

/// Default filename offered in the save dialog:
/// `recording-<YYYY-MM-DD_HH-mm-ss>.wav`, local time, zero-padded fields.
pub fn default_export_filename(now: DateTime<Local>) -> String {
    format!("recording-{}.wav", now.format("%Y-%m-%d_%H-%M-%S"))
}

/// Run the save-dialog + write pipeline for one artifact.
///
/// Returns `Saved` with the destination path and the SHA-256 hex digest of
/// the written bytes, or `Cancelled` when the user dismisses the dialog.
pub fn export_artifact<D, W>(
    artifact: &WavArtifact,
    dialog: &D,
    writer: &W,
) -> Result<ExportOutcome, RecordError>
where
    D: SaveDialog + ?Sized,
    W: FileWriter + ?Sized,
{
    let default_name = default_export_filename(Local::now());
    let Some(path) = dialog.pick_save_path(&default_name, WAV_FILTER_NAME, WAV_EXTENSION) else {
        log::debug!("export cancelled from save dialog");
        return Ok(ExportOutcome::Cancelled);
    };

    if let Err(error) = writer.write(&path, artifact.bytes()) {
        let error = RecordError::ExportFailed(format!("{}: {error}", path.display()));
        log::error!("{error}");
        return Err(error);
    }

    let checksum = sha256_hex(artifact.bytes());
    log::info!(
        "exported {:.2}s ({} bytes) to {}",
        artifact.duration_secs(),
        artifact.len(),
        path.display()
    );
    Ok(ExportOutcome::Saved { path, checksum })
}

/// SHA-256 hex digest.
fn sha256_hex(bytes: &[u8]) -> String {
    let digest = Sha256::digest(bytes);
    digest.iter().map(|b| format!("{:02x}", b)).collect()
}

#[cfg(test)]
mod tests {
    use std::io;
    use std::path::Path;
    use std::sync::Arc;

    use chrono::TimeZone;
    use parking_lot::Mutex;

    use super::*;

    struct CancelDialog;

    impl SaveDialog for CancelDialog {
        fn pick_save_path(&self, _: &str, _: &str, _: &str) -> Option<PathBuf> {
            None
        }
    }

    struct AcceptDialog {
        path: PathBuf,
        seen_default: Mutex<Option<String>>,
    }

    impl SaveDialog for AcceptDialog {
        fn pick_save_path(&self, default_name: &str, _: &str, _: &str) -> Option<PathBuf> {
            *self.seen_default.lock() = Some(default_name.to_string());
            Some(self.path.clone())
        }
    }

    #[derive(Clone, Default)]
    struct MemoryWriter {
        writes: Arc<Mutex<Vec<(PathBuf, Vec<u8>)>>>,
        fail: bool,
    }

    impl FileWriter for MemoryWriter {
        fn write(&self, path: &Path, bytes: &[u8]) -> io::Result<()> {
            if self.fail {
                return Err(io::Error::new(io::ErrorKind::PermissionDenied, "disk full"));
            }
            self.writes.lock().push((path.to_path_buf(), bytes.to_vec()));
            Ok(())
        }
    }

    fn artifact() -> WavArtifact {
        WavArtifact::new(vec![1, 2, 3, 4], 0.5)
    }

    #[test]
    fn filename_is_local_time_zero_padded() {
        let at = Local.with_ymd_and_hms(2026, 8, 6, 9, 5, 3).unwrap();
        assert_eq!(default_export_filename(at), "recording-2026-08-06_09-05-03.wav");
    }

    #[test]
    fn cancelled_dialog_is_silent_no_op() {
        let writer = MemoryWriter::default();
        let outcome = export_artifact(&artifact(), &CancelDialog, &writer).unwrap();
        assert_eq!(outcome, ExportOutcome::Cancelled);
        assert!(writer.writes.lock().is_empty());
    }

    #[test]
    fn saved_outcome_carries_path_and_checksum() {
        let dialog = AcceptDialog {
            path: PathBuf::from("/tmp/out.wav"),
            seen_default: Mutex::new(None),
        };
        let writer = MemoryWriter::default();
        let outcome = export_artifact(&artifact(), &dialog, &writer).unwrap();

        match outcome {
            ExportOutcome::Saved { path, checksum } => {
                assert_eq!(path, PathBuf::from("/tmp/out.wav"));
                // sha256 of [1, 2, 3, 4]
                assert_eq!(
                    checksum,
                    "9f64a747e1b97f131fabb6b447296c9b6f0201e79fb3c5356e6c77e89b6a806a"
                );
            }
            other => panic!("expected Saved, got {:?}", other),
        }
        let writes = writer.writes.lock();
        assert_eq!(writes.len(), 1);
        assert_eq!(writes[0].1, vec![1, 2, 3, 4]);

        let default = dialog.seen_default.lock().clone().unwrap();
        assert!(default.starts_with("recording-"));
        assert!(default.ends_with(".wav"));
    }

    #[test]
    fn write_failure_maps_to_export_failed() {
        let dialog = AcceptDialog {
            path: PathBuf::from("/tmp/out.wav"),
            seen_default: Mutex::new(None),
        };
        let writer = MemoryWriter { fail: true, ..MemoryWriter::default() };
        let error = export_artifact(&artifact(), &dialog, &writer).unwrap_err();
        assert!(matches!(error, RecordError::ExportFailed(_)));
    }
}
