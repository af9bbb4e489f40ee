use std::io;
use std::path::{Path, PathBuf};

/// Desktop-shell save-file dialog.
///
/// Returns `None` when the user dismisses the dialog; that is a normal
/// outcome, not an error.
pub trait SaveDialog {
    fn pick_save_path(
        &self,
        default_name: &str,
        filter_name: &str,
        extension: &str,
    ) -> Option<PathBuf>;
}

/// Filesystem write collaborator. Implementations write atomically or fail
/// with an I/O error; a failed write must not leave a partial file behind.
pub trait FileWriter {
    fn write(&self, path: &Path, bytes: &[u8]) -> io::Result<()>;
}
