use std::ffi::OsString;
use std::fs;
use std::io;
use std::path::Path;

use voice_recorder_core::traits::export::FileWriter;

/// Atomic filesystem writer: bytes land in a hidden temp sibling, then a
/// rename moves them into place. A failed write never leaves a partial
/// target file behind.
pub struct AtomicFileWriter;

impl FileWriter for AtomicFileWriter {
    fn write(&self, path: &Path, bytes: &[u8]) -> io::Result<()> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        let file_name = path
            .file_name()
            .ok_or_else(|| io::Error::new(io::ErrorKind::InvalidInput, "path has no file name"))?;

        let mut tmp_name = OsString::from(".");
        tmp_name.push(file_name);
        tmp_name.push(".tmp");
        let tmp = path.with_file_name(tmp_name);

        let result = fs::write(&tmp, bytes).and_then(|_| fs::rename(&tmp, path));
        if result.is_err() {
            let _ = fs::remove_file(&tmp);
        }
        result
    }
}
