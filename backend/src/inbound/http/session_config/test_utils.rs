//! Temporary key files for session configuration tests.

use std::path::PathBuf;

use uuid::Uuid;

/// Key file filled with dummy bytes and removed on drop.
#[derive(Debug)]
pub(super) struct TempKeyFile {
    path: PathBuf,
}

impl TempKeyFile {
    /// Write `len` bytes to a uniquely named file in the temp directory.
    pub(super) fn new(len: usize) -> std::io::Result<Self> {
        let path = std::env::temp_dir().join(format!("unblock-session-key-{}", Uuid::new_v4()));
        std::fs::write(&path, vec![b'k'; len])?;
        Ok(Self { path })
    }

    pub(super) fn path_str(&self) -> String {
        self.path.to_string_lossy().into_owned()
    }
}

impl Drop for TempKeyFile {
    fn drop(&mut self) {
        if let Err(error) = std::fs::remove_file(&self.path) {
            tracing::debug!(error = %error, "temporary key file already gone");
        }
    }
}
