//! Log file handle with size-based rotation

use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

use logspool_core::Result;
use tracing::{debug, info};

/// An open log file for one container, with rotation counters
///
/// At most one backup generation is kept: rotation renames the primary
/// file to `<name>.1` (replacing any earlier backup) and starts a fresh
/// primary at size 0.
#[derive(Debug)]
pub struct LogFile {
    dir: PathBuf,
    name: String,
    file: File,
    size: u64,
    rotate_size: u64,
}

impl LogFile {
    /// Create a fresh log file, creating the directory (and parents) if
    /// absent. An existing file at the same path is truncated.
    pub fn create(dir: impl Into<PathBuf>, name: impl Into<String>, rotate_size: u64) -> Result<Self> {
        let dir = dir.into();
        let name = name.into();

        fs::create_dir_all(&dir)?;
        let path = dir.join(&name);
        info!("Creating log file {}", path.display());
        let file = File::create(&path)?;

        Ok(Self {
            dir,
            name,
            file,
            size: 0,
            rotate_size,
        })
    }

    /// Path of the primary file
    pub fn path(&self) -> PathBuf {
        self.dir.join(&self.name)
    }

    /// Path of the single retained backup generation
    pub fn backup_path(&self) -> PathBuf {
        self.dir.join(format!("{}.1", self.name))
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn size(&self) -> u64 {
        self.size
    }

    /// Whether appending `pending` bytes would push the file past its
    /// rotation threshold
    pub fn needs_rotation(&self, pending: u64) -> bool {
        self.size + pending > self.rotate_size
    }

    /// Rotate: the primary becomes `<name>.1` (discarding any prior
    /// backup) and a fresh empty primary replaces this handle.
    pub fn rotate(self) -> Result<Self> {
        let primary = self.path();
        let backup = self.backup_path();
        info!("Rotating log file {}", primary.display());

        // Close the old handle before the rename
        drop(self.file);

        if backup.exists() {
            fs::remove_file(&backup)?;
        }
        fs::rename(&primary, &backup)?;

        let file = File::create(&primary)?;
        Ok(Self {
            dir: self.dir,
            name: self.name,
            file,
            size: 0,
            rotate_size: self.rotate_size,
        })
    }

    /// Append rendered bytes, rotating first if the write would exceed
    /// the threshold. The triggering write always lands whole in the
    /// fresh primary.
    pub fn append(mut self, bytes: &[u8]) -> Result<Self> {
        if self.needs_rotation(bytes.len() as u64) {
            self = self.rotate()?;
        }
        self.file.write_all(bytes)?;
        self.size += bytes.len() as u64;
        debug!(
            "Wrote {} bytes to {} (size now {})",
            bytes.len(),
            self.name,
            self.size
        );
        Ok(self)
    }
}
