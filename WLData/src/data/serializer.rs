//! Invoking the external asset serializer
//!
//! The serializer is run as `<executable> serialize <base_path>` and writes
//! `<base_path>.json` next to the raw asset as a side effect.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::process::Command;

use crate::error::{Error, Result};

/// Something that can turn a raw asset into its JSON serialization on disk
pub trait Serializer {
    /// Serialize the asset at `base_path` (no extension).
    ///
    /// Blocks until done. Producing no output is not an error here; the caller
    /// checks for the JSON file afterwards.
    fn serialize(&self, base_path: &Path) -> Result<()>;
}

/// Runs an external serializer binary
#[derive(Debug, Clone)]
pub struct ProcessSerializer {
    executable: PathBuf,
}

impl ProcessSerializer {
    /// Use the serializer at `executable`
    #[must_use]
    pub fn new<P: Into<PathBuf>>(executable: P) -> Self {
        Self {
            executable: executable.into(),
        }
    }

    /// Configured executable path
    #[must_use]
    pub fn executable(&self) -> &Path {
        &self.executable
    }
}

impl Serializer for ProcessSerializer {
    fn serialize(&self, base_path: &Path) -> Result<()> {
        tracing::debug!(
            "Serializing {} with {}",
            base_path.display(),
            self.executable.display()
        );

        let output = Command::new(&self.executable)
            .arg("serialize")
            .arg(base_path)
            .output()
            .map_err(|e| match e.kind() {
                ErrorKind::NotFound => Error::SerializerNotFound {
                    path: self.executable.clone(),
                },
                _ => Error::Io(e),
            })?;

        if !output.status.success() {
            return Err(Error::SerializerFailed {
                base: base_path.to_path_buf(),
                status: output.status.to_string(),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }

        Ok(())
    }
}
