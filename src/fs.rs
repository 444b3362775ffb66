//! Small synchronous filesystem helpers that attach the offending path to every error.

use anyhow::{Context, Result};
use std::io::Write;
use std::path::Path;

/// Creates `path` and any missing parents. An existing directory is not an error.
pub(crate) fn create_dir_all(path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref();
    std::fs::create_dir_all(path)
        .with_context(|| format!("Unable to create directory {}", path.display()))
}

/// Creates or truncates the file at `path`.
pub(crate) fn file(path: impl AsRef<Path>) -> Result<std::fs::File> {
    let path = path.as_ref();
    std::fs::File::create(path).with_context(|| format!("Unable to create file {}", path.display()))
}

/// Writes `data` to `path`, creating the parent directory when it is missing.
pub(crate) fn write(path: impl AsRef<Path>, data: impl AsRef<[u8]>) -> Result<()> {
    let path = path.as_ref();
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        create_dir_all(parent)?;
    }
    let mut f = file(path)?;
    f.write_all(data.as_ref())
        .with_context(|| format!("Unable to write data to {}", path.display()))
}

pub(crate) fn read_to_string(path: impl AsRef<Path>) -> Result<String> {
    let path = path.as_ref();
    std::fs::read_to_string(path).with_context(|| format!("Unable to read file {}", path.display()))
}
