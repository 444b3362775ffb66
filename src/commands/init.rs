use crate::commands::Out;
use crate::config::{default_path, ConfigFile};
use anyhow::{bail, Context, Result};
use std::path::Path;

/// Writes a config file holding the built-in presets.
///
/// # Arguments
/// - `path` - Where to write it. When `None`, the default location in the platform's config
///   directory is used.
/// - `force` - Replace the file if one already exists.
///
/// # Errors
/// - If the file exists and `force` is false.
/// - If no path was given and the platform has no config directory.
/// - If any file operation fails.
pub fn init(path: Option<&Path>, force: bool) -> Result<Out<()>> {
    let path = match path {
        Some(path) => path.to_path_buf(),
        None => default_path().context(
            "Unable to determine your config directory, provide the config file path with --config",
        )?,
    };
    if path.exists() && !force {
        bail!(
            "The config file '{}' already exists, use --force to replace it",
            path.display()
        )
    }
    ConfigFile::builtin()
        .save(&path)
        .context("Unable to create the config file")?;
    Ok(format!("Wrote the default config file to {}", path.display()).into())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Config;
    use tempfile::TempDir;

    #[test]
    fn test_init() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("mint-tx").join("config.json");
        let out = init(Some(&path), false).unwrap();
        assert!(out.message().contains("config.json"));

        let config = Config::load(Some(&path)).unwrap();
        assert!(config.loaded_from_file());
        assert_eq!(config.presets().len(), 3);
    }

    #[test]
    fn test_init_refuses_to_overwrite() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, "keep me").unwrap();
        let e = init(Some(&path), false).unwrap_err();
        assert!(e.to_string().contains("--force"));
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "keep me");

        init(Some(&path), true).unwrap();
        assert!(Config::load(Some(&path)).is_ok());
    }
}
