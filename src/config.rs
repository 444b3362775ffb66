//! Configuration file handling.
//!
//! The configuration file holds the catalog of named predicate presets. It lives at
//! `<config dir>/mint-tx/config.json` unless another path is given with `--config` or
//! `MINT_CONFIG`. Without a file the built-in catalog is used.

use crate::fs;
use crate::model::{ACCOUNT_NAME, CATEGORY};
use crate::query::{MatchMode, Predicate, PredicateSet};
use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

const APP_NAME: &str = "mint-tx";
const CONFIG_VERSION: u8 = 1;
const CONFIG_JSON: &str = "config.json";

// The account the credit-card preset selects. Rename it in config.json to match your own export.
const CREDIT_CARD_ACCOUNT: &str = "Credit Card";

const FOOD_CATEGORIES: [&str; 6] = [
    "Coffee Shops",
    "Food & Dining",
    "Groceries",
    "Fast Food",
    "Restaurants",
    "Snacks",
];

/// The loaded configuration: the preset catalog and where it came from.
#[derive(Debug, Clone)]
pub struct Config {
    path: PathBuf,
    loaded_from_file: bool,
    presets: BTreeMap<String, PredicateSet>,
}

impl Config {
    /// Loads the configuration.
    ///
    /// With `explicit` set, that file must exist. Otherwise the default location is tried and the
    /// built-in catalog is used when nothing is there. Presets in the file are added to the
    /// built-in catalog, replacing any built-in preset of the same name.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        let path = match explicit {
            Some(path) => {
                if !path.is_file() {
                    bail!("The config file is missing '{}'", path.display())
                }
                path.to_path_buf()
            }
            None => match default_path() {
                Some(path) if path.is_file() => path,
                Some(path) => {
                    debug!("No config file at {}, using built-in presets", path.display());
                    return Ok(Self::builtin(path));
                }
                None => {
                    warn!("Unable to determine the config directory, using built-in presets");
                    return Ok(Self::builtin(PathBuf::from(CONFIG_JSON)));
                }
            },
        };

        let file = ConfigFile::load(&path)?;
        let mut presets = builtin_presets();
        presets.extend(file.presets);
        debug!("Loaded {} presets from {}", presets.len(), path.display());
        Ok(Self {
            path,
            loaded_from_file: true,
            presets,
        })
    }

    /// The built-in catalog, as though it had been loaded from `path`.
    pub fn builtin(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            loaded_from_file: false,
            presets: builtin_presets(),
        }
    }

    /// Where the configuration was loaded from, or would have been.
    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn loaded_from_file(&self) -> bool {
        self.loaded_from_file
    }

    pub fn presets(&self) -> &BTreeMap<String, PredicateSet> {
        &self.presets
    }

    /// Looks up a preset by name.
    ///
    /// # Errors
    /// When there is no preset called `name`. The message lists the ones that exist.
    pub fn preset(&self, name: &str) -> Result<&PredicateSet> {
        match self.presets.get(name) {
            Some(preset) => Ok(preset),
            None => {
                let known: Vec<&str> = self.presets.keys().map(String::as_str).collect();
                bail!(
                    "There is no preset named '{name}', the available presets are: {}",
                    known.join(", ")
                )
            }
        }
    }
}

/// The default location of the configuration file, `None` if the platform has no config dir.
pub fn default_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join(APP_NAME).join(CONFIG_JSON))
}

fn builtin_presets() -> BTreeMap<String, PredicateSet> {
    let mut presets = BTreeMap::new();
    presets.insert(
        "credit-card".to_string(),
        PredicateSet::new(
            MatchMode::All,
            [Predicate::new(ACCOUNT_NAME, CREDIT_CARD_ACCOUNT)],
        ),
    );
    presets.insert(
        "cash-and-venmo".to_string(),
        PredicateSet::one_of(ACCOUNT_NAME, ["Cash", "Venmo"]),
    );
    presets.insert(
        "food".to_string(),
        PredicateSet::one_of(CATEGORY, FOOD_CATEGORIES),
    );
    presets
}

/// Represents the serialization and deserialization format of the configuration file.
///
/// Example configuration:
/// ```json
/// {
///   "app_name": "mint-tx",
///   "config_version": 1,
///   "presets": {
///     "food": {
///       "mode": "any",
///       "predicates": [
///         { "field": "Category", "value": "Groceries" },
///         { "field": "Category", "value": "Restaurants" }
///       ]
///     }
///   }
/// }
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, Eq, PartialEq)]
pub(crate) struct ConfigFile {
    /// Should always be "mint-tx"
    app_name: String,

    config_version: u8,

    #[serde(default)]
    presets: BTreeMap<String, PredicateSet>,
}

impl ConfigFile {
    /// A file holding the built-in catalog, which is what `mint init` writes.
    pub(crate) fn builtin() -> Self {
        Self {
            app_name: APP_NAME.to_string(),
            config_version: CONFIG_VERSION,
            presets: builtin_presets(),
        }
    }

    /// # Errors
    /// If the file cannot be read or parsed, if `app_name` is wrong, or if `config_version` is
    /// newer than this program understands.
    pub(crate) fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file at {}", path.display()))?;

        let config: ConfigFile = serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse config file at {}", path.display()))?;

        anyhow::ensure!(
            config.app_name == APP_NAME,
            "Invalid app_name in config file: expected '{}', got '{}'",
            APP_NAME,
            config.app_name
        );
        anyhow::ensure!(
            config.config_version <= CONFIG_VERSION,
            "Unsupported config_version {} in config file, the newest supported is {}",
            config.config_version,
            CONFIG_VERSION
        );

        Ok(config)
    }

    pub(crate) fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let p = path.as_ref();
        let data = serde_json::to_string_pretty(self).context("Unable to serialize config")?;
        fs::write(p, data).context("Unable to write config file")
    }
}
