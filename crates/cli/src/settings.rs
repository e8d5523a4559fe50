// ABOUTME: Layered settings for the shelfcopy CLI.
// ABOUTME: Merges defaults, an optional TOML file, SHELFCOPY_* environment variables, and command-line flags.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use config::{Config, Environment, File};
use serde::Deserialize;
use shelfcopy::options::{DEFAULT_BASE_URL, DEFAULT_SHELF};

/// Settings file looked up in the working directory when `--config` is not given.
pub const DEFAULT_CONFIG_NAME: &str = "shelfcopy";

/// Prefix of the environment variables read as settings.
pub const ENV_PREFIX: &str = "SHELFCOPY";

#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub username: Option<String>,
    pub shelf: String,
    pub base_url: String,
    pub output_dir: PathBuf,
    pub user_agent: String,
    pub timeout_secs: u64,
}

/// Values given on the command line, which take precedence over every other source.
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub username: Option<String>,
    pub shelf: Option<String>,
    pub base_url: Option<String>,
    pub output_dir: Option<PathBuf>,
    pub timeout_secs: Option<u64>,
}

impl Settings {
    /// Loads settings from defaults, the settings file, the environment, and `overrides`.
    ///
    /// An explicit `config_path` must exist; the default `shelfcopy.toml` is optional.
    pub fn load(config_path: Option<&Path>, overrides: &Overrides) -> Result<Self> {
        let file = match config_path {
            Some(path) => File::from(path).required(true),
            None => File::with_name(DEFAULT_CONFIG_NAME).required(false),
        };

        let output_dir = overrides
            .output_dir
            .as_ref()
            .map(|p| p.to_string_lossy().into_owned());

        let config = Config::builder()
            .set_default("shelf", DEFAULT_SHELF)?
            .set_default("base_url", DEFAULT_BASE_URL)?
            .set_default("output_dir", ".")?
            .set_default(
                "user_agent",
                concat!("shelfcopy/", env!("CARGO_PKG_VERSION")),
            )?
            .set_default("timeout_secs", 30u64)?
            .add_source(file)
            .add_source(Environment::with_prefix(ENV_PREFIX))
            .set_override_option("username", overrides.username.clone())?
            .set_override_option("shelf", overrides.shelf.clone())?
            .set_override_option("base_url", overrides.base_url.clone())?
            .set_override_option("output_dir", output_dir)?
            .set_override_option("timeout_secs", overrides.timeout_secs)?
            .build()
            .context("failed to load settings")?;

        config
            .try_deserialize()
            .context("failed to read settings")
    }

    /// The configured username, if it is set and non-empty.
    pub fn username(&self) -> Option<&str> {
        self.username.as_deref().filter(|u| !u.trim().is_empty())
    }
}
