//! Configuration management with layered loading
//!
//! Precedence (lowest to highest):
//! 1. Compiled defaults
//! 2. Global config: `$XDG_CONFIG_HOME/snailfish/snailfish.toml`
//! 3. Local config: `./.snailfish.toml` or the file given with `--config`
//! 4. Environment variables: `SNAILFISH_*` prefix

use std::path::{Path, PathBuf};

use config::{Config, ConfigError, Environment};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::application::ApplicationError;
use crate::domain::{ReductionLimits, DEFAULT_MAX_STEPS};

/// Name of the local config file looked up in the working directory.
pub const LOCAL_CONFIG_FILE: &str = ".snailfish.toml";

/// Reduction settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct ReductionConfig {
    /// Rewrites allowed per reduction before giving up
    pub max_steps: usize,
}

impl Default for ReductionConfig {
    fn default() -> Self {
        Self {
            max_steps: DEFAULT_MAX_STEPS,
        }
    }
}

/// Largest-pair search settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct SearchConfig {
    /// Evaluate candidate pairs on the rayon thread pool
    pub parallel: bool,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self { parallel: true }
    }
}

/// Raw settings for intermediate parsing (`None` → not specified, inherit).
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct RawSettings {
    pub reduction: RawReductionConfig,
    pub search: RawSearchConfig,
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct RawReductionConfig {
    pub max_steps: Option<usize>,
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct RawSearchConfig {
    pub parallel: Option<bool>,
}

/// Unified configuration for snailfish.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Settings {
    pub reduction: ReductionConfig,
    pub search: SearchConfig,
}

/// Get the XDG config directory for snailfish.
pub fn global_config_dir() -> Option<PathBuf> {
    ProjectDirs::from("", "", "snailfish").map(|dirs| dirs.config_dir().to_path_buf())
}

/// Get the path to the global config file.
pub fn global_config_path() -> Option<PathBuf> {
    global_config_dir().map(|dir| dir.join("snailfish.toml"))
}

/// Get the path to the local config file in a directory.
pub fn local_config_path(dir: &Path) -> PathBuf {
    dir.join(LOCAL_CONFIG_FILE)
}

/// Load a TOML file into RawSettings for manual merging.
fn load_raw_settings(path: &Path) -> Result<RawSettings, ApplicationError> {
    let content = std::fs::read_to_string(path).map_err(|e| ApplicationError::Config {
        message: format!("read {}: {}", path.display(), e),
    })?;
    toml::from_str(&content).map_err(|e| ApplicationError::Config {
        message: format!("parse {}: {}", path.display(), e),
    })
}

impl Settings {
    /// Reduction guard rails derived from these settings.
    pub fn reduction_limits(&self) -> ReductionLimits {
        ReductionLimits {
            max_steps: self.reduction.max_steps,
        }
    }

    /// Overlay config onto self (base): specified values win.
    fn merge_with(&self, overlay: &RawSettings) -> Self {
        Self {
            reduction: ReductionConfig {
                max_steps: overlay
                    .reduction
                    .max_steps
                    .unwrap_or(self.reduction.max_steps),
            },
            search: SearchConfig {
                parallel: overlay.search.parallel.unwrap_or(self.search.parallel),
            },
        }
    }

    /// Load settings with layered precedence.
    ///
    /// # Arguments
    /// * `local` - Optional local config file; when absent, `./.snailfish.toml` is used if present
    ///
    /// # Precedence (lowest to highest)
    /// 1. Compiled defaults
    /// 2. Global config: `$XDG_CONFIG_HOME/snailfish/snailfish.toml`
    /// 3. Local config
    /// 4. Environment variables: `SNAILFISH_*` prefix, `__` separates sections
    pub fn load(local: Option<&Path>) -> Result<Self, ApplicationError> {
        let global = global_config_path().filter(|path| path.exists());
        let local = match local {
            Some(path) => {
                if !path.exists() {
                    return Err(ApplicationError::Config {
                        message: format!("config file not found: {}", path.display()),
                    });
                }
                Some(path.to_path_buf())
            }
            None => Some(local_config_path(Path::new("."))).filter(|path| path.exists()),
        };
        Self::load_from(global.as_deref(), local.as_deref())
    }

    /// Load settings from explicit global and local files (both optional).
    pub fn load_from(global: Option<&Path>, local: Option<&Path>) -> Result<Self, ApplicationError> {
        // 1. Start with defaults
        let mut current = Self::default();

        // 2. Global config
        if let Some(path) = global {
            debug!("loading global config: {}", path.display());
            current = current.merge_with(&load_raw_settings(path)?);
        }

        // 3. Local config
        if let Some(path) = local {
            debug!("loading local config: {}", path.display());
            current = current.merge_with(&load_raw_settings(path)?);
        }

        // 4. Apply environment variables (explicit override)
        current = Self::apply_env_overrides(current)?;

        current.validate()?;
        Ok(current)
    }

    /// Apply SNAILFISH_* environment variables as explicit overrides.
    fn apply_env_overrides(mut settings: Self) -> Result<Self, ApplicationError> {
        let config = Config::builder()
            .add_source(
                Environment::with_prefix("SNAILFISH")
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()
            .map_err(config_err)?;

        if let Ok(val) = config.get::<usize>("reduction.max_steps") {
            settings.reduction.max_steps = val;
        }
        if let Ok(val) = config.get::<bool>("search.parallel") {
            settings.search.parallel = val;
        }

        Ok(settings)
    }

    fn validate(&self) -> Result<(), ApplicationError> {
        if self.reduction.max_steps == 0 {
            return Err(ApplicationError::Config {
                message: "reduction.max_steps must be greater than 0".into(),
            });
        }
        Ok(())
    }

    /// Render settings as TOML.
    pub fn to_toml(&self) -> Result<String, ApplicationError> {
        toml::to_string_pretty(self).map_err(|e| ApplicationError::Config {
            message: format!("serialize settings: {}", e),
        })
    }
}

fn config_err(e: ConfigError) -> ApplicationError {
    ApplicationError::Config {
        message: e.to_string(),
    }
}
