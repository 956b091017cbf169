//! Library settings loaded from TOML.
//!
//! ```toml
//! enforce_entropy = true
//! min_entropy_level = 3.5
//! max_account_depth = 20
//! max_index_depth = 200
//! log_level = "debug"
//! ```

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::level_filters::LevelFilter;
use tracing::{debug, info};

use crate::Ots;
use crate::error::{ConfigError, OtsResult};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct OtsConfig {
    /// Refuse random input below the entropy level.
    pub enforce_entropy: bool,
    /// Bits of entropy per byte random input must reach. Library default
    /// when unset.
    pub min_entropy_level: Option<f64>,
    pub max_account_depth: Option<u32>,
    pub max_index_depth: Option<u32>,
    /// Level filter for [`crate::logging`].
    pub log_level: Option<String>,
}

impl Default for OtsConfig {
    fn default() -> Self {
        OtsConfig {
            enforce_entropy: true,
            min_entropy_level: None,
            max_account_depth: None,
            max_index_depth: None,
            log_level: None,
        }
    }
}

impl OtsConfig {
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        let config: OtsConfig = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let config = Self::from_toml_str(&fs::read_to_string(path)?)?;
        debug!(path = %path.display(), "loaded configuration");
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if let Some(level) = self.min_entropy_level {
            if !level.is_finite() || level < 0.0 {
                return Err(ConfigError::Invalid(format!(
                    "min_entropy_level must be a non-negative number, got {}",
                    level
                )));
            }
        }
        self.level_filter()?;
        Ok(())
    }

    /// Parsed `log_level`, if set.
    pub fn level_filter(&self) -> Result<Option<LevelFilter>, ConfigError> {
        self.log_level
            .as_deref()
            .map(|level| {
                level
                    .parse()
                    .map_err(|_| ConfigError::Invalid(format!("unknown log level {:?}", level)))
            })
            .transpose()
    }
}

impl Ots {
    /// Push `config` into the library.
    ///
    /// Depths that are not given fall back to the library defaults.
    pub fn apply_config(&self, config: &OtsConfig) -> OtsResult<()> {
        config.validate()?;
        self.set_enforce_entropy(config.enforce_entropy);
        if let Some(level) = config.min_entropy_level {
            self.set_enforce_entropy_level(level);
        }
        self.reset_max_depth();
        if let Some(depth) = config.max_account_depth {
            self.set_max_account_depth(depth);
        }
        if let Some(depth) = config.max_index_depth {
            self.set_max_index_depth(depth);
        }
        info!(
            enforce_entropy = config.enforce_entropy,
            max_account_depth = self.max_account_depth(),
            max_index_depth = self.max_index_depth(),
            "applied configuration"
        );
        Ok(())
    }
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
