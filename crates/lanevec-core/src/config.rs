//! Configuration loading.
//!
//! Sources, lowest priority first:
//! 1. Built-in defaults
//! 2. `lanevec.toml` in the working directory (or an explicit file)
//! 3. `LANEVEC_` prefixed environment variables, nested with `__`
//!    (e.g. `LANEVEC_SIMD__MAX_TIER=scalar`)

use std::path::Path;

use figment::providers::{Env, Format, Serialized, Toml};
use figment::Figment;
use serde::{Deserialize, Serialize};

use crate::capabilities::SimdTier;
use crate::error::Result;

/// Default configuration file name.
pub const CONFIG_FILE_NAME: &str = "lanevec.toml";

/// Environment variable prefix.
pub const ENV_PREFIX: &str = "LANEVEC_";

/// SIMD dispatch settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimdConfig {
    /// Widest tier dispatch may use. Detected extensions above it are ignored.
    pub max_tier: SimdTier,
}

impl Default for SimdConfig {
    fn default() -> Self {
        Self {
            max_tier: SimdTier::Simd256,
        }
    }
}

/// Top-level lanevec configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct LanevecConfig {
    /// SIMD dispatch settings.
    pub simd: SimdConfig,
}

impl LanevecConfig {
    /// Loads defaults, `lanevec.toml` and the environment.
    pub fn load() -> Result<Self> {
        Self::load_from(CONFIG_FILE_NAME)
    }

    /// Loads defaults, the given TOML file (if it exists) and the environment.
    pub fn load_from<P: AsRef<Path>>(path: P) -> Result<Self> {
        let config: Self = Self::figment(path.as_ref()).extract()?;
        tracing::debug!(max_tier = ?config.simd.max_tier, "Loaded lanevec configuration");
        Ok(config)
    }

    /// Parses configuration from a TOML string over the defaults.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        Ok(Figment::from(Serialized::defaults(Self::default()))
            .merge(Toml::string(content))
            .extract()?)
    }

    fn figment(path: &Path) -> Figment {
        Figment::from(Serialized::defaults(Self::default()))
            .merge(Toml::file(path))
            .merge(Env::prefixed(ENV_PREFIX).split("__"))
    }
}
