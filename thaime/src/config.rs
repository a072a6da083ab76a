//! Thaime configuration that extends the base `Config` from core.
//!
//! This configuration includes:
//! - All generic options from `thaime_core::Config` (flattened via serde)
//! - Where the phonetic dictionary lives and how to read it
//! - The default log filter for the terminal host
//!
//! # Example
//!
//! ```rust
//! use thaime::ThaimeConfig;
//!
//! let config = ThaimeConfig::from_toml_str("initial_mode = \"phonetic\"").unwrap();
//! assert_eq!(config.base().initial_mode, thaime_core::Mode::Phonetic);
//! ```

use crate::dictionary::DictionaryFormat;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

pub const DEFAULT_LOG_FILTER: &str = "thaime=info,thaime_core=info";

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct ThaimeConfig {
    /// Base configuration fields (initial mode, shortcuts, commit behavior)
    #[serde(flatten)]
    pub base: thaime_core::Config,

    /// Phonetic dictionary. The built-in demo dictionary is used when unset.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dictionary: Option<PathBuf>,

    pub dictionary_format: DictionaryFormat,

    /// `EnvFilter` directive used when `RUST_LOG` is not set.
    pub log_filter: String,
}

impl Default for ThaimeConfig {
    fn default() -> Self {
        Self {
            base: thaime_core::Config::default(),
            dictionary: None,
            dictionary_format: DictionaryFormat::Auto,
            log_filter: DEFAULT_LOG_FILTER.to_string(),
        }
    }
}

impl ThaimeConfig {
    pub fn load_toml<P: AsRef<std::path::Path>>(
        path: P,
    ) -> Result<Self, Box<dyn std::error::Error>> {
        let content = std::fs::read_to_string(path)?;
        let config: ThaimeConfig = toml::from_str(&content)?;
        Ok(config)
    }

    pub fn save_toml<P: AsRef<std::path::Path>>(
        &self,
        path: P,
    ) -> Result<(), Box<dyn std::error::Error>> {
        std::fs::write(path, self.to_toml_string()?)?;
        Ok(())
    }

    pub fn from_toml_str(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(content)
    }

    pub fn to_toml_string(&self) -> Result<String, toml::ser::Error> {
        toml::to_string_pretty(self)
    }

    pub fn into_base(self) -> thaime_core::Config {
        self.base
    }

    pub fn base(&self) -> &thaime_core::Config {
        &self.base
    }

    pub fn base_mut(&mut self) -> &mut thaime_core::Config {
        &mut self.base
    }
}
