//! Layered settings: defaults, optional TOML file, then environment.

use serde::Deserialize;

use crate::report::DEFAULT_DUMP_PATH;
use crate::source::ExplorerConfig;

/// Default settings file, optional
pub const DEFAULT_CONFIG_FILE: &str = "attestscope.toml";

/// Environment variable prefix (e.g. `ATTESTSCOPE_EXPLORER__API_KEY=...`)
pub const ENV_PREFIX: &str = "ATTESTSCOPE";

#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub explorer: ExplorerConfig,
    #[serde(default = "default_dump_path")]
    pub dump_path: String,
}

fn default_dump_path() -> String {
    DEFAULT_DUMP_PATH.to_string()
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            explorer: ExplorerConfig::default(),
            dump_path: default_dump_path(),
        }
    }
}

impl Settings {
    /// Load from the default file (if present) and the environment
    pub fn new() -> Result<Self, ::config::ConfigError> {
        Self::from_file(DEFAULT_CONFIG_FILE, false)
    }

    /// Load from `path` and the environment; environment values win
    pub fn from_file(path: &str, required: bool) -> Result<Self, ::config::ConfigError> {
        Self::load(path, required, ENV_PREFIX)
    }

    /// Load from `path` and variables named `{env_prefix}_SECTION__KEY`
    pub fn load(path: &str, required: bool, env_prefix: &str) -> Result<Self, ::config::ConfigError> {
        ::config::Config::builder()
            .add_source(::config::File::with_name(path).required(required))
            .add_source(
                ::config::Environment::with_prefix(env_prefix)
                    .prefix_separator("_")
                    .separator("__"),
            )
            .build()?
            .try_deserialize()
    }
}
