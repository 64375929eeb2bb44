//! Logger settings seeded from the environment

use std::env;

use serde::{Deserialize, Serialize};

/// Default variable enabling debug lines
pub const DEBUG_ENV_VAR: &str = "SYNERGY_GUI_DEBUG";

/// Default variable enabling verbose lines
pub const VERBOSE_ENV_VAR: &str = "SYNERGY_GUI_VERBOSE";

/// Names of the environment variables read at startup
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnvKeys {
    pub debug: String,
    pub verbose: String,
}

impl Default for EnvKeys {
    fn default() -> Self {
        Self {
            debug: DEBUG_ENV_VAR.to_string(),
            verbose: VERBOSE_ENV_VAR.to_string(),
        }
    }
}

impl EnvKeys {
    /// Use custom variable names
    pub fn new(debug: impl Into<String>, verbose: impl Into<String>) -> Self {
        Self {
            debug: debug.into(),
            verbose: verbose.into(),
        }
    }
}

/// Initial logger flags
///
/// Both default to off. Serializable so a host can persist the checkbox
/// state alongside its own settings.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggerConfig {
    /// Emit DEBUG lines
    pub debug: bool,
    /// Emit VERBOSE lines
    pub verbose: bool,
}

impl LoggerConfig {
    /// Create a config with both flags off
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the debug flag
    pub fn with_debug(mut self, debug: bool) -> Self {
        self.debug = debug;
        self
    }

    /// Set the verbose flag
    pub fn with_verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }

    /// Read the default variables from the process environment
    pub fn from_env() -> Self {
        Self::from_env_keys(&EnvKeys::default())
    }

    /// Read custom variables from the process environment
    pub fn from_env_keys(keys: &EnvKeys) -> Self {
        Self::default().apply_lookup(keys, |name| env::var(name).ok())
    }

    /// Layer variables from `lookup` over this config.
    ///
    /// A truthy value turns a flag on; anything else, including an empty or
    /// missing variable, leaves it as it was.
    pub fn apply_lookup<F>(mut self, keys: &EnvKeys, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        if lookup(&keys.debug).is_some_and(|v| is_truthy(&v)) {
            self.debug = true;
        }
        if lookup(&keys.verbose).is_some_and(|v| is_truthy(&v)) {
            self.verbose = true;
        }
        self
    }
}

/// Whether a string spells "true": `1`, `true`, `yes` or `on`,
/// case-insensitive, surrounding whitespace ignored.
pub fn is_truthy(value: &str) -> bool {
    matches!(
        value.trim().to_lowercase().as_str(),
        "1" | "true" | "yes" | "on"
    )
}
