//! Logger configuration

mod env;

pub use env::{is_truthy, EnvKeys, LoggerConfig, DEBUG_ENV_VAR, VERBOSE_ENV_VAR};
