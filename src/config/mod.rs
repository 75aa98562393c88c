#[cfg(feature = "cli")]
pub mod cli;
#[cfg(feature = "lambda")]
pub mod lambda;
pub mod toml_config;

#[cfg(feature = "cli")]
pub use cli::{CheckArgs, CliConfig, Command};
pub use toml_config::{DataSourceKind, TomlConfig};
