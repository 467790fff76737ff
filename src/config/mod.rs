#[cfg(feature = "cli")]
pub mod cli;
pub mod settings;
pub mod toml_config;

#[cfg(feature = "cli")]
pub use cli::CliConfig;
pub use settings::Settings;
