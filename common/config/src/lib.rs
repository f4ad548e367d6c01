//! Layered configuration (§4.13, A3).
//!
//! Resolves, in ascending priority: built-in defaults
//! ([`types::Config::default`]), a `conductor.toml` file
//! ([`toml_config`]), environment variables ([`env_loader`]), and finally
//! explicit CLI flags (applied by the caller on top of [`loader::load`]'s
//! result) — mirroring the teacher's own config-layering convention.

pub mod env_loader;
pub mod error;
pub mod loader;
pub mod toml_config;
pub mod types;

pub use error::ConfigError;
pub use loader::DEFAULT_CONFIG_FILE;
pub use loader::default_config_dir;
pub use loader::load;
pub use loader::load_from_dir;
pub use types::Config;
pub use types::ModelTierNames;
