//! vsl-config
//!
//! Landing page settings (locales, gating, links, file locations) plus disk
//! persistence helpers.

pub mod error;
pub mod manager;
pub mod model;

pub use error::ConfigError;
pub use manager::ConfigManager;
pub use model::Config;
