//! Configuration supplied by the editor: the translation projects and the lookup mode.
/// Config file loader
mod loader;
/// Configuration manager
mod manager;
/// Configuration types and settings
mod types;

pub use loader::parse_settings;
pub use manager::ConfigManager;
pub use types::{
    ConfigError,
    HelperSettings,
    ProjectConfig,
    ServerSettings,
    ValidationError,
};
