pub mod env_value;
pub mod github_config;
pub mod logging;
pub mod settings;
