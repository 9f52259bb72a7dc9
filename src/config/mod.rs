/// Database connection and table creation
pub mod database;

/// Application settings loaded from config.toml and the environment
pub mod settings;

pub use settings::{AppConfig, DatabaseConfig, HashingConfig, JwtConfig, load_app_configuration};
