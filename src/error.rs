use thiserror::Error;

#[derive(Debug, Error)]
pub enum ResolverError {
    #[error("Config error: {0}")]
    Config(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("Invalid filament setting: {0}")]
    InvalidCommand(String),
}
