use thiserror::Error;

use crate::core::types::NationId;

#[derive(Error, Debug)]
pub enum GeoError {
    #[error("Nation not found: {0}")]
    NationNotFound(NationId),

    #[error("A turn is already in progress")]
    TurnInProgress,

    #[error("A previous turn was interrupted; load or start a game to continue")]
    SessionPoisoned,

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Invalid save slot name: {0:?}")]
    InvalidSlot(String),

    #[error("Not authenticated: {0}")]
    Unauthenticated(String),

    #[error("Remote save error: {0}")]
    Remote(String),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerdeError(#[from] serde_json::Error),

    #[error("Config parse error: {0}")]
    TomlError(#[from] toml::de::Error),
}

pub type Result<T> = std::result::Result<T, GeoError>;
