//! Errors raised while setting up a world or loading settings

use thiserror::Error;

#[derive(Error, Debug)]
pub enum SimError {
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Obstacle {index} is not strictly to the right of the one before it")]
    UnorderedCourse { index: usize },

    #[error("Settings file error: {0}")]
    SettingsIo(#[from] std::io::Error),

    #[error("Settings parse error: {0}")]
    SettingsParse(#[from] serde_json::Error),
}
