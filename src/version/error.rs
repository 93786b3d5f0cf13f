use thiserror::Error;

use crate::version::update::{UpdateEvent, UpdateState};

#[derive(Debug, Error)]
pub enum RegistryError {
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Package not found: {0}")]
    NotFound(String),

    #[error("Invalid response: {0}")]
    InvalidResponse(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PlatformParseError {
    #[error("Invalid platform version: {0}")]
    Invalid(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum UpdateError {
    #[error("Cannot {event:?} while {state:?}")]
    InvalidTransition {
        state: UpdateState,
        event: UpdateEvent,
    },

    #[error("Module not tracked by this update: {0}")]
    UnknownModule(String),
}
