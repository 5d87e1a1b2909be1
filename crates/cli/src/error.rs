use thiserror::Error;

use crate::commands::error::{InitError, ProjectLocationError, ProjectStartupError};

/// Top-level CLI error that composes all command-specific errors
#[derive(Error, Debug)]
pub enum CliError {
    #[error("Initialization error: {0}")]
    Init(#[from] InitError),

    #[error("Project startup error: {0}")]
    ProjectStartup(#[from] ProjectStartupError),

    #[error("Configuration error: {0}")]
    ProjectLocation(#[from] ProjectLocationError),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<String> for CliError {
    fn from(err: String) -> Self {
        CliError::Internal(err)
    }
}
