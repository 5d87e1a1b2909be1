use basicguard_core::{ReadYamlError, StartError, WriteFileError};
use thiserror::Error;

/// Errors that can occur while locating and loading the project config
#[derive(Error, Debug)]
pub enum ProjectLocationError {
    #[error("No basicguard.yaml found in {0}, run `basicguard init` first")]
    NotInitialized(String),

    #[error("Failed to read config: {0}")]
    ProjectConfig(#[from] ReadYamlError),
}

/// Errors that can occur during project initialization
#[derive(Error, Debug)]
pub enum InitError {
    #[error("Project already initialized: {0}")]
    AlreadyInitialized(String),

    #[error("Configuration write error: {0}")]
    ConfigWrite(#[from] WriteFileError),
}

/// Errors that can occur during project startup
#[derive(Error, Debug)]
pub enum ProjectStartupError {
    #[error("Project not initialized: {0}")]
    NotInitialized(String),

    #[error("{0}")]
    Core(#[from] StartError),
}
