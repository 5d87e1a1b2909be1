use std::path::{Path, PathBuf};

use basicguard_core::{CONFIG_FILE_NAME, SetupConfig, read};

use crate::commands::error::ProjectLocationError;

/// The directory a command operates on, holding `basicguard.yaml` and `.env`.
#[derive(Debug, Clone)]
pub struct ProjectLocation {
    project_path: PathBuf,
}

impl ProjectLocation {
    pub fn new(project_path: PathBuf) -> Self {
        Self { project_path }
    }

    pub fn project_path(&self) -> &Path {
        &self.project_path
    }

    pub fn config_path(&self) -> PathBuf {
        self.project_path.join(CONFIG_FILE_NAME)
    }

    pub fn env_path(&self) -> PathBuf {
        self.project_path.join(".env")
    }

    pub fn is_initialized(&self) -> bool {
        self.config_path().exists()
    }

    pub fn setup_config(&self, raw_yaml: bool) -> Result<SetupConfig, ProjectLocationError> {
        if !self.is_initialized() {
            return Err(ProjectLocationError::NotInitialized(
                self.project_path.display().to_string(),
            ));
        }

        Ok(read(&self.config_path(), raw_yaml)?)
    }
}
