use std::path::Path;

use dotenvy::{dotenv, from_path};
use tracing::debug;

/// Loads environment variables from a `.env` file next to the configuration.
///
/// Falls back to a `.env` in the current working directory. A missing file is not an
/// error: variables may just as well come from the process environment.
///
/// # Arguments
/// * `project_path` - Directory holding `basicguard.yaml`
pub fn load_env_from_project_path(project_path: &Path) {
    if from_path(project_path.join(".env")).is_err() && dotenv().is_err() {
        debug!("No .env file found, using the process environment only");
    }
}
