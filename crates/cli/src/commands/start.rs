use basicguard_core::{basicguard_info, start};

use crate::{commands::error::ProjectStartupError, project_location::ProjectLocation};

pub async fn handle_start(project_location: &ProjectLocation) -> Result<(), ProjectStartupError> {
    basicguard_info!("Loading from path {:?}", project_location.project_path());
    if !project_location.is_initialized() {
        return Err(ProjectStartupError::NotInitialized(
            "No basicguard.yaml in this directory. Run `basicguard init` or pass --path."
                .to_string(),
        ));
    }

    start(project_location.project_path()).await?;

    Ok(())
}
