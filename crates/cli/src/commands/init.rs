use basicguard_core::{WriteFileError, generate_config_template, write_file};

use crate::{
    commands::error::InitError,
    console::{print_success_message, print_warn_message},
    project_location::ProjectLocation,
};

const DEFAULT_PASSWORD: &str = "change-me";

fn write_env(project_location: &ProjectLocation) -> Result<(), WriteFileError> {
    write_file(&project_location.env_path(), &format!("BASICGUARD_PASSWORD={}", DEFAULT_PASSWORD))
}

pub fn handle_init(project_location: &ProjectLocation, username: &str) -> Result<(), InitError> {
    if project_location.is_initialized() {
        return Err(InitError::AlreadyInitialized(
            project_location.config_path().display().to_string(),
        ));
    }

    write_file(&project_location.config_path(), &generate_config_template(username))?;

    match write_env(project_location) {
        Ok(()) => print_warn_message(&format!(
            "BASICGUARD_PASSWORD in {} is set to '{}', change it before starting",
            project_location.env_path().display(),
            DEFAULT_PASSWORD
        )),
        Err(WriteFileError::AlreadyExists(path)) => print_warn_message(&format!(
            "{} already exists, add BASICGUARD_PASSWORD to it yourself",
            path
        )),
        Err(e) => return Err(e.into()),
    }

    print_success_message(&format!(
        "Created {}, run `basicguard start` to serve it",
        project_location.config_path().display()
    ));

    Ok(())
}
