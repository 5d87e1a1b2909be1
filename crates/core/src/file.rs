use std::{fs, fs::File, io::Write, path::Path};

#[derive(thiserror::Error, Debug)]
pub enum WriteFileError {
    #[error("Could not create dir: {0}")]
    CouldNotCreateDir(std::io::Error),

    #[error("Could not write the file: {0}")]
    CouldNotWriteFile(std::io::Error),

    #[error("Could not create the file: {0}")]
    CouldNotCreateFile(std::io::Error),

    #[error("File already exists: {0}")]
    AlreadyExists(String),
}

/// Writes content to a file, creating parent directories as needed.
///
/// Trailing whitespace is trimmed from every line. Existing files are never
/// overwritten.
///
/// # Arguments
/// * `path` - The file path to write to
/// * `contents` - The string content to write
///
/// # Returns
/// * `Ok(())` - If the file was written successfully
/// * `Err(WriteFileError)` - If the file exists or directory creation or writing fails
pub fn write_file(path: &Path, contents: &str) -> Result<(), WriteFileError> {
    if path.exists() {
        return Err(WriteFileError::AlreadyExists(path.display().to_string()));
    }

    if let Some(dir) = path.parent() {
        fs::create_dir_all(dir).map_err(WriteFileError::CouldNotCreateDir)?;
    }

    let cleaned_contents: String =
        contents.lines().map(|line| line.trim_end()).collect::<Vec<&str>>().join("\n");

    let mut file = File::create(path).map_err(WriteFileError::CouldNotCreateFile)?;
    file.write_all(cleaned_contents.as_bytes()).map_err(WriteFileError::CouldNotWriteFile)?;
    file.write_all(b"\n").map_err(WriteFileError::CouldNotWriteFile)?;
    Ok(())
}

/// Starter `basicguard.yaml` protecting writes and the admin area.
pub fn generate_config_template(username: &str) -> String {
    format!(
        r#"users:
  - user_name: {username}
    password: ${{BASICGUARD_PASSWORD}}
restricted_methods: [POST, PUT, PATCH, DELETE]
restricted_urls:
  - /admin/*
require_auth_for_all: false
user_match_policy: any_user
api_config:
  port: 3000
"#
    )
}
