pub mod authentication;
pub use authentication::{
    validate_basic_auth, AuthRequest, BasicAuthCredentials, BasicAuthError, Decision, Interceptor,
    RequestDescriptor, RuleSet, UrlPattern, User, UserMatchPolicy, Verdict,
    WWW_AUTHENTICATE_CHALLENGE,
};
mod logger;
pub use logger::{setup_info_logger, setup_logger};
pub mod middleware;
mod shared;
pub use yaml::{parse, read, ApiConfig, ReadYamlError, SetupConfig, CONFIG_FILE_NAME};
mod startup;
pub use startup::{create_router, start, StartError};
mod environment;
mod file;
mod yaml;

pub use environment::load_env_from_project_path;
pub use file::{generate_config_template, write_file, WriteFileError};
pub use tracing::info as basicguard_info;
