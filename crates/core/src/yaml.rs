use regex::{Captures, Regex};
use serde::{Deserialize, Serialize};
use std::{env, fs::File, io::Read, path::Path};
use thiserror::Error;
use tracing::{error, warn};

use crate::authentication::{RuleSet, User, UserMatchPolicy};

pub const CONFIG_FILE_NAME: &str = "basicguard.yaml";

fn default_port() -> u16 {
    3000
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct ApiConfig {
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub host: Option<String>,
    #[serde(default = "default_port")]
    pub port: u16,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub allowed_origins: Option<Vec<String>>,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self { host: None, port: default_port(), allowed_origins: None }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq, Eq)]
pub struct SetupConfig {
    /// Users that may pass the challenge.
    #[serde(default)]
    pub users: Vec<User>,
    /// Methods that always require credentials, e.g. `POST`, `PUT`, `DELETE`.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub restricted_methods: Vec<String>,
    /// URL patterns requiring credentials:
    /// - `/v1/user` only that exact path
    /// - `/v1/user/{key}` any single segment under `/v1/user`
    /// - `/v1/user/*` everything starting with `/v1/user`
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub restricted_urls: Vec<String>,
    /// When set every request requires credentials and the other rules are not consulted.
    #[serde(default)]
    pub require_auth_for_all: bool,
    #[serde(default)]
    pub user_match_policy: UserMatchPolicy,
    #[serde(default)]
    pub api_config: ApiConfig,
}

impl SetupConfig {
    pub fn rule_set(&self) -> RuleSet {
        RuleSet::new(
            self.require_auth_for_all,
            self.restricted_methods.iter().cloned(),
            &self.restricted_urls,
        )
    }

    fn validate(&self) -> Result<(), ReadYamlError> {
        for (index, user) in self.users.iter().enumerate() {
            if user.username.is_empty() {
                return Err(ReadYamlError::InvalidUser(format!(
                    "user at index {} has an empty user_name",
                    index
                )));
            }
            if user.username.contains(':') {
                return Err(ReadYamlError::InvalidUser(format!(
                    "user_name {} contains ':' which can not be sent with basic auth",
                    user.username
                )));
            }
        }

        if let Some(index) = self.restricted_urls.iter().position(|url| url.is_empty()) {
            return Err(ReadYamlError::InvalidRestrictedUrl(format!(
                "restricted url at index {} is empty",
                index
            )));
        }

        Ok(())
    }
}

#[derive(Error, Debug)]
pub enum ReadYamlError {
    #[error("Can not find yaml")]
    CanNotFindYaml,

    #[error("Can not read yaml")]
    CanNotReadYaml,

    #[error("Setup config is invalid yaml and does not match the struct - {0}")]
    SetupConfigInvalidYaml(String),

    #[error("Environment variable {0} not found")]
    EnvironmentVariableNotFound(String),

    #[error("Environment variable pattern is invalid: {0}")]
    InvalidEnvironmentPattern(#[from] regex::Error),

    #[error("Invalid user: {0}")]
    InvalidUser(String),

    #[error("Invalid restricted url: {0}")]
    InvalidRestrictedUrl(String),
}

/// Substitutes `${VAR}` references with values from the environment.
fn substitute_env_variables(contents: &str) -> Result<String, ReadYamlError> {
    let re = Regex::new(r"\$\{([^}]+)\}")?;

    let missing = re
        .captures_iter(contents)
        .map(|caps| caps[1].to_string())
        .find(|name| env::var(name).is_err());
    if let Some(missing) = missing {
        error!("Environment variable {} not found", missing);
        return Err(ReadYamlError::EnvironmentVariableNotFound(missing));
    }

    let result =
        re.replace_all(contents, |caps: &Captures| env::var(&caps[1]).unwrap_or_default());
    Ok(result.into_owned())
}

/// Parses configuration text. JSON works as well since it is valid YAML.
pub fn parse(contents: &str, raw_yaml: bool) -> Result<SetupConfig, ReadYamlError> {
    let substituted_contents =
        if raw_yaml { contents.to_string() } else { substitute_env_variables(contents)? };

    // an empty document means "nothing configured"
    if substituted_contents.trim().is_empty() {
        return Ok(SetupConfig::default());
    }

    let config: SetupConfig = serde_yaml::from_str(&substituted_contents)
        .map_err(|e| ReadYamlError::SetupConfigInvalidYaml(e.to_string()))?;

    config.validate()?;

    let rules = config.rule_set();
    if config.users.is_empty()
        && !rules.is_empty()
        && config.user_match_policy == UserMatchPolicy::AnyUser
    {
        warn!("No users configured, every request matching a restriction will be rejected");
    }

    Ok(config)
}

/// Reads and parses the basicguard configuration file.
pub fn read(file_path: &Path, raw_yaml: bool) -> Result<SetupConfig, ReadYamlError> {
    let mut file = File::open(file_path).map_err(|_| ReadYamlError::CanNotFindYaml)?;
    let mut contents = String::new();
    file.read_to_string(&mut contents).map_err(|_| ReadYamlError::CanNotReadYaml)?;

    parse(&contents, raw_yaml)
}
