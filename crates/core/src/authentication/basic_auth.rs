use base64::{engine::general_purpose, Engine as _};
use thiserror::Error;

use crate::authentication::types::{User, UserMatchPolicy, Verdict};

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BasicAuthError {
    #[error("Missing Authorization header")]
    MissingAuthHeader,
    #[error("Invalid Authorization header format")]
    InvalidHeaderFormat,
    #[error("Invalid base64 encoding")]
    InvalidBase64,
    #[error("Invalid credentials format")]
    InvalidCredentialsFormat,
    #[error("Invalid credentials")]
    InvalidCredentials,
}

impl BasicAuthError {
    /// Maps the failure onto the verdict reported for the request.
    pub fn verdict(&self) -> Verdict {
        match self {
            BasicAuthError::MissingAuthHeader => Verdict::DeniedMissingHeader,
            BasicAuthError::InvalidHeaderFormat
            | BasicAuthError::InvalidBase64
            | BasicAuthError::InvalidCredentialsFormat => Verdict::DeniedMalformedHeader,
            BasicAuthError::InvalidCredentials => Verdict::DeniedBadCredentials,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BasicAuthCredentials {
    pub username: String,
    pub password: String,
}

impl BasicAuthCredentials {
    /// Parses the raw value of an `Authorization` header.
    ///
    /// The value is split on its first space into a scheme and a payload. The scheme
    /// only has to be present; its text is not checked. The payload is standard padded
    /// base64 of `username:password`, split on the first colon, so passwords may
    /// contain colons.
    ///
    /// # Arguments
    /// * `header` - The header value, `None` when the request did not send one
    ///
    /// # Returns
    /// * `Ok(BasicAuthCredentials)` - The decoded user name and password
    /// * `Err(BasicAuthError)` - The first parsing step that failed
    pub fn from_header(header: Option<&str>) -> Result<Self, BasicAuthError> {
        let auth_header =
            header.filter(|value| !value.is_empty()).ok_or(BasicAuthError::MissingAuthHeader)?;

        let (_scheme, base64_credentials) =
            auth_header.split_once(' ').ok_or(BasicAuthError::InvalidHeaderFormat)?;

        let decoded = general_purpose::STANDARD
            .decode(base64_credentials)
            .map_err(|_| BasicAuthError::InvalidBase64)?;

        let credentials_str =
            String::from_utf8(decoded).map_err(|_| BasicAuthError::InvalidBase64)?;

        let (username, password) =
            credentials_str.split_once(':').ok_or(BasicAuthError::InvalidCredentialsFormat)?;

        Ok(BasicAuthCredentials { username: username.to_string(), password: password.to_string() })
    }

    /// Builds the `Authorization` header value for a user name and password.
    pub fn encode_header(username: &str, password: &str) -> String {
        format!("Basic {}", general_purpose::STANDARD.encode(format!("{}:{}", username, password)))
    }

    /// Validates the credentials against the configured users.
    pub fn validate(&self, users: &[User], policy: UserMatchPolicy) -> Result<(), BasicAuthError> {
        if policy.is_satisfied(users, &self.username, &self.password) {
            Ok(())
        } else {
            Err(BasicAuthError::InvalidCredentials)
        }
    }
}

/// Parses an `Authorization` header value and checks it against the configured users.
///
/// Pure: the same users, header and policy always give the same verdict.
pub fn validate_basic_auth(
    users: &[User],
    header: Option<&str>,
    policy: UserMatchPolicy,
) -> Verdict {
    match BasicAuthCredentials::from_header(header)
        .and_then(|credentials| credentials.validate(users, policy))
    {
        Ok(()) => Verdict::Allowed,
        Err(error) => error.verdict(),
    }
}
