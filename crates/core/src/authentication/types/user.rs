use core::fmt;
use std::fmt::{Debug, Formatter};

use serde::{Deserialize, Serialize};
use subtle::ConstantTimeEq;

/// A user allowed through the Basic auth challenge.
///
/// Credentials are kept exactly as configured. Matching is exact and case-sensitive.
#[derive(Clone, Deserialize, Serialize, PartialEq, Eq)]
pub struct User {
    #[serde(rename = "user_name")]
    pub username: String,
    pub password: String,
}

impl User {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self { username: username.into(), password: password.into() }
    }

    /// Checks a decoded `username:password` pair against this user.
    ///
    /// Both halves are always compared so the time taken does not reveal which
    /// half differed.
    ///
    /// # Arguments
    /// * `username` - The user name decoded from the Authorization header
    /// * `password` - The password decoded from the Authorization header
    ///
    /// # Returns
    /// * `true` - If both the user name and the password are byte-for-byte equal
    /// * `false` - Otherwise
    pub fn matches(&self, username: &str, password: &str) -> bool {
        let username_eq = self.username.as_bytes().ct_eq(username.as_bytes());
        let password_eq = self.password.as_bytes().ct_eq(password.as_bytes());
        (username_eq & password_eq).into()
    }
}

impl Debug for User {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct("User").field("username", &self.username).field("password", &"***").finish()
    }
}

/// How a decoded credential pair is matched against the configured users.
#[derive(Clone, Copy, Debug, Default, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum UserMatchPolicy {
    /// Allowed when any configured user matches.
    #[default]
    AnyUser,
    /// Denied on the first configured user that does not match, so every user has to
    /// match. Kept for deployments that relied on the historical behaviour.
    EveryUser,
}

impl UserMatchPolicy {
    pub fn is_satisfied(&self, users: &[User], username: &str, password: &str) -> bool {
        match self {
            UserMatchPolicy::AnyUser => users.iter().any(|user| user.matches(username, password)),
            UserMatchPolicy::EveryUser => {
                users.iter().all(|user| user.matches(username, password))
            }
        }
    }
}
