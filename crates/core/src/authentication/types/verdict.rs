use core::fmt;
use std::fmt::{Display, Formatter};

use serde::Serialize;

/// Outcome of checking the credentials presented with a request.
#[derive(Clone, Copy, Debug, Serialize, PartialEq, Eq, Hash)]
pub enum Verdict {
    Allowed,
    DeniedMissingHeader,
    DeniedMalformedHeader,
    DeniedBadCredentials,
}

impl Verdict {
    pub fn is_allowed(&self) -> bool {
        matches!(self, Verdict::Allowed)
    }

    /// Stable label used in logs and CLI output.
    pub fn as_str(&self) -> &'static str {
        match self {
            Verdict::Allowed => "allowed",
            Verdict::DeniedMissingHeader => "missing_header",
            Verdict::DeniedMalformedHeader => "malformed_header",
            Verdict::DeniedBadCredentials => "bad_credentials",
        }
    }
}

impl Display for Verdict {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
