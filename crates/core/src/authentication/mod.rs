mod basic_auth;
pub use basic_auth::{validate_basic_auth, BasicAuthCredentials, BasicAuthError};

mod interceptor;
pub use interceptor::{
    AuthRequest, Decision, Interceptor, RequestDescriptor, WWW_AUTHENTICATE_CHALLENGE,
};

mod rules;
pub use rules::{RuleSet, UrlPattern};

mod types;
pub use types::{User, UserMatchPolicy, Verdict};
