use std::sync::Arc;

use axum::http::{header::AUTHORIZATION, request::Parts, HeaderMap, Request};
use tracing::{debug, warn};

use crate::{
    authentication::{
        basic_auth::validate_basic_auth,
        rules::RuleSet,
        types::{User, UserMatchPolicy, Verdict},
    },
    yaml::SetupConfig,
};

/// Value of the `WWW-Authenticate` header sent with every rejection.
pub const WWW_AUTHENTICATE_CHALLENGE: &str = "Basic realm=Authorization Required";

/// What the hosting framework has to expose about a request.
pub trait AuthRequest {
    fn method(&self) -> &str;

    /// The request path, without query string.
    fn path(&self) -> &str;

    fn header(&self, name: &str) -> Option<&str>;
}

/// Header values that are not valid UTF-8 are reported as absent.
fn header_str<'a>(headers: &'a HeaderMap, name: &str) -> Option<&'a str> {
    headers.get(name).and_then(|value| std::str::from_utf8(value.as_bytes()).ok())
}

impl<B> AuthRequest for Request<B> {
    fn method(&self) -> &str {
        Request::method(self).as_str()
    }

    fn path(&self) -> &str {
        self.uri().path()
    }

    fn header(&self, name: &str) -> Option<&str> {
        header_str(self.headers(), name)
    }
}

impl AuthRequest for Parts {
    fn method(&self) -> &str {
        self.method.as_str()
    }

    fn path(&self) -> &str {
        self.uri.path()
    }

    fn header(&self, name: &str) -> Option<&str> {
        header_str(&self.headers, name)
    }
}

/// A request described by plain strings, for callers outside of `http`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RequestDescriptor {
    pub method: String,
    pub path: String,
    pub authorization: Option<String>,
}

impl RequestDescriptor {
    pub fn new(method: impl Into<String>, path: impl Into<String>) -> Self {
        Self { method: method.into(), path: path.into(), authorization: None }
    }

    pub fn with_authorization(mut self, authorization: impl Into<String>) -> Self {
        self.authorization = Some(authorization.into());
        self
    }
}

impl AuthRequest for RequestDescriptor {
    fn method(&self) -> &str {
        &self.method
    }

    fn path(&self) -> &str {
        &self.path
    }

    fn header(&self, name: &str) -> Option<&str> {
        if name.eq_ignore_ascii_case(AUTHORIZATION.as_str()) {
            self.authorization.as_deref()
        } else {
            None
        }
    }
}

/// Whether a request may continue down the stack.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    Continue,
    Reject(Verdict),
}

impl Decision {
    pub fn is_continue(&self) -> bool {
        matches!(self, Decision::Continue)
    }
}

#[derive(Debug)]
struct InterceptorConfig {
    rules: RuleSet,
    users: Vec<User>,
    policy: UserMatchPolicy,
}

/// Composes the rule evaluation and the credential check for each request.
///
/// The configuration is immutable and shared behind an `Arc`, so clones are cheap and
/// can be handed to any number of concurrent request handlers.
#[derive(Debug, Clone)]
pub struct Interceptor {
    config: Arc<InterceptorConfig>,
}

impl Interceptor {
    pub fn new(rules: RuleSet, users: Vec<User>, policy: UserMatchPolicy) -> Self {
        Self { config: Arc::new(InterceptorConfig { rules, users, policy }) }
    }

    /// Builds an interceptor from a loaded `basicguard.yaml`.
    pub fn from_config(config: &SetupConfig) -> Self {
        Self::new(config.rule_set(), config.users.clone(), config.user_match_policy)
    }

    pub fn rules(&self) -> &RuleSet {
        &self.config.rules
    }

    pub fn users(&self) -> &[User] {
        &self.config.users
    }

    pub fn policy(&self) -> UserMatchPolicy {
        self.config.policy
    }

    /// Checks an `Authorization` header value against the configured users.
    pub fn verdict_for(&self, authorization: Option<&str>) -> Verdict {
        validate_basic_auth(&self.config.users, authorization, self.config.policy)
    }

    /// Decides whether the request may continue.
    ///
    /// Requests that no rule protects continue without their header being looked at.
    /// Protected requests continue only when their credentials are accepted.
    ///
    /// # Arguments
    /// * `request` - Anything exposing method, path and headers
    ///
    /// # Returns
    /// * `Decision::Continue` - Hand the request to the next stage unchanged
    /// * `Decision::Reject(verdict)` - Answer with a challenge, `verdict` says why
    pub fn check<R>(&self, request: &R) -> Decision
    where
        R: AuthRequest + ?Sized,
    {
        let method = request.method();
        let path = request.path();

        if !self.config.rules.requires_auth(method, path) {
            debug!("{} {} does not require authorization", method, path);
            return Decision::Continue;
        }

        let verdict = self.verdict_for(request.header(AUTHORIZATION.as_str()));
        if verdict.is_allowed() {
            debug!("{} {} authorized", method, path);
            Decision::Continue
        } else {
            warn!("{} {} rejected: {}", method, path, verdict);
            Decision::Reject(verdict)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::authentication::basic_auth::BasicAuthCredentials;
    use axum::body::Body;

    fn method_interceptor() -> Interceptor {
        Interceptor::new(
            RuleSet::new(false, ["POST", "PUT", "DELETE"], Vec::<String>::new()),
            vec![User::new("UserName1", "Password1")],
            UserMatchPolicy::AnyUser,
        )
    }

    #[test]
    fn test_unrestricted_request_continues_without_header() {
        let interceptor = method_interceptor();

        let decision = interceptor.check(&RequestDescriptor::new("GET", "/user/5"));

        assert_eq!(decision, Decision::Continue);
    }

    #[test]
    fn test_restricted_request_without_header_is_rejected() {
        let interceptor = method_interceptor();

        let decision = interceptor.check(&RequestDescriptor::new("POST", "/user"));

        assert_eq!(decision, Decision::Reject(Verdict::DeniedMissingHeader));
    }

    #[test]
    fn test_restricted_request_with_valid_header_continues() {
        let interceptor = method_interceptor();
        let request = RequestDescriptor::new("POST", "/user")
            .with_authorization(BasicAuthCredentials::encode_header("UserName1", "Password1"));

        assert!(interceptor.check(&request).is_continue());
    }

    #[test]
    fn test_unrestricted_request_ignores_bad_header() {
        let interceptor = method_interceptor();
        let request = RequestDescriptor::new("GET", "/user/5").with_authorization("garbage");

        assert_eq!(interceptor.check(&request), Decision::Continue);
    }

    #[test]
    fn test_http_request_is_checked() {
        let interceptor = method_interceptor();

        let request = Request::builder()
            .method("DELETE")
            .uri("/user?id=3")
            .header("Authorization", BasicAuthCredentials::encode_header("UserName1", "nope"))
            .body(Body::empty())
            .unwrap();

        assert_eq!(interceptor.check(&request), Decision::Reject(Verdict::DeniedBadCredentials));

        let (parts, _) = request.into_parts();
        assert_eq!(parts.path(), "/user");
        assert_eq!(interceptor.check(&parts), Decision::Reject(Verdict::DeniedBadCredentials));
    }

    #[test]
    fn test_descriptor_header_lookup_is_case_insensitive() {
        let request = RequestDescriptor::new("GET", "/").with_authorization("Basic abc=");

        assert_eq!(request.header("authorization"), Some("Basic abc="));
        assert_eq!(request.header("Authorization"), Some("Basic abc="));
        assert_eq!(request.header("x-other"), None);
    }

    #[test]
    fn test_empty_configuration_allows_everything() {
        let interceptor = Interceptor::new(RuleSet::default(), vec![], UserMatchPolicy::AnyUser);

        for method in ["GET", "POST", "DELETE"] {
            assert!(interceptor.check(&RequestDescriptor::new(method, "/anything")).is_continue());
        }
    }

    #[test]
    fn test_interceptor_is_shareable_across_threads() {
        let interceptor = method_interceptor();

        let handles: Vec<_> = (0..4)
            .map(|i| {
                let interceptor = interceptor.clone();
                std::thread::spawn(move || {
                    let path = format!("/user/{}", i);
                    interceptor.check(&RequestDescriptor::new("POST", path))
                })
            })
            .collect();

        for handle in handles {
            assert_eq!(handle.join().unwrap(), Decision::Reject(Verdict::DeniedMissingHeader));
        }
    }
}
