use std::collections::BTreeSet;

/// A restricted URL, parsed once when the rules are built.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum UrlPattern {
    /// Matches only the identical path.
    Exact(String),
    /// `prefix/*`: matches every path starting with `prefix`.
    ///
    /// This is a literal string prefix, not a segment boundary, so `/admin/*` also
    /// covers `/administrator`.
    PrefixWildcard(String),
    /// `parent/{param}`: matches any path whose text before its last `/` equals
    /// `parent`, whatever the final segment is.
    SingleSegmentParam { parent: String },
}

impl UrlPattern {
    /// Classifies a configured URL pattern.
    ///
    /// Every input yields a pattern. A trailing `/*` wins over a `{`, and a `{`
    /// pattern without any `/` has no parent segment to compare, so it is kept as an
    /// exact match.
    pub fn parse(pattern: &str) -> Self {
        if let Some(prefix) = pattern.strip_suffix("/*") {
            return UrlPattern::PrefixWildcard(prefix.to_string());
        }

        if pattern.contains('{') {
            if let Some(parent) = parent_of(pattern) {
                return UrlPattern::SingleSegmentParam { parent: parent.to_string() };
            }
        }

        UrlPattern::Exact(pattern.to_string())
    }

    pub fn matches(&self, path: &str) -> bool {
        match self {
            UrlPattern::Exact(expected) => path == expected,
            UrlPattern::PrefixWildcard(prefix) => path.starts_with(prefix.as_str()),
            UrlPattern::SingleSegmentParam { parent } => {
                parent_of(path).is_some_and(|path_parent| path_parent == parent)
            }
        }
    }
}

/// Text before the last `/`, or `None` when there is no `/` at all.
fn parent_of(value: &str) -> Option<&str> {
    value.rfind('/').map(|index| &value[..index])
}

/// Decides which requests have to present credentials.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RuleSet {
    require_auth_for_all: bool,
    restricted_methods: BTreeSet<String>,
    restricted_urls: Vec<UrlPattern>,
}

impl RuleSet {
    pub fn new<M, U>(require_auth_for_all: bool, restricted_methods: M, restricted_urls: U) -> Self
    where
        M: IntoIterator,
        M::Item: Into<String>,
        U: IntoIterator,
        U::Item: AsRef<str>,
    {
        Self {
            require_auth_for_all,
            restricted_methods: restricted_methods.into_iter().map(Into::into).collect(),
            restricted_urls: restricted_urls
                .into_iter()
                .map(|pattern| UrlPattern::parse(pattern.as_ref()))
                .collect(),
        }
    }

    /// Evaluates the rules for one request.
    ///
    /// The global flag is checked first, then the restricted methods, then the URL
    /// patterns in their configured order. The first hit wins.
    ///
    /// # Arguments
    /// * `method` - The request method, compared exactly (`POST` is not `post`)
    /// * `path` - The request path without query string
    ///
    /// # Returns
    /// * `true` - If the request must carry valid credentials
    /// * `false` - If the request can pass without any
    pub fn requires_auth(&self, method: &str, path: &str) -> bool {
        if self.require_auth_for_all {
            return true;
        }

        if self.restricted_methods.contains(method) {
            return true;
        }

        self.restricted_urls.iter().any(|pattern| pattern.matches(path))
    }

    /// True when no rule can ever require credentials.
    pub fn is_empty(&self) -> bool {
        !self.require_auth_for_all
            && self.restricted_methods.is_empty()
            && self.restricted_urls.is_empty()
    }

    pub fn require_auth_for_all(&self) -> bool {
        self.require_auth_for_all
    }

    pub fn restricted_methods(&self) -> &BTreeSet<String> {
        &self.restricted_methods
    }

    pub fn restricted_urls(&self) -> &[UrlPattern] {
        &self.restricted_urls
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn url_rules(patterns: &[&str]) -> RuleSet {
        RuleSet::new(false, Vec::<String>::new(), patterns.iter())
    }

    #[test]
    fn test_pattern_classification() {
        assert_eq!(UrlPattern::parse("/admin/*"), UrlPattern::PrefixWildcard("/admin".into()));
        assert_eq!(
            UrlPattern::parse("/user/{id}"),
            UrlPattern::SingleSegmentParam { parent: "/user".into() }
        );
        assert_eq!(UrlPattern::parse("/user/create"), UrlPattern::Exact("/user/create".into()));
        assert_eq!(
            UrlPattern::parse("/user/{id}/*"),
            UrlPattern::PrefixWildcard("/user/{id}".into())
        );
        assert_eq!(UrlPattern::parse("{id}"), UrlPattern::Exact("{id}".into()));
        assert_eq!(UrlPattern::parse("/admin*"), UrlPattern::Exact("/admin*".into()));
    }

    #[test]
    fn test_empty_rules_never_require_auth() {
        let rules = RuleSet::default();

        assert!(rules.is_empty());
        for (method, path) in [("GET", "/"), ("POST", "/user"), ("DELETE", "/admin/1")] {
            assert!(!rules.requires_auth(method, path));
        }
    }

    #[test]
    fn test_require_auth_for_all() {
        let rules = RuleSet::new(true, Vec::<String>::new(), Vec::<String>::new());

        assert!(!rules.is_empty());
        assert!(rules.requires_auth("GET", "/"));
        assert!(rules.requires_auth("GET", "/hi"));
    }

    #[test]
    fn test_restricted_methods() {
        let rules = RuleSet::new(false, ["POST", "PUT", "DELETE"], Vec::<String>::new());

        assert!(rules.requires_auth("POST", "/user"));
        assert!(rules.requires_auth("PUT", "/user"));
        assert!(rules.requires_auth("DELETE", "/user"));
        assert!(!rules.requires_auth("GET", "/user/5"));
        assert!(!rules.requires_auth("post", "/user"));
        assert!(!rules.requires_auth("POS", "/user"));
    }

    #[test]
    fn test_wildcard_pattern() {
        let rules = url_rules(&["/admin/*"]);

        assert!(rules.requires_auth("GET", "/admin/create"));
        assert!(rules.requires_auth("GET", "/admin/10"));
        assert!(rules.requires_auth("GET", "/admin/10/nested"));
        assert!(rules.requires_auth("GET", "/admin"));
        // literal prefix, not a segment boundary
        assert!(rules.requires_auth("GET", "/administrator"));
        assert!(!rules.requires_auth("GET", "/adm"));
        assert!(!rules.requires_auth("GET", "/v1/admin/10"));
    }

    #[test]
    fn test_parametrized_pattern() {
        let rules = url_rules(&["/user/{id}"]);

        assert!(rules.requires_auth("GET", "/user/42"));
        assert!(rules.requires_auth("DELETE", "/user/anything"));
        assert!(rules.requires_auth("GET", "/user/"));
        assert!(!rules.requires_auth("GET", "/user"));
        assert!(!rules.requires_auth("GET", "/users/42"));
        assert!(!rules.requires_auth("GET", "/user/42/posts"));
        assert!(!rules.requires_auth("GET", "user"));
    }

    #[test]
    fn test_root_level_parametrized_pattern() {
        let rules = url_rules(&["/{slug}"]);

        assert!(rules.requires_auth("GET", "/anything"));
        assert!(rules.requires_auth("GET", "/"));
        assert!(!rules.requires_auth("GET", "/a/b"));
    }

    #[test]
    fn test_exact_pattern() {
        let rules = url_rules(&["/user/create"]);

        assert!(rules.requires_auth("POST", "/user/create"));
        assert!(!rules.requires_auth("POST", "/user/create/"));
        assert!(!rules.requires_auth("POST", "/user/create2"));
        assert!(!rules.requires_auth("POST", "/user"));
    }

    #[test]
    fn test_mixed_patterns() {
        let rules = url_rules(&["/user/create", "/admin/*", "/user/{id}"]);

        assert!(rules.requires_auth("POST", "/user/create"));
        assert!(rules.requires_auth("DELETE", "/user/12"));
        assert!(rules.requires_auth("GET", "/admin/10"));
        assert!(!rules.requires_auth("GET", "/openurl"));
        assert_eq!(rules.restricted_urls().len(), 3);
    }

    #[test]
    fn test_evaluation_is_deterministic() {
        let rules = RuleSet::new(false, ["POST"], ["/admin/*", "/user/{id}"]);

        for _ in 0..3 {
            assert!(rules.requires_auth("GET", "/user/1"));
            assert!(!rules.requires_auth("GET", "/open"));
        }
    }
}
