use basicguard_core::{
    BasicAuthCredentials, Decision, Interceptor, RequestDescriptor, SetupConfig, Verdict,
};
use clap::Args;
use prettytable::Cell;

use crate::{
    commands::error::ProjectLocationError,
    console::{print_table, print_warn_message, verdict_cell},
    project_location::ProjectLocation,
};

#[derive(Args)]
pub struct CheckArgs {
    #[clap(long, short)]
    pub path: Option<String>,

    /// HTTP method, compared case-sensitively
    #[clap(long, short)]
    pub method: String,

    /// Request path, anything after `?` is ignored
    #[clap(long)]
    pub url: String,

    /// Raw Authorization header value, e.g. "Basic dXNlcjpwYXNz"
    #[clap(long, short, conflicts_with_all = ["username", "password"])]
    pub authorization: Option<String>,

    /// Builds the Authorization header from a user name, used with --password
    #[clap(long, short, requires = "password")]
    pub username: Option<String>,

    #[clap(long, short = 'P', requires = "username")]
    pub password: Option<String>,
}

impl CheckArgs {
    fn authorization(&self) -> Option<String> {
        match (&self.authorization, &self.username, &self.password) {
            (Some(header), _, _) => Some(header.clone()),
            (None, Some(username), Some(password)) => {
                Some(BasicAuthCredentials::encode_header(username, password))
            }
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckOutcome {
    pub requires_auth: bool,
    pub verdict: Option<Verdict>,
    pub decision: Decision,
}

/// Runs one request through the interceptor the server would build.
pub fn evaluate(
    config: &SetupConfig,
    method: &str,
    url: &str,
    authorization: Option<&str>,
) -> CheckOutcome {
    let interceptor = Interceptor::from_config(config);
    let path = url.split('?').next().unwrap_or(url);

    let mut request = RequestDescriptor::new(method, path);
    if let Some(authorization) = authorization {
        request = request.with_authorization(authorization);
    }

    let requires_auth = interceptor.rules().requires_auth(method, path);
    let verdict = requires_auth.then(|| interceptor.verdict_for(authorization));

    CheckOutcome { requires_auth, verdict, decision: interceptor.check(&request) }
}

pub fn handle_check(
    project_location: &ProjectLocation,
    args: &CheckArgs,
) -> Result<(), ProjectLocationError> {
    let config = if project_location.is_initialized() {
        project_location.setup_config(false)?
    } else {
        print_warn_message(&format!(
            "No basicguard.yaml in {}, checking against an empty config",
            project_location.project_path().display()
        ));
        SetupConfig::default()
    };

    let authorization = args.authorization();
    let outcome = evaluate(&config, &args.method, &args.url, authorization.as_deref());

    let verdict = match outcome.verdict {
        Some(verdict) => verdict_cell(verdict),
        None => Cell::new("-"),
    };
    let decision = match outcome.decision {
        Decision::Continue => Cell::new("continue").style_spec("Fg"),
        Decision::Reject(_) => Cell::new("401 challenge").style_spec("Fr"),
    };

    print_table(
        vec!["Method", "Path", "Auth required", "Verdict", "Decision"],
        vec![vec![
            Cell::new(&args.method),
            Cell::new(&args.url),
            Cell::new(if outcome.requires_auth { "yes" } else { "no" }),
            verdict,
            decision,
        ]],
        None,
        None,
    );

    Ok(())
}
