mod basic_auth_guard;
pub use basic_auth_guard::{basic_auth_guard, AuthGuardState};

mod basic_auth_layer;
pub use basic_auth_layer::{BasicAuthLayer, BasicAuthService};

mod unauthorized;
pub use unauthorized::{DefaultUnauthorizedHandler, UnauthorizedHandler};
