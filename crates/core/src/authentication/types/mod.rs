mod user;
pub use user::{User, UserMatchPolicy};

mod verdict;
pub use verdict::Verdict;
