use basicguard_core::BasicAuthCredentials;

use crate::console::{print_success_message, print_warn_message};

pub fn handle_encode(username: &str, password: &str) {
    if username.contains(':') {
        print_warn_message("user names containing ':' can not be decoded unambiguously");
    }

    print_success_message(&BasicAuthCredentials::encode_header(username, password));
}
