pub mod config;
pub mod contact;
pub mod email;
pub mod provider;
pub mod server;

use std::env::var;

pub fn api_key_from_env() -> Option<String> {
    var("RESEND_API_KEY").ok().filter(|api_key| !api_key.is_empty())
}
