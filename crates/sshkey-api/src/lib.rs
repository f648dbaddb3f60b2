//! HTTP client and REST API operations for the gh-ssh-key extension.

pub mod client;
pub mod errors;
pub mod http;
pub mod queries;
