//! REST API operations grouped by resource.

pub mod ssh_key;
