//! Shared CLI presentation utilities.
//!
//! Format-only helpers. Domain transforms belong in the core services.

pub mod history;
pub mod requests;
pub mod tables;

pub use history::print_history;
pub use requests::{print_request_detail, print_requests};
pub use tables::{format_optional, print_separator, truncate_string};
