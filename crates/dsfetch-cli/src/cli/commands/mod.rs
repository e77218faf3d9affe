//! CLI command handlers, one per file.

mod fetch;
mod resolve;

pub use fetch::run_fetch;
pub use resolve::run_resolve;
