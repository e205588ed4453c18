//! CLI command handlers, one file per subcommand.

mod check;
mod fetch;
mod max_id;
mod progress_line;

pub use check::run_check;
pub use fetch::run_fetch;
pub use max_id::run_max_id;
