//! CLI command handlers. Each command is in its own file.

mod analyze;
mod batch;
mod completions;
mod config;
mod control;

pub use analyze::run_analyze;
pub use batch::run_batch;
pub use completions::run_completions;
pub use config::run_config;
pub use control::run_control;
