//! CLI command handlers. Each command is in its own file.

mod checksums;
mod completions;
mod validate;

pub use checksums::run_checksums;
pub use completions::{run_completions, run_man};
pub use validate::run_validate;
