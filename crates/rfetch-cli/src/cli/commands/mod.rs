//! CLI command handlers. Each command is in its own file.

mod checksum;
mod get;
mod inspect;
mod show;

pub use checksum::run_checksum;
pub use get::{format_head, run_get};
pub use inspect::{describe, run_inspect};
pub use show::run_show;
