//! Terminal rendering for the CLI.

mod format;
mod table;
mod thread;

pub use format::{plural, posted_at, time_ago, truncate};
pub use table::discussions as discussion_table;
pub use thread::{discussion_header, thread as thread_text};
