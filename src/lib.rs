pub mod config;
pub mod db;
pub mod error;
pub mod forum;
pub mod models;
pub mod output;
pub mod seed;
pub mod thread;

pub use config::ForumConfig;
pub use db::ForumDb;
pub use error::{Error, Result};
pub use forum::Forum;
pub use models::{Comment, CommentCreate, CommentNode, Discussion, DiscussionCreate};
pub use seed::Seed;
pub use thread::{sort_tree, NodeFlags, SortMode, ThreadLine, ThreadView};
