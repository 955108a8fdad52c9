mod comment;
mod discussion;

pub use comment::{validate_content, Comment, CommentCreate, CommentNode};
pub use discussion::{validate_title, Discussion, DiscussionCreate};
