pub mod comment;
pub mod discussion;
