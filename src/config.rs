use crate::thread::DEFAULT_MAX_DEPTH;

/// Limits applied at the input boundary of a [`crate::Forum`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ForumConfig {
    /// Longest comment body accepted, in characters
    pub max_content_len: usize,
    /// Longest discussion title accepted, in characters
    pub max_title_len: usize,
    /// Nesting depth below which the thread view offers replying
    pub max_reply_depth: usize,
    pub trending_limit: usize,
}

impl Default for ForumConfig {
    fn default() -> Self {
        Self {
            max_content_len: 500,
            max_title_len: 200,
            max_reply_depth: DEFAULT_MAX_DEPTH,
            trending_limit: 20,
        }
    }
}
