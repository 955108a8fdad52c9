mod connection;
mod migrations;
mod queries;

pub use connection::ForumDb;
pub use queries::{
    count_comments, create_discussion, feed_for_communities, get_comment, get_discussion,
    insert_comment, list_comments, list_discussions, list_discussions_by_community,
    list_top_level, trending_discussions, upvote_comment, upvote_discussion,
};
