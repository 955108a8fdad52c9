use chrono::{DateTime, Utc};
use tabled::settings::Style;
use tabled::{Table, Tabled};

use crate::models::Discussion;

use super::format::{posted_at, truncate};

const TITLE_WIDTH: usize = 48;

#[derive(Tabled)]
struct DiscussionRow {
    #[tabled(rename = "ID")]
    id: i64,
    #[tabled(rename = "Community")]
    community: String,
    #[tabled(rename = "Title")]
    title: String,
    #[tabled(rename = "Author")]
    author: String,
    #[tabled(rename = "Upvotes")]
    upvotes: u32,
    #[tabled(rename = "Comments")]
    comments: u32,
    #[tabled(rename = "Posted")]
    posted: String,
}

/// Discussions as a table, in the order given
pub fn discussions(discussions: &[Discussion], now: DateTime<Utc>) -> String {
    if discussions.is_empty() {
        return "No discussions found.".to_string();
    }

    let rows = discussions.iter().map(|d| DiscussionRow {
        id: d.id,
        community: d.community_id.clone(),
        title: truncate(&d.title, TITLE_WIDTH),
        author: d.author.clone(),
        upvotes: d.upvote_count,
        comments: d.comment_count,
        posted: posted_at(d.timestamp, now),
    });

    let mut table = Table::new(rows);
    table.with(Style::psql());
    table.to_string()
}
