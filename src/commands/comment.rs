use chrono::{DateTime, Utc};

use agora::error::{Error, Result};
use agora::models::CommentCreate;
use agora::{output, Forum};

use crate::{CommentAddArgs, CommentReplyArgs, CommentUpvoteArgs};

/// Parse `--at`, falling back to the current time
fn posted_at(at: Option<&str>) -> Result<DateTime<Utc>> {
    match at {
        Some(raw) => DateTime::parse_from_rfc3339(raw)
            .map(|t| t.with_timezone(&Utc))
            .map_err(|_| Error::InvalidTimestamp(raw.to_string())),
        None => Ok(Utc::now()),
    }
}

pub fn add(forum: &Forum, args: CommentAddArgs) -> Result<()> {
    let timestamp = posted_at(args.at.as_deref())?;
    let create = CommentCreate::new(args.discussion, args.body, args.author, timestamp)
        .with_upvotes(args.upvotes);

    let node = forum.post(create)?;
    let count = forum.comment_count(args.discussion)?;
    println!(
        "Added comment #{} to discussion #{} ({})",
        node.id(),
        args.discussion,
        output::plural(count, "comment")
    );
    Ok(())
}

pub fn reply(forum: &Forum, args: CommentReplyArgs) -> Result<()> {
    let timestamp = posted_at(args.at.as_deref())?;
    let node = forum.add_reply(
        args.discussion,
        args.parent,
        &args.body,
        &args.author,
        timestamp,
    )?;
    let count = forum.comment_count(args.discussion)?;
    println!(
        "Added reply #{} to comment #{} ({})",
        node.id(),
        args.parent,
        output::plural(count, "comment")
    );
    Ok(())
}

pub fn upvote(forum: &Forum, args: CommentUpvoteArgs) -> Result<()> {
    let comment = forum.upvote(args.id)?;
    println!(
        "Upvoted comment #{} ({})",
        comment.id,
        output::plural(comment.upvote_count, "upvote")
    );
    Ok(())
}
