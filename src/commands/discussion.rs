use std::str::FromStr;

use chrono::Utc;
use colored::Colorize;

use agora::error::Result;
use agora::models::Discussion;
use agora::{output, Forum, SortMode, ThreadView};

use crate::{
    DiscussionFeedArgs, DiscussionListArgs, DiscussionTrendingArgs, DiscussionUpvoteArgs,
    DiscussionViewArgs,
};

fn print_discussions(discussions: &[Discussion], json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(discussions)?);
    } else {
        println!("{}", output::discussion_table(discussions, Utc::now()));
    }
    Ok(())
}

pub fn list(forum: &Forum, args: DiscussionListArgs) -> Result<()> {
    let discussions = match &args.community {
        Some(community) => forum.discussions_for_community(community)?,
        None => forum.discussions()?,
    };
    print_discussions(&discussions, args.json)
}

pub fn trending(forum: &Forum, args: DiscussionTrendingArgs) -> Result<()> {
    print_discussions(&forum.trending(args.limit)?, args.json)
}

pub fn feed(forum: &Forum, args: DiscussionFeedArgs) -> Result<()> {
    print_discussions(&forum.feed(&args.communities)?, args.json)
}

pub fn view(forum: &Forum, args: DiscussionViewArgs) -> Result<()> {
    let sort = SortMode::from_str(&args.sort)?;
    let (discussion, nodes) = forum.thread(args.id)?;

    let max_depth = args.max_depth.unwrap_or(forum.config().max_reply_depth);
    let mut view = ThreadView::new(sort, max_depth);
    for id in &args.collapse {
        let mut flags = view.flags(*id);
        flags.collapsed = true;
        view.set_flags(*id, flags);
    }
    for id in &args.collapse_replies {
        let mut flags = view.flags(*id);
        flags.replies_collapsed = true;
        view.set_flags(*id, flags);
    }

    if args.json {
        let body = serde_json::json!({
            "discussion": discussion,
            "sort": sort,
            "comments": view.render(&nodes),
        });
        println!("{}", serde_json::to_string_pretty(&body)?);
        return Ok(());
    }

    let now = Utc::now();
    print!("{}", output::discussion_header(&discussion, now));
    println!(
        "\n{} {}",
        "Comments".bold(),
        format!("(sorted by {})", sort).dimmed()
    );
    println!("{}", "-".repeat(40));
    print!("{}", output::thread_text(&view.render(&nodes), now));
    Ok(())
}

pub fn upvote(forum: &Forum, args: DiscussionUpvoteArgs) -> Result<()> {
    let discussion = forum.upvote_discussion(args.id)?;
    println!(
        "Upvoted discussion #{} ({})",
        discussion.id,
        output::plural(discussion.upvote_count, "upvote")
    );
    Ok(())
}
