use std::fmt::Write as _;

use chrono::{DateTime, Utc};
use colored::Colorize;

use crate::models::Discussion;
use crate::thread::ThreadLine;

use super::format::{plural, posted_at};

const INDENT: &str = "    ";

/// Header block shown above a discussion's comments
pub fn discussion_header(discussion: &Discussion, now: DateTime<Utc>) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{} {}", format!("#{}", discussion.id).dimmed(), discussion.title.bold());
    let _ = writeln!(
        out,
        "{} · community {} · {} · {} · {}",
        discussion.author.cyan(),
        discussion.community_id,
        posted_at(discussion.timestamp, now),
        plural(discussion.upvote_count, "upvote"),
        plural(discussion.comment_count, "comment"),
    );
    if !discussion.tags.is_empty() {
        let tags: Vec<String> = discussion.tags.iter().map(|t| format!("#{}", t)).collect();
        let _ = writeln!(out, "{}", tags.join(" ").yellow());
    }
    if let Some(url) = &discussion.link_url {
        let _ = writeln!(out, "{}", url.underline());
    }
    if !discussion.content.is_empty() {
        let _ = writeln!(out, "\n{}", discussion.content);
    }
    out
}

/// Rendered thread rows as indented text
pub fn thread(lines: &[ThreadLine], now: DateTime<Utc>) -> String {
    if lines.is_empty() {
        return format!("{}\n", "No comments yet.".dimmed());
    }

    let mut out = String::new();
    for line in lines {
        let pad = INDENT.repeat(line.depth);
        let comment = &line.comment;

        let mut header = format!(
            "{} {} · {} · {}",
            format!("[{}]", comment.id).dimmed(),
            comment.author.cyan().bold(),
            posted_at(comment.timestamp, now),
            plural(comment.upvote_count, "upvote").green(),
        );
        if !line.can_reply {
            header.push_str(&format!(" {}", "(reply limit)".dimmed()));
        }
        let _ = writeln!(out, "{}{}", pad, header);

        if line.show_body() {
            for body_line in comment.content.lines() {
                let _ = writeln!(out, "{}  {}", pad, body_line);
            }
        } else {
            let _ = writeln!(out, "{}  {}", pad, "[collapsed]".dimmed());
        }

        if line.flags.replies_collapsed && line.reply_count > 0 {
            let hidden = format!("+ {} hidden", plural(line.reply_count as i64, "reply"));
            let _ = writeln!(out, "{}  {}", pad, hidden.dimmed());
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Comment;
    use crate::thread::NodeFlags;
    use chrono::{Duration, TimeZone};

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 1, 15, 12, 0, 0).unwrap()
    }

    fn line(id: i64, depth: usize, content: &str, flags: NodeFlags, reply_count: usize) -> ThreadLine {
        ThreadLine {
            comment: Comment {
                id,
                discussion_id: 1,
                parent_id: if depth == 0 { None } else { Some(id - 1) },
                content: content.to_string(),
                author: "alice".to_string(),
                timestamp: now() - Duration::hours(2),
                upvote_count: 1,
            },
            depth,
            reply_count,
            flags,
            can_reply: depth < 1,
        }
    }

    #[test]
    fn empty_thread_says_so() {
        assert!(thread(&[], now()).contains("No comments yet."));
    }

    #[test]
    fn rows_are_indented_by_depth() {
        let out = thread(
            &[
                line(1, 0, "top", NodeFlags::default(), 1),
                line(2, 1, "nested", NodeFlags::default(), 0),
            ],
            now(),
        );
        let rows: Vec<&str> = out.lines().collect();
        assert!(rows[0].contains("alice"));
        assert!(rows[0].contains("2 hours ago"));
        assert!(rows[0].contains("1 upvote"));
        assert_eq!(rows[1], "  top");
        assert!(rows[2].starts_with(INDENT));
        assert!(rows[2].contains("(reply limit)"));
        assert_eq!(rows[3], format!("{}  nested", INDENT));
    }

    #[test]
    fn collapsed_rows_hide_body_and_count_hidden_replies() {
        let flags = NodeFlags {
            collapsed: true,
            replies_collapsed: true,
        };
        let out = thread(&[line(1, 0, "secret", flags, 3)], now());
        assert!(!out.contains("secret"));
        assert!(out.contains("[collapsed]"));
        assert!(out.contains("3 replies hidden"));
    }

    #[test]
    fn header_lists_counts_and_tags() {
        let discussion = Discussion {
            id: 7,
            community_id: "2".to_string(),
            title: "Bread".to_string(),
            content: "Help".to_string(),
            author: "lee".to_string(),
            tags: vec!["baking".to_string()],
            link_url: Some("https://example.com".to_string()),
            timestamp: now() - Duration::days(1),
            upvote_count: 4,
            comment_count: 1,
        };
        let out = discussion_header(&discussion, now());
        assert!(out.contains("Bread"));
        assert!(out.contains("1 day ago"));
        assert!(out.contains("4 upvotes"));
        assert!(out.contains("1 comment"));
        assert!(out.contains("#baking"));
        assert!(out.contains("https://example.com"));
    }
}
