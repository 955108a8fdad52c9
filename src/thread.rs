//! Display-side handling of comment threads.
//!
//! Everything here works on trees already read from the store and returns new
//! values; nothing in this module writes comment data. Per-node UI state lives
//! in [`ThreadView`], keyed by comment id, so it is unaffected when the tree is
//! re-sorted or fetched again.

use std::collections::HashMap;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::models::{Comment, CommentNode};

/// Default number of nesting levels below which replying is allowed
pub const DEFAULT_MAX_DEPTH: usize = 5;

/// Order applied to every level of a thread
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SortMode {
    /// Timestamp descending
    #[default]
    Newest,
    /// Upvote count descending
    MostUpvoted,
}

impl FromStr for SortMode {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "newest" | "new" => Ok(SortMode::Newest),
            "most-upvoted" | "most_upvoted" | "mostupvoted" | "upvoted" | "top" => {
                Ok(SortMode::MostUpvoted)
            }
            _ => Err(Error::InvalidSortMode(s.to_string())),
        }
    }
}

impl std::fmt::Display for SortMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SortMode::Newest => write!(f, "newest"),
            SortMode::MostUpvoted => write!(f, "most-upvoted"),
        }
    }
}

/// Sort every level of a thread by `mode`.
///
/// The sort is stable, so comments with equal keys keep their input order.
/// The input is left untouched. Levels are rebuilt from an explicit stack, so
/// arbitrarily deep threads are fine.
pub fn sort_tree(nodes: &[CommentNode], mode: SortMode) -> Vec<CommentNode> {
    struct Level<'a> {
        comment: Option<Comment>,
        pending: std::slice::Iter<'a, CommentNode>,
        built: Vec<CommentNode>,
    }

    let mut stack = vec![Level {
        comment: None,
        pending: nodes.iter(),
        built: Vec::with_capacity(nodes.len()),
    }];

    while let Some(level) = stack.last_mut() {
        if let Some(node) = level.pending.next() {
            stack.push(Level {
                comment: Some(node.comment.clone()),
                pending: node.replies.iter(),
                built: Vec::with_capacity(node.replies.len()),
            });
            continue;
        }

        let Some(mut done) = stack.pop() else { break };
        sort_level(&mut done.built, mode);
        match (done.comment, stack.last_mut()) {
            (Some(comment), Some(parent)) => parent.built.push(CommentNode {
                comment,
                replies: done.built,
            }),
            (_, _) => return done.built,
        }
    }

    Vec::new()
}

fn sort_level(level: &mut [CommentNode], mode: SortMode) {
    match mode {
        SortMode::Newest => {
            level.sort_by(|a, b| b.comment.timestamp.cmp(&a.comment.timestamp));
        }
        SortMode::MostUpvoted => {
            level.sort_by(|a, b| b.comment.upvote_count.cmp(&a.comment.upvote_count));
        }
    }
}

/// Fold a freshly created comment into a view tree. Top-level comments and
/// replies are prepended, matching store order. Returns false when the parent
/// is not in the tree.
pub fn merge_reply(nodes: &mut Vec<CommentNode>, comment: Comment) -> bool {
    match comment.parent_id {
        None => {
            nodes.insert(0, CommentNode::leaf(comment));
            true
        }
        Some(parent_id) => match find_mut(nodes, parent_id) {
            Some(parent) => {
                parent.replies.insert(0, CommentNode::leaf(comment));
                true
            }
            None => false,
        },
    }
}

/// Replace the record of an upvoted comment in a view tree, keeping its
/// replies. Returns false when the comment is not in the tree.
pub fn merge_upvote(nodes: &mut [CommentNode], updated: &Comment) -> bool {
    match find_mut(nodes, updated.id) {
        Some(node) => {
            node.comment = updated.clone();
            true
        }
        None => false,
    }
}

fn find_mut(nodes: &mut [CommentNode], id: i64) -> Option<&mut CommentNode> {
    let path = find_path(nodes, id)?;
    let (first, rest) = path.split_first()?;
    let mut node = nodes.get_mut(*first)?;
    for &index in rest {
        node = node.replies.get_mut(index)?;
    }
    Some(node)
}

/// Child indices leading from the top level to comment `id`
fn find_path(nodes: &[CommentNode], id: i64) -> Option<Vec<usize>> {
    let mut stack: Vec<(&[CommentNode], usize)> = vec![(nodes, 0)];
    while let Some(&(level, index)) = stack.last() {
        match level.get(index) {
            Some(node) if node.id() == id => {
                return Some(stack.iter().map(|&(_, i)| i).collect());
            }
            Some(node) => stack.push((node.replies.as_slice(), 0)),
            None => {
                stack.pop();
                if let Some(parent) = stack.last_mut() {
                    parent.1 += 1;
                }
            }
        }
    }
    None
}

/// UI-only state of one comment
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct NodeFlags {
    /// Body and actions hidden, replies still shown
    pub collapsed: bool,
    /// Replies hidden
    pub replies_collapsed: bool,
}

/// One visible row of a rendered thread
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ThreadLine {
    #[serde(flatten)]
    pub comment: Comment,
    pub depth: usize,
    pub reply_count: usize,
    pub flags: NodeFlags,
    pub can_reply: bool,
}

impl ThreadLine {
    pub fn show_body(&self) -> bool {
        !self.flags.collapsed
    }
}

/// Presentation state for one discussion's thread
#[derive(Debug, Clone)]
pub struct ThreadView {
    sort: SortMode,
    max_depth: usize,
    flags: HashMap<i64, NodeFlags>,
}

impl Default for ThreadView {
    fn default() -> Self {
        Self::new(SortMode::default(), DEFAULT_MAX_DEPTH)
    }
}

impl ThreadView {
    pub fn new(sort: SortMode, max_depth: usize) -> Self {
        Self {
            sort,
            max_depth,
            flags: HashMap::new(),
        }
    }

    pub fn sort(&self) -> SortMode {
        self.sort
    }

    pub fn set_sort(&mut self, sort: SortMode) {
        self.sort = sort;
    }

    pub fn max_depth(&self) -> usize {
        self.max_depth
    }

    pub fn flags(&self, comment_id: i64) -> NodeFlags {
        self.flags.get(&comment_id).copied().unwrap_or_default()
    }

    pub fn set_flags(&mut self, comment_id: i64, flags: NodeFlags) {
        if flags == NodeFlags::default() {
            self.flags.remove(&comment_id);
        } else {
            self.flags.insert(comment_id, flags);
        }
    }

    /// Flip the collapsed flag, returning the new value
    pub fn toggle_collapsed(&mut self, comment_id: i64) -> bool {
        let mut flags = self.flags(comment_id);
        flags.collapsed = !flags.collapsed;
        self.set_flags(comment_id, flags);
        flags.collapsed
    }

    /// Flip the replies-collapsed flag, returning the new value
    pub fn toggle_replies(&mut self, comment_id: i64) -> bool {
        let mut flags = self.flags(comment_id);
        flags.replies_collapsed = !flags.replies_collapsed;
        self.set_flags(comment_id, flags);
        flags.replies_collapsed
    }

    /// The tree in this view's sort order
    pub fn arrange(&self, nodes: &[CommentNode]) -> Vec<CommentNode> {
        sort_tree(nodes, self.sort)
    }

    /// Sort and flatten a tree into the rows a reader would see, depth first.
    pub fn render(&self, nodes: &[CommentNode]) -> Vec<ThreadLine> {
        let sorted = self.arrange(nodes);
        let mut lines = Vec::new();
        let mut pending: Vec<(&CommentNode, usize)> = sorted.iter().rev().map(|n| (n, 0)).collect();

        while let Some((node, depth)) = pending.pop() {
            let flags = self.flags(node.id());
            lines.push(ThreadLine {
                comment: node.comment.clone(),
                depth,
                reply_count: node.replies.len(),
                flags,
                can_reply: depth < self.max_depth,
            });
            if !flags.replies_collapsed {
                pending.extend(node.replies.iter().rev().map(|n| (n, depth + 1)));
            }
        }
        lines
    }
}
