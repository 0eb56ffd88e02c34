//! # Comment Threads
//!
//! Turns the flat, chronologically ordered comments of one post into reply
//! threads. The walk is iterative over an adjacency map from parent id (`None`
//! for top-level comments) to children, so deep threads never grow the call
//! stack. Siblings keep the order they had in the input.
//!
//! Each comment is emitted at most once, and comments that cannot be reached
//! from a top-level comment (a dangling parent, or a cycle in corrupted data)
//! are left out, so the walk always terminates.

use crate::types::Comment;
use serde::Serialize;
use std::collections::{HashMap, HashSet};

/// HTML non-breaking spaces per nesting level in the markdown rendering.
const INDENT_PER_LEVEL: usize = 4;

/// A comment in display order, with its nesting depth.
///
/// This flat form is what gets serialized for clients: its depth never costs
/// stack.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ThreadLine {
    pub level: usize,
    #[serde(flatten)]
    pub comment: Comment,
}

/// A comment together with its replies.
///
/// Serializing a node recurses once per reply level; serve [`ThreadLine`]s
/// instead when the depth is not bounded.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CommentNode {
    #[serde(flatten)]
    pub comment: Comment,
    pub replies: Vec<CommentNode>,
}

impl Drop for CommentNode {
    fn drop(&mut self) {
        // Detach descendants so each node drops with no replies left.
        let mut pending = std::mem::take(&mut self.replies);
        while let Some(mut node) = pending.pop() {
            pending.append(&mut node.replies);
        }
    }
}

fn children_index(comments: &[Comment]) -> HashMap<Option<i64>, Vec<&Comment>> {
    let mut children: HashMap<Option<i64>, Vec<&Comment>> = HashMap::new();
    for comment in comments {
        children
            .entry(comment.parent_comment_id)
            .or_default()
            .push(comment);
    }
    children
}

/// Lists comments depth-first: each comment is followed by its replies.
pub fn flatten(comments: &[Comment]) -> Vec<ThreadLine> {
    let children = children_index(comments);
    let mut visited = HashSet::new();
    let mut lines = Vec::with_capacity(comments.len());

    // Children are pushed in reverse so the earliest one is popped first.
    let mut stack: Vec<(&Comment, usize)> = children
        .get(&None)
        .map(|roots| roots.iter().rev().map(|c| (*c, 0)).collect())
        .unwrap_or_default();

    while let Some((comment, level)) = stack.pop() {
        if !visited.insert(comment.id) {
            continue;
        }
        lines.push(ThreadLine {
            level,
            comment: comment.clone(),
        });
        if let Some(replies) = children.get(&Some(comment.id)) {
            stack.extend(replies.iter().rev().map(|c| (*c, level + 1)));
        }
    }
    lines
}

/// Nests comments under their parents.
pub fn build_thread(comments: &[Comment]) -> Vec<CommentNode> {
    let mut roots = Vec::new();
    // The chain of open nodes from a root down to the most recent line.
    let mut path: Vec<CommentNode> = Vec::new();

    for line in flatten(comments) {
        while path.len() > line.level {
            close_deepest(&mut path, &mut roots);
        }
        path.push(CommentNode {
            comment: line.comment,
            replies: Vec::new(),
        });
    }
    while !path.is_empty() {
        close_deepest(&mut path, &mut roots);
    }
    roots
}

fn close_deepest(path: &mut Vec<CommentNode>, roots: &mut Vec<CommentNode>) {
    if let Some(node) = path.pop() {
        match path.last_mut() {
            Some(parent) => parent.replies.push(node),
            None => roots.push(node),
        }
    }
}

/// Renders a thread as markdown, indenting each reply one level deeper.
pub fn render_markdown(comments: &[Comment]) -> String {
    flatten(comments)
        .iter()
        .map(|line| {
            let indent = "&nbsp;".repeat(INDENT_PER_LEVEL * line.level);
            let c = &line.comment;
            format!(
                "{indent}**{}** replied at {}\n\n{indent}{}",
                c.author_name, c.created_at, c.content
            )
        })
        .collect::<Vec<_>>()
        .join("\n\n")
}
