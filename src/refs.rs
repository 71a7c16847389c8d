//! Parsing and classification of reference listings.
//!
//! The plain-text output of the branch listing tools is an unstable contract,
//! so everything that touches it lives here: [parse_listing] turns raw
//! listing text into a name set, and [classify] decides what to do about a
//! remote name that has no local counterpart. Both are pure functions.

use std::collections::BTreeSet;

/// How a remote reference name with no local counterpart is handled.
///
/// Classification is total: every name string maps to exactly one variant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RefAction {
    /// The upstream integration branch; the primary branch already tracks it.
    SkipUpstream,
    /// Nested reference outside the tag namespace.
    SkipNested,
    /// Plain name to create as a local branch.
    CreateBranch(String),
    /// Tag-namespace entry; carries the name with the namespace stripped.
    CreateTag(String),
}

/// Parses raw branch/tag listing output into a set of reference names.
///
/// One name per line. A leading current-branch selection marker (`*`, or `+`
/// for a branch checked out in another worktree) is normalized away along
/// with surrounding whitespace; empty lines are dropped so an empty listing
/// yields an empty set rather than a phantom name. Duplicates collapse.
pub fn parse_listing(output: &str) -> BTreeSet<String> {
    output
        .lines()
        .map(|line| line.trim().trim_start_matches(['*', '+']).trim_start())
        .filter(|name| !name.is_empty())
        .map(str::to_string)
        .collect()
}

/// Classifies a remote reference name that is absent locally.
///
/// * The upstream integration-branch marker is skipped.
/// * A name containing a path separator is a tag to create when it starts
///   with the tag namespace (stripped before use as the tag's name), and an
///   irrelevant nested reference otherwise.
/// * Anything else becomes a local branch with that exact name.
pub fn classify(name: &str, upstream: &str, tag_namespace: &str) -> RefAction {
    if name == upstream {
        RefAction::SkipUpstream
    } else if name.contains('/') {
        match name.strip_prefix(tag_namespace) {
            Some(tag) => RefAction::CreateTag(tag.to_string()),
            None => RefAction::SkipNested,
        }
    } else {
        RefAction::CreateBranch(name.to_string())
    }
}

/// Remote reference names with no local counterpart, in listing order.
pub fn missing_refs(remote: &BTreeSet<String>, local: &BTreeSet<String>) -> Vec<String> {
    remote.difference(local).cloned().collect()
}

/// Commit message recorded on every mirrored tag.
pub fn tag_message(tag: &str) -> String {
    format!("Tagging svn tag {}", tag)
}
