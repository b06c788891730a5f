use serde::{Deserialize, Serialize};

/// A single titled, freeform-text note belonging to exactly one project.
///
/// `content` may contain any number of inline `[[Title]]` wikilinks; they
/// are parsed on demand by [`parse_links`](crate::parse_links) and never
/// stored in any derived form. Titles are by convention unique within a
/// project — link resolution picks the first match in store iteration order
/// when they are not (see [`Store::find_node_by_title`](crate::Store::find_node_by_title)).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Node {
    /// Store-assigned positive id, unique across the whole store; `0` marks
    /// a record not yet saved.
    pub id: i64,
    pub title: String,
    pub content: String,
    /// Owning project. A node belongs to one project for its lifetime.
    pub project_id: i64,
}

impl Node {
    /// A node that has not been saved yet; the store assigns its id on put.
    pub fn new(title: impl Into<String>, content: impl Into<String>, project_id: i64) -> Self {
        Self {
            id: 0,
            title: title.into(),
            content: content.into(),
            project_id,
        }
    }
}
