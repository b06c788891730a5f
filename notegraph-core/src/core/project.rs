use serde::{Deserialize, Serialize};

/// A named container grouping related nodes.
///
/// Deleting a project deletes all of its nodes (see
/// [`Store::delete_project`](crate::Store::delete_project)). Names are
/// free-form and not required to be unique.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Project {
    /// Store-assigned positive id; `0` marks a record not yet saved.
    pub id: i64,
    pub name: String,
}

impl Project {
    /// A project that has not been saved yet; the store assigns its id on put.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: 0,
            name: name.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_project_is_unsaved() {
        let project = Project::new("Research");
        assert_eq!(project.id, 0);
        assert_eq!(project.name, "Research");
    }
}
