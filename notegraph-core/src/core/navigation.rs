//! Link-following navigation over the note graph.
//!
//! [`Navigation`] is the session-scoped state behind the node viewer: the
//! parsed links of the node being viewed, the highlighted-link cursor, and
//! the back-history stack of node ids. It is a plain value owned by the
//! caller — no ambient globals — and is constructible and testable without
//! any UI harness. Everything here is derived state, recomputed whenever
//! the viewed node changes; nothing is persisted.

use crate::{parse_links, Link, Node, Result, Store};

/// Navigation state for one viewer session.
///
/// Three observable states: no node, viewing a node with no links, and
/// viewing a node with links and one of them selected. The four operations
/// ([`open`](Self::open), [`cycle_link`](Self::cycle_link),
/// [`follow`](Self::follow), [`back`](Self::back)) are the only
/// transitions; all of them complete synchronously.
#[derive(Debug, Default)]
pub struct Navigation {
    current: Option<Node>,
    links: Vec<Link>,
    current_link: Option<usize>,
    history: Vec<i64>,
    history_limit: Option<usize>,
}

impl Navigation {
    /// Navigation with an unbounded back-history stack.
    pub fn new() -> Self {
        Self::default()
    }

    /// Navigation whose history keeps at most `limit` entries; pushing onto
    /// a full stack evicts the oldest entry.
    pub fn with_history_limit(limit: usize) -> Self {
        Self {
            history_limit: Some(limit),
            ..Self::default()
        }
    }

    /// The node being viewed, if any.
    pub fn current(&self) -> Option<&Node> {
        self.current.as_ref()
    }

    /// Parsed link occurrences of the current node, in text order.
    pub fn links(&self) -> &[Link] {
        &self.links
    }

    /// Index of the highlighted link, `None` when the current node has no
    /// links (or no node is being viewed).
    pub fn current_link(&self) -> Option<usize> {
        self.current_link
    }

    /// Node ids on the back-history stack, most recent last.
    pub fn history(&self) -> &[i64] {
        &self.history
    }

    /// Enters the viewer for `node`, arriving fresh from the node list:
    /// links are reparsed, the cursor resets to the first link, and any
    /// previous history is cleared.
    pub fn open(&mut self, node: Node) {
        self.history.clear();
        self.set_current(node);
    }

    /// Leaves the viewer, dropping the node context and history.
    pub fn close(&mut self) {
        self.current = None;
        self.links.clear();
        self.current_link = None;
        self.history.clear();
    }

    /// Advances the cursor to the next link, wrapping around. No-op when
    /// the current node has no links.
    pub fn cycle_link(&mut self) {
        if let Some(i) = self.current_link {
            self.current_link = Some((i + 1) % self.links.len());
        }
    }

    /// Follows the highlighted link: resolves its title within the current
    /// node's project, pushes the previous node onto history and makes the
    /// target current.
    ///
    /// Returns `false` without changing any state when there is no link to
    /// follow or the title resolves to nothing (a dangling link is not an
    /// error).
    pub fn follow(&mut self, store: &Store) -> Result<bool> {
        let (previous_id, target) = {
            let Some(node) = &self.current else {
                return Ok(false);
            };
            let Some(link) = self.current_link.and_then(|i| self.links.get(i)) else {
                return Ok(false);
            };
            match store.find_node_by_title(&link.title, node.project_id)? {
                Some(target) => (node.id, target),
                None => {
                    log::debug!("dangling link [[{}]] in node {}", link.title, node.id);
                    return Ok(false);
                }
            }
        };
        self.push_history(previous_id);
        self.set_current(target);
        Ok(true)
    }

    /// Pops the most recent history entry and navigates back to it.
    ///
    /// A stale entry (node deleted since it was pushed) is consumed all the
    /// same; the pop happens, no navigation does, and `false` is returned.
    pub fn back(&mut self, store: &Store) -> Result<bool> {
        let Some(id) = self.history.pop() else {
            return Ok(false);
        };
        match store.get_node(id)? {
            Some(node) => {
                self.set_current(node);
                Ok(true)
            }
            None => Ok(false),
        }
    }

    fn set_current(&mut self, node: Node) {
        self.links = parse_links(&node.content);
        self.current_link = if self.links.is_empty() { None } else { Some(0) };
        self.current = Some(node);
    }

    fn push_history(&mut self, id: i64) {
        if let Some(limit) = self.history_limit {
            if limit == 0 {
                return;
            }
            if self.history.len() >= limit {
                self.history.remove(0);
            }
        }
        self.history.push(id);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Project;
    use tempfile::NamedTempFile;

    fn store_with_graph() -> (NamedTempFile, Store, Node) {
        let temp = NamedTempFile::new().unwrap();
        let mut store = Store::open(temp.path()).unwrap();
        let project = store.put_project(Project::new("Research")).unwrap();
        let a = store
            .put_node(Node::new("A", "see [[B]] and [[C]]", project.id))
            .unwrap();
        store
            .put_node(Node::new("B", "back to [[A]]", project.id))
            .unwrap();
        store.put_node(Node::new("C", "no links here", project.id)).unwrap();
        (temp, store, a)
    }

    #[test]
    fn test_open_parses_links_and_selects_first() {
        let (_temp, _store, a) = store_with_graph();
        let mut nav = Navigation::new();
        nav.open(a);
        assert_eq!(nav.links().len(), 2);
        assert_eq!(nav.current_link(), Some(0));
    }

    #[test]
    fn test_open_node_without_links_has_no_cursor() {
        let mut nav = Navigation::new();
        nav.open(Node::new("plain", "nothing", 1));
        assert!(nav.links().is_empty());
        assert_eq!(nav.current_link(), None);
    }

    #[test]
    fn test_cycle_link_wraps_around() {
        let (_temp, _store, a) = store_with_graph();
        let mut nav = Navigation::new();
        nav.open(a);
        nav.cycle_link();
        assert_eq!(nav.current_link(), Some(1));
        nav.cycle_link();
        assert_eq!(nav.current_link(), Some(0));
    }

    #[test]
    fn test_cycle_link_without_links_is_noop() {
        let mut nav = Navigation::new();
        nav.open(Node::new("plain", "nothing", 1));
        nav.cycle_link();
        assert_eq!(nav.current_link(), None);
    }

    #[test]
    fn test_follow_then_back_restores_origin() {
        let (_temp, store, a) = store_with_graph();
        let original_links = parse_links(&a.content);
        let a_id = a.id;
        let mut nav = Navigation::new();
        nav.open(a);

        assert!(nav.follow(&store).unwrap());
        assert_eq!(nav.current().unwrap().title, "B");
        assert_eq!(nav.history(), &[a_id]);
        assert_eq!(nav.current_link(), Some(0));

        assert!(nav.back(&store).unwrap());
        assert_eq!(nav.current().unwrap().id, a_id);
        assert!(nav.history().is_empty());
        assert_eq!(nav.links(), &original_links[..]);
    }

    #[test]
    fn test_follow_dangling_link_changes_nothing() {
        let (_temp, mut store, _a) = store_with_graph();
        let node = store
            .put_node(Node::new("D", "go to [[Missing]]", 1))
            .unwrap();
        let node_id = node.id;
        let mut nav = Navigation::new();
        nav.open(node);

        assert!(!nav.follow(&store).unwrap());
        assert_eq!(nav.current().unwrap().id, node_id);
        assert!(nav.history().is_empty());
        assert_eq!(nav.current_link(), Some(0));
    }

    #[test]
    fn test_follow_resolves_within_own_project_only() {
        let temp = NamedTempFile::new().unwrap();
        let mut store = Store::open(temp.path()).unwrap();
        let p1 = store.put_project(Project::new("one")).unwrap();
        let p2 = store.put_project(Project::new("two")).unwrap();
        let a = store.put_node(Node::new("A", "see [[B]]", p1.id)).unwrap();
        store.put_node(Node::new("B", "", p2.id)).unwrap();

        let mut nav = Navigation::new();
        nav.open(a);
        assert!(!nav.follow(&store).unwrap());
    }

    #[test]
    fn test_back_on_empty_history_is_noop() {
        let (_temp, store, a) = store_with_graph();
        let a_id = a.id;
        let mut nav = Navigation::new();
        nav.open(a);
        assert!(!nav.back(&store).unwrap());
        assert_eq!(nav.current().unwrap().id, a_id);
    }

    #[test]
    fn test_back_consumes_stale_history_entry() {
        let (_temp, mut store, a) = store_with_graph();
        let mut nav = Navigation::new();
        nav.open(a.clone());
        assert!(nav.follow(&store).unwrap());
        store.delete_node(a.id).unwrap();

        assert!(!nav.back(&store).unwrap());
        assert!(nav.history().is_empty());
        assert_eq!(nav.current().unwrap().title, "B");
    }

    #[test]
    fn test_open_clears_history() {
        let (_temp, store, a) = store_with_graph();
        let mut nav = Navigation::new();
        nav.open(a.clone());
        assert!(nav.follow(&store).unwrap());
        assert_eq!(nav.history().len(), 1);

        nav.open(a);
        assert!(nav.history().is_empty());
    }

    #[test]
    fn test_history_limit_evicts_oldest() {
        let temp = NamedTempFile::new().unwrap();
        let mut store = Store::open(temp.path()).unwrap();
        let project = store.put_project(Project::new("ring")).unwrap();
        // a -> b -> c -> a -> ... so every follow succeeds
        let a = store.put_node(Node::new("a", "[[b]]", project.id)).unwrap();
        let b = store.put_node(Node::new("b", "[[c]]", project.id)).unwrap();
        let c = store.put_node(Node::new("c", "[[a]]", project.id)).unwrap();

        let mut nav = Navigation::with_history_limit(2);
        nav.open(a.clone());
        for _ in 0..3 {
            assert!(nav.follow(&store).unwrap());
        }
        // Visited a -> b -> c -> a; the push of a.id evicted the oldest.
        assert_eq!(nav.history(), &[b.id, c.id]);
    }

    #[test]
    fn test_end_to_end_research_scenario() {
        let temp = NamedTempFile::new().unwrap();
        let mut store = Store::open(temp.path()).unwrap();
        let project = store.put_project(Project::new("Research")).unwrap();
        let intro = store
            .put_node(Node::new("Intro", "Refer to [[Background]].", project.id))
            .unwrap();
        let background = store
            .put_node(Node::new("Background", "No links here.", project.id))
            .unwrap();

        let mut nav = Navigation::new();
        nav.open(intro.clone());
        assert_eq!(nav.links().len(), 1);
        assert_eq!(nav.links()[0].title, "Background");
        assert_eq!(
            &intro.content[nav.links()[0].span.0..nav.links()[0].span.1],
            "[[Background]]"
        );

        nav.cycle_link();
        assert!(nav.follow(&store).unwrap());
        assert_eq!(nav.current().unwrap().id, background.id);
        assert_eq!(nav.history(), &[intro.id]);

        assert!(nav.back(&store).unwrap());
        assert_eq!(nav.current().unwrap().id, intro.id);
        assert!(nav.history().is_empty());
    }
}
