//! SQLite-backed persistent store for projects and nodes.
//!
//! Each record collection is a two-column table (`id INTEGER PRIMARY KEY,
//! body TEXT NOT NULL`) whose body is the field-tagged JSON encoding of the
//! record. The body is the source of truth; queries that filter on record
//! fields (by project, by title) deserialize and scan rather than relying
//! on extra columns. Iteration order everywhere is ascending numeric id,
//! which is also the default list display order.

use crate::{Node, NotegraphError, Project, Result};
use rusqlite::{Connection, OptionalExtension};
use std::path::Path;

const PROJECTS: &str = "projects";
const NODES: &str = "nodes";

/// An open Notegraph store backed by a SQLite database.
///
/// One handle serves the whole process lifetime; all operations are
/// synchronous and every write (including the project-deletion cascade)
/// commits atomically with respect to readers.
pub struct Store {
    conn: Connection,
}

impl Store {
    /// Opens the store at `path`, creating the record collections if absent.
    ///
    /// Safe to call on every startup. The `project_nodes` table is a
    /// reserved projects→nodes index that current logic never touches;
    /// nodes carry their own `project_id` field instead.
    ///
    /// # Errors
    ///
    /// Returns [`NotegraphError::Database`] for any SQLite failure.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let conn = Connection::open(path)?;
        conn.execute_batch(
            "CREATE TABLE IF NOT EXISTS projects (id INTEGER PRIMARY KEY, body TEXT NOT NULL);
             CREATE TABLE IF NOT EXISTS nodes (id INTEGER PRIMARY KEY, body TEXT NOT NULL);
             CREATE TABLE IF NOT EXISTS project_nodes (project_id INTEGER, node_id INTEGER);",
        )?;
        Ok(Self { conn })
    }

    /// All projects in ascending id order.
    pub fn list_projects(&self) -> Result<Vec<Project>> {
        self.list_bodies(PROJECTS)
    }

    /// All nodes owned by `project_id`, in ascending id order.
    ///
    /// Linear scan over the whole collection; ownership lives in each
    /// record body, not in an index.
    pub fn list_nodes_by_project(&self, project_id: i64) -> Result<Vec<Node>> {
        let nodes: Vec<Node> = self.list_bodies(NODES)?;
        Ok(nodes
            .into_iter()
            .filter(|n| n.project_id == project_id)
            .collect())
    }

    /// Looks up a project by id. `None` means the record is absent, which
    /// is not an error.
    pub fn get_project(&self, id: i64) -> Result<Option<Project>> {
        self.get_body(PROJECTS, id)
    }

    /// Looks up a node by id. `None` means the record is absent.
    pub fn get_node(&self, id: i64) -> Result<Option<Node>> {
        self.get_body(NODES, id)
    }

    /// Inserts or fully replaces a project, keyed by its id.
    ///
    /// An id of `0` means "unsaved": the next id for the collection is
    /// assigned in the same transaction as the write, and the returned
    /// record carries it. Saving an already-saved record overwrites in
    /// place and never creates a duplicate.
    pub fn put_project(&mut self, mut project: Project) -> Result<Project> {
        let tx = self.conn.transaction()?;
        if project.id == 0 {
            project.id = next_id(&tx, PROJECTS)?;
        }
        let body = serde_json::to_string(&project)?;
        tx.execute(
            "INSERT OR REPLACE INTO projects (id, body) VALUES (?1, ?2)",
            rusqlite::params![project.id, body],
        )?;
        tx.commit()?;
        Ok(project)
    }

    /// Inserts or fully replaces a node, keyed by its id. Same id-assignment
    /// and upsert semantics as [`Store::put_project`].
    pub fn put_node(&mut self, mut node: Node) -> Result<Node> {
        let tx = self.conn.transaction()?;
        if node.id == 0 {
            node.id = next_id(&tx, NODES)?;
        }
        let body = serde_json::to_string(&node)?;
        tx.execute(
            "INSERT OR REPLACE INTO nodes (id, body) VALUES (?1, ?2)",
            rusqlite::params![node.id, body],
        )?;
        tx.commit()?;
        Ok(node)
    }

    /// Removes a node. Deleting an id that does not exist is a no-op success.
    pub fn delete_node(&mut self, id: i64) -> Result<()> {
        self.conn
            .execute("DELETE FROM nodes WHERE id = ?1", [id])?;
        Ok(())
    }

    /// Removes a project and every node it owns, atomically.
    ///
    /// The cascade deletes the nodes first and the project record last,
    /// inside one transaction: readers never observe the project gone while
    /// orphan nodes remain, and a failed node deletion rolls everything
    /// back.
    pub fn delete_project(&mut self, id: i64) -> Result<()> {
        let tx = self.conn.transaction()?;
        let nodes = {
            let mut stmt = tx.prepare("SELECT id, body FROM nodes ORDER BY id ASC")?;
            let rows = stmt.query_map([], |row| {
                Ok((row.get::<_, i64>(0)?, row.get::<_, String>(1)?))
            })?;
            let mut owned = Vec::new();
            for row in rows {
                let (node_id, body) = row?;
                let node: Node = serde_json::from_str(&body)?;
                if node.project_id == id {
                    owned.push(node_id);
                }
            }
            owned
        };
        for node_id in &nodes {
            tx.execute("DELETE FROM nodes WHERE id = ?1", [node_id])?;
        }
        tx.execute("DELETE FROM projects WHERE id = ?1", [id])?;
        tx.commit()?;
        log::debug!("deleted project {id} and {} owned nodes", nodes.len());
        Ok(())
    }

    /// Resolves a node by exact title within a project.
    ///
    /// Linear scan in iteration order; when titles are duplicated within a
    /// project the first match wins. `None` is the dangling-link case and
    /// not an error.
    pub fn find_node_by_title(&self, title: &str, project_id: i64) -> Result<Option<Node>> {
        let nodes: Vec<Node> = self.list_bodies(NODES)?;
        Ok(nodes
            .into_iter()
            .find(|n| n.title == title && n.project_id == project_id))
    }

    fn list_bodies<T: serde::de::DeserializeOwned>(&self, table: &str) -> Result<Vec<T>> {
        let mut stmt = self
            .conn
            .prepare(&format!("SELECT body FROM {table} ORDER BY id ASC"))?;
        let rows = stmt.query_map([], |row| row.get::<_, String>(0))?;
        let mut records = Vec::new();
        for body in rows {
            records.push(serde_json::from_str(&body?)?);
        }
        Ok(records)
    }

    fn get_body<T: serde::de::DeserializeOwned>(&self, table: &str, id: i64) -> Result<Option<T>> {
        let body: Option<String> = self
            .conn
            .query_row(
                &format!("SELECT body FROM {table} WHERE id = ?1"),
                [id],
                |row| row.get(0),
            )
            .optional()?;
        match body {
            Some(body) => Ok(Some(serde_json::from_str(&body)?)),
            None => Ok(None),
        }
    }
}

/// Next id for a collection: the maximum existing key plus one, or 1 for an
/// empty collection. Runs inside the caller's transaction so assignment and
/// write commit together. Deleting a record never hands out a freed id
/// below the current maximum plus one.
fn next_id(tx: &rusqlite::Transaction, table: &str) -> Result<i64> {
    let id = tx.query_row(
        &format!("SELECT COALESCE(MAX(id), 0) + 1 FROM {table}"),
        [],
        |row| row.get(0),
    )?;
    if id <= 0 {
        return Err(NotegraphError::InvalidStore(format!(
            "non-positive id counter in {table}"
        )));
    }
    Ok(id)
}
