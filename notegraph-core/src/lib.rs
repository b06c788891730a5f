//! Core library for Notegraph — a personal note graph with wikilink
//! navigation.
//!
//! Notes ("nodes") live inside projects and cross-reference each other with
//! inline `[[Title]]` wikilinks. The entry points are [`Store`], an open
//! SQLite-backed record store for projects and nodes, and [`Navigation`],
//! the session state machine behind link following and back-navigation.
//! Both are independently constructible; the terminal front-end is a thin
//! layer over them.
//!
//! Types are re-exported from their respective sub-modules for convenience;
//! consumers should import from the crate root rather than the `core` module.

pub mod core;

// Re-export commonly used types.
#[doc(inline)]
pub use crate::core::{
    error::{NotegraphError, Result},
    link::{link_segments, parse_links, render_content, Link, Segment},
    navigation::Navigation,
    node::Node,
    project::Project,
    store::Store,
};
