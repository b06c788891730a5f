//! Internal domain modules for the Notegraph core library.
//!
//! All public types from these modules are re-exported at the crate root
//! with `#[doc(inline)]`; import from there in preference to this module.

pub mod error;
pub mod link;
pub mod navigation;
pub mod node;
pub mod project;
pub mod store;

#[doc(inline)]
pub use error::{NotegraphError, Result};
#[doc(inline)]
pub use link::{link_segments, parse_links, render_content, Link, Segment};
#[doc(inline)]
pub use navigation::Navigation;
#[doc(inline)]
pub use node::Node;
#[doc(inline)]
pub use project::Project;
#[doc(inline)]
pub use store::Store;
