//! HTML query module
//!
//! Structural queries over parsed documents: find the first or all elements
//! by tag name and attribute constraints, with an explicit-failure variant
//! for structure that must exist.

mod query;

pub use query::{find, find_all, locate, text_of, AttrMatch};
