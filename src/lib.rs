//! sunburst: radial hierarchy layout with click-to-zoom focus transitions.
//!
//! Documents are indentation text (two spaces per level). They are rebuilt
//! into a tree, laid out as nested rings, and re-projected whenever a node is
//! focused.

pub mod application;
pub mod cli;
pub mod config;
pub mod domain;
pub mod exitcode;
pub mod infrastructure;
pub mod tree_traits;
pub mod util;
