//! Text diffing data structures and algorithms
//!
//! - `core`: Output plumbing (pager wrapper)
//! - `diff`: Myers' diff, text edits and unified diffs
//! - `span`: Positions and spans over text resources

pub mod core;
pub mod diff;
pub mod span;
