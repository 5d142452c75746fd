//! Command implementations behind the `linediff` binary
//!
//! - `diff`: compares two files and prints a unified diff

pub mod diff;
