//! Line-oriented text diffing
//!
//! `linediff` computes the edits that turn one text into another, applies
//! and normalizes edit sets, and renders them as unified diffs. Locations
//! are modelled as spans over named resources, addressed by byte offset or
//! by line and UTF-16 column.
//!
//! ```
//! use linediff::{Uri, UnifiedOptions, apply_edits, compute_edits, to_unified};
//!
//! let before = "a\nb\nc\n";
//! let after = "a\nx\nc\n";
//! let edits = compute_edits(&Uri::from_path("notes.txt"), before, after);
//!
//! assert_eq!(apply_edits(before, &edits).unwrap(), after);
//! let diff = to_unified("a/notes.txt", "b/notes.txt", before, &edits, &UnifiedOptions::default())
//!     .unwrap();
//! assert!(diff.to_string().contains("-b\n+x\n"));
//! ```

pub mod artifacts;
pub mod commands;
pub mod errors;
pub mod logging;

pub use artifacts::diff::edit::{EditScript, TextEdit, apply_edits, line_edits, prepare_edits};
pub use artifacts::diff::myers::{Change, compute_edits};
pub use artifacts::diff::unified::{Hunk, Unified, UnifiedOptions, to_unified};
pub use artifacts::span::{LineIndex, Point, Position, Span, Uri};
pub use errors::{DiffError, Result};
