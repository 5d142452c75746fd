//! Error type shared by the span model, edit application and the renderer.

use crate::artifacts::span::{Point, Uri};
use std::ops::Range;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, DiffError>;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DiffError {
    /// Positions or spans from two different resources were compared.
    #[error("Cannot compare positions in different resources: '{left}' and '{right}'")]
    IncompatibleResource { left: Uri, right: Uri },

    /// The end of a span precedes its start.
    #[error("Span end {end} precedes its start {start}")]
    InvalidSpan { start: Point, end: Point },

    /// Two edits cover overlapping ranges of the original text.
    #[error("Edit over bytes {second:?} overlaps edit over bytes {first:?}")]
    ConflictingEdits {
        first: Range<usize>,
        second: Range<usize>,
    },

    /// A point does not address a location inside the text.
    #[error("Position {point} is outside of the text ({len} bytes)")]
    OutOfRange { point: Point, len: usize },

    /// An offset-only point was ordered against a line/column-only point.
    #[error("Cannot order {left} against {right} without the source text")]
    MixedEncoding { left: Point, right: Point },
}
