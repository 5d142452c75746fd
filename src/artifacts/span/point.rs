use crate::errors::{DiffError, Result};
use std::cmp::Ordering;
use std::fmt::{self, Display, Formatter};

/// A location in a text, in whichever encoding the caller had at hand.
///
/// Lines and columns are 1-based. Columns count UTF-16 code units, so a
/// character outside the Basic Multilingual Plane occupies two columns.
/// `Resolved` carries both encodings and is produced by
/// [`LineIndex`](super::LineIndex) once the text is known.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Point {
    Offset(usize),
    LineColumn {
        line: usize,
        column: usize,
    },
    Resolved {
        offset: usize,
        line: usize,
        column: usize,
    },
}

impl Point {
    pub fn offset(&self) -> Option<usize> {
        match self {
            Point::Offset(offset) | Point::Resolved { offset, .. } => Some(*offset),
            Point::LineColumn { .. } => None,
        }
    }

    pub fn line_column(&self) -> Option<(usize, usize)> {
        match self {
            Point::LineColumn { line, column } | Point::Resolved { line, column, .. } => {
                Some((*line, *column))
            }
            Point::Offset(_) => None,
        }
    }

    pub fn line(&self) -> Option<usize> {
        self.line_column().map(|(line, _)| line)
    }

    pub fn column(&self) -> Option<usize> {
        self.line_column().map(|(_, column)| column)
    }

    pub fn is_resolved(&self) -> bool {
        matches!(self, Point::Resolved { .. })
    }

    /// Orders two points without looking at the text.
    ///
    /// Offsets win when both points have one, otherwise line/column pairs are
    /// compared. An offset-only point cannot be ordered against a
    /// line/column-only point.
    pub fn try_cmp(&self, other: &Point) -> Result<Ordering> {
        if let (Some(left), Some(right)) = (self.offset(), other.offset()) {
            return Ok(left.cmp(&right));
        }

        match (self.line_column(), other.line_column()) {
            (Some(left), Some(right)) => Ok(left.cmp(&right)),
            _ => Err(DiffError::MixedEncoding {
                left: *self,
                right: *other,
            }),
        }
    }
}

impl Display for Point {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Point::Offset(offset) => write!(f, "#{offset}"),
            Point::LineColumn { line, column } => write!(f, "{line}:{column}"),
            Point::Resolved {
                offset,
                line,
                column,
            } => write!(f, "{line}:{column}(#{offset})"),
        }
    }
}
