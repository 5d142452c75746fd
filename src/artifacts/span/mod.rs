//! Positions and spans over named text resources
//!
//! A location can be given as a byte offset, as a line/column pair, or both:
//!
//! - `point`: the tagged [`Point`] encoding and its ordering rules
//! - `line_index`: conversion between encodings for one text snapshot
//!
//! Columns are counted in UTF-16 code units, the convention used by editor
//! protocols, so positions produced here can be handed to such tools as-is.

mod line_index;
mod point;

pub use line_index::LineIndex;
pub use point::Point;

use crate::errors::{DiffError, Result};
use derive_new::new;
use std::cmp::Ordering;
use std::fmt::{self, Display, Formatter};
use std::ops::Range;
use std::path::Path;

/// Opaque identifier of a text resource, usually a `file://` URI.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, PartialOrd, Ord)]
pub struct Uri(String);

impl Uri {
    pub fn new(uri: impl Into<String>) -> Self {
        Self(uri.into())
    }

    /// Builds a `file://` URI for an absolute path. Relative paths are kept
    /// verbatim and an empty path gives the empty URI.
    pub fn from_path(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref().to_string_lossy().replace('\\', "/");

        if path.is_empty() {
            Self::default()
        } else if path.starts_with('/') {
            Self(format!("file://{path}"))
        } else if path.as_bytes().get(1) == Some(&b':') {
            // drive letter
            Self(format!("file:///{path}"))
        } else {
            Self(path)
        }
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl AsRef<str> for Uri {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Display for Uri {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, new)]
pub struct Position {
    pub uri: Uri,
    pub point: Point,
}

impl Position {
    pub fn compare(&self, other: &Position) -> Result<Ordering> {
        ensure_same_resource(&self.uri, &other.uri)?;
        self.point.try_cmp(&other.point)
    }
}

impl Display for Position {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.uri, self.point)
    }
}

/// A contiguous region of one resource, from `start` (inclusive) to `end`
/// (exclusive). An empty span marks an insertion point.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Span {
    uri: Uri,
    start: Point,
    end: Point,
}

impl Span {
    pub fn new(start: Position, end: Position) -> Result<Self> {
        ensure_same_resource(&start.uri, &end.uri)?;
        Self::from_points(start.uri, start.point, end.point)
    }

    /// Builds a span from two points of the same resource.
    ///
    /// The order is checked whenever both points share an encoding; spans
    /// mixing offsets and line/columns are checked on [`Span::resolve`].
    pub fn from_points(uri: Uri, start: Point, end: Point) -> Result<Self> {
        if let Ok(Ordering::Greater) = start.try_cmp(&end) {
            return Err(DiffError::InvalidSpan { start, end });
        }

        Ok(Self { uri, start, end })
    }

    pub fn from_offsets(uri: Uri, start: usize, end: usize) -> Result<Self> {
        Self::from_points(uri, Point::Offset(start), Point::Offset(end))
    }

    /// Offset span over `range`. The order of its ends is checked by
    /// [`Span::resolve`].
    pub(crate) fn from_range(uri: Uri, range: Range<usize>) -> Self {
        Self {
            uri,
            start: Point::Offset(range.start),
            end: Point::Offset(range.end),
        }
    }

    pub fn insertion(uri: Uri, point: Point) -> Self {
        Self {
            uri,
            start: point,
            end: point,
        }
    }

    pub fn uri(&self) -> &Uri {
        &self.uri
    }

    pub fn start(&self) -> Position {
        Position::new(self.uri.clone(), self.start)
    }

    pub fn end(&self) -> Position {
        Position::new(self.uri.clone(), self.end)
    }

    pub fn start_point(&self) -> Point {
        self.start
    }

    pub fn end_point(&self) -> Point {
        self.end
    }

    pub fn is_resolved(&self) -> bool {
        self.start.is_resolved() && self.end.is_resolved()
    }

    /// Byte range covered by the span, when both ends carry an offset.
    pub fn byte_range(&self) -> Option<Range<usize>> {
        Some(self.start.offset()?..self.end.offset()?)
    }

    /// True when both ends sit on the first column of a line.
    pub fn is_line_aligned(&self) -> bool {
        self.start.column() == Some(1) && self.end.column() == Some(1)
    }

    /// Resolves both ends against the text behind `index`.
    pub fn resolve(&self, index: &LineIndex) -> Result<Span> {
        self.locate(index).map(|(span, _)| span)
    }

    pub(crate) fn locate(&self, index: &LineIndex) -> Result<(Span, Range<usize>)> {
        let start = index.offset_of(self.start)?;
        let end = index.offset_of(self.end)?;
        if end < start {
            return Err(DiffError::InvalidSpan {
                start: self.start,
                end: self.end,
            });
        }

        let span = Span {
            uri: self.uri.clone(),
            start: index.position(start)?,
            end: index.position(end)?,
        };

        Ok((span, start..end))
    }

    /// Orders spans of one resource by start, then by end.
    pub fn compare(&self, other: &Span) -> Result<Ordering> {
        ensure_same_resource(&self.uri, &other.uri)?;

        match self.start.try_cmp(&other.start)? {
            Ordering::Equal => self.end.try_cmp(&other.end),
            ordering => Ok(ordering),
        }
    }
}

impl Display for Span {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}-{}", self.uri, self.start, self.end)
    }
}

/// Converts `offset` into a resolved point of `text`.
pub fn to_position(text: &str, offset: usize) -> Result<Point> {
    LineIndex::new(text).position(offset)
}

/// Converts a 1-based line and UTF-16 column of `text` into a byte offset.
pub fn to_offset(text: &str, line: usize, column: usize) -> Result<usize> {
    LineIndex::new(text).offset(line, column)
}

fn ensure_same_resource(left: &Uri, right: &Uri) -> Result<()> {
    if left != right {
        return Err(DiffError::IncompatibleResource {
            left: left.clone(),
            right: right.clone(),
        });
    }

    Ok(())
}
