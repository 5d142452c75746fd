use crate::artifacts::span::Point;
use crate::errors::{DiffError, Result};
use std::cmp::Ordering;

/// Line table of one text snapshot, used to convert between byte offsets and
/// line/column points.
///
/// The index borrows the text it was built from, so it cannot outlive that
/// snapshot or be consulted for a different one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineIndex<'t> {
    text: &'t str,
    /// Byte offset of the start of each line. The first entry is always 0.
    line_starts: Vec<usize>,
}

impl<'t> LineIndex<'t> {
    pub fn new(text: &'t str) -> Self {
        Self {
            text,
            line_starts: std::iter::once(0)
                .chain(text.match_indices('\n').map(|(i, _)| i + 1))
                .collect(),
        }
    }

    pub fn text(&self) -> &'t str {
        self.text
    }

    pub fn len(&self) -> usize {
        self.text.len()
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// Number of addressable lines. A trailing newline opens one more, empty,
    /// line.
    pub fn line_count(&self) -> usize {
        self.line_starts.len()
    }

    /// 1-based number of the line containing `offset`.
    pub fn line_of(&self, offset: usize) -> usize {
        self.line_starts.partition_point(|&start| start <= offset)
    }

    /// Byte offset where the line containing `offset` starts.
    pub fn line_start_of(&self, offset: usize) -> usize {
        self.line_starts[self.line_of(offset) - 1]
    }

    /// Number of lines that start strictly before `offset`.
    pub fn lines_before(&self, offset: usize) -> usize {
        self.line_starts.partition_point(|&start| start < offset)
    }

    /// Converts a byte offset into a resolved point.
    pub fn position(&self, offset: usize) -> Result<Point> {
        if offset > self.text.len() || !self.text.is_char_boundary(offset) {
            return Err(self.out_of_range(Point::Offset(offset)));
        }

        let line = self.line_of(offset);
        let line_start = self.line_starts[line - 1];
        let column = self.text[line_start..offset].encode_utf16().count() + 1;

        Ok(Point::Resolved {
            offset,
            line,
            column,
        })
    }

    /// Converts a 1-based line and UTF-16 column into a byte offset.
    ///
    /// The column may point one past the last character of the line, but not
    /// past the line terminator and not between the halves of a surrogate
    /// pair.
    pub fn offset(&self, line: usize, column: usize) -> Result<usize> {
        let out_of_range = || self.out_of_range(Point::LineColumn { line, column });

        let line_start = line
            .checked_sub(1)
            .and_then(|index| self.line_starts.get(index))
            .copied()
            .ok_or_else(out_of_range)?;
        let target = column.checked_sub(1).ok_or_else(out_of_range)?;
        let content = &self.text[line_start..self.content_end(line - 1)];

        let mut units = 0;
        for (index, char) in content.char_indices() {
            match units.cmp(&target) {
                Ordering::Equal => return Ok(line_start + index),
                Ordering::Greater => return Err(out_of_range()),
                Ordering::Less => units += char.len_utf16(),
            }
        }

        if units == target {
            Ok(line_start + content.len())
        } else {
            Err(out_of_range())
        }
    }

    /// Byte offset addressed by `point`, in any encoding.
    ///
    /// A resolved point must agree with this text in both encodings.
    pub fn offset_of(&self, point: Point) -> Result<usize> {
        match point {
            Point::Offset(offset) => self.position(offset).map(|_| offset),
            Point::LineColumn { line, column } => self.offset(line, column),
            Point::Resolved { offset, .. } => match self.position(offset) {
                Ok(resolved) if resolved == point => Ok(offset),
                _ => Err(self.out_of_range(point)),
            },
        }
    }

    pub fn resolve(&self, point: Point) -> Result<Point> {
        self.position(self.offset_of(point)?)
    }

    /// End of the content of the line at 0-based `index`, excluding its `\n`.
    fn content_end(&self, index: usize) -> usize {
        self.line_starts
            .get(index + 1)
            .map_or(self.text.len(), |next| next - 1)
    }

    fn out_of_range(&self, point: Point) -> DiffError {
        DiffError::OutOfRange {
            point,
            len: self.text.len(),
        }
    }
}
