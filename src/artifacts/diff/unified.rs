use crate::artifacts::diff::edit::{Located, TextEdit, line_edits_located};
use crate::artifacts::diff::myers::{Change, split_lines};
use crate::artifacts::span::LineIndex;
use crate::errors::Result;
use derive_new::new;
use std::fmt::{self, Display, Formatter};
use tracing::{debug, trace};

pub const DEFAULT_CONTEXT: usize = 3;
pub const NO_NEWLINE_MARKER: &str = "\\ No newline at end of file";

#[derive(Debug, Clone, Copy, PartialEq, Eq, new)]
pub struct UnifiedOptions {
    /// Unchanged lines shown around each change.
    pub context: usize,
}

impl Default for UnifiedOptions {
    fn default() -> Self {
        Self {
            context: DEFAULT_CONTEXT,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Hunk {
    from_line: usize,
    to_line: usize,
    lines: Vec<Change<String>>,
}

impl Hunk {
    /// Opens a hunk at 0-based line `start` of the original text, whose
    /// counterpart in the new text is line `to_index`, with leading context.
    fn open(lines: &[&str], start: usize, to_index: usize, context: usize) -> Self {
        let mut hunk = Self {
            from_line: start + 1,
            to_line: to_index + 1,
            lines: Vec::new(),
        };

        let lead = hunk.push_equal(lines, start.saturating_sub(context), start);
        hunk.from_line -= lead;
        hunk.to_line -= lead;
        hunk
    }

    fn push_equal(&mut self, lines: &[&str], from: usize, to: usize) -> usize {
        let to = to.min(lines.len());
        let Some(equal) = lines.get(from..to) else {
            return 0;
        };

        self.lines.extend(equal.iter().map(|line| Change::Equal {
            value: line.to_string(),
        }));
        equal.len()
    }

    pub fn from_line(&self) -> usize {
        self.from_line
    }

    pub fn to_line(&self) -> usize {
        self.to_line
    }

    pub fn from_count(&self) -> usize {
        self.lines
            .iter()
            .filter(|line| !matches!(line, Change::Insert { .. }))
            .count()
    }

    pub fn to_count(&self) -> usize {
        self.lines
            .iter()
            .filter(|line| !matches!(line, Change::Delete { .. }))
            .count()
    }

    pub fn lines(&self) -> &[Change<String>] {
        &self.lines
    }

    pub fn header(&self) -> String {
        format!(
            "@@ -{} +{} @@",
            format_range(self.from_line, self.from_count()),
            format_range(self.to_line, self.to_count())
        )
    }
}

impl Display for Hunk {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.header())?;

        for line in &self.lines {
            write!(f, "{line}")?;
            if !line.value().ends_with('\n') {
                write!(f, "\n{NO_NEWLINE_MARKER}\n")?;
            }
        }

        Ok(())
    }
}

/// A unified diff between two named versions of a text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Unified {
    from: String,
    to: String,
    hunks: Vec<Hunk>,
}

impl Unified {
    pub fn from(&self) -> &str {
        &self.from
    }

    pub fn to(&self) -> &str {
        &self.to
    }

    pub fn hunks(&self) -> &[Hunk] {
        &self.hunks
    }

    pub fn is_empty(&self) -> bool {
        self.hunks.is_empty()
    }
}

impl Display for Unified {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        if self.hunks.is_empty() {
            return Ok(());
        }

        writeln!(f, "--- {}", self.from)?;
        writeln!(f, "+++ {}", self.to)?;
        for hunk in &self.hunks {
            write!(f, "{hunk}")?;
        }

        Ok(())
    }
}

/// Renders `edits` over `text` as a unified diff labelled `from` and `to`.
pub fn to_unified(
    from: &str,
    to: &str,
    text: &str,
    edits: &[TextEdit],
    options: &UnifiedOptions,
) -> Result<Unified> {
    let mut unified = Unified {
        from: from.to_string(),
        to: to.to_string(),
        hunks: Vec::new(),
    };
    if edits.is_empty() {
        return Ok(unified);
    }

    let index = LineIndex::new(text);
    let lines = split_lines(text);
    let context = options.context;
    let hunks = &mut unified.hunks;

    // `last` is the first original line not yet emitted, `to_line` the line
    // of the new text it corresponds to
    let mut last = 0;
    let mut to_line = 0;

    for Located { range, edit } in line_edits_located(&index, edits)? {
        let start = index.lines_before(range.start);
        let end = index.lines_before(range.end);
        let gap = start.saturating_sub(last);

        if !hunks.is_empty() && start <= last.saturating_add(context.saturating_mul(2)) {
            if let Some(current) = hunks.last_mut() {
                current.push_equal(&lines, last, start);
            }
        } else {
            if let Some(previous) = hunks.last_mut() {
                previous.push_equal(&lines, last, last.saturating_add(context));
            }
            hunks.push(Hunk::open(&lines, start, to_line + gap, context));
        }
        to_line += gap;
        last = start;

        if let Some(current) = hunks.last_mut() {
            let deleted = lines.get(last..end).unwrap_or_default();
            current.lines.extend(deleted.iter().map(|line| Change::Delete {
                value: line.to_string(),
            }));
            last = end;

            for line in split_lines(&edit.new_text) {
                current.lines.push(Change::Insert {
                    value: line.to_string(),
                });
                to_line += 1;
            }
        }
    }

    if let Some(current) = hunks.last_mut() {
        current.push_equal(&lines, last, last.saturating_add(context));
    }

    for hunk in hunks.iter() {
        trace!(header = %hunk.header(), "rendered hunk");
    }
    debug!(from, to, hunks = hunks.len(), "rendered unified diff");

    Ok(unified)
}

/// Formats one side of a hunk header the way `diff -u` does: the count is
/// omitted when it is 1, and an empty side names the line before it.
fn format_range(start: usize, count: usize) -> String {
    match count {
        0 => format!("{},0", start.saturating_sub(1)),
        1 => start.to_string(),
        _ => format!("{start},{count}"),
    }
}
