use crate::artifacts::span::{LineIndex, Span, Uri};
use crate::errors::{DiffError, Result};
use derive_new::new;
use std::ops::Range;
use tracing::trace;

/// Replace the text covered by `span` with `new_text`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, new)]
pub struct TextEdit {
    pub span: Span,
    #[new(into)]
    pub new_text: String,
}

impl TextEdit {
    pub fn from_offsets(
        uri: Uri,
        start: usize,
        end: usize,
        new_text: impl Into<String>,
    ) -> Result<Self> {
        Ok(Self::new(Span::from_offsets(uri, start, end)?, new_text))
    }

    pub fn is_insertion(&self) -> bool {
        self.span.start_point() == self.span.end_point()
    }

    pub fn is_deletion(&self) -> bool {
        self.new_text.is_empty()
    }
}

/// Edits ordered by ascending start over disjoint ranges of one text.
pub type EditScript = Vec<TextEdit>;

/// An edit whose span has been resolved against the original text.
#[derive(Debug, Clone)]
pub(crate) struct Located {
    pub(crate) range: Range<usize>,
    pub(crate) edit: TextEdit,
}

/// Resolves, sorts and validates edits against the text behind `index`.
///
/// The returned spans carry both offsets and line/columns. Edits keep their
/// relative order when they start and end at the same place, so several
/// insertions at one point are applied in the order given.
pub fn prepare_edits(index: &LineIndex, edits: &[TextEdit]) -> Result<EditScript> {
    Ok(locate_all(index, edits)?
        .into_iter()
        .map(|located| located.edit)
        .collect())
}

/// Applies `edits` to `text`.
///
/// Offset and line/column spans may be mixed; they are resolved against
/// `text` before anything is spliced.
pub fn apply_edits(text: &str, edits: &[TextEdit]) -> Result<String> {
    let index = LineIndex::new(text);
    let located = locate_all(&index, edits)?;

    let mut out = String::with_capacity(text.len());
    let mut last = 0;
    for Located { range, edit } in &located {
        out.push_str(&text[last..range.start]);
        out.push_str(&edit.new_text);
        last = range.end;
    }
    out.push_str(&text[last..]);

    trace!(edits = located.len(), from = text.len(), to = out.len(), "applied edits");
    Ok(out)
}

/// Expands `edits` so each one starts and ends on a line boundary of `text`.
///
/// Edits sharing a line are merged, and any part of a line swept into an
/// edit is carried over into its new text, so applying the result yields
/// the same text as applying `edits`. Scripts whose edits already replace
/// whole lines with whole lines come back unchanged.
pub fn line_edits(text: &str, edits: &[TextEdit]) -> Result<EditScript> {
    let index = LineIndex::new(text);

    Ok(line_edits_located(&index, edits)?
        .into_iter()
        .map(|located| located.edit)
        .collect())
}

pub(crate) fn line_edits_located(index: &LineIndex, edits: &[TextEdit]) -> Result<Vec<Located>> {
    let located = locate_all(index, edits)?;
    if located.iter().all(|l| covers_whole_lines(index, l)) {
        return Ok(located);
    }

    let text = index.text();
    let mut runs: Vec<Located> = Vec::with_capacity(located.len());
    for Located { range, edit } in located {
        match runs.last_mut() {
            Some(current) if index.line_of(range.start) <= index.line_of(current.range.end) => {
                current.edit.new_text.push_str(&text[current.range.end..range.start]);
                current.edit.new_text.push_str(&edit.new_text);
                current.range.end = range.end;
            }
            _ => runs.push(Located { range, edit }),
        }
    }

    runs.into_iter().map(|run| widen(index, run)).collect()
}

/// True when the edit starts on a line boundary, ends on one (or at the end of
/// the text) and its new text ends a line too.
fn covers_whole_lines(index: &LineIndex, Located { range, edit }: &Located) -> bool {
    let at_end = range.end == index.len();
    let starts_line = edit.span.start_point().column() == Some(1);
    let ends_line = edit.new_text.is_empty() || edit.new_text.ends_with('\n');

    (edit.span.is_line_aligned() || (starts_line && at_end)) && (ends_line || at_end)
}

fn widen(index: &LineIndex, Located { range, edit }: Located) -> Result<Located> {
    let text = index.text();
    let TextEdit { span, mut new_text } = edit;
    let Range { mut start, mut end } = range;

    let line_start = index.line_start_of(start);
    if line_start < start {
        new_text.insert_str(0, &text[line_start..start]);
        start = line_start;
    }

    // a partial last line, in the text or in the replacement, drags in the
    // rest of the line it ends on
    let open_text = !new_text.is_empty() && !new_text.ends_with('\n');
    if index.line_start_of(end) < end || (open_text && end < text.len()) {
        let rest = &text[end..];
        let eol = rest.find('\n').map_or(rest.len(), |i| i + 1);
        new_text.push_str(&rest[..eol]);
        end += eol;
    }

    let span = Span::from_offsets(span.uri().clone(), start, end)?.resolve(index)?;
    Ok(Located {
        range: start..end,
        edit: TextEdit::new(span, new_text),
    })
}

fn locate_all(index: &LineIndex, edits: &[TextEdit]) -> Result<Vec<Located>> {
    let mut located = edits
        .iter()
        .map(|edit| {
            let (span, range) = edit.span.locate(index)?;
            Ok(Located {
                range,
                edit: TextEdit::new(span, edit.new_text.clone()),
            })
        })
        .collect::<Result<Vec<_>>>()?;

    located.sort_by_key(|l| (l.range.start, l.range.end));

    if let Some(pair) = located
        .windows(2)
        .find(|pair| pair[0].range.end > pair[1].range.start)
    {
        return Err(DiffError::ConflictingEdits {
            first: pair[0].range.clone(),
            second: pair[1].range.clone(),
        });
    }

    Ok(located)
}
