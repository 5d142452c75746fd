use crate::artifacts::diff::edit::{EditScript, TextEdit};
use crate::artifacts::span::{LineIndex, Span, Uri};
use derive_new::new;
use std::fmt::Display;
use tracing::{debug, trace};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Change<T> {
    Delete { value: T },
    Insert { value: T },
    Equal { value: T },
}

impl<T> Change<T> {
    pub fn value(&self) -> &T {
        match self {
            Change::Delete { value } | Change::Insert { value } | Change::Equal { value } => value,
        }
    }

    pub fn prefix(&self) -> char {
        match self {
            Change::Delete { .. } => '-',
            Change::Insert { .. } => '+',
            Change::Equal { .. } => ' ',
        }
    }
}

impl<T> Display for Change<T>
where
    T: AsRef<str>,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}{}", self.prefix(), self.value().as_ref())
    }
}

pub trait DiffAlgorithm<'d, T> {
    type Trace;
    type EditPath;
    type EditScript;

    fn compute_shortest_edit(&self) -> Self::Trace;
    fn backtrack(&self, trace: &Self::Trace) -> Self::EditPath;
    fn diff(&self) -> Self::EditScript;
}

#[derive(Debug, Clone, PartialEq, Eq, new)]
pub struct MyersDiff<'d, T> {
    a: &'d [T],
    b: &'d [T],
}

impl<T> MyersDiff<'_, T> {
    /// Index of diagonal `k = 0` in a `V` array. One slot of slack on each
    /// side lets `k = ±d` peek at their only neighbour, even when both inputs
    /// are empty.
    fn offset(&self) -> isize {
        (self.a.len() + self.b.len()) as isize + 1
    }
}

impl<'d, T: Eq + Clone> DiffAlgorithm<'d, T> for MyersDiff<'d, T> {
    type Trace = Vec<Vec<isize>>;
    type EditPath = Vec<(isize, isize, isize, isize)>;
    type EditScript = Vec<Change<T>>;

    fn compute_shortest_edit(&self) -> Self::Trace {
        let (n, m) = (self.a.len() as isize, self.b.len() as isize);
        let offset = self.offset();

        let mut v = vec![0; 2 * offset as usize + 1];
        let mut trace = Vec::new();

        for d in 0..=(n + m) {
            trace.push(v.clone());

            for k in (-d..=d).step_by(2) {
                let idx = (offset + k) as usize;

                let mut x = if k == -d {
                    // we could have only come from k+1, thus an insertion
                    v[idx + 1]
                } else if k == d {
                    // we could have only come from k-1, thus a deletion
                    v[idx - 1] + 1
                } else {
                    // we could have come from either k-1 (deletion) or k+1 (insertion)
                    let x_del = v[idx - 1] + 1;
                    let x_ins = v[idx + 1];
                    if x_del > x_ins { x_del } else { x_ins }
                };

                let mut y = x - k;
                while x < n && y < m && self.a[x as usize] == self.b[y as usize] {
                    // snake
                    x += 1;
                    y += 1;
                }

                v[idx] = x;

                if x >= n && y >= m {
                    return trace;
                }
            }
        }

        trace
    }

    fn backtrack(&self, trace: &Self::Trace) -> Self::EditPath {
        let (mut x, mut y) = (self.a.len() as isize, self.b.len() as isize);
        let offset = self.offset();
        let mut edit_path = Vec::new();

        for (d, v) in trace.iter().enumerate().rev() {
            let d = d as isize;
            let k = x - y;

            let prev_k = if k == -d {
                k + 1
            } else if k == d {
                k - 1
            } else {
                let k_del = k - 1;
                let k_ins = k + 1;
                if v[(offset + k_del) as usize] + 1 > v[(offset + k_ins) as usize] {
                    k_del
                } else {
                    k_ins
                }
            };

            let prev_x = v[(offset + prev_k) as usize];
            let prev_y = prev_x - prev_k;

            while x > prev_x && y > prev_y {
                edit_path.push((x - 1, y - 1, x, y));
                x -= 1;
                y -= 1;
            }

            if d > 0 {
                edit_path.push((prev_x, prev_y, x, y));
            }

            (x, y) = (prev_x, prev_y);
        }

        edit_path
    }

    fn diff(&self) -> Self::EditScript {
        let trace = self.compute_shortest_edit();
        trace!(
            distance = trace.len().saturating_sub(1),
            "found shortest edit"
        );

        let mut diff = self
            .backtrack(&trace)
            .into_iter()
            .filter_map(|(prev_x, prev_y, x, y)| {
                if x == prev_x {
                    // Insert: only y increased
                    self.b.get(prev_y as usize).map(|value| Change::Insert {
                        value: value.clone(),
                    })
                } else if y == prev_y {
                    // Delete: only x increased
                    self.a.get(prev_x as usize).map(|value| Change::Delete {
                        value: value.clone(),
                    })
                } else {
                    // Equal: both increased (diagonal move)
                    self.a.get(prev_x as usize).map(|value| Change::Equal {
                        value: value.clone(),
                    })
                }
            })
            .collect::<Vec<_>>();

        diff.reverse();
        diff
    }
}

/// Computes the line edits turning `before` into `after`.
///
/// Every run of changed lines between two unchanged ones becomes a single
/// edit whose span covers the removed lines of `before` and whose text is the
/// concatenation of the inserted lines. Spans are resolved against `before`.
pub fn compute_edits(uri: &Uri, before: &str, after: &str) -> EditScript {
    let a = split_lines(before);
    let b = split_lines(after);
    let index = LineIndex::new(before);

    let mut edits = Vec::new();
    let mut pending: Option<(usize, usize, String)> = None;
    let mut offset = 0;

    for change in MyersDiff::new(&a, &b).diff() {
        match change {
            Change::Equal { value } => {
                if let Some(run) = pending.take() {
                    edits.push(coalesce(uri, &index, run));
                }
                offset += value.len();
            }
            Change::Delete { value } => {
                let run = pending.get_or_insert_with(|| (offset, offset, String::new()));
                offset += value.len();
                run.1 = offset;
            }
            Change::Insert { value } => {
                let run = pending.get_or_insert_with(|| (offset, offset, String::new()));
                run.2.push_str(value);
            }
        }
    }

    if let Some(run) = pending.take() {
        edits.push(coalesce(uri, &index, run));
    }

    debug!(
        uri = %uri,
        before_lines = a.len(),
        after_lines = b.len(),
        edits = edits.len(),
        "computed edits"
    );

    edits
}

/// Splits text into lines, keeping each line's terminator.
pub fn split_lines(text: &str) -> Vec<&str> {
    text.split_inclusive('\n').collect()
}

fn coalesce(uri: &Uri, index: &LineIndex, (start, end, new_text): (usize, usize, String)) -> TextEdit {
    debug_assert!(start <= end, "line run {start}..{end} is reversed");
    let span = Span::from_range(uri.clone(), start..end);

    // runs start and end on line boundaries of `before`, so they resolve
    let resolved = span.resolve(index);
    debug_assert!(resolved.is_ok(), "line run {start}..{end}: {resolved:?}");

    TextEdit::new(resolved.unwrap_or(span), new_text)
}
