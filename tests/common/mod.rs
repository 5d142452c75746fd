#![allow(dead_code)]

use linediff::{TextEdit, Uri};
use std::path::{Path, PathBuf};

pub const FROM: &str = "from";
pub const TO: &str = "to";

/// Builds offset edits over an unnamed resource.
pub fn edits(spec: &[(usize, usize, &str)]) -> Vec<TextEdit> {
    spec.iter()
        .map(|&(start, end, new_text)| {
            TextEdit::from_offsets(Uri::from_path(""), start, end, new_text)
                .expect("edit end precedes its start")
        })
        .collect()
}

/// Byte ranges and replacement texts of `edits`, for comparison.
pub fn ranges(edits: &[TextEdit]) -> Vec<(usize, usize, String)> {
    edits
        .iter()
        .map(|edit| {
            let range = edit.span.byte_range().expect("edit span lacks offsets");
            (range.start, range.end, edit.new_text.clone())
        })
        .collect()
}

pub fn fixture(name: &str) -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name)
}
