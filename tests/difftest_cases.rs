mod common;

use common::{FROM, TO, edits, ranges};
use linediff::{UnifiedOptions, Uri, apply_edits, compute_edits, line_edits, to_unified};
use pretty_assertions::assert_eq;
use rstest::rstest;

type Spec = Vec<(usize, usize, &'static str)>;

/// A named before/after pair with hand-written edits and the diff they
/// render to.
struct Case {
    input: &'static str,
    output: &'static str,
    unified: &'static str,
    edits: Spec,
    line_edits: Option<Spec>,
    /// The hand-written edits are not the ones a shortest line diff finds.
    no_diff: bool,
}

impl Case {
    fn new(input: &'static str, output: &'static str, unified: &'static str, edits: Spec) -> Self {
        Self {
            input,
            output,
            unified,
            edits,
            line_edits: None,
            no_diff: false,
        }
    }

    fn with_line_edits(mut self, line_edits: Spec) -> Self {
        self.line_edits = Some(line_edits);
        self
    }

    fn no_diff(mut self) -> Self {
        self.no_diff = true;
        self
    }

    /// Line edits default to the edits themselves when those are already
    /// line aligned.
    fn expected_line_edits(&self) -> Vec<(usize, usize, String)> {
        self.line_edits
            .as_ref()
            .unwrap_or(&self.edits)
            .iter()
            .map(|&(start, end, text)| (start, end, text.to_string()))
            .collect()
    }

    fn expected_unified(&self) -> String {
        if self.unified.is_empty() {
            String::new()
        } else {
            format!("--- {FROM}\n+++ {TO}\n{}", self.unified)
        }
    }
}

fn case(name: &str) -> Case {
    match name {
        "empty" => Case::new("", "", "", vec![]),
        "no_diff" => Case::new("gargantuan\n", "gargantuan\n", "", vec![]),
        "replace_all" => Case::new(
            "fruit\n",
            "cheese\n",
            "@@ -1 +1 @@\n-fruit\n+cheese\n",
            vec![(0, 5, "cheese")],
        )
        .with_line_edits(vec![(0, 6, "cheese\n")]),
        "insert_rune" => Case::new(
            "gord\n",
            "gourd\n",
            "@@ -1 +1 @@\n-gord\n+gourd\n",
            vec![(2, 2, "u")],
        )
        .with_line_edits(vec![(0, 5, "gourd\n")]),
        "delete_rune" => Case::new(
            "groat\n",
            "goat\n",
            "@@ -1 +1 @@\n-groat\n+goat\n",
            vec![(1, 2, "")],
        )
        .with_line_edits(vec![(0, 6, "goat\n")]),
        "replace_rune" => Case::new(
            "loud\n",
            "lord\n",
            "@@ -1 +1 @@\n-loud\n+lord\n",
            vec![(2, 3, "r")],
        )
        .with_line_edits(vec![(0, 5, "lord\n")]),
        "replace_partials" => Case::new(
            "blanket\n",
            "bunker\n",
            "@@ -1 +1 @@\n-blanket\n+bunker\n",
            vec![(1, 3, "u"), (6, 7, "r")],
        )
        .with_line_edits(vec![(0, 8, "bunker\n")]),
        "insert_line" => Case::new(
            "1: one\n3: three\n",
            "1: one\n2: two\n3: three\n",
            "@@ -1,2 +1,3 @@\n 1: one\n+2: two\n 3: three\n",
            vec![(7, 7, "2: two\n")],
        ),
        "replace_no_newline" => Case::new(
            "A",
            "B",
            "@@ -1 +1 @@\n-A\n\\ No newline at end of file\n+B\n\\ No newline at end of file\n",
            vec![(0, 1, "B")],
        ),
        "add_end" => Case::new(
            "A",
            "AB",
            "@@ -1 +1 @@\n-A\n\\ No newline at end of file\n+AB\n\\ No newline at end of file\n",
            vec![(1, 1, "B")],
        )
        .with_line_edits(vec![(0, 1, "AB")]),
        "add_newline" => Case::new(
            "A",
            "A\n",
            "@@ -1 +1 @@\n-A\n\\ No newline at end of file\n+A\n",
            vec![(1, 1, "\n")],
        )
        .with_line_edits(vec![(0, 1, "A\n")]),
        "delete_front" => Case::new(
            "A\nB\nC\nA\nB\nB\nA\n",
            "C\nB\nA\nB\nA\nC\n",
            "@@ -1,7 +1,6 @@\n-A\n-B\n C\n+B\n A\n B\n-B\n A\n+C\n",
            vec![(0, 4, ""), (6, 6, "B\n"), (10, 12, ""), (14, 14, "C\n")],
        )
        .no_diff(),
        "replace_last_line" => Case::new(
            "A\nB\n",
            "A\nC\n\n",
            "@@ -1,2 +1,3 @@\n A\n-B\n+C\n+\n",
            vec![(2, 3, "C\n")],
        )
        .with_line_edits(vec![(2, 4, "C\n\n")]),
        "multiple_replace" => Case::new(
            "A\nB\nC\nD\nE\nF\nG\n",
            "A\nH\nI\nJ\nE\nF\nK\n",
            "@@ -1,7 +1,7 @@\n A\n-B\n-C\n-D\n+H\n+I\n+J\n E\n F\n-G\n+K\n",
            vec![(2, 8, "H\nI\nJ\n"), (12, 14, "K\n")],
        )
        .no_diff(),
        other => panic!("unknown case {other}"),
    }
}

macro_rules! difftest_cases {
    ($(#[$attr:meta])* fn $test:ident($name:ident: &str) $body:block) => {
        #[rstest]
        #[case::empty("empty")]
        #[case::no_diff("no_diff")]
        #[case::replace_all("replace_all")]
        #[case::insert_rune("insert_rune")]
        #[case::delete_rune("delete_rune")]
        #[case::replace_rune("replace_rune")]
        #[case::replace_partials("replace_partials")]
        #[case::insert_line("insert_line")]
        #[case::replace_no_newline("replace_no_newline")]
        #[case::add_end("add_end")]
        #[case::add_newline("add_newline")]
        #[case::delete_front("delete_front")]
        #[case::replace_last_line("replace_last_line")]
        #[case::multiple_replace("multiple_replace")]
        $(#[$attr])*
        fn $test(#[case] $name: &str) $body
    };
}

difftest_cases! {
    fn edits_produce_the_output(name: &str) {
        let case = case(name);

        assert_eq!(apply_edits(case.input, &edits(&case.edits)).unwrap(), case.output);
        if let Some(line_edits) = &case.line_edits {
            assert_eq!(apply_edits(case.input, &edits(line_edits)).unwrap(), case.output);
        }
    }
}

difftest_cases! {
    fn edits_normalize_to_line_edits(name: &str) {
        let case = case(name);

        let normalized = line_edits(case.input, &edits(&case.edits)).unwrap();

        assert_eq!(ranges(&normalized), case.expected_line_edits());
    }
}

difftest_cases! {
    fn edits_render_the_unified_diff(name: &str) {
        let case = case(name);
        let options = UnifiedOptions::default();

        let unified = to_unified(FROM, TO, case.input, &edits(&case.edits), &options).unwrap();
        assert_eq!(unified.to_string(), case.expected_unified());

        if let Some(line_edits) = &case.line_edits {
            let unified = to_unified(FROM, TO, case.input, &edits(line_edits), &options).unwrap();
            assert_eq!(unified.to_string(), case.expected_unified());
        }
    }
}

difftest_cases! {
    fn computed_edits_match_the_case(name: &str) {
        let case = case(name);

        let computed = compute_edits(&Uri::from_path(""), case.input, case.output);

        assert_eq!(apply_edits(case.input, &computed).unwrap(), case.output);
        if !case.no_diff {
            let unified =
                to_unified(FROM, TO, case.input, &computed, &UnifiedOptions::default()).unwrap();
            assert_eq!(unified.to_string(), case.expected_unified());
        }
    }
}
