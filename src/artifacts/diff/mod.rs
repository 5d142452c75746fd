//! Line diffs, text edits and unified rendering
//!
//! - `myers`: Myers' shortest edit script over lines, and [`myers::compute_edits`]
//!   which turns it into text edits
//! - `edit`: applying, validating and line-normalizing text edits
//! - `unified`: rendering edits as a unified diff with hunks and context
//!
//! Edits are always expressed against the original text; nothing here
//! mutates either side of a comparison.

pub mod edit;
pub mod myers;
pub mod unified;
