use crate::artifacts::diff::myers::{Change, compute_edits};
use crate::artifacts::diff::unified::{Hunk, NO_NEWLINE_MARKER, Unified, UnifiedOptions, to_unified};
use crate::artifacts::span::Uri;
use anyhow::Context;
use colored::Colorize;
use derive_new::new;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::info;

/// Compares two files line by line.
#[derive(Debug, Clone, new)]
pub struct DiffCommand {
    old: PathBuf,
    new: PathBuf,
    from_label: Option<String>,
    to_label: Option<String>,
    options: UnifiedOptions,
}

impl DiffCommand {
    pub fn run<W: Write + ?Sized>(&self, writer: &mut W) -> anyhow::Result<()> {
        let unified = self.unified()?;
        info!(
            old = %self.old.display(),
            new = %self.new.display(),
            hunks = unified.hunks().len(),
            "compared files"
        );

        print_unified(writer, &unified)
    }

    pub fn unified(&self) -> anyhow::Result<Unified> {
        let before = read_text(&self.old)?;
        let after = read_text(&self.new)?;

        let edits = compute_edits(&Uri::from_path(&self.old), &before, &after);
        let unified = to_unified(
            &label(self.from_label.as_deref(), &self.old),
            &label(self.to_label.as_deref(), &self.new),
            &before,
            &edits,
            &self.options,
        )?;

        Ok(unified)
    }
}

fn read_text(path: &Path) -> anyhow::Result<String> {
    fs::read_to_string(path).with_context(|| format!("Failed to read '{}'", path.display()))
}

fn label(label: Option<&str>, path: &Path) -> String {
    label.map_or_else(|| path.display().to_string(), str::to_string)
}

/// Writes `unified` with colors, when enabled through `colored`'s global
/// switch. Without colors the output matches `unified.to_string()`.
pub fn print_unified<W: Write + ?Sized>(writer: &mut W, unified: &Unified) -> anyhow::Result<()> {
    if unified.is_empty() {
        return Ok(());
    }

    writeln!(writer, "{}", format!("--- {}", unified.from()).bold())?;
    writeln!(writer, "{}", format!("+++ {}", unified.to()).bold())?;
    for hunk in unified.hunks() {
        print_hunk(writer, hunk)?;
    }

    Ok(())
}

fn print_hunk<W: Write + ?Sized>(writer: &mut W, hunk: &Hunk) -> anyhow::Result<()> {
    writeln!(writer, "{}", hunk.header().cyan())?;

    for line in hunk.lines() {
        let value = line.value().as_str();
        let body = value.strip_suffix('\n');
        let text = format!("{}{}", line.prefix(), body.unwrap_or(value));

        let text = match line {
            Change::Delete { .. } => text.red(),
            Change::Insert { .. } => text.green(),
            Change::Equal { .. } => text.normal(),
        };
        writeln!(writer, "{text}")?;

        if body.is_none() {
            writeln!(writer, "{NO_NEWLINE_MARKER}")?;
        }
    }

    Ok(())
}
