//! Directory scan driver: enumerate HTML files, rewrite each, persist or
//! report

use std::ffi::OsStr;
use std::fs;
use std::path::PathBuf;

use colored::Colorize;
use serde::Serialize;

use crate::assets::AssetSet;
use crate::error::Result;
use crate::options::RunOptions;
use crate::rewrite::{rewrite_text, ChangeRecord};

/// Changes recorded for one file
#[derive(Debug, Clone, Serialize)]
pub struct FileReport {
    pub file: String,
    pub changes: Vec<ChangeRecord>,
}

/// Outcome of one scan over a directory
#[derive(Debug, Clone, Default, Serialize)]
pub struct Summary {
    pub files_scanned: usize,
    pub reports: Vec<FileReport>,
}

impl Summary {
    /// Total number of rewritten asset references
    pub fn total_changes(&self) -> usize {
        self.reports.iter().map(|r| r.changes.len()).sum()
    }

    /// Names of the files that were rewritten, in report order
    pub fn changed_files(&self) -> Vec<String> {
        self.reports.iter().map(|r| r.file.clone()).collect()
    }
}

/// Scan every `*.html` file directly inside `opts.dir` (non-recursive),
/// rewrite recognized asset references, and persist the result unless this
/// is a dry run.
///
/// Files are visited in name order so reports are deterministic. A read or
/// write failure aborts the whole run; there is no per-file skip.
pub fn scan_directory(opts: &RunOptions, assets: &AssetSet) -> Result<Summary> {
    log::info!("Scanning {} for HTML files", opts.dir.display());

    let mut files: Vec<PathBuf> = Vec::new();
    for entry in fs::read_dir(&opts.dir)? {
        let entry = entry?;
        let path = entry.path();
        if path.extension() == Some(OsStr::new("html")) && path.is_file() {
            files.push(path);
        }
    }
    files.sort();

    let mut summary = Summary::default();
    for path in files {
        summary.files_scanned += 1;

        let original = fs::read_to_string(&path)?;
        let (rewritten, changes) = rewrite_text(&original, assets, &opts.base_date, opts.force);
        if changes.is_empty() {
            continue;
        }

        if !opts.dry_run {
            fs::write(&path, rewritten)?;
        }

        let file = path
            .file_name()
            .map(|name| name.to_string_lossy().to_string())
            .unwrap_or_default();
        summary.reports.push(FileReport { file, changes });
    }

    log::info!(
        "Scan complete: {} file(s), {} change(s)",
        summary.files_scanned,
        summary.total_changes()
    );
    Ok(summary)
}

/// Print the per-file change lines and the closing total, in the tool's
/// report wording.
pub fn print_report(summary: &Summary, opts: &RunOptions) {
    let dry_prefix = if opts.dry_run { "[DRY] " } else { "" };

    for report in &summary.reports {
        println!("\n{}{}:", dry_prefix.yellow(), report.file.bold());
        for change in &report.changes {
            println!(
                "  {}: {} -> {}",
                change.asset.cyan(),
                change.from.dimmed(),
                change.to.green()
            );
        }
    }

    let total = summary.total_changes();
    if total == 0 {
        if opts.dry_run {
            println!("No changes would be made.");
        } else {
            println!("No version updates applied.");
        }
    } else if opts.dry_run {
        println!("\nWould update {total} asset reference(s).");
    } else {
        println!("\nUpdated {total} asset reference(s).");
    }
}
