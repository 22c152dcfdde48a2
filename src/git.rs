//! External git collaborator: stage, commit, and optionally push the
//! rewritten HTML files

use std::path::Path;
use std::process::Command;

use colored::Colorize;

use crate::error::{CachebumpError, Result};

/// How the git phase behaves after a successful non-dry run
#[derive(Debug, Clone)]
pub struct GitOptions {
    /// Push after committing
    pub push: bool,
    /// Commit message override; the default embeds the base date
    pub message: Option<String>,
}

/// Stage and commit the changed files, then push unless disabled.
///
/// Staging or commit failure aborts the phase with an error; the file
/// rewrites already on disk stay persisted. A push failure is only a
/// warning and does not fail the run.
pub fn commit_changes(
    dir: &Path,
    files: &[String],
    base_date: &str,
    opts: &GitOptions,
) -> Result<()> {
    if files.is_empty() {
        log::info!("No HTML files recorded as changed; skipping git add");
        return Ok(());
    }

    println!(
        "\n{} Adding changed files: {}",
        "[git]".cyan(),
        files.join(", ")
    );
    let mut add_args = vec!["add", "--"];
    add_args.extend(files.iter().map(String::as_str));
    run_git(dir, &add_args)?;

    let message = opts
        .message
        .clone()
        .unwrap_or_else(|| format!("chore: bump asset cache versions {base_date}"));
    println!("{} Committing with message: {}", "[git]".cyan(), message);
    run_git(dir, &["commit", "-m", &message])?;

    if opts.push {
        println!("{} Pushing...", "[git]".cyan());
        if let Err(e) = run_git(dir, &["push"]) {
            log::warn!("git push failed: {e}");
            println!(
                "{} Push failed (possibly no remote). You can push manually.",
                "[git]".yellow()
            );
        }
    } else {
        println!("{} Push skipped (--no-push specified).", "[git]".cyan());
    }

    Ok(())
}

fn run_git(dir: &Path, args: &[&str]) -> Result<()> {
    let output = Command::new("git").current_dir(dir).args(args).output();

    match output {
        Ok(out) if out.status.success() => Ok(()),
        Ok(out) => Err(CachebumpError::GitError(format!(
            "git {} failed: {}",
            args[0],
            String::from_utf8_lossy(&out.stderr).trim()
        ))),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Err(CachebumpError::GitError(
            "git not found on PATH".to_string(),
        )),
        Err(e) => Err(CachebumpError::IoError(e)),
    }
}
