//! cachebump CLI - rewrite cache-busting version tokens in HTML files
//!
//! Scans the HTML files in a directory and updates the `?v=` query strings
//! on known static assets to a new version token.
//!
//! ## Example Usage
//!
//! ```bash
//! # Bump to today (increment suffix if already today)
//! cachebump
//!
//! # Force a specific base date
//! cachebump --date 20250813
//!
//! # Show what would change, write nothing
//! cachebump --dry-run
//!
//! # Reset today's suffixes and commit the result
//! cachebump --force --git --no-push
//! ```

use std::path::PathBuf;
use std::process;

use clap::Parser;
use colored::Colorize;

use cachebump::error::Result;
use cachebump::git::{self, GitOptions};
use cachebump::options::{self, FileConfig, RunOptions};
use cachebump::scan;

/// cachebump: static-site cache-busting version helper
#[derive(Parser)]
#[command(name = "cachebump")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Rewrite cache-busting version tokens in HTML files", long_about = None)]
struct Cli {
    /// Report changes without writing any file
    #[arg(long, visible_alias = "dry")]
    dry_run: bool,

    /// Drop suffixes, resetting today's matches to the base date
    #[arg(long)]
    force: bool,

    /// Override the base date (YYYYMMDD); defaults to today
    #[arg(long, value_name = "YYYYMMDD")]
    date: Option<String>,

    /// Directory to scan for HTML files
    #[arg(long, default_value = ".")]
    dir: PathBuf,

    /// Commit the rewritten files via git
    #[arg(long)]
    git: bool,

    /// Commit but skip the push step
    #[arg(long)]
    no_push: bool,

    /// Custom commit message
    #[arg(long, value_name = "TEXT")]
    msg: Option<String>,

    /// Emit the change summary as JSON instead of the report
    #[arg(long)]
    json: bool,
}

fn main() {
    env_logger::init();
    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        eprintln!("{} {}", "Error:".red().bold(), e);
        process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    // Invalid dates abort before any file is touched
    let base_date = options::resolve_base_date(cli.date.as_deref())?;

    let config = FileConfig::load(&cli.dir);
    let assets = config.asset_set()?;

    let opts = RunOptions {
        dry_run: cli.dry_run,
        force: cli.force,
        base_date,
        dir: cli.dir,
    };

    let summary = scan::scan_directory(&opts, &assets)?;

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
    } else {
        scan::print_report(&summary, &opts);
    }

    if cli.git && !opts.dry_run {
        if summary.total_changes() > 0 {
            let git_opts = GitOptions {
                push: !cli.no_push,
                message: cli.msg.or(config.commit_message),
            };
            git::commit_changes(
                &opts.dir,
                &summary.changed_files(),
                &opts.base_date,
                &git_opts,
            )?;
        } else {
            println!("No changes detected; skipping git commit.");
        }
    }

    Ok(())
}
