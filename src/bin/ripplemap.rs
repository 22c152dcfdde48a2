//! ripplemap CLI - render the city-marker overlay and replay its ripple cycle
//!
//! ## Example Usage
//!
//! ```bash
//! # Inject markers, ripples, and a starfield into a page
//! ripplemap render --centers centers.json --page index.html -o out.html
//!
//! # Print the ripple schedule for the marker set
//! ripplemap timeline --centers centers.json
//!
//! # Replay two cycles against the wall clock
//! ripplemap play --centers centers.json --cycles 2
//! ```

use std::fs;
use std::path::PathBuf;
use std::process;
use std::thread;
use std::time::{Duration, Instant};

use clap::{Parser, Subcommand};
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use rand::thread_rng;

use cachebump::markers::{self, MarkerRecord};
use cachebump::schedule::{CyclePlayer, CycleSchedule, DEFAULT_CYCLE};
use cachebump::svg;

/// ripplemap: SVG city-marker renderer and ripple-cycle player
#[derive(Parser)]
#[command(name = "ripplemap")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Render the city-marker overlay and replay its ripple cycle", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Inject marker, ripple, and starfield markup into a page
    Render {
        /// Marker data file
        #[arg(long, default_value = "centers.json")]
        centers: PathBuf,

        /// Page to inject into
        #[arg(long)]
        page: PathBuf,

        /// Output file; stdout when omitted
        #[arg(short = 'o', long)]
        out: Option<PathBuf>,

        /// Number of decorative stars
        #[arg(long, default_value_t = svg::DEFAULT_STAR_COUNT)]
        stars: usize,
    },

    /// Print the computed ripple schedule for the marker set
    Timeline {
        /// Marker data file
        #[arg(long, default_value = "centers.json")]
        centers: PathBuf,

        /// Cycle length in milliseconds
        #[arg(long, default_value_t = DEFAULT_CYCLE.as_millis() as u64)]
        cycle_ms: u64,
    },

    /// Replay the ripple cycle against the wall clock
    Play {
        /// Marker data file
        #[arg(long, default_value = "centers.json")]
        centers: PathBuf,

        /// Cycle length in milliseconds
        #[arg(long, default_value_t = DEFAULT_CYCLE.as_millis() as u64)]
        cycle_ms: u64,

        /// Number of cycles to replay
        #[arg(long, default_value_t = 1)]
        cycles: u32,
    },
}

fn main() {
    env_logger::init();
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Render {
            centers,
            page,
            out,
            stars,
        } => render(&centers, &page, out.as_deref(), stars),
        Commands::Timeline { centers, cycle_ms } => timeline(&centers, cycle_ms),
        Commands::Play {
            centers,
            cycle_ms,
            cycles,
        } => play(&centers, cycle_ms, cycles),
    };

    if let Err(e) = result {
        eprintln!("{} {}", "Error:".red().bold(), e);
        process::exit(1);
    }
}

fn render(
    centers: &std::path::Path,
    page: &std::path::Path,
    out: Option<&std::path::Path>,
    stars: usize,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut rendered = fs::read_to_string(page)?;

    // Marker data or container problems degrade to a starfield-only page
    match markers::load_markers(centers) {
        Ok(list) => {
            let markup = svg::markers_markup(&list);
            match svg::inject_markers(&rendered, &markup) {
                Ok(page) => rendered = page,
                Err(e) => {
                    log::warn!("{e}");
                    eprintln!("{} {}; markers skipped", "Warning:".yellow(), e);
                }
            }
        }
        Err(e) => {
            log::warn!("{e}");
            eprintln!("{} {}; markers skipped", "Warning:".yellow(), e);
        }
    }

    let starfield = svg::starfield_markup(stars, &mut thread_rng());
    rendered = svg::inject_stars(&rendered, &starfield);

    match out {
        Some(path) => {
            fs::write(path, rendered)?;
            println!("{} Rendered to {}", "✓".green().bold(), path.display());
        }
        None => print!("{rendered}"),
    }
    Ok(())
}

fn timeline(
    centers: &std::path::Path,
    cycle_ms: u64,
) -> Result<(), Box<dyn std::error::Error>> {
    let list = markers::load_markers(centers)?;
    let schedule = CycleSchedule::evenly_divided(Duration::from_millis(cycle_ms), list.len());

    println!(
        "{} {} marker(s), {}ms cycle",
        "Ripple timeline".cyan().bold(),
        list.len(),
        schedule.cycle().as_millis()
    );
    for entry in schedule.entries() {
        let name = marker_name(&list, entry.marker);
        println!(
            "  {:>6}ms  {} {}",
            entry.offset.as_millis(),
            name.bold(),
            format!(
                "({} rings, {}ms apart)",
                svg::RIPPLE_RINGS,
                svg::RIPPLE_STAGGER_MS
            )
            .dimmed()
        );
    }
    Ok(())
}

fn play(
    centers: &std::path::Path,
    cycle_ms: u64,
    cycles: u32,
) -> Result<(), Box<dyn std::error::Error>> {
    let list = markers::load_markers(centers)?;
    let schedule = CycleSchedule::evenly_divided(Duration::from_millis(cycle_ms), list.len());
    let mut player = CyclePlayer::new(schedule);

    let total = Duration::from_millis(cycle_ms) * cycles.max(1);
    let pb = ProgressBar::new(total.as_millis() as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {msg}")?
            .progress_chars("#>-"),
    );

    let started = Instant::now();
    while started.elapsed() < total {
        for entry in player.tick(started.elapsed()) {
            pb.println(format!(
                "{} ripple {}",
                "~".cyan(),
                marker_name(&list, entry.marker).bold()
            ));
        }
        pb.set_position(started.elapsed().as_millis() as u64);
        thread::sleep(Duration::from_millis(50));
    }

    pb.finish_with_message("cycle complete");
    Ok(())
}

fn marker_name(list: &[MarkerRecord], index: usize) -> &str {
    list.get(index).map_or("?", |m| m.name.as_str())
}
