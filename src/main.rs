use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::Parser;
use pallet_check::import;
use pallet_check::render;
use pallet_check::types::{Axis, Catalog};
use pallet_check::{ContainerBounds, validate};
use tracing::Level;

#[derive(Parser)]
#[command(
    name = "pallet_check",
    about = "Feasibility check for pallet loading plans"
)]
struct Cli {
    /// Catalog of required pallet types (CSV)
    #[arg(long, short = 'a')]
    catalog: PathBuf,

    /// Solution to check (CSV)
    #[arg(
        long,
        short = 'l',
        required_unless_present = "solution_dir",
        conflicts_with = "solution_dir"
    )]
    solution: Option<PathBuf>,

    /// Check every *.csv solution in this directory
    #[arg(long)]
    solution_dir: Option<PathBuf>,

    /// Container width
    #[arg(long, default_value_t = 100)]
    width: u32,

    /// Container height
    #[arg(long, default_value_t = 100)]
    height: u32,

    /// Placement axis limited by the container width: x, y or z
    #[arg(long, default_value = "y", value_parser = parse_axis)]
    width_axis: Axis,

    /// Placement axis limited by the container height: x, y or z
    #[arg(long, default_value = "z", value_parser = parse_axis)]
    height_axis: Axis,

    /// Show an ASCII top view of each layer of accepted solutions
    #[arg(long)]
    layout: bool,

    /// Log every check step
    #[arg(short, long)]
    verbose: bool,
}

fn parse_axis(s: &str) -> Result<Axis, String> {
    match s {
        "x" => Ok(Axis::X),
        "y" => Ok(Axis::Y),
        "z" => Ok(Axis::Z),
        _ => Err(format!("invalid axis '{}', expected: x, y, or z", s)),
    }
}

fn solution_files(dir: &Path) -> std::io::Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for entry in std::fs::read_dir(dir)? {
        let path = entry?.path();
        if path.is_file() && path.extension().is_some_and(|ext| ext == "csv") {
            files.push(path);
        }
    }
    files.sort();
    Ok(files)
}

/// Checks one solution file and prints the verdict. Returns true if accepted.
fn check_file(path: &Path, catalog: &Catalog, container: &ContainerBounds, layout: bool) -> bool {
    let placements = match import::read_solution_file(path, catalog) {
        Ok(placements) => placements,
        Err(e) => {
            tracing::warn!(file = %path.display(), error = %e, "unreadable solution");
            println!("error: {}: {}", path.display(), e);
            return false;
        }
    };

    match validate(&placements, catalog, container) {
        Ok(report) => {
            tracing::info!(file = %path.display(), minimal_length = report.minimal_length, "accepted");
            println!(
                "accepted: {} (minimal length {})",
                path.display(),
                report.minimal_length
            );
            if layout {
                print!("{}", render::render_layers(&placements));
            }
            true
        }
        Err(violation) => {
            tracing::info!(file = %path.display(), kind = ?violation.kind(), "rejected");
            println!("rejected: {}: {}", path.display(), violation);
            false
        }
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_max_level(if cli.verbose { Level::DEBUG } else { Level::WARN })
        .init();

    let catalog = match import::read_catalog_file(&cli.catalog) {
        Ok(catalog) => catalog,
        Err(e) => {
            eprintln!("Error: {}", e);
            return ExitCode::from(2);
        }
    };
    if catalog.is_empty() {
        tracing::warn!(file = %cli.catalog.display(), "catalog lists no pallet types");
    }

    let container = ContainerBounds::with_axes(cli.width, cli.width_axis, cli.height, cli.height_axis);

    let files = match (&cli.solution, &cli.solution_dir) {
        (Some(file), _) => vec![file.clone()],
        (None, Some(dir)) => solution_files(dir).unwrap_or_else(|e| {
            eprintln!("Error: cannot list {}: {}", dir.display(), e);
            std::process::exit(2);
        }),
        (None, None) => unreachable!("clap requires a solution or a directory"),
    };

    let mut accepted = 0;
    for file in &files {
        if check_file(file, &catalog, &container, cli.layout) {
            accepted += 1;
        }
    }

    if files.len() > 1 {
        println!();
        println!("Summary: {} of {} solutions accepted", accepted, files.len());
    }

    if accepted == files.len() {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}
