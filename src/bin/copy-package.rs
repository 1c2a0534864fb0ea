//! copy-package CLI
//!
//! Stages a freshly packed NuGet package, replacing older versions of it

use anyhow::Result;
use clap::Parser;
use nuget_release_tools::{Outcome, PlaceRequest, place_artifact};
use std::path::PathBuf;
use std::process;

/// Copy a packed project into the staging directory
#[derive(Parser)]
#[command(name = "copy-package")]
#[command(version)]
#[command(about = "Copy a packed project into the staging directory", long_about = None)]
struct Cli {
    /// Staging directory receiving the package
    #[arg(value_name = "STAGING_DIR")]
    staging_dir: Option<PathBuf>,

    /// Project file declaring PackageId and Version
    #[arg(value_name = "PROJECT_FILE")]
    project_file: Option<PathBuf>,

    /// Build configuration (e.g. Release)
    #[arg(value_name = "CONFIGURATION")]
    configuration: Option<String>,

    /// Package name (defaults to the project's PackageId)
    #[arg(value_name = "PACKAGE_NAME")]
    package_name: Option<String>,

    #[arg(hide = true)]
    extra: Vec<String>,
}

fn main() {
    env_logger::init();

    match run() {
        Ok(exit_code) => process::exit(exit_code),
        Err(e) => {
            eprintln!("Error: {:#}", e);
            process::exit(1);
        }
    }
}

fn run() -> Result<i32> {
    let cli = Cli::parse();

    if !cli.extra.is_empty() {
        log::debug!("Ignoring extra arguments: {:?}", cli.extra);
    }

    let (Some(staging_dir), Some(project_file), Some(configuration)) =
        (cli.staging_dir, cli.project_file, cli.configuration)
    else {
        log::debug!("Nothing to stage: STAGING_DIR, PROJECT_FILE and CONFIGURATION are required");
        return Ok(0);
    };

    let request = PlaceRequest {
        staging_dir,
        project_file,
        configuration,
        package_name: cli.package_name,
    };

    match place_artifact(&request)? {
        Outcome::Completed(placed) => {
            log::info!(
                "Staged {} ({} stale removed)",
                placed.destination.display(),
                placed.removed.len()
            );
        }
        Outcome::Skipped(reason) => {
            log::debug!(
                "Nothing to stage for {}: {}",
                request.project_file.display(),
                reason
            );
        }
    }

    Ok(0)
}
