//! publish-packages CLI
//!
//! Pushes every staged NuGet package using the settings in config.ini. All
//! output, including the tool's, goes to lastlog.log in the working directory.

use anyhow::Result;
use clap::Parser;
use nuget_release_tools::publish::{RUN_LOG_FILENAME, STDERR_PREFIX};
use nuget_release_tools::{
    CONFIG_FILENAME, ConfigLoader, LogFileSink, Outcome, OutputSink, PublishRequest, publish,
};
use std::path::{Path, PathBuf};
use std::process;

/// Push staged packages with the NuGet CLI
#[derive(Parser)]
#[command(name = "publish-packages")]
#[command(version)]
#[command(about = "Push staged packages with the NuGet CLI", long_about = None)]
struct Cli {
    /// Staging directory (defaults to PackagesDirPath)
    #[arg(value_name = "STAGING_DIR")]
    staging_dir: Option<String>,

    /// NuGet CLI executable (defaults to NuGetCLIPath)
    #[arg(value_name = "TOOL_PATH")]
    tool_path: Option<PathBuf>,

    #[arg(hide = true)]
    extra: Vec<String>,
}

#[tokio::main]
async fn main() {
    let sink = match LogFileSink::create(Path::new(RUN_LOG_FILENAME)) {
        Ok(sink) => sink,
        Err(e) => {
            eprintln!("Error: failed to create {}: {}", RUN_LOG_FILENAME, e);
            process::exit(1);
        }
    };
    init_logging(&sink);

    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            let prefix = if e.use_stderr() { STDERR_PREFIX } else { "" };
            for line in e.to_string().lines().filter(|line| !line.trim().is_empty()) {
                let _ = sink.write_line(&format!("{}{}", prefix, line));
            }
            process::exit(e.exit_code());
        }
    };

    let exit_code = match run(cli, &sink).await {
        Ok(code) => code,
        Err(e) => {
            let _ = sink.write_line(&format!("{}{:#}", STDERR_PREFIX, e));
            1
        }
    };

    process::exit(exit_code);
}

/// Route `log` records into the run log
fn init_logging(sink: &LogFileSink) {
    let mut builder = env_logger::Builder::from_default_env();
    match sink.try_clone_writer() {
        Ok(writer) => {
            builder.target(env_logger::Target::Pipe(Box::new(writer)));
        }
        Err(e) => eprintln!("Warning: logging to stderr: {}", e),
    }
    builder.init();
}

async fn run(cli: Cli, sink: &LogFileSink) -> Result<i32> {
    let loaded = ConfigLoader::load(Path::new(CONFIG_FILENAME)).await?;
    let settings = loaded.settings();
    let request = PublishRequest::resolve(cli.staging_dir, cli.tool_path, settings);

    match publish(settings, &request, sink).await? {
        Outcome::Completed(report) => {
            log::info!(
                "Publish tool finished: {} output lines, {} error lines",
                report.stdout_lines,
                report.stderr_lines
            );
        }
        Outcome::Skipped(reason) => {
            log::debug!("Nothing to publish: {}", reason);
        }
    }

    Ok(0)
}
