//! Publish tool invocation
//!
//! Launches the NuGet CLI against the staging directory and forwards its
//! output line by line. stdout and stderr are drained concurrently so neither
//! pipe can fill up and stall the child.

use super::push_command::PushCommand;
use crate::core::config::ConfigSettings;
use crate::core::error::ReleaseError;
use crate::core::{OutputSink, Outcome, SkipReason};
use std::io;
use std::path::{Path, PathBuf};
use std::process::Stdio;
use tokio::io::{AsyncBufReadExt, AsyncRead, BufReader};
use tokio::process::Command;

/// Prefix for forwarded stderr lines
pub const STDERR_PREFIX: &str = "Error : ";

/// Staging directory and tool to publish with
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PublishRequest {
    pub staging_dir: String,
    pub tool_path: PathBuf,
}

impl PublishRequest {
    /// Explicit values win; missing ones come from `PackagesDirPath` and
    /// `NuGetCLIPath`.
    pub fn resolve(
        staging_dir: Option<String>,
        tool_path: Option<PathBuf>,
        settings: Option<&ConfigSettings>,
    ) -> Self {
        let staging_dir = staging_dir.unwrap_or_else(|| {
            settings
                .map(|s| s.packages_dir_path().to_string())
                .unwrap_or_default()
        });
        let tool_path = tool_path.unwrap_or_else(|| {
            PathBuf::from(settings.map(ConfigSettings::nuget_cli_path).unwrap_or_default())
        });

        Self {
            staging_dir,
            tool_path,
        }
    }
}

/// Lines forwarded from a completed tool run
///
/// The tool's exit status is not reported; only the debug log records it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PublishReport {
    pub stdout_lines: usize,
    pub stderr_lines: usize,
}

/// Push every staged artifact with the configured tool.
///
/// Skips without launching anything when settings were not loaded, the
/// staging directory is blank, or `ApiKey`/`Source` is empty. Otherwise waits
/// for the tool to exit, with no timeout.
pub async fn publish(
    settings: Option<&ConfigSettings>,
    request: &PublishRequest,
    sink: &dyn OutputSink,
) -> Result<Outcome<PublishReport>, ReleaseError> {
    let Some(settings) = settings else {
        return Ok(Outcome::Skipped(SkipReason::ConfigNotLoaded));
    };

    if request.staging_dir.trim().is_empty() {
        return Ok(Outcome::Skipped(SkipReason::EmptyStagingDirectory));
    }

    if !settings.has_api_key() || settings.source().is_empty() {
        return Ok(Outcome::Skipped(SkipReason::MissingCredentials));
    }

    let push = PushCommand::new(&request.staging_dir, settings);
    let tool = &request.tool_path;
    log::info!("Running {} {}", tool.display(), push);

    let mut command = Command::new(resolve_program(tool).map_err(|source| {
        ReleaseError::SpawnFailed {
            tool: tool.clone(),
            source,
        }
    })?);
    command
        .args(push.args())
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped());

    if let Some(dir) = tool.parent().filter(|dir| !dir.as_os_str().is_empty()) {
        command.current_dir(dir);
    }

    let mut child = command.spawn().map_err(|source| ReleaseError::SpawnFailed {
        tool: tool.clone(),
        source,
    })?;

    let stdout = child.stdout.take();
    let stderr = child.stderr.take();

    let (stdout_result, stderr_result) = tokio::join!(
        async {
            match stdout {
                Some(stdout) => forward_lines(stdout, "", sink).await,
                None => Ok(0),
            }
        },
        async {
            match stderr {
                Some(stderr) => forward_lines(stderr, STDERR_PREFIX, sink).await,
                None => Ok(0),
            }
        }
    );

    let status = child
        .wait()
        .await
        .map_err(|source| ReleaseError::WaitFailed {
            tool: tool.clone(),
            source,
        })?;
    log::debug!("{} exited with {}", tool.display(), status);

    Ok(Outcome::Completed(PublishReport {
        stdout_lines: stdout_result.map_err(ReleaseError::Output)?,
        stderr_lines: stderr_result.map_err(ReleaseError::Output)?,
    }))
}

/// Absolute path for tools given with a directory part, since the child runs
/// in the tool's own directory. Bare names are left for `PATH` lookup.
fn resolve_program(tool: &Path) -> io::Result<PathBuf> {
    match tool.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => std::path::absolute(tool),
        _ => Ok(tool.to_path_buf()),
    }
}

/// Forward each non-empty line of `reader` to `sink`, prefixed.
///
/// Keeps draining after a sink failure so the child never blocks on a full
/// pipe; the first failure is returned once the stream ends.
async fn forward_lines<R>(reader: R, prefix: &str, sink: &dyn OutputSink) -> io::Result<usize>
where
    R: AsyncRead + Unpin,
{
    let mut reader = BufReader::new(reader);
    let mut buf = Vec::new();
    let mut forwarded = 0;
    let mut failure = None;

    loop {
        buf.clear();
        if reader.read_until(b'\n', &mut buf).await? == 0 {
            break;
        }

        let line = String::from_utf8_lossy(&buf);
        let line = line.trim_end_matches(['\n', '\r']);
        if line.is_empty() || failure.is_some() {
            continue;
        }

        match sink.write_line(&format!("{}{}", prefix, line)) {
            Ok(()) => forwarded += 1,
            Err(e) => failure = Some(e),
        }
    }

    match failure {
        Some(e) => Err(e),
        None => Ok(forwarded),
    }
}
