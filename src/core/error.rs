//! Error handling for staging and publishing
//!
//! Only genuine failures live here. Unmet preconditions (missing package
//! metadata, empty credentials) are reported as [`crate::core::Outcome::Skipped`].

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Main error type for staging and publishing operations
#[derive(Error, Debug)]
pub enum ReleaseError {
    // Staging errors
    #[error("Failed to list staging directory {path}: {source}")]
    StagingDirUnreadable {
        path: PathBuf,
        #[source]
        source: walkdir::Error,
    },

    #[error("Failed to delete stale artifact {path}: {source}")]
    DeleteFailed {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Failed to copy artifact {from} to {to}: {source}")]
    CopyFailed {
        from: PathBuf,
        to: PathBuf,
        #[source]
        source: io::Error,
    },

    // Configuration errors
    #[error("Failed to read config file {path}: {source}")]
    ConfigRead {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Failed to create default config file {path}: {source}")]
    ConfigCreate {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    // Publish tool errors
    #[error("Failed to launch publish tool {tool}: {source}")]
    SpawnFailed {
        tool: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Failed to wait for publish tool {tool}: {source}")]
    WaitFailed {
        tool: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Failed to forward tool output: {0}")]
    Output(#[source] io::Error),
}

impl ReleaseError {
    /// Get error code for this error
    pub fn code(&self) -> &'static str {
        match self {
            Self::StagingDirUnreadable { .. } => "STAGING_DIR_UNREADABLE",
            Self::DeleteFailed { .. } => "DELETE_FAILED",
            Self::CopyFailed { .. } => "COPY_FAILED",
            Self::ConfigRead { .. } => "CONFIG_READ",
            Self::ConfigCreate { .. } => "CONFIG_CREATE",
            Self::SpawnFailed { .. } => "SPAWN_FAILED",
            Self::WaitFailed { .. } => "WAIT_FAILED",
            Self::Output(_) => "OUTPUT",
        }
    }

    /// Get suggested actions for this error
    pub fn suggested_actions(&self) -> Vec<&'static str> {
        match self {
            Self::StagingDirUnreadable { .. } => vec![
                "Check that the staging directory exists",
                "Check read permissions on the staging directory",
            ],
            Self::DeleteFailed { .. } => vec![
                "Check that no other process holds the package file open",
                "Check write permissions on the staging directory",
            ],
            Self::CopyFailed { .. } => vec![
                "Build and pack the project for this configuration first",
                "Check that PackageId and Version match the packed file name",
                "Check write permissions on the staging directory",
            ],
            Self::ConfigRead { .. } => vec!["Check that config.ini is readable UTF-8 text"],
            Self::ConfigCreate { .. } => {
                vec!["Check write permissions on the working directory"]
            }
            Self::SpawnFailed { .. } => vec![
                "Set NuGetCLIPath in config.ini to the nuget executable",
                "Check that the tool is executable",
            ],
            Self::WaitFailed { .. } => vec!["Inspect the run log for partial output"],
            Self::Output(_) => vec!["Check free disk space for the run log"],
        }
    }
}
