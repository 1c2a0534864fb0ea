//! Core traits and types shared by staging and publishing
//!
//! This module defines the completed-or-skipped outcome of an operation and the
//! line-oriented output sink the publish tool's output is forwarded into.

use std::fmt;
use std::io;

// ============================================================================
// Outcome
// ============================================================================

/// Why an operation decided there was nothing to do
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    /// Project file is missing or is not well-formed XML
    ProjectUnreadable,
    /// Project declares no (or an empty) `PackageId`
    MissingPackageId,
    /// Project declares no (or an empty) `Version`
    MissingVersion,
    /// Project file path has no parent directory
    NoProjectDirectory,
    /// Config file did not exist and was created from the template this run
    ConfigNotLoaded,
    /// Staging directory path is empty
    EmptyStagingDirectory,
    /// `ApiKey` or `Source` is empty
    MissingCredentials,
}

impl SkipReason {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ProjectUnreadable => "project file is missing or malformed",
            Self::MissingPackageId => "project has no PackageId",
            Self::MissingVersion => "project has no Version",
            Self::NoProjectDirectory => "project file has no parent directory",
            Self::ConfigNotLoaded => "configuration was not loaded",
            Self::EmptyStagingDirectory => "staging directory is empty",
            Self::MissingCredentials => "ApiKey or Source is not configured",
        }
    }
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Result of an operation whose preconditions may legitimately be unmet
///
/// `Skipped` is an expected, non-error result: a pipeline may run these tools
/// before anything was built or configured.
#[derive(Debug, Clone, PartialEq, Eq)]
#[must_use]
pub enum Outcome<T> {
    Completed(T),
    Skipped(SkipReason),
}

impl<T> Outcome<T> {
    pub fn is_completed(&self) -> bool {
        matches!(self, Self::Completed(_))
    }

    pub fn skip_reason(&self) -> Option<SkipReason> {
        match self {
            Self::Completed(_) => None,
            Self::Skipped(reason) => Some(*reason),
        }
    }

    pub fn completed(self) -> Option<T> {
        match self {
            Self::Completed(value) => Some(value),
            Self::Skipped(_) => None,
        }
    }
}

// ============================================================================
// Output
// ============================================================================

/// Line-oriented destination for forwarded tool output
///
/// Implementations must be shareable between the stdout and stderr readers,
/// and must keep each writer's lines in the order they were written.
pub trait OutputSink: Send + Sync {
    fn write_line(&self, line: &str) -> io::Result<()>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_outcome_accessors() {
        let done: Outcome<u32> = Outcome::Completed(7);
        assert!(done.is_completed());
        assert_eq!(done.skip_reason(), None);
        assert_eq!(done.completed(), Some(7));

        let skipped: Outcome<u32> = Outcome::Skipped(SkipReason::MissingVersion);
        assert!(!skipped.is_completed());
        assert_eq!(skipped.skip_reason(), Some(SkipReason::MissingVersion));
        assert_eq!(skipped.completed(), None);
    }

    #[test]
    fn test_skip_reason_display() {
        assert_eq!(
            SkipReason::MissingCredentials.to_string(),
            "ApiKey or Source is not configured"
        );
    }
}
