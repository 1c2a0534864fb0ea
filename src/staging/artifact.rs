//! Artifact identity and file-name matching
//!
//! An artifact file is named `{name}.{version}.nupkg`. Package names may
//! themselves contain dots, so the version boundary is the first `.` after the
//! name that is followed by a decimal digit.

use std::fmt;
use std::path::{Path, PathBuf};

/// Artifact file extension, without the leading dot
pub const PACKAGE_EXTENSION: &str = "nupkg";

/// Name and version of one artifact file
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ArtifactIdentity {
    pub name: String,
    pub version: String,
}

impl ArtifactIdentity {
    pub fn new(name: impl Into<String>, version: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            version: version.into(),
        }
    }

    /// `{name}.{version}.nupkg`
    pub fn file_name(&self) -> String {
        format!("{}.{}.{}", self.name, self.version, PACKAGE_EXTENSION)
    }

    /// Build output location: `<project_dir>/bin/<configuration>/<file_name>`
    pub fn build_output_path(&self, project_dir: &Path, configuration: &str) -> PathBuf {
        project_dir
            .join("bin")
            .join(configuration)
            .join(self.file_name())
    }
}

impl fmt::Display for ArtifactIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.name, self.version)
    }
}

/// Whether `file_name` is an artifact of `package_name`.
///
/// Matches `{package_name}.` followed by an ASCII digit, then anything, then
/// `.nupkg`. Comparison is literal and case-sensitive, so `Abc` matches
/// `Abc.1.0.0.nupkg` but neither `AbcCore.1.0.0.nupkg` nor
/// `Abc.Core.1.0.0.nupkg`.
pub fn is_package_file(file_name: &str, package_name: &str) -> bool {
    if package_name.is_empty() {
        return false;
    }

    let Some(rest) = file_name
        .strip_prefix(package_name)
        .and_then(|rest| rest.strip_prefix('.'))
    else {
        return false;
    };

    let mut chars = rest.chars();
    if !chars.next().is_some_and(|c| c.is_ascii_digit()) {
        return false;
    }

    chars
        .as_str()
        .strip_suffix(PACKAGE_EXTENSION)
        .is_some_and(|middle| middle.ends_with('.'))
}
