//! Project file metadata
//!
//! Reads `PackageId` and `Version` from an MSBuild-style project file:
//!
//! ```xml
//! <Project Sdk="Microsoft.NET.Sdk">
//!   <PropertyGroup>
//!     <PackageId>Sample</PackageId>
//!     <Version>2.0.0</Version>
//!   </PropertyGroup>
//! </Project>
//! ```

use crate::core::{Outcome, SkipReason};
use std::fs;
use std::path::{Path, PathBuf};

const PROJECT_ELEMENT: &str = "Project";
const PROPERTY_GROUP_ELEMENT: &str = "PropertyGroup";
const PACKAGE_ID_ELEMENT: &str = "PackageId";
const VERSION_ELEMENT: &str = "Version";

/// Package metadata declared by a project file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectDescriptor {
    pub package_id: Option<String>,
    pub version: Option<String>,
    /// Directory containing the project file; `None` when the path has no parent
    pub project_directory: Option<PathBuf>,
}

impl ProjectDescriptor {
    /// Read the project file at `project_file`.
    ///
    /// A missing, unreadable or malformed file is `Skipped`, not an error.
    pub fn load(project_file: &Path) -> Outcome<Self> {
        let content = match fs::read_to_string(project_file) {
            Ok(content) => content,
            Err(e) => {
                log::debug!("Cannot read project {}: {}", project_file.display(), e);
                return Outcome::Skipped(SkipReason::ProjectUnreadable);
            }
        };

        match Self::parse(&content, project_file) {
            Some(descriptor) => Outcome::Completed(descriptor),
            None => Outcome::Skipped(SkipReason::ProjectUnreadable),
        }
    }

    /// Parse project XML; `None` when it is not well-formed
    pub fn parse(content: &str, project_file: &Path) -> Option<Self> {
        let document = match roxmltree::Document::parse(content) {
            Ok(document) => document,
            Err(e) => {
                log::debug!("Malformed project {}: {}", project_file.display(), e);
                return None;
            }
        };

        let root = document.root_element();
        let (package_id, version) = if root.tag_name().name() == PROJECT_ELEMENT {
            (
                property(root, PACKAGE_ID_ELEMENT),
                property(root, VERSION_ELEMENT),
            )
        } else {
            (None, None)
        };

        Some(Self {
            package_id,
            version,
            project_directory: project_file.parent().map(Path::to_path_buf),
        })
    }

    /// Non-empty `PackageId`
    pub fn package_id(&self) -> Option<&str> {
        self.package_id.as_deref().filter(|id| !id.is_empty())
    }

    /// Non-empty `Version`
    pub fn version(&self) -> Option<&str> {
        self.version.as_deref().filter(|version| !version.is_empty())
    }
}

/// First `Project/PropertyGroup/<name>` in document order, text trimmed
fn property(project: roxmltree::Node<'_, '_>, name: &str) -> Option<String> {
    project
        .children()
        .filter(|node| node.is_element() && node.tag_name().name() == PROPERTY_GROUP_ELEMENT)
        .flat_map(|group| group.children())
        .find(|node| node.is_element() && node.tag_name().name() == name)
        .map(|element| {
            element
                .descendants()
                .filter_map(|node| if node.is_text() { node.text() } else { None })
                .collect::<String>()
                .trim()
                .to_string()
        })
}
