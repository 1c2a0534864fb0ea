//! Artifact placement
//!
//! Copies a freshly packed artifact from a project's build output into the
//! staging directory, replacing any older version of the same package.

use super::artifact::ArtifactIdentity;
use super::project::ProjectDescriptor;
use super::remover::remove_stale_artifacts;
use crate::core::error::ReleaseError;
use crate::core::{Outcome, SkipReason};
use std::fs;
use std::path::PathBuf;

/// What to place and where
#[derive(Debug, Clone)]
pub struct PlaceRequest {
    pub staging_dir: PathBuf,
    pub project_file: PathBuf,
    /// Build configuration name, e.g. `Release`
    pub configuration: String,
    /// Package name; read from the project's `PackageId` when `None`
    pub package_name: Option<String>,
}

/// Result of a completed placement
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlacedArtifact {
    pub identity: ArtifactIdentity,
    pub source: PathBuf,
    pub destination: PathBuf,
    /// Stale artifacts deleted before the copy
    pub removed: Vec<PathBuf>,
}

/// Place the artifact described by `request` into its staging directory.
///
/// The version always comes from the project file, even when the package name
/// is supplied. Stale artifacts are deleted before the copy, so a failed copy
/// leaves no version of the package staged.
pub fn place_artifact(request: &PlaceRequest) -> Result<Outcome<PlacedArtifact>, ReleaseError> {
    let descriptor = match ProjectDescriptor::load(&request.project_file) {
        Outcome::Completed(descriptor) => descriptor,
        Outcome::Skipped(reason) => return Ok(Outcome::Skipped(reason)),
    };

    let name = match request.package_name.as_deref() {
        Some(name) => name,
        None => match descriptor.package_id() {
            Some(id) => id,
            None => return Ok(Outcome::Skipped(SkipReason::MissingPackageId)),
        },
    };

    let Some(version) = descriptor.version() else {
        return Ok(Outcome::Skipped(SkipReason::MissingVersion));
    };

    let Some(project_dir) = descriptor.project_directory.as_deref() else {
        return Ok(Outcome::Skipped(SkipReason::NoProjectDirectory));
    };

    let identity = ArtifactIdentity::new(name, version);
    let source = identity.build_output_path(project_dir, &request.configuration);
    let destination = request.staging_dir.join(identity.file_name());

    let removed = remove_stale_artifacts(&request.staging_dir, &identity.name)?;

    fs::copy(&source, &destination).map_err(|e| ReleaseError::CopyFailed {
        from: source.clone(),
        to: destination.clone(),
        source: e,
    })?;

    log::info!(
        "Copied {} from {} to {}",
        identity,
        source.display(),
        destination.display()
    );

    Ok(Outcome::Completed(PlacedArtifact {
        identity,
        source,
        destination,
        removed,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;
    use tempfile::TempDir;

    struct Fixture {
        _temp_dir: TempDir,
        staging_dir: PathBuf,
        project_dir: PathBuf,
        project_file: PathBuf,
    }

    impl Fixture {
        fn new() -> Self {
            let temp_dir = TempDir::new().unwrap();
            let staging_dir = temp_dir.path().join("staging");
            let project_dir = temp_dir.path().join("src").join("Sample");
            std::fs::create_dir_all(&staging_dir).unwrap();
            std::fs::create_dir_all(&project_dir).unwrap();
            let project_file = project_dir.join("Sample.csproj");

            Self {
                _temp_dir: temp_dir,
                staging_dir,
                project_dir,
                project_file,
            }
        }

        fn write_project(&self, package_id: &str, version: &str) {
            std::fs::write(
                &self.project_file,
                format!(
                    "<Project Sdk=\"Microsoft.NET.Sdk\">\n  <PropertyGroup>\n    \
                     <PackageId>{package_id}</PackageId>\n    <Version>{version}</Version>\n  \
                     </PropertyGroup>\n</Project>\n"
                ),
            )
            .unwrap();
        }

        fn write_build_output(&self, configuration: &str, file_name: &str) {
            let dir = self.project_dir.join("bin").join(configuration);
            std::fs::create_dir_all(&dir).unwrap();
            std::fs::write(dir.join(file_name), file_name.as_bytes()).unwrap();
        }

        fn stage(&self, file_name: &str) {
            std::fs::write(self.staging_dir.join(file_name), b"stale").unwrap();
        }

        fn request(&self, package_name: Option<&str>) -> PlaceRequest {
            PlaceRequest {
                staging_dir: self.staging_dir.clone(),
                project_file: self.project_file.clone(),
                configuration: "Release".to_string(),
                package_name: package_name.map(str::to_string),
            }
        }

        fn staged(&self) -> Vec<String> {
            let mut names: Vec<String> = std::fs::read_dir(&self.staging_dir)
                .unwrap()
                .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
                .collect();
            names.sort();
            names
        }
    }

    #[test]
    fn test_replaces_older_version() {
        let fixture = Fixture::new();
        fixture.write_project("Sample", "2.0.0");
        fixture.write_build_output("Release", "Sample.2.0.0.nupkg");
        fixture.stage("Sample.1.0.0.nupkg");

        let placed = place_artifact(&fixture.request(None))
            .unwrap()
            .completed()
            .expect("placement should complete");

        assert_eq!(placed.identity, ArtifactIdentity::new("Sample", "2.0.0"));
        assert_eq!(placed.removed.len(), 1);
        assert_eq!(fixture.staged(), vec!["Sample.2.0.0.nupkg"]);
        let copied = std::fs::read(&placed.destination).unwrap();
        assert_eq!(copied, b"Sample.2.0.0.nupkg");
    }

    #[test]
    fn test_version_bump_leaves_single_artifact() {
        let fixture = Fixture::new();
        fixture.write_project("Sample", "1.0.0");
        fixture.write_build_output("Release", "Sample.1.0.0.nupkg");
        assert!(place_artifact(&fixture.request(None)).unwrap().is_completed());

        fixture.write_project("Sample", "1.1.0");
        fixture.write_build_output("Release", "Sample.1.1.0.nupkg");
        assert!(place_artifact(&fixture.request(None)).unwrap().is_completed());

        assert_eq!(fixture.staged(), vec!["Sample.1.1.0.nupkg"]);
    }

    #[test]
    fn test_other_packages_untouched() {
        let fixture = Fixture::new();
        fixture.write_project("Sample", "2.0.0");
        fixture.write_build_output("Release", "Sample.2.0.0.nupkg");
        fixture.stage("SampleTools.1.0.0.nupkg");
        fixture.stage("Sample.Core.1.0.0.nupkg");

        assert!(place_artifact(&fixture.request(None)).unwrap().is_completed());

        assert_eq!(
            fixture.staged(),
            vec![
                "Sample.2.0.0.nupkg",
                "Sample.Core.1.0.0.nupkg",
                "SampleTools.1.0.0.nupkg"
            ]
        );
    }

    #[test]
    fn test_supplied_name_uses_project_version() {
        let fixture = Fixture::new();
        fixture.write_project("Sample", "3.0.0");
        fixture.write_build_output("Release", "Renamed.3.0.0.nupkg");
        fixture.stage("Renamed.2.0.0.nupkg");

        let placed = place_artifact(&fixture.request(Some("Renamed")))
            .unwrap()
            .completed()
            .unwrap();

        assert_eq!(placed.identity.file_name(), "Renamed.3.0.0.nupkg");
        assert_eq!(fixture.staged(), vec!["Renamed.3.0.0.nupkg"]);
    }

    #[test]
    fn test_missing_package_id_is_skipped() {
        let fixture = Fixture::new();
        fixture.write_project("", "1.0.0");
        fixture.stage("Sample.1.0.0.nupkg");

        let outcome = place_artifact(&fixture.request(None)).unwrap();

        assert_eq!(outcome, Outcome::Skipped(SkipReason::MissingPackageId));
        assert_eq!(fixture.staged(), vec!["Sample.1.0.0.nupkg"]);
    }

    #[test]
    fn test_missing_version_is_skipped_even_with_name() {
        let fixture = Fixture::new();
        fixture.write_project("Sample", "");
        fixture.stage("Sample.1.0.0.nupkg");

        let outcome = place_artifact(&fixture.request(Some("Sample"))).unwrap();

        assert_eq!(outcome, Outcome::Skipped(SkipReason::MissingVersion));
        assert_eq!(fixture.staged(), vec!["Sample.1.0.0.nupkg"]);
    }

    #[test]
    fn test_unreadable_project_is_skipped() {
        let fixture = Fixture::new();
        let outcome = place_artifact(&fixture.request(Some("Sample"))).unwrap();
        assert_eq!(outcome, Outcome::Skipped(SkipReason::ProjectUnreadable));
    }

    #[test]
    fn test_missing_build_output_fails_after_removal() {
        let fixture = Fixture::new();
        fixture.write_project("Sample", "2.0.0");
        fixture.stage("Sample.1.0.0.nupkg");

        let result = place_artifact(&fixture.request(None));

        match result {
            Err(ReleaseError::CopyFailed { from, .. }) => {
                assert!(from.ends_with(Path::new("bin/Release/Sample.2.0.0.nupkg")));
            }
            other => panic!("expected copy failure, got {:?}", other),
        }
        assert!(fixture.staged().is_empty());
    }
}
