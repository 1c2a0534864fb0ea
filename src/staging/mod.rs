pub mod artifact;
pub mod placer;
pub mod project;
pub mod remover;

pub use artifact::{ArtifactIdentity, PACKAGE_EXTENSION, is_package_file};
pub use placer::{PlaceRequest, PlacedArtifact, place_artifact};
pub use project::ProjectDescriptor;
pub use remover::remove_stale_artifacts;
