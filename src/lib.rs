//! Stage freshly packed NuGet packages and push them with the NuGet CLI.
//!
//! - [`staging`]: locate a project's packed artifact and replace older
//!   versions of it in a shared staging directory
//! - [`publish`]: run `nuget push` over the staging directory with settings
//!   from `config.ini`, forwarding the tool's output

pub mod core;
pub mod publish;
pub mod staging;

pub use crate::core::*;
pub use publish::{LogFileSink, MemorySink, PublishReport, PublishRequest, publish};
pub use staging::{
    ArtifactIdentity, PlaceRequest, PlacedArtifact, ProjectDescriptor, place_artifact,
};
