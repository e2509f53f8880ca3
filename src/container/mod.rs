//! Container management module
//!
//! This module provides the container lifecycle contract used by the
//! `testcontainersvc` driver and its Docker-backed implementation.

pub mod config;
pub mod lifecycle;
pub mod runtime;

pub use config::{Config, ContainerState, ContainerSummary, VolumeMount};
pub use lifecycle::{ContainerService, DockerService, IMAGE_LABEL};
pub use runtime::{CommandOutput, CommandRunner, SystemRunner};
