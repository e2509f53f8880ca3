//! containersvc - drivers for a container lifecycle service and a crypto provider
//!
//! The crate exposes two provider contracts and concrete implementations of each:
//!
//! - [`container::ContainerService`]: start, status and stop containers of an image,
//!   implemented on top of the Docker command-line client
//! - [`crypto::CryptoProvider`]: encrypt and decrypt credential strings with a
//!   key kept on disk
//!
//! The `testcontainersvc` and `decrypt` binaries drive these providers.

pub mod container;
pub mod crypto;
pub mod driver;
pub mod error;
pub mod logging;

pub use error::{Result, SvcError};
