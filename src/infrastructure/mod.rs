//! Infrastructure layer: I/O implementations, DI container and HTTP surface
//!
//! This layer implements I/O boundary traits, wires up services and
//! exposes them over HTTP.

pub mod di;
pub mod error;
pub mod http;
pub mod storage;
pub mod traits;

pub use error::{InfraError, InfraResult};
