//! Application services
//!
//! Concrete service implementations that orchestrate domain logic.
//! Services depend on I/O boundary traits (EnvSource, FileSystem)
//! but are themselves concrete structs, not traits.

mod namespace;

pub use namespace::NamespaceService;
