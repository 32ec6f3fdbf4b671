//! Domain layer: name transcoding and namespace scopes
//!
//! This layer is independent of external concerns (no I/O, no CLI, no config loading).

pub mod case;
pub mod scope;

pub use case::{is_strict_key_name, is_valid_key_name, to_camel_case, to_constant_case};
pub use scope::{CamelMap, EnvMap, KeyPolicy, Scope};
