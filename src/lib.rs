//! camelspace: namespaced, camelCased configuration from flat environment
//! variables, and back.
//!
//! ```
//! use camelspace::domain::Scope;
//!
//! let env = [
//!     ("MY_APP_CORE_MODE", "test"),
//!     ("MY_APP_CORE_TOKEN", "abc"),
//!     ("THIRD_PARTY_VAR", "x"),
//! ];
//! let core = Scope::root().narrow("myApp").narrow("core");
//! let config = core.from_env(env);
//! assert_eq!(config.get("mode"), Some(&"test"));
//!
//! let flat = core.to_env(config);
//! assert_eq!(flat.get("MY_APP_CORE_TOKEN"), Some(&"abc"));
//! ```
//!
//! Layers:
//! - `domain`: name transcoding and scopes (pure)
//! - `application`: services, rendering, errors
//! - `infrastructure`: env source and filesystem boundaries, DI container
//! - `cli`: argument parsing and dispatch

pub mod application;
pub mod cli;
pub mod config;
pub mod domain;
pub mod exitcode;
pub mod infrastructure;
pub mod util;

pub use domain::{CamelMap, EnvMap, KeyPolicy, Scope};
