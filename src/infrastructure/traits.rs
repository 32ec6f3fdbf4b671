//! I/O boundary traits for testability
//!
//! These traits abstract the process environment and the filesystem, allowing
//! services to be tested with in-memory implementations.

use std::ffi::OsString;
use std::io;
use std::path::Path;

use tracing::debug;

use crate::domain::EnvMap;

/// Source of flat key/value pairs, conventionally the process environment.
pub trait EnvSource: Send + Sync {
    /// Take a snapshot of all variables.
    fn vars(&self) -> EnvMap;
}

/// Filesystem abstraction for testability.
pub trait FileSystem: Send + Sync {
    /// Read file contents to string.
    fn read_to_string(&self, path: &Path) -> io::Result<String>;

    /// Write string content to file.
    fn write(&self, path: &Path, content: &str) -> io::Result<()>;

    /// Check if path exists.
    fn exists(&self, path: &Path) -> bool;
}

// ============================================================
// REAL IMPLEMENTATIONS
// ============================================================

/// The live process environment.
///
/// Entries whose name or value is not valid UTF-8 are skipped, so every value
/// that comes through is byte-for-byte what the process holds.
#[derive(Debug, Default)]
pub struct ProcessEnv;

impl EnvSource for ProcessEnv {
    fn vars(&self) -> EnvMap {
        std::env::vars_os()
            .filter_map(|(k, v)| decode_var(k, v))
            .collect()
    }
}

fn decode_var(key: OsString, value: OsString) -> Option<(String, String)> {
    match (key.into_string(), value.into_string()) {
        (Ok(key), Ok(value)) => Some((key, value)),
        (Ok(key), Err(_)) => {
            debug!("ProcessEnv: skipping {:?}, value is not UTF-8", key);
            None
        }
        (Err(key), _) => {
            debug!("ProcessEnv: skipping non-UTF-8 name {:?}", key);
            None
        }
    }
}

/// A fixed mapping, for tests and for callers that already hold one.
#[derive(Debug, Default, Clone)]
pub struct StaticEnv {
    vars: EnvMap,
}

impl StaticEnv {
    pub fn new(vars: EnvMap) -> Self {
        Self { vars }
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for StaticEnv {
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        Self::new(
            iter.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}

impl EnvSource for StaticEnv {
    fn vars(&self) -> EnvMap {
        self.vars.clone()
    }
}

/// Real filesystem implementation.
#[derive(Debug, Default)]
pub struct RealFileSystem;

impl FileSystem for RealFileSystem {
    fn read_to_string(&self, path: &Path) -> io::Result<String> {
        std::fs::read_to_string(path)
    }

    fn write(&self, path: &Path, content: &str) -> io::Result<()> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        std::fs::write(path, content)
    }

    fn exists(&self, path: &Path) -> bool {
        path.exists()
    }
}
