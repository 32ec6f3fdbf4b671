//! Service container for dependency injection
//!
//! Wires up all services with their dependencies.

use std::sync::Arc;

use crate::application::services::NamespaceService;
use crate::config::Settings;
use crate::domain::KeyPolicy;
use crate::infrastructure::traits::{EnvSource, FileSystem};

/// Container holding application settings and I/O boundaries.
pub struct ServiceContainer {
    /// Application settings
    pub settings: Arc<Settings>,

    /// Filesystem abstraction
    pub fs: Arc<dyn FileSystem>,

    /// Environment source, read once per operation
    pub env: Arc<dyn EnvSource>,
}

impl ServiceContainer {
    /// Create a service container with custom dependencies .
    pub fn with_deps(
        settings: Settings,
        fs: Arc<dyn FileSystem>,
        env: Arc<dyn EnvSource>,
    ) -> Self {
        let settings = Arc::new(settings);

        Self { settings, fs, env }
    }

    /// Key policy selected by `strict_keys`.
    pub fn key_policy(&self) -> KeyPolicy {
        if self.settings.strict_keys {
            KeyPolicy::Strict
        } else {
            KeyPolicy::Loose
        }
    }

    /// Namespace service bound to this container's env source and key policy.
    pub fn namespace_service(&self) -> NamespaceService {
        NamespaceService::new(Arc::clone(&self.env), self.key_policy())
    }
}
