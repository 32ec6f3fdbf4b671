//! Namespace service
//!
//! Binds scopes to an environment source. Each call takes exactly one
//! snapshot of the source and hands it to the pure domain layer.

use std::collections::BTreeMap;
use std::sync::Arc;

use tracing::{debug, instrument};

use crate::domain::{CamelMap, EnvMap, KeyPolicy, Scope};
use crate::infrastructure::traits::EnvSource;

/// Service for importing and exporting namespaced configuration.
pub struct NamespaceService {
    env: Arc<dyn EnvSource>,
    policy: KeyPolicy,
}

impl NamespaceService {
    /// Create a new namespace service.
    pub fn new(env: Arc<dyn EnvSource>, policy: KeyPolicy) -> Self {
        Self { env, policy }
    }

    /// Root scope with this service's key policy.
    pub fn root(&self) -> Scope {
        Scope::root().with_policy(self.policy)
    }

    /// Root narrowed by each label in turn.
    pub fn scope<S: AsRef<str>>(&self, labels: &[S]) -> Scope {
        self.root().narrow_all(labels)
    }

    /// Import the camel-cased config under `labels`.
    #[instrument(level = "debug", skip_all)]
    pub fn import<S: AsRef<str>>(&self, labels: &[S]) -> CamelMap {
        let scope = self.scope(labels);
        let snapshot = self.env.vars();
        let camel = scope.from_env(snapshot);
        debug!("import: scope={} keys={}", scope, camel.len());
        camel
    }

    /// Export a camel-cased config back into flat keys under `labels`.
    pub fn export<S: AsRef<str>>(&self, labels: &[S], camel: &CamelMap) -> EnvMap {
        let scope = self.scope(labels);
        let flat = scope.to_env(camel.clone());
        debug!("export: scope={} keys={}", scope, flat.len());
        flat
    }

    /// Import several top-level namespaces from one snapshot, keyed by label.
    #[instrument(level = "debug", skip_all)]
    pub fn of<S: AsRef<str>>(&self, labels: &[S]) -> BTreeMap<String, CamelMap> {
        let snapshot = self.env.vars();
        let root = self.root();
        labels
            .iter()
            .map(|label| {
                let label = label.as_ref();
                (label.to_string(), root.narrow(label).from_env(snapshot.clone()))
            })
            .collect()
    }

    /// Import child namespaces of the scope under `labels`, in `sections` order.
    pub fn sections<S: AsRef<str>, T: AsRef<str>>(
        &self,
        labels: &[S],
        sections: &[T],
    ) -> Vec<CamelMap> {
        let snapshot = self.env.vars();
        self.scope(labels).sections(sections, snapshot)
    }
}
