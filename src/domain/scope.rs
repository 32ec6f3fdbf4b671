//! Namespace scopes: prefix-bound import and export of flat env mappings
//!
//! A [`Scope`] stands for "every key under prefix P". The root scope has the
//! empty prefix; narrowing appends a SCREAMING_SNAKE_CASE label plus `_`.
//! Scopes are plain values and never change after construction.

use std::borrow::Cow;
use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::domain::case::{is_strict_key_name, is_valid_key_name, to_camel_case, to_constant_case};

/// Flat environment mapping: `MY_APP_TOKEN` -> value.
pub type EnvMap = BTreeMap<String, String>;

/// Camel-cased configuration object: `token` -> value.
pub type CamelMap = BTreeMap<String, String>;

/// Which keys `from_env` accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum KeyPolicy {
    /// Key contains an env var name somewhere (`fooBAR` passes)
    #[default]
    Loose,
    /// Whole key is an env var name
    Strict,
}

impl KeyPolicy {
    pub fn accepts(self, key: &str) -> bool {
        match self {
            KeyPolicy::Loose => is_valid_key_name(key),
            KeyPolicy::Strict => is_strict_key_name(key),
        }
    }
}

/// A namespace over a flat env mapping.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct Scope {
    prefix: String,
    policy: KeyPolicy,
}

impl Scope {
    /// The unscoped namespace (empty prefix).
    pub fn root() -> Self {
        Self::default()
    }

    /// Same prefix, different key policy. Children inherit the policy.
    pub fn with_policy(&self, policy: KeyPolicy) -> Self {
        Self {
            prefix: self.prefix.clone(),
            policy,
        }
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    pub fn policy(&self) -> KeyPolicy {
        self.policy
    }

    pub fn is_root(&self) -> bool {
        self.prefix.is_empty()
    }

    /// Derive a child scope for `label`.
    ///
    /// `narrow("myApp").narrow("core")` has the prefix `MY_APP_CORE_`, same as
    /// `narrow("myAppCore")`. A label without any letters or digits adds
    /// nothing and yields a copy of `self`.
    pub fn narrow(&self, label: &str) -> Self {
        let child = to_constant_case(label);
        if child.is_empty() {
            return self.clone();
        }
        let prefix = format!("{}{}_", self.prefix, child);
        trace!("narrow: {:?} + {:?} -> {:?}", self.prefix, label, prefix);
        Self {
            prefix,
            policy: self.policy,
        }
    }

    /// Narrow if a label is given, otherwise hand back `self` unchanged.
    pub fn scoped(&self, label: Option<&str>) -> Cow<'_, Self> {
        match label {
            Some(label) if !label.is_empty() => Cow::Owned(self.narrow(label)),
            _ => Cow::Borrowed(self),
        }
    }

    /// Narrow by each label in turn.
    pub fn narrow_all<I, S>(&self, labels: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        labels
            .into_iter()
            .fold(self.clone(), |scope, label| scope.narrow(label.as_ref()))
    }

    /// Import: keep keys under this prefix that pass the key policy, strip the
    /// prefix and camelCase the rest.
    ///
    /// Validity is checked on the full key, not on the stripped suffix.
    /// Rejected keys are dropped silently.
    pub fn from_env<I, K, V>(&self, env: I) -> BTreeMap<String, V>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
    {
        let mut camel = BTreeMap::new();
        for (key, value) in env {
            let key = key.as_ref();
            match key.strip_prefix(self.prefix.as_str()) {
                Some(rest) if self.policy.accepts(key) => {
                    camel.insert(to_camel_case(rest), value);
                }
                Some(_) => trace!("from_env: dropping malformed key {:?}", key),
                None => {}
            }
        }
        camel
    }

    /// Export: SCREAMING_SNAKE_CASE every key and put this prefix in front.
    /// Nothing is filtered.
    pub fn to_env<I, K, V>(&self, camel: I) -> BTreeMap<String, V>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
    {
        camel
            .into_iter()
            .map(|(key, value)| {
                (
                    format!("{}{}", self.prefix, to_constant_case(key.as_ref())),
                    value,
                )
            })
            .collect()
    }

    /// Import several child namespaces of this scope, in label order.
    pub fn sections<L, S, I, K, V>(&self, labels: L, env: I) -> Vec<BTreeMap<String, V>>
    where
        L: IntoIterator<Item = S>,
        S: AsRef<str>,
        I: IntoIterator<Item = (K, V)> + Clone,
        K: AsRef<str>,
    {
        labels
            .into_iter()
            .map(|label| self.narrow(label.as_ref()).from_env(env.clone()))
            .collect()
    }

    /// Import several top-level namespaces, keyed by the labels as given.
    ///
    /// Always starts from the root, whatever scope the caller holds.
    pub fn of<L, S, I, K, V>(labels: L, env: I) -> BTreeMap<String, BTreeMap<String, V>>
    where
        L: IntoIterator<Item = S>,
        S: AsRef<str>,
        I: IntoIterator<Item = (K, V)> + Clone,
        K: AsRef<str>,
    {
        let root = Self::root();
        labels
            .into_iter()
            .map(|label| {
                let label = label.as_ref();
                (label.to_string(), root.narrow(label).from_env(env.clone()))
            })
            .collect()
    }
}

impl fmt::Display for Scope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_root() {
            write!(f, "<root>")
        } else {
            write!(f, "{}", self.prefix)
        }
    }
}
