//! Tests for NamespaceService

use std::sync::Arc;

use camelspace::application::services::NamespaceService;
use camelspace::domain::{CamelMap, KeyPolicy};
use camelspace::infrastructure::traits::{EnvSource, StaticEnv};

fn service(policy: KeyPolicy) -> NamespaceService {
    let env: StaticEnv = [
        ("MY_APP_CORE_MODE", "test"),
        ("MY_APP_CORE_TOKEN", "abc"),
        ("MY_APP_TELEMETRY_LOG_LEVEL", "debug"),
        ("MY_APP_fooBAR", "mixed"),
        ("TELEMETRY_ENDPOINT", "https://example.com"),
        ("CORE_MODE", "prod"),
        ("THIRD_PARTY_VAR", "x"),
        ("port", "y"),
    ]
    .into_iter()
    .collect();
    NamespaceService::new(Arc::new(env), policy)
}

fn camel(pairs: &[(&str, &str)]) -> CamelMap {
    pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

#[test]
fn given_no_labels_when_importing_then_reads_root() {
    let result = service(KeyPolicy::Loose).import::<&str>(&[]);
    assert_eq!(result.get("thirdPartyVar"), Some(&"x".to_string()));
    assert_eq!(result.get("myAppCoreMode"), Some(&"test".to_string()));
    assert!(!result.contains_key("port"));
}

#[test]
fn given_labels_when_importing_then_narrows_in_order() {
    let result = service(KeyPolicy::Loose).import(&["myApp", "core"]);
    assert_eq!(result, camel(&[("mode", "test"), ("token", "abc")]));
}

#[test]
fn given_loose_policy_when_importing_then_mixed_case_key_passes() {
    let result = service(KeyPolicy::Loose).import(&["myApp"]);
    assert_eq!(result.get("fooBar"), Some(&"mixed".to_string()));
}

#[test]
fn given_strict_policy_when_importing_then_mixed_case_key_dropped() {
    let result = service(KeyPolicy::Strict).import(&["myApp"]);
    assert!(!result.contains_key("fooBar"));
    assert_eq!(result.get("coreMode"), Some(&"test".to_string()));
}

#[test]
fn given_camel_config_when_exporting_then_prefixes_keys() {
    let flat = service(KeyPolicy::Loose).export(
        &["myApp", "core"],
        &camel(&[("mode", "dev"), ("apiToken", "t")]),
    );
    assert_eq!(
        flat,
        camel(&[("MY_APP_CORE_API_TOKEN", "t"), ("MY_APP_CORE_MODE", "dev")])
    );
}

#[test]
fn given_labels_when_calling_of_then_top_level_scopes_keyed_by_label() {
    let result = service(KeyPolicy::Loose).of(&["telemetry", "core"]);
    assert_eq!(result.len(), 2);
    assert_eq!(
        result["telemetry"],
        camel(&[("endpoint", "https://example.com")])
    );
    assert_eq!(result["core"], camel(&[("mode", "prod")]));
}

#[test]
fn given_scope_when_taking_sections_then_children_in_order() {
    let result = service(KeyPolicy::Loose).sections(&["myApp"], &["telemetry", "core"]);
    assert_eq!(
        result,
        vec![
            camel(&[("logLevel", "debug")]),
            camel(&[("mode", "test"), ("token", "abc")]),
        ]
    );
}

#[test]
fn given_labels_when_building_scope_then_prefix_and_policy_set() {
    let scope = service(KeyPolicy::Strict).scope(&["myApp", "core"]);
    assert_eq!(scope.prefix(), "MY_APP_CORE_");
    assert_eq!(scope.policy(), KeyPolicy::Strict);
}

/// Counts snapshots to show each call reads the source once.
struct CountingEnv {
    inner: StaticEnv,
    reads: std::sync::atomic::AtomicUsize,
}

impl EnvSource for CountingEnv {
    fn vars(&self) -> camelspace::domain::EnvMap {
        self.reads
            .fetch_add(1, std::sync::atomic::Ordering::SeqCst);
        self.inner.vars()
    }
}

#[test]
fn given_many_labels_when_calling_of_then_source_read_once() {
    let env = Arc::new(CountingEnv {
        inner: [("A_X", "1"), ("B_Y", "2")].into_iter().collect(),
        reads: Default::default(),
    });
    let service = NamespaceService::new(env.clone(), KeyPolicy::Loose);

    let result = service.of(&["a", "b", "c"]);

    assert_eq!(result.len(), 3);
    assert_eq!(env.reads.load(std::sync::atomic::Ordering::SeqCst), 1);
}
