//! Search-path registry tests: registration order, startup replay, and
//! live application.

use std::path::PathBuf;

use luban::engine::MockEngine;
use luban::ScriptHost;

#[test]
fn test_paths_registered_before_init_appear_in_registration_order() {
    let (engine, handle) = MockEngine::new();
    let mut host = ScriptHost::new(Box::new(engine));

    host.prepend_search_path("/opt/alpha");
    host.prepend_search_path("/opt/beta");

    // nothing applied until the runtime starts
    assert!(handle.search_paths().is_empty());

    host.initialize(true);
    assert_eq!(
        handle.search_paths(),
        vec![PathBuf::from("/opt/alpha"), PathBuf::from("/opt/beta")]
    );
}

#[test]
fn test_paths_registered_after_init_apply_immediately_at_front() {
    let (engine, handle) = MockEngine::new();
    let mut host = ScriptHost::new(Box::new(engine));

    host.prepend_search_path("/opt/alpha");
    host.initialize(true);

    host.prepend_search_path("/opt/gamma");
    assert_eq!(
        handle.search_paths(),
        vec![PathBuf::from("/opt/gamma"), PathBuf::from("/opt/alpha")]
    );
}

#[test]
fn test_registry_keeps_registration_order_and_grows_monotonically() {
    let (engine, _handle) = MockEngine::new();
    let mut host = ScriptHost::new(Box::new(engine));

    host.prepend_search_path("/opt/alpha");
    host.initialize(true);
    host.prepend_search_path("/opt/beta");
    host.finalize();
    host.prepend_search_path("/opt/gamma");

    assert_eq!(
        host.registered_search_paths(),
        &[
            PathBuf::from("/opt/alpha"),
            PathBuf::from("/opt/beta"),
            PathBuf::from("/opt/gamma"),
        ]
    );
}

#[cfg(windows)]
#[test]
fn test_separators_are_normalized_for_the_platform() {
    let (engine, _handle) = MockEngine::new();
    let mut host = ScriptHost::new(Box::new(engine));

    host.prepend_search_path("C:/opt/alpha");
    assert_eq!(
        host.registered_search_paths(),
        &[PathBuf::from("C:\\opt\\alpha")]
    );
}
