//! End-to-end merge tests against manifest fixtures.
//!
//! These mirror the two real-world scenarios: merging into a manifest that
//! has no `<queries>` element yet, and merging into one that already
//! declares some of the requested entries.

use package_visibility::{merge_visibility, AndroidManifest, AttrPairs, VisibilityRequest};
use std::path::PathBuf;

fn fixtures_path() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures")
}

fn load_fixture(name: &str) -> AndroidManifest {
    AndroidManifest::load(&fixtures_path().join(name)).unwrap()
}

fn read_fixture(name: &str) -> String {
    std::fs::read_to_string(fixtures_path().join(name)).unwrap()
}

fn attrs(pairs: &[(&str, &str)]) -> AttrPairs {
    pairs
        .iter()
        .map(|(name, value)| (name.to_string(), value.to_string()))
        .collect()
}

fn sample_requests() -> Vec<VisibilityRequest> {
    vec![
        VisibilityRequest::intent("android.intent.action.VIEW")
            .with_data(vec![attrs(&[("android:scheme", "geo")])]),
        VisibilityRequest::intent("android.intent.action.SENDTO")
            .with_data(vec![attrs(&[("android:scheme", "mailto")])]),
        VisibilityRequest::package("com.example.store"),
    ]
}

// ============================================================================
// Manifest without queries
// ============================================================================

#[test]
fn test_merge_into_manifest_without_queries() {
    let mut manifest = load_fixture("AndroidManifest.xml");

    let outcome = merge_visibility(&mut manifest, &sample_requests()).unwrap();

    assert!(outcome.created_queries);
    assert_eq!(outcome.added(), 3);
    assert_eq!(outcome.skipped(), 0);
    assert_eq!(
        manifest.to_xml().unwrap(),
        read_fixture("AndroidManifestExpected.xml")
    );
}

#[test]
fn test_merge_without_queries_is_idempotent() {
    let mut manifest = load_fixture("AndroidManifest.xml");

    merge_visibility(&mut manifest, &sample_requests()).unwrap();
    let first_pass = manifest.to_xml().unwrap();

    let outcome = merge_visibility(&mut manifest, &sample_requests()).unwrap();

    assert!(!outcome.changed());
    assert_eq!(outcome.skipped(), 3);
    assert_eq!(manifest.to_xml().unwrap(), first_pass);
}

// ============================================================================
// Manifest with existing queries
// ============================================================================

#[test]
fn test_merge_into_manifest_with_queries() {
    let mut manifest = load_fixture("AndroidManifestWithQueries.xml");

    let outcome = merge_visibility(&mut manifest, &sample_requests()).unwrap();

    assert!(!outcome.created_queries);
    // SENDTO + mailto is already declared and must not be duplicated
    assert_eq!(outcome.added_intents, ["android.intent.action.VIEW"]);
    assert_eq!(outcome.skipped_intents, ["android.intent.action.SENDTO"]);
    assert_eq!(outcome.added_packages, ["com.example.store"]);
    assert_eq!(
        manifest.to_xml().unwrap(),
        read_fixture("AndroidManifestWithQueriesExpected.xml")
    );
}

#[test]
fn test_merge_with_queries_is_idempotent() {
    let mut manifest = load_fixture("AndroidManifestWithQueries.xml");

    merge_visibility(&mut manifest, &sample_requests()).unwrap();
    let first_pass = manifest.to_xml().unwrap();

    let outcome = merge_visibility(&mut manifest, &sample_requests()).unwrap();

    assert!(!outcome.changed());
    assert_eq!(manifest.to_xml().unwrap(), first_pass);
}

#[test]
fn test_merge_preserves_unrelated_manifest_content() {
    let mut manifest = load_fixture("AndroidManifest.xml");

    merge_visibility(&mut manifest, &sample_requests()).unwrap();
    let output = manifest.to_xml().unwrap();

    assert!(output.contains(r#"<uses-permission android:name="android.permission.INTERNET"/>"#));
    assert!(output.contains(r#"<activity android:name=".MainActivity">"#));
    assert!(output.contains(r#"<action android:name="android.intent.action.MAIN"/>"#));
    assert_eq!(manifest.package(), Some("com.example.app"));
}
