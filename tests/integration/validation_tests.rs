//! Batch validation through the public merge API.

use package_visibility::{
    merge_visibility, AndroidManifest, AttrPairs, RequestKind, ValidationError, VisibilityRequest,
};

fn empty_manifest() -> AndroidManifest {
    AndroidManifest::parse(
        r#"<manifest xmlns:android="http://schemas.android.com/apk/res/android"/>"#,
    )
    .unwrap()
}

fn attrs(pairs: &[(&str, &str)]) -> AttrPairs {
    pairs
        .iter()
        .map(|(name, value)| (name.to_string(), value.to_string()))
        .collect()
}

#[test]
fn test_entry_without_kind_fails_the_batch() {
    let mut manifest = empty_manifest();
    let requests = vec![VisibilityRequest {
        kind: None,
        name: "test value".to_string(),
        data: None,
        category: None,
    }];

    let result = merge_visibility(&mut manifest, &requests);

    assert_eq!(result, Err(ValidationError::MissingKind));
}

#[test]
fn test_unsupported_kind_fails_the_batch() {
    let mut manifest = empty_manifest();
    let mut request = VisibilityRequest::intent("test value");
    request.kind = Some(RequestKind::Unsupported("provider".to_string()));

    let result = merge_visibility(&mut manifest, &[request]);

    assert_eq!(
        result,
        Err(ValidationError::UnsupportedKind("provider".to_string()))
    );
}

#[test]
fn test_error_message_names_the_offending_entry() {
    let mut manifest = empty_manifest();
    let requests = vec![VisibilityRequest::package("com.example.store")
        .with_data(vec![attrs(&[("android:scheme", "test")])])];

    let error = merge_visibility(&mut manifest, &requests).unwrap_err();

    assert_eq!(
        error.to_string(),
        "package 'com.example.store' cannot have a data attribute"
    );
}

#[test]
fn test_invalid_data_attribute_message_lists_valid_ones() {
    let mut manifest = empty_manifest();
    let requests = vec![VisibilityRequest::intent("test intent")
        .with_data(vec![attrs(&[("android:scheme2", "test")])])];

    let error = merge_visibility(&mut manifest, &requests).unwrap_err();

    let message = error.to_string();
    assert!(message.contains("test intent"));
    assert!(message.contains("android:scheme"));
    assert!(message.contains("android:type"));
    assert!(message.contains("android:host"));
}

#[test]
fn test_failing_batch_applies_nothing() {
    let mut manifest = empty_manifest();
    let before = manifest.to_xml().unwrap();
    let requests = vec![
        VisibilityRequest::intent("android.intent.action.VIEW")
            .with_data(vec![attrs(&[("android:scheme", "geo")])]),
        VisibilityRequest::intent(""),
    ];

    let result = merge_visibility(&mut manifest, &requests);

    assert_eq!(result, Err(ValidationError::IntentWithoutName));
    assert_eq!(manifest.to_xml().unwrap(), before);
}

#[test]
fn test_valid_batch_passes() {
    let mut manifest = empty_manifest();
    let requests = vec![
        VisibilityRequest::intent("android.intent.action.VIEW")
            .with_data(vec![attrs(&[("android:scheme", "https")])])
            .with_category(attrs(&[("android:name", "android.intent.category.BROWSABLE")])),
        VisibilityRequest::package("com.example.store"),
    ];

    let outcome = merge_visibility(&mut manifest, &requests).unwrap();

    assert_eq!(outcome.added(), 2);
}
