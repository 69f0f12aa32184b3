//! Package visibility declarations and the `<queries>` merge engine.
//!
//! Android 11+ requires applications to declare which other packages they
//! intend to see or launch. The declarations live in a `<queries>` element
//! of AndroidManifest.xml as intent filters and package names. This module
//! validates user-declared visibility entries, builds the canonical manifest
//! fragments for them, and merges the fragments into a manifest without
//! duplicating entries that are already present.

mod build;
mod merge;
mod validate;

pub use build::{intent_filter, package_entry, partition_requests};
pub use merge::{intent_is_unique, merge_visibility, package_is_unique, MergeOutcome};
pub use validate::{validate, ValidationError};

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::xml::{Element, Node};

/// Attribute naming actions, categories and package entries.
pub const ANDROID_NAME: &str = "android:name";

/// Attribute names a data discriminator may use.
pub const VALID_DATA_ATTRIBUTES: [&str; 3] = ["android:scheme", "android:type", "android:host"];

/// Attributes of a single manifest node, keyed by qualified attribute name.
pub type AttrPairs = BTreeMap<String, String>;

/// A user-declared visibility entry, as written in the project config.
///
/// One shared record covers both kinds; which optional fields are legal
/// depends on `kind` and is enforced by [`validate`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VisibilityRequest {
    /// Which kind of declaration this is.
    #[serde(rename = "type")]
    pub kind: Option<RequestKind>,

    /// Action name for intents, application id for packages.
    #[serde(default)]
    pub name: String,

    /// Data discriminators narrowing an intent. Intents only.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<Vec<AttrPairs>>,

    /// Intent category. Intents only.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<AttrPairs>,
}

/// The declaration kinds a config file may name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RequestKind {
    Intent,
    Package,
    /// Any other string survives deserialization so validation can report it.
    #[serde(untagged)]
    Unsupported(String),
}

impl VisibilityRequest {
    /// An intent declaration with just an action name.
    pub fn intent(name: impl Into<String>) -> Self {
        Self {
            kind: Some(RequestKind::Intent),
            name: name.into(),
            data: None,
            category: None,
        }
    }

    /// A package declaration.
    pub fn package(name: impl Into<String>) -> Self {
        Self {
            kind: Some(RequestKind::Package),
            name: name.into(),
            data: None,
            category: None,
        }
    }

    pub fn with_data(mut self, data: Vec<AttrPairs>) -> Self {
        self.data = Some(data);
        self
    }

    pub fn with_category(mut self, category: AttrPairs) -> Self {
        self.category = Some(category);
        self
    }
}

/// Canonical built form of an intent declaration.
///
/// Children stay wrapped in lists even when there is only one instance:
/// the manifest tree stores repeated child nodes as lists, and the merge
/// and serialize steps rely on that shape to round-trip.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IntentFilter {
    pub action: Vec<AttrPairs>,
    pub data: Option<Vec<AttrPairs>>,
    pub category: Option<Vec<AttrPairs>>,
}

impl IntentFilter {
    /// Action name of this filter, when present.
    pub fn action_name(&self) -> Option<&str> {
        self.action
            .first()
            .and_then(|attrs| attrs.get(ANDROID_NAME))
            .map(String::as_str)
    }

    /// Decode an `<intent>` element from the manifest tree.
    pub fn from_element(element: &Element) -> Self {
        Self {
            action: child_attrs(element, "action").unwrap_or_default(),
            data: child_attrs(element, "data"),
            category: child_attrs(element, "category"),
        }
    }

    /// Encode as an `<intent>` element for the manifest tree.
    pub fn to_element(&self) -> Element {
        let mut element = Element::new("intent");
        push_children(&mut element, "action", &self.action);
        if let Some(data) = &self.data {
            push_children(&mut element, "data", data);
        }
        if let Some(category) = &self.category {
            push_children(&mut element, "category", category);
        }
        element
    }
}

/// Canonical built form of a package declaration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackageEntry {
    pub attributes: AttrPairs,
}

impl PackageEntry {
    /// Package name of this entry, when present.
    pub fn name(&self) -> Option<&str> {
        self.attributes.get(ANDROID_NAME).map(String::as_str)
    }

    /// Decode a `<package>` element from the manifest tree.
    pub fn from_element(element: &Element) -> Self {
        Self {
            attributes: attrs_of(element),
        }
    }

    /// Encode as a `<package>` element for the manifest tree.
    pub fn to_element(&self) -> Element {
        let mut element = Element::new("package");
        set_attrs(&mut element, &self.attributes);
        element
    }
}

fn attrs_of(element: &Element) -> AttrPairs {
    element
        .attributes
        .iter()
        .map(|(name, value)| (name.clone(), value.clone()))
        .collect()
}

fn child_attrs(element: &Element, name: &str) -> Option<Vec<AttrPairs>> {
    let children: Vec<AttrPairs> = element.child_elements(name).map(attrs_of).collect();
    if children.is_empty() {
        None
    } else {
        Some(children)
    }
}

fn push_children(element: &mut Element, name: &str, entries: &[AttrPairs]) {
    for attrs in entries {
        let mut child = Element::new(name);
        set_attrs(&mut child, attrs);
        element.children.push(Node::Element(child));
    }
}

fn set_attrs(element: &mut Element, attrs: &AttrPairs) {
    for (name, value) in attrs {
        element.attributes.push((name.clone(), value.clone()));
    }
}
