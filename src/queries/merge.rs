use serde::Serialize;
use tracing::debug;

use super::{partition_requests, IntentFilter, PackageEntry, ValidationError, VisibilityRequest};
use crate::manifest::AndroidManifest;
use crate::xml::Element;

/// What a merge changed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct MergeOutcome {
    /// Action names of intent filters appended to the manifest.
    pub added_intents: Vec<String>,

    /// Action names of intent filters dropped as duplicates.
    pub skipped_intents: Vec<String>,

    /// Package names appended to the manifest.
    pub added_packages: Vec<String>,

    /// Package names dropped as duplicates.
    pub skipped_packages: Vec<String>,

    /// Whether the `<queries>` element had to be created.
    pub created_queries: bool,
}

impl MergeOutcome {
    /// True when the merge changed the manifest.
    pub fn changed(&self) -> bool {
        self.created_queries || self.added() > 0
    }

    /// Number of entries appended.
    pub fn added(&self) -> usize {
        self.added_intents.len() + self.added_packages.len()
    }

    /// Number of entries dropped as duplicates.
    pub fn skipped(&self) -> usize {
        self.skipped_intents.len() + self.skipped_packages.len()
    }
}

/// Merge a batch of visibility requests into the manifest's `<queries>`
/// element, creating the element when absent and appending only entries
/// that have no equivalent already present. Merging the same batch twice
/// leaves the manifest unchanged on the second pass.
///
/// The whole batch is validated and built before the manifest is touched,
/// so the first invalid entry aborts the call with nothing applied.
/// Duplicates within the batch itself are not collapsed when the manifest
/// has no entries of that kind yet; the batch is installed verbatim.
pub fn merge_visibility(
    manifest: &mut AndroidManifest,
    requests: &[VisibilityRequest],
) -> Result<MergeOutcome, ValidationError> {
    let (intents, packages) = partition_requests(requests)?;

    let mut outcome = MergeOutcome {
        created_queries: !manifest.has_queries(),
        ..MergeOutcome::default()
    };

    let queries = manifest.queries_mut();
    merge_intents(queries, intents, &mut outcome);
    merge_packages(queries, packages, &mut outcome);

    debug!(
        "merged visibility entries: {} added, {} skipped as duplicates",
        outcome.added(),
        outcome.skipped()
    );

    Ok(outcome)
}

/// Decide whether a candidate intent filter has no equivalent in `existing`.
///
/// Entries sharing the candidate's action name are compared through their
/// data items: the data of every same-named existing entry is pooled, and a
/// single structurally equal item in that pool makes the candidate a
/// duplicate. A candidate without data is a duplicate as soon as any
/// same-named entry exists, whatever that entry's own shape. Categories
/// never participate.
pub fn intent_is_unique(candidate: &IntentFilter, existing: &[IntentFilter]) -> bool {
    let name = candidate.action_name();
    let same_named = existing
        .iter()
        .filter(|intent| intent.action_name() == name);

    let Some(data) = &candidate.data else {
        return same_named.count() == 0;
    };

    let is_duplicate = same_named
        .flat_map(|intent| intent.data.iter().flatten())
        .any(|item| data.contains(item));

    !is_duplicate
}

/// A candidate package entry is a duplicate iff an existing entry carries
/// the identical package name.
pub fn package_is_unique(candidate: &PackageEntry, existing: &[PackageEntry]) -> bool {
    let name = candidate.name();
    !existing.iter().any(|package| package.name() == name)
}

fn merge_intents(queries: &mut Element, intents: Vec<IntentFilter>, outcome: &mut MergeOutcome) {
    let mut existing: Vec<IntentFilter> = queries
        .child_elements("intent")
        .map(IntentFilter::from_element)
        .collect();
    let install_verbatim = existing.is_empty();

    for intent in intents {
        let name = intent.action_name().unwrap_or_default().to_string();
        if install_verbatim || intent_is_unique(&intent, &existing) {
            queries.insert_grouped(intent.to_element());
            existing.push(intent);
            outcome.added_intents.push(name);
        } else {
            debug!("skipping duplicate intent filter '{name}'");
            outcome.skipped_intents.push(name);
        }
    }
}

fn merge_packages(queries: &mut Element, packages: Vec<PackageEntry>, outcome: &mut MergeOutcome) {
    let mut existing: Vec<PackageEntry> = queries
        .child_elements("package")
        .map(PackageEntry::from_element)
        .collect();
    let install_verbatim = existing.is_empty();

    for package in packages {
        let name = package.name().unwrap_or_default().to_string();
        if install_verbatim || package_is_unique(&package, &existing) {
            queries.insert_grouped(package.to_element());
            existing.push(package);
            outcome.added_packages.push(name);
        } else {
            debug!("skipping duplicate package '{name}'");
            outcome.skipped_packages.push(name);
        }
    }
}
