use super::{
    validate, AttrPairs, IntentFilter, PackageEntry, RequestKind, ValidationError,
    VisibilityRequest, ANDROID_NAME,
};

/// Build the canonical intent filter for a validated intent request.
///
/// The action is always a one-element list; data items map positionally
/// from the request; the category, when present, becomes a one-element
/// list. No validation happens here.
pub fn intent_filter(request: &VisibilityRequest) -> IntentFilter {
    IntentFilter {
        action: vec![name_attr(&request.name)],
        data: request.data.clone(),
        category: request.category.clone().map(|category| vec![category]),
    }
}

/// Build the canonical package entry for a validated package request.
pub fn package_entry(request: &VisibilityRequest) -> PackageEntry {
    PackageEntry {
        attributes: name_attr(&request.name),
    }
}

/// Validate a whole batch and build its fragments, partitioned by kind.
///
/// Relative order within each partition follows input order. The first
/// invalid entry aborts the batch, so a failing batch builds nothing and
/// callers never apply a partial result.
pub fn partition_requests(
    requests: &[VisibilityRequest],
) -> Result<(Vec<IntentFilter>, Vec<PackageEntry>), ValidationError> {
    let mut intents = Vec::new();
    let mut packages = Vec::new();

    for request in requests {
        let request = validate(request)?;
        match &request.kind {
            Some(RequestKind::Intent) => intents.push(intent_filter(request)),
            Some(RequestKind::Package) => packages.push(package_entry(request)),
            // validate only lets the two supported kinds through
            Some(RequestKind::Unsupported(other)) => {
                return Err(ValidationError::UnsupportedKind(other.clone()));
            }
            None => return Err(ValidationError::MissingKind),
        }
    }

    Ok((intents, packages))
}

fn name_attr(name: &str) -> AttrPairs {
    let mut attrs = AttrPairs::new();
    attrs.insert(ANDROID_NAME.to_string(), name.to_string());
    attrs
}
