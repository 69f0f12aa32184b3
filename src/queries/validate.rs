use thiserror::Error;

use super::{RequestKind, VisibilityRequest, ANDROID_NAME, VALID_DATA_ATTRIBUTES};

/// Why a visibility entry was rejected.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("visibility entry has no type defined")]
    MissingKind,
    #[error("visibility type '{0}' is not yet supported")]
    UnsupportedKind(String),
    #[error("intent filters must include a name")]
    IntentWithoutName,
    #[error("the data of intent filter '{0}' must be a non-empty array")]
    EmptyData(String),
    #[error("a data item of intent filter '{0}' does not contain a valid attribute; valid attributes are 'android:scheme', 'android:type' or 'android:host'")]
    InvalidDataAttribute(String),
    #[error("the category of intent filter '{0}' does not contain a valid attribute; the only valid attribute is 'android:name'")]
    InvalidCategoryAttribute(String),
    #[error("packages must include a name")]
    PackageWithoutName,
    #[error("package '{0}' cannot have a data attribute")]
    PackageWithData(String),
    #[error("package '{0}' cannot have a category attribute")]
    PackageWithCategory(String),
}

/// Check a single visibility entry for structural correctness.
///
/// Returns the same reference on success so callers can feed it straight
/// into the fragment builders. Checks short-circuit on the first violated
/// rule; the function has no side effects.
pub fn validate(request: &VisibilityRequest) -> Result<&VisibilityRequest, ValidationError> {
    match &request.kind {
        Some(RequestKind::Intent) => validate_intent(request)?,
        Some(RequestKind::Package) => validate_package(request)?,
        Some(RequestKind::Unsupported(other)) => {
            return Err(ValidationError::UnsupportedKind(other.clone()));
        }
        None => return Err(ValidationError::MissingKind),
    }
    Ok(request)
}

fn validate_intent(request: &VisibilityRequest) -> Result<(), ValidationError> {
    if request.name.is_empty() {
        return Err(ValidationError::IntentWithoutName);
    }

    if let Some(data) = &request.data {
        if data.is_empty() {
            return Err(ValidationError::EmptyData(request.name.clone()));
        }
        for item in data {
            let recognized = VALID_DATA_ATTRIBUTES
                .iter()
                .any(|attribute| item.contains_key(*attribute));
            if !recognized {
                return Err(ValidationError::InvalidDataAttribute(request.name.clone()));
            }
        }
    }

    if let Some(category) = &request.category {
        if !category.contains_key(ANDROID_NAME) {
            return Err(ValidationError::InvalidCategoryAttribute(
                request.name.clone(),
            ));
        }
    }

    Ok(())
}

fn validate_package(request: &VisibilityRequest) -> Result<(), ValidationError> {
    if request.name.is_empty() {
        return Err(ValidationError::PackageWithoutName);
    }
    if request.data.is_some() {
        return Err(ValidationError::PackageWithData(request.name.clone()));
    }
    if request.category.is_some() {
        return Err(ValidationError::PackageWithCategory(request.name.clone()));
    }
    Ok(())
}
