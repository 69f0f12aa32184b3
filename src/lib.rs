//! package-visibility - Android package visibility declarations for AndroidManifest.xml
//!
//! This library merges declared package visibility entries (Android 11+
//! `<queries>` intent filters and package names) into an existing
//! AndroidManifest.xml without duplicating entries that are already present
//! and without touching unrelated manifest content.
//!
//! # Architecture
//!
//! The merge pipeline consists of:
//! 1. **Configuration** - Load declared visibility entries (YAML/TOML)
//! 2. **Discovery** - Locate the target AndroidManifest.xml
//! 3. **Parsing** - Parse the manifest into an XML element tree
//! 4. **Merging** - Validate, build and dedup `<queries>` entries
//! 5. **Writing** - Serialize the augmented manifest back to disk
//! 6. **Reporting** - Summarize what was added and skipped

pub mod config;
pub mod discovery;
pub mod manifest;
pub mod queries;
pub mod report;
pub mod xml;

pub use config::Config;
pub use discovery::ManifestFinder;
pub use manifest::AndroidManifest;
pub use queries::{
    merge_visibility, validate, AttrPairs, IntentFilter, MergeOutcome, PackageEntry, RequestKind,
    ValidationError, VisibilityRequest,
};
pub use report::{ReportFormat, Reporter};
