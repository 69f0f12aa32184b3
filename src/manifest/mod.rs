//! AndroidManifest.xml access layer.
//!
//! A thin shell around the XML tree: file I/O, the root-element check, and
//! the `<queries>` container slot. The merge engine itself never touches
//! raw markup or the filesystem.

use miette::{IntoDiagnostic, Result, WrapErr};
use std::path::Path;
use tracing::debug;

use crate::xml::{parse_document, write_document, Document, Element};

/// Name of the manifest root element.
const MANIFEST_TAG: &str = "manifest";

/// Name of the package visibility container element.
pub const QUERIES_TAG: &str = "queries";

/// A parsed AndroidManifest.xml.
///
/// Wraps the full element tree so everything outside `<queries>` survives
/// a load/merge/save round trip untouched.
#[derive(Debug, Clone, PartialEq)]
pub struct AndroidManifest {
    document: Document,
}

impl AndroidManifest {
    /// Parse manifest XML text.
    pub fn parse(source: &str) -> Result<Self> {
        let document = parse_document(source).into_diagnostic()?;
        if document.root.name != MANIFEST_TAG {
            return Err(miette::miette!(
                "expected a '{MANIFEST_TAG}' root element, found '{}'",
                document.root.name
            ));
        }
        Ok(Self { document })
    }

    /// Load a manifest from disk.
    pub fn load(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .into_diagnostic()
            .wrap_err_with(|| format!("Failed to read manifest: {}", path.display()))?;
        Self::parse(&contents)
            .wrap_err_with(|| format!("Failed to parse manifest: {}", path.display()))
    }

    /// Serialize back to XML text.
    pub fn to_xml(&self) -> Result<String> {
        write_document(&self.document).into_diagnostic()
    }

    /// Write the manifest back to disk.
    pub fn save(&self, path: &Path) -> Result<()> {
        let xml = self.to_xml()?;
        std::fs::write(path, xml)
            .into_diagnostic()
            .wrap_err_with(|| format!("Failed to write manifest: {}", path.display()))?;
        debug!("Wrote manifest: {}", path.display());
        Ok(())
    }

    /// Application id declared on the root element, when present.
    pub fn package(&self) -> Option<&str> {
        self.document.root.attr("package")
    }

    /// The `<queries>` element, when the manifest declares one.
    pub fn queries(&self) -> Option<&Element> {
        self.document.root.child_elements(QUERIES_TAG).next()
    }

    /// Whether the manifest already declares a `<queries>` element.
    pub fn has_queries(&self) -> bool {
        self.queries().is_some()
    }

    /// The `<queries>` element, created as a child of `<manifest>` on
    /// first access.
    pub fn queries_mut(&mut self) -> &mut Element {
        if !self.has_queries() {
            debug!("manifest has no <queries> element, creating one");
        }
        self.document.root.child_or_insert(QUERIES_TAG)
    }
}
