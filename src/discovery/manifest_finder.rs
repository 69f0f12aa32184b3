use ignore::WalkBuilder;
use miette::{miette, Result};
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::config::Config;

/// File name of Android manifests.
const MANIFEST_FILE_NAME: &str = "AndroidManifest.xml";

/// Locates the AndroidManifest.xml a merge should target.
pub struct ManifestFinder<'a> {
    config: &'a Config,
}

impl<'a> ManifestFinder<'a> {
    pub fn new(config: &'a Config) -> Self {
        Self { config }
    }

    /// All manifest files under the project root, excludes applied.
    pub fn find_all(&self, root: &Path) -> Vec<PathBuf> {
        debug!("Scanning for manifests in: {}", root.display());

        let mut manifests: Vec<PathBuf> = WalkBuilder::new(root)
            .build()
            .filter_map(|entry| entry.ok())
            .filter(|entry| entry.file_type().map(|ft| ft.is_file()).unwrap_or(false))
            .map(|entry| entry.into_path())
            .filter(|path| {
                path.file_name()
                    .map(|name| name == MANIFEST_FILE_NAME)
                    .unwrap_or(false)
            })
            .filter(|path| !self.config.should_exclude(path))
            .collect();
        manifests.sort();

        debug!("Found {} manifest files", manifests.len());
        manifests
    }

    /// The single manifest a merge should target.
    ///
    /// Prefers the main source set of a Gradle layout (a path containing
    /// `src/main`). Remaining ambiguity is an error listing every
    /// candidate, resolved by passing an explicit manifest path.
    pub fn find_target(&self, root: &Path) -> Result<PathBuf> {
        let mut manifests = self.find_all(root);

        if manifests.is_empty() {
            return Err(miette!(
                "No {MANIFEST_FILE_NAME} found under {}",
                root.display()
            ));
        }
        if manifests.len() == 1 {
            return Ok(manifests.remove(0));
        }

        let main_set: Vec<&PathBuf> = manifests
            .iter()
            .filter(|path| {
                path.to_string_lossy()
                    .replace('\\', "/")
                    .contains("src/main")
            })
            .collect();
        if let [single] = main_set.as_slice() {
            return Ok((*single).clone());
        }

        let listing: Vec<String> = manifests
            .iter()
            .map(|path| format!("  {}", path.display()))
            .collect();
        Err(miette!(
            "Multiple {MANIFEST_FILE_NAME} files found under {}; pass --manifest to pick one:\n{}",
            root.display(),
            listing.join("\n")
        ))
    }
}
