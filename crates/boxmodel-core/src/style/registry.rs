use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

const STYLE_EXTENSION: &str = "ini";

/// Style names mapped to the canonical path of their definition file.
///
/// Built once from a list of directories; later directories shadow earlier
/// ones by name. Never changes after construction.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StyleRegistry {
    directories: Vec<PathBuf>,
    styles: BTreeMap<String, PathBuf>,
}

impl StyleRegistry {
    #[must_use]
    pub fn scan(directories: Vec<PathBuf>) -> Self {
        let mut styles = BTreeMap::new();
        for dir in &directories {
            scan_directory(dir, &mut styles);
        }
        debug!(
            "Found {} styles in {} directories",
            styles.len(),
            directories.len()
        );
        Self {
            directories,
            styles,
        }
    }

    /// A new registry over the same directories.
    #[must_use]
    pub fn rescan(&self) -> Self {
        Self::scan(self.directories.clone())
    }

    #[must_use]
    pub fn directories(&self) -> &[PathBuf] {
        &self.directories
    }

    #[must_use]
    pub fn path(&self, name: &str) -> Option<&Path> {
        self.styles.get(name).map(PathBuf::as_path)
    }

    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.styles.contains_key(name)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.styles.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Path)> {
        self.styles
            .iter()
            .map(|(name, path)| (name.as_str(), path.as_path()))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.styles.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.styles.is_empty()
    }
}

fn scan_directory(dir: &Path, styles: &mut BTreeMap<String, PathBuf>) {
    let entries = match std::fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(e) => {
            debug!("Skipping style directory {}: {e}", dir.display());
            return;
        }
    };

    for entry in entries.flatten() {
        let Ok(file_type) = entry.file_type() else {
            continue;
        };
        if !file_type.is_file() {
            continue;
        }

        let path = entry.path();
        if path.extension().and_then(|e| e.to_str()) != Some(STYLE_EXTENSION) {
            continue;
        }
        let Some(name) = path.file_stem().and_then(|s| s.to_str()) else {
            continue;
        };

        match path.canonicalize() {
            Ok(canonical) => {
                styles.insert(name.to_string(), canonical);
            }
            Err(e) => warn!("Cannot resolve style file {}: {e}", path.display()),
        }
    }
}
