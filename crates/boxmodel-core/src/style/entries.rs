//! Raw entry tables: a style file merged over its base styles.

use super::ini::{self, IniEntries};
use super::registry::StyleRegistry;
use crate::error::{Error, Result};
use std::path::{Path, PathBuf};
use tracing::debug;

const BASES_KEY: &str = "bases";

/// Unresolved key/value pairs of a style and every file that contributed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawEntries {
    pub entries: IniEntries,
    pub sources: Vec<PathBuf>,
}

impl RawEntries {
    /// Load `path` and, first, every base it declares.
    pub fn load(path: &Path, registry: &StyleRegistry) -> Result<Self> {
        let mut raw = RawEntries::default();
        let mut reading = Vec::new();
        raw.load_recursive(path, registry, &mut reading)?;
        Ok(raw)
    }

    fn load_recursive(
        &mut self,
        path: &Path,
        registry: &StyleRegistry,
        reading: &mut Vec<PathBuf>,
    ) -> Result<()> {
        let canonical = path.canonicalize()?;
        if reading.contains(&canonical) {
            let mut chain = reading.clone();
            chain.push(canonical);
            return Err(Error::BaseCycle { chain });
        }

        let mut entries = ini::read_file(&canonical)?;
        if !self.sources.contains(&canonical) {
            self.sources.push(canonical.clone());
        }
        reading.push(canonical.clone());

        if let Some(bases) = entries.remove(BASES_KEY) {
            for base in bases.split(',').map(str::trim).filter(|b| !b.is_empty()) {
                let base_path = resolve_base(base, &canonical, registry)?;
                debug!("{} inherits {}", canonical.display(), base_path.display());
                self.load_recursive(&base_path, registry, reading)?;
            }
        }

        self.entries.extend(entries);
        reading.pop();
        Ok(())
    }
}

/// Registry name, then existing absolute path, then path relative to the
/// including file's directory.
fn resolve_base(base: &str, including: &Path, registry: &StyleRegistry) -> Result<PathBuf> {
    if let Some(path) = registry.path(base) {
        return Ok(path.to_path_buf());
    }

    let candidate = Path::new(base);
    if candidate.is_absolute() && candidate.exists() {
        return Ok(candidate.to_path_buf());
    }

    if let Some(dir) = including.parent() {
        let relative = dir.join(candidate);
        if relative.exists() {
            return Ok(relative);
        }
    }

    Err(Error::BaseNotFound {
        base: base.to_string(),
        path: including.to_path_buf(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn write(dir: &TempDir, name: &str, text: &str) -> PathBuf {
        let path = dir.path().join(name);
        std::fs::write(&path, text).unwrap();
        path
    }

    #[test]
    fn test_self_overrides_base() {
        let dir = TempDir::new().unwrap();
        write(&dir, "Base.ini", "[window]\nk=1\nother=base\n");
        let child = write(&dir, "Child.ini", "bases=Base\n[window]\nk=2\n");
        let registry = StyleRegistry::scan(vec![dir.path().to_path_buf()]);

        let raw = RawEntries::load(&child, &registry).unwrap();
        assert_eq!(raw.entries["window/k"], "2");
        assert_eq!(raw.entries["window/other"], "base");
        assert!(!raw.entries.contains_key("bases"));
        assert_eq!(raw.sources.len(), 2);
    }

    #[test]
    fn test_bases_compose_in_listed_order() {
        let dir = TempDir::new().unwrap();
        write(&dir, "A.ini", "[window]\nk=a\n");
        write(&dir, "B.ini", "[window]\nk=b\n");
        let child = write(&dir, "C.ini", "bases = A, , B\n");
        let registry = StyleRegistry::scan(vec![dir.path().to_path_buf()]);

        let raw = RawEntries::load(&child, &registry).unwrap();
        assert_eq!(raw.entries["window/k"], "b");
    }

    #[test]
    fn test_relative_and_absolute_base_paths() {
        let dir = TempDir::new().unwrap();
        std::fs::create_dir(dir.path().join("parts")).unwrap();
        let part = write(&dir, "parts/metrics.ini", "[window]\nwidth=1\n");
        let other = TempDir::new().unwrap();
        let abs = write(&other, "colors.ini", "[window]\ncolor=red\n");

        let child = write(
            &dir,
            "Child.ini",
            &format!("bases = parts/metrics.ini, {}\n", abs.display()),
        );
        let registry = StyleRegistry::scan(vec![]);

        let raw = RawEntries::load(&child, &registry).unwrap();
        assert_eq!(raw.entries["window/width"], "1");
        assert_eq!(raw.entries["window/color"], "red");
        assert!(raw.sources.contains(&part.canonicalize().unwrap()));
    }

    #[test]
    fn test_missing_base_is_error() {
        let dir = TempDir::new().unwrap();
        let child = write(&dir, "Child.ini", "bases = Nope\n");
        let registry = StyleRegistry::scan(vec![dir.path().to_path_buf()]);

        let err = RawEntries::load(&child, &registry).unwrap_err();
        assert!(matches!(err, Error::BaseNotFound { ref base, .. } if base == "Nope"));
    }

    #[test]
    fn test_base_cycle_is_detected() {
        let dir = TempDir::new().unwrap();
        write(&dir, "A.ini", "bases = B\n");
        write(&dir, "B.ini", "bases = A\n");
        let registry = StyleRegistry::scan(vec![dir.path().to_path_buf()]);

        let err = RawEntries::load(registry.path("A").unwrap(), &registry).unwrap_err();
        let Error::BaseCycle { chain } = err else {
            panic!("expected base cycle, got {err}");
        };
        assert_eq!(chain.len(), 3);
        assert_eq!(chain.first(), chain.last());
    }

    #[test]
    fn test_self_base_is_cycle() {
        let dir = TempDir::new().unwrap();
        let path = write(&dir, "Self.ini", "bases = Self\n");
        let registry = StyleRegistry::scan(vec![dir.path().to_path_buf()]);

        assert!(matches!(
            RawEntries::load(&path, &registry),
            Err(Error::BaseCycle { .. })
        ));
    }

    #[test]
    fn test_diamond_is_allowed() {
        let dir = TempDir::new().unwrap();
        write(&dir, "Root.ini", "[window]\nk=root\n");
        write(&dir, "Left.ini", "bases = Root\n");
        write(&dir, "Right.ini", "bases = Root\n");
        let top = write(&dir, "Top.ini", "bases = Left, Right\n");
        let registry = StyleRegistry::scan(vec![dir.path().to_path_buf()]);

        let raw = RawEntries::load(&top, &registry).unwrap();
        assert_eq!(raw.entries["window/k"], "root");
        assert_eq!(raw.sources.len(), 4);
    }
}
