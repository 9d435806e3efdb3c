//! Reload styles when their definition files change.

use crate::Result;
use crate::controller::UiEvent;
use notify_debouncer_mini::notify::{RecommendedWatcher, RecursiveMode};
use notify_debouncer_mini::{DebounceEventResult, Debouncer, new_debouncer};
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tokio::sync::mpsc::UnboundedSender;
use tracing::{debug, info, warn};

/// Editors often write a file in several steps.
const DEBOUNCE: Duration = Duration::from_millis(200);

/// Watches the files a style was read from. Dropping it stops watching.
pub struct StyleWatcher {
    _debouncer: Debouncer<RecommendedWatcher>,
    files: Vec<PathBuf>,
}

impl StyleWatcher {
    /// Watch `files`, posting [`UiEvent::StyleFileChanged`] to `tx` when
    /// any of them changes.
    ///
    /// # Errors
    ///
    /// Returns an error if the platform watcher cannot be created or a
    /// directory cannot be watched.
    pub fn watch(files: Vec<PathBuf>, tx: UnboundedSender<UiEvent>) -> Result<Self> {
        let watched = files.clone();
        let mut debouncer = new_debouncer(DEBOUNCE, move |result: DebounceEventResult| {
            match result {
                Ok(events) => {
                    if events.iter().any(|e| is_watched(&watched, &e.path)) {
                        info!("Style file changed, reloading style");
                        if tx.send(UiEvent::StyleFileChanged).is_err() {
                            debug!("Style change receiver dropped");
                        }
                    }
                }
                Err(e) => warn!("Style watcher error: {e}"),
            }
        })?;

        // Watch directories: editors replace files instead of writing them
        let directories: BTreeSet<&Path> = files.iter().filter_map(|f| f.parent()).collect();
        for dir in directories {
            debouncer.watcher().watch(dir, RecursiveMode::NonRecursive)?;
            debug!("Watching style directory: {}", dir.display());
        }

        Ok(Self {
            _debouncer: debouncer,
            files,
        })
    }

    #[must_use]
    pub fn files(&self) -> &[PathBuf] {
        &self.files
    }
}

impl std::fmt::Debug for StyleWatcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StyleWatcher")
            .field("files", &self.files)
            .finish_non_exhaustive()
    }
}

fn is_watched(files: &[PathBuf], path: &Path) -> bool {
    files.iter().any(|f| {
        f == path
            || (f.file_name() == path.file_name()
                && f.parent().and_then(|p| p.file_name()) == path.parent().and_then(|p| p.file_name()))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;
    use tokio::sync::mpsc;

    #[test]
    fn test_is_watched_matches_by_directory_and_name() {
        let files = vec![PathBuf::from("/a/styles/Nord.ini")];
        assert!(is_watched(&files, Path::new("/a/styles/Nord.ini")));
        assert!(is_watched(&files, Path::new("/private/a/styles/Nord.ini")));
        assert!(!is_watched(&files, Path::new("/a/styles/Other.ini")));
        assert!(!is_watched(&files, Path::new("/a/other/Nord.ini")));
    }

    #[tokio::test]
    async fn test_change_posts_event() {
        let dir = TempDir::new().unwrap();
        let file = dir.path().join("Nord.ini");
        std::fs::write(&file, "[palette]\n").unwrap();

        let (tx, mut rx) = mpsc::unbounded_channel();
        let watcher = StyleWatcher::watch(vec![file.clone()], tx).unwrap();
        assert_eq!(watcher.files(), [file.clone()]);

        std::fs::write(&file, "[window]\nwindow_width = 700\n").unwrap();
        let event = tokio::time::timeout(Duration::from_secs(5), rx.recv()).await;
        assert_eq!(event.unwrap(), Some(UiEvent::StyleFileChanged));
    }
}
