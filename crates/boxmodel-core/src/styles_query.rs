//! Query handler that lists styles and switches between them.

use crate::query::ResultItem;
use crate::style::StyleRegistry;
use nucleo_matcher::pattern::{AtomKind, CaseMatching, Normalization, Pattern};
use nucleo_matcher::{Config, Matcher, Utf32Str};
use std::path::{Path, PathBuf};

pub const DEFAULT_TRIGGER: &str = "style ";
const SYSTEM_TITLE: &str = "System";
const ICON: &str = "🎨";

/// What activating a style item action does.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StyleCommand {
    /// `None` selects the default style.
    UseLight(Option<String>),
    UseDark(Option<String>),
    Open(PathBuf),
    Reveal(PathBuf),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StyleAction {
    pub label: &'static str,
    pub command: StyleCommand,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StyleItem {
    pub id: String,
    pub title: String,
    pub description: String,
    pub actions: Vec<StyleAction>,
    pub score: u32,
}

impl StyleItem {
    #[must_use]
    pub fn to_result_item(&self) -> ResultItem {
        ResultItem {
            text: self.title.clone(),
            subtext: self.description.clone(),
            icon: Some(ICON.to_string()),
            input_action_text: self.title.clone(),
            actions: self.actions.iter().map(|a| a.label.to_string()).collect(),
        }
    }
}

/// Fuzzy matches the default style and every registered style.
pub struct StylesQueryHandler {
    matcher: Matcher,
}

impl Default for StylesQueryHandler {
    fn default() -> Self {
        Self::new()
    }
}

impl StylesQueryHandler {
    #[must_use]
    pub fn new() -> Self {
        Self {
            matcher: Matcher::new(Config::DEFAULT),
        }
    }

    /// Items matching `query`, best first. An empty query matches all.
    pub fn rank_items(
        &mut self,
        query: &str,
        registry: &StyleRegistry,
        dark_mode: bool,
    ) -> Vec<StyleItem> {
        let pattern = Pattern::new(
            query,
            CaseMatching::Smart,
            Normalization::Smart,
            AtomKind::Fuzzy,
        );

        let mut items = Vec::new();
        if let Some(score) = self.score(&pattern, SYSTEM_TITLE) {
            items.push(StyleItem {
                id: "default".to_string(),
                title: SYSTEM_TITLE.to_string(),
                description: "The default style.".to_string(),
                actions: mode_actions(None, dark_mode),
                score,
            });
        }

        for (name, path) in registry.iter() {
            let Some(score) = self.score(&pattern, name) else {
                continue;
            };
            let mut actions = mode_actions(Some(name), dark_mode);
            actions.push(StyleAction {
                label: "Open",
                command: StyleCommand::Open(path.to_path_buf()),
            });
            actions.push(StyleAction {
                label: "Reveal in file manager",
                command: StyleCommand::Reveal(parent_dir(path)),
            });
            items.push(StyleItem {
                id: format!("style_{name}"),
                title: name.to_string(),
                description: path.display().to_string(),
                actions,
                score,
            });
        }

        items.sort_by(|a, b| b.score.cmp(&a.score));
        items
    }

    fn score(&mut self, pattern: &Pattern, haystack: &str) -> Option<u32> {
        if pattern.atoms.is_empty() {
            return Some(0);
        }
        let mut buf = Vec::new();
        pattern.score(Utf32Str::new(haystack, &mut buf), &mut self.matcher)
    }
}

/// Light and dark selection, the current appearance's first.
fn mode_actions(name: Option<&str>, dark_mode: bool) -> Vec<StyleAction> {
    let name = name.map(str::to_string);
    let light = StyleAction {
        label: "Use in light mode",
        command: StyleCommand::UseLight(name.clone()),
    };
    let dark = StyleAction {
        label: "Use in dark mode",
        command: StyleCommand::UseDark(name),
    };
    if dark_mode {
        vec![dark, light]
    } else {
        vec![light, dark]
    }
}

fn parent_dir(path: &Path) -> PathBuf {
    path.parent().map_or_else(|| path.to_path_buf(), Path::to_path_buf)
}
