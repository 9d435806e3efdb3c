//! The query input line.

use crate::history::InputHistory;
use crate::style::{Color, Style};

/// Single or multi line text input with trigger highlighting, a completion
/// hint and input history.
#[derive(Debug, Clone)]
pub struct InputLine {
    text: String,
    /// What the user typed last, as opposed to text set from history.
    user_text: String,
    all_selected: bool,
    /// Leading characters highlighted as the query trigger.
    pub trigger_length: usize,
    pub synopsis: String,
    pub completion: String,
    pub font_size: u32,
    pub padding: u32,
    pub trigger_color: Color,
    pub action_color: Color,
    pub hint_color: Color,
    pub history: InputHistory,
    pub history_search: bool,
    pub disable_input_method: bool,
}

impl InputLine {
    #[must_use]
    pub fn new(history: InputHistory) -> Self {
        Self {
            text: String::new(),
            user_text: String::new(),
            all_selected: false,
            trigger_length: 0,
            synopsis: String::new(),
            completion: String::new(),
            font_size: 0,
            padding: 0,
            trigger_color: Color::TRANSPARENT,
            action_color: Color::TRANSPARENT,
            hint_color: Color::TRANSPARENT,
            history,
            history_search: true,
            disable_input_method: true,
        }
    }

    pub fn apply_style(&mut self, style: &Style) {
        self.font_size = style.input_font_size;
        self.padding = style.input_padding;
        self.trigger_color = style.input_trigger_color;
        self.action_color = style.input_action_color;
        self.hint_color = style.input_hint_color;
    }

    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    #[must_use]
    pub fn user_text(&self) -> &str {
        &self.user_text
    }

    #[must_use]
    pub fn is_all_selected(&self) -> bool {
        self.all_selected
    }

    /// Replace the text without counting it as user input.
    pub fn set_text(&mut self, text: impl Into<String>) {
        self.text = text.into();
        self.all_selected = false;
    }

    /// Replace the text as if the user typed it.
    pub fn edit(&mut self, text: impl Into<String>) {
        self.set_text(text);
        self.history.reset_iterator();
        self.user_text.clone_from(&self.text);
    }

    /// Type `s` at the end, replacing the text if it was all selected.
    pub fn insert(&mut self, s: &str) {
        let text = if self.all_selected {
            s.to_string()
        } else {
            format!("{}{s}", self.text)
        };
        self.edit(text);
    }

    pub fn clear(&mut self) {
        self.edit(String::new());
    }

    pub fn select_all(&mut self) {
        self.all_selected = !self.text.is_empty();
    }

    /// Delete the word left of the end, including the whitespace after it.
    pub fn delete_word_backwards(&mut self) {
        if self.all_selected {
            self.clear();
            return;
        }
        let trimmed = self.text.trim_end();
        let cut = trimmed
            .rfind(char::is_whitespace)
            .map_or(0, |i| i + trimmed[i..].chars().next().map_or(1, char::len_utf8));
        let text = self.text[..cut].to_string();
        self.edit(text);
    }

    /// Replace everything after the trigger with the completion.
    pub fn complete(&mut self) {
        if self.completion.is_empty() {
            return;
        }
        let trigger: String = self.text.chars().take(self.trigger_length).collect();
        let text = trigger + &self.completion;
        self.edit(text);
    }

    /// Older history entry, filtered by the typed text when searching.
    pub fn next(&mut self) {
        let filter = self.history_filter();
        if let Some(text) = self.history.next(&filter) {
            self.set_text(text);
        }
    }

    /// Newer history entry; past the newest one the typed text comes back.
    pub fn previous(&mut self) {
        let filter = self.history_filter();
        let text = self
            .history
            .previous(&filter)
            .unwrap_or_else(|| self.user_text.clone());
        self.set_text(text);
    }

    /// Record the input and reset it for the next show.
    pub fn on_hide(&mut self, clear: bool) {
        self.history.add(&self.text);
        self.user_text.clone_from(&self.text);
        if clear {
            self.clear();
        } else {
            self.select_all();
        }
    }

    /// The text shown after the input: the remainder of the completion if
    /// the query is a prefix of it, else the whole completion after a space.
    #[must_use]
    pub fn completion_hint(&self) -> Option<String> {
        if self.completion.is_empty() || self.text.contains('\n') {
            return None;
        }
        let query: String = self.text.chars().skip(self.trigger_length).collect();
        let completion_lower = self.completion.to_lowercase();
        if completion_lower.starts_with(&query.to_lowercase()) {
            Some(self.completion.chars().skip(query.chars().count()).collect())
        } else {
            Some(format!(" {}", self.completion))
        }
    }

    fn history_filter(&self) -> String {
        if self.history_search {
            self.user_text.clone()
        } else {
            String::new()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn line_with_history(entries: &[&str]) -> InputLine {
        let mut history = InputHistory::new();
        for e in entries.iter().rev() {
            history.add(e);
        }
        InputLine::new(history)
    }

    #[test]
    fn test_history_browsing_restores_typed_text() {
        let mut line = line_with_history(&["firefox", "files", "term"]);
        line.edit("fi");
        line.next();
        assert_eq!(line.text(), "firefox");
        line.next();
        assert_eq!(line.text(), "files");
        line.previous();
        assert_eq!(line.text(), "firefox");
        line.previous();
        assert_eq!(line.text(), "fi");
        assert_eq!(line.user_text(), "fi");
    }

    #[test]
    fn test_history_without_search_ignores_typed_text() {
        let mut line = line_with_history(&["one", "two"]);
        line.history_search = false;
        line.edit("zzz");
        line.next();
        assert_eq!(line.text(), "one");
    }

    #[test]
    fn test_complete_keeps_trigger() {
        let mut line = InputLine::new(InputHistory::new());
        line.edit("gh box");
        line.trigger_length = 3;
        line.completion = "boxmodel".into();
        line.complete();
        assert_eq!(line.text(), "gh boxmodel");
        assert_eq!(line.user_text(), "gh boxmodel");
    }

    #[test]
    fn test_completion_hint() {
        let mut line = InputLine::new(InputHistory::new());
        line.edit("gh Bo");
        line.trigger_length = 3;
        line.completion = "boxmodel".into();
        assert_eq!(line.completion_hint().as_deref(), Some("xmodel"));
        line.completion = "other".into();
        assert_eq!(line.completion_hint().as_deref(), Some(" other"));
        line.edit("two\nlines");
        assert_eq!(line.completion_hint(), None);
    }

    #[test]
    fn test_delete_word_backwards() {
        let mut line = InputLine::new(InputHistory::new());
        line.edit("open the  file  ");
        line.delete_word_backwards();
        assert_eq!(line.text(), "open the  ");
        line.delete_word_backwards();
        assert_eq!(line.text(), "open ");
        line.delete_word_backwards();
        assert_eq!(line.text(), "");
    }

    #[test]
    fn test_hide_records_history_and_clears_or_selects() {
        let mut line = InputLine::new(InputHistory::new());
        line.edit("calc");
        line.on_hide(false);
        assert_eq!(line.text(), "calc");
        assert!(line.is_all_selected());
        line.insert("x");
        assert_eq!(line.text(), "x");

        line.on_hide(true);
        assert_eq!(line.text(), "");
        assert_eq!(line.history.entries(), ["x", "calc"]);
    }
}
