use super::panel::Panel;
use crate::keys::{Key, KeyEvent};
use crate::query::{Query, ResultItem, ResultSource};
use crate::style::{Color, Style};
use std::fmt;
use std::rc::Rc;

/// How list rows are drawn. Each list kind picks its parameters from the
/// style.
pub trait ItemStyle {
    fn from_style(style: &Style) -> Self;

    /// Background of the selected row.
    fn selection(&self) -> &Panel;

    fn padding(&self) -> u32;
}

#[derive(Debug, Clone, PartialEq)]
pub struct ResultItemStyle {
    pub icon_size: u32,
    pub text_font_size: u32,
    pub subtext_font_size: u32,
    pub horizontal_space: u32,
    pub vertical_space: u32,
    pub text_color: Color,
    pub subtext_color: Color,
    pub selection_text_color: Color,
    pub selection_subtext_color: Color,
    pub selection: Panel,
    pub padding: u32,
}

impl ItemStyle for ResultItemStyle {
    fn from_style(style: &Style) -> Self {
        Self {
            icon_size: style.result_item_icon_size,
            text_font_size: style.result_item_text_font_size,
            subtext_font_size: style.result_item_subtext_font_size,
            horizontal_space: style.result_item_horizontal_space,
            vertical_space: style.result_item_vertical_space,
            text_color: style.result_item_text_color,
            subtext_color: style.result_item_subtext_color,
            selection_text_color: style.result_item_selection_text_color,
            selection_subtext_color: style.result_item_selection_subtext_color,
            selection: Panel::new(
                style.result_item_selection_background_brush.clone(),
                style.result_item_selection_border_brush.clone(),
                style.result_item_selection_border_width,
                style.result_item_selection_border_radius,
            ),
            padding: style.result_item_padding,
        }
    }

    fn selection(&self) -> &Panel {
        &self.selection
    }

    fn padding(&self) -> u32 {
        self.padding
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ActionItemStyle {
    pub font_size: u32,
    pub text_color: Color,
    pub selection_text_color: Color,
    pub selection: Panel,
    pub padding: u32,
}

impl ItemStyle for ActionItemStyle {
    fn from_style(style: &Style) -> Self {
        Self {
            font_size: style.action_item_font_size,
            text_color: style.action_item_text_color,
            selection_text_color: style.action_item_selection_text_color,
            selection: Panel::new(
                style.action_item_selection_background_brush.clone(),
                style.action_item_selection_border_brush.clone(),
                style.action_item_selection_border_width,
                style.action_item_selection_border_radius,
            ),
            padding: style.action_item_padding,
        }
    }

    fn selection(&self) -> &Panel {
        &self.selection
    }

    fn padding(&self) -> u32 {
        self.padding
    }
}

/// What a list shows.
#[derive(Clone)]
pub enum ListModel {
    /// A live collection of the bound query.
    Results {
        query: Rc<dyn Query>,
        source: ResultSource,
    },
    Actions(Vec<String>),
}

impl ListModel {
    #[must_use]
    pub fn count(&self) -> usize {
        match self {
            ListModel::Results { query, source } => query.collection(*source).count(),
            ListModel::Actions(actions) => actions.len(),
        }
    }

    #[must_use]
    pub fn item(&self, row: usize) -> Option<ResultItem> {
        match self {
            ListModel::Results { query, source } => query.collection(*source).item(row),
            ListModel::Actions(actions) => actions.get(row).map(|a| ResultItem {
                text: a.clone(),
                ..ResultItem::default()
            }),
        }
    }

    #[must_use]
    pub fn source(&self) -> Option<ResultSource> {
        match self {
            ListModel::Results { source, .. } => Some(*source),
            ListModel::Actions(_) => None,
        }
    }
}

impl fmt::Debug for ListModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ListModel::Results { query, source } => f
                .debug_struct("Results")
                .field("query", &query.id())
                .field("source", source)
                .finish(),
            ListModel::Actions(actions) => f.debug_tuple("Actions").field(actions).finish(),
        }
    }
}

/// A list that grows with its model up to `max_items` rows.
#[derive(Debug, Clone)]
pub struct ListView<S> {
    model: Option<ListModel>,
    current_row: Option<usize>,
    pub item_style: S,
    pub max_items: u32,
    pub visible: bool,
    /// Shown but ignoring pointer input.
    pub input_transparent: bool,
    pub debug: bool,
    pub display_scrollbar: bool,
}

impl<S: ItemStyle> ListView<S> {
    #[must_use]
    pub fn new(style: &Style, max_items: u32) -> Self {
        Self {
            model: None,
            current_row: None,
            item_style: S::from_style(style),
            max_items,
            visible: false,
            input_transparent: false,
            debug: false,
            display_scrollbar: false,
        }
    }

    pub fn apply_style(&mut self, style: &Style) {
        self.item_style = S::from_style(style);
    }
}

impl<S> ListView<S> {
    #[must_use]
    pub fn model(&self) -> Option<&ListModel> {
        self.model.as_ref()
    }

    /// Replace the model and select its first row.
    pub fn set_model(&mut self, model: Option<ListModel>) {
        self.model = model;
        self.current_row = None;
        self.rows_inserted();
    }

    /// Select the first row if nothing is selected yet.
    pub fn rows_inserted(&mut self) {
        if self.current_row.is_none() && self.count() > 0 {
            self.current_row = Some(0);
        }
    }

    #[must_use]
    pub fn count(&self) -> usize {
        self.model.as_ref().map_or(0, ListModel::count)
    }

    /// Rows on screen before scrolling.
    #[must_use]
    pub fn visible_rows(&self) -> usize {
        self.count().min(self.max_items as usize)
    }

    #[must_use]
    pub fn current_row(&self) -> Option<usize> {
        self.current_row
    }

    #[must_use]
    pub fn current_item(&self) -> Option<ResultItem> {
        self.model.as_ref()?.item(self.current_row?)
    }

    pub fn set_current_row(&mut self, row: usize) {
        if row < self.count() {
            self.current_row = Some(row);
        }
    }

    /// Move the selection. Returns whether the key was a navigation key.
    pub fn handle_key(&mut self, event: &KeyEvent) -> bool {
        let count = self.count();
        let page = (self.max_items as usize).max(1);
        let Some(row) = self.current_row.filter(|_| count > 0) else {
            return matches!(
                event.key,
                Key::Up | Key::Down | Key::PageUp | Key::PageDown
            );
        };
        let last = count - 1;
        self.current_row = Some(match event.key {
            Key::Up => row.saturating_sub(1),
            Key::Down => (row + 1).min(last),
            Key::PageUp => row.saturating_sub(page),
            Key::PageDown => (row + page).min(last),
            _ => return false,
        });
        true
    }
}
