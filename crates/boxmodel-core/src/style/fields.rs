use super::brush::Brush;
use super::color::Color;
use super::ini;
use super::palette::Palette;
use serde::{Deserialize, Serialize};
use std::fmt::Write as _;

const GENERAL_SPACING: u32 = 6;
const BASE_FONT_SIZE: u32 = 10;

pub const PALETTE_PREFIX: &str = "palette/";

/// Resolved visual parameters of the launcher window.
///
/// Replaced wholesale on every style change, never patched in place.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Style {
    pub palette: Palette,

    // Window metrics depend on input metrics, keep this order
    pub input_font_size: u32,
    pub input_trigger_color: Color,
    pub input_action_color: Color,
    pub input_hint_color: Color,
    pub input_background_brush: Brush,
    pub input_border_brush: Brush,
    pub input_border_width: f64,
    pub input_padding: u32,
    pub input_border_radius: f64,

    pub window_border_brush: Brush,
    pub window_border_width: f64,
    pub window_padding: u32,
    pub window_border_radius: f64,
    pub window_background_brush: Brush,
    pub window_shadow_brush: Brush,
    pub window_shadow_size: u32,
    pub window_shadow_offset: u32,
    pub window_spacing: u32,
    pub window_width: u32,

    pub settings_button_color: Color,
    pub settings_button_highlight_color: Color,

    pub result_item_icon_size: u32,
    pub result_item_text_font_size: u32,
    pub result_item_subtext_font_size: u32,
    pub result_item_horizontal_space: u32,
    pub result_item_vertical_space: u32,
    pub result_item_text_color: Color,
    pub result_item_subtext_color: Color,
    pub result_item_selection_text_color: Color,
    pub result_item_selection_subtext_color: Color,
    pub result_item_selection_background_brush: Brush,
    pub result_item_selection_border_brush: Brush,
    pub result_item_selection_border_radius: f64,
    pub result_item_selection_border_width: f64,
    pub result_item_padding: u32,

    pub action_item_font_size: u32,
    pub action_item_text_color: Color,
    pub action_item_selection_text_color: Color,
    pub action_item_selection_background_brush: Brush,
    pub action_item_selection_border_brush: Brush,
    pub action_item_selection_border_radius: f64,
    pub action_item_selection_border_width: f64,
    pub action_item_padding: u32,
}

/// Mutable view of one typed style field.
pub enum FieldMut<'a> {
    Uint(&'a mut u32),
    Float(&'a mut f64),
    Color(&'a mut Color),
    Brush(&'a mut Brush),
}

impl FieldMut<'_> {
    fn render(&self) -> String {
        match self {
            FieldMut::Uint(v) => v.to_string(),
            FieldMut::Float(v) => v.to_string(),
            FieldMut::Color(v) => v.to_string(),
            FieldMut::Brush(v) => ini::quote(&v.to_string()),
        }
    }
}

impl Style {
    #[must_use]
    pub fn from_palette(palette: &Palette) -> Self {
        let input_padding = 0;
        let input_border_radius = f64::from(GENERAL_SPACING + input_padding);
        let window_border_width = 1.0;
        let window_padding = GENERAL_SPACING + 1;

        Self {
            palette: *palette,

            input_font_size: BASE_FONT_SIZE + 9,
            input_trigger_color: palette.highlight,
            input_action_color: palette.placeholder_text,
            input_hint_color: palette.placeholder_text,
            input_background_brush: palette.base.into(),
            input_border_brush: palette.highlight.into(),
            input_border_width: 0.0,
            input_padding,
            input_border_radius,

            window_border_brush: palette.highlight.into(),
            window_border_width,
            window_padding,
            window_border_radius: f64::from(window_padding) + input_border_radius,
            window_background_brush: palette.window.into(),
            window_shadow_brush: Color::rgba(0, 0, 0, 128).into(),
            window_shadow_size: 32,
            window_shadow_offset: 8,
            window_spacing: GENERAL_SPACING,
            window_width: 640,

            settings_button_color: palette.button,
            settings_button_highlight_color: palette.highlight,

            result_item_icon_size: 36,
            result_item_text_font_size: BASE_FONT_SIZE + 4,
            result_item_subtext_font_size: BASE_FONT_SIZE - 1,
            result_item_horizontal_space: GENERAL_SPACING,
            result_item_vertical_space: 1,
            result_item_text_color: palette.window_text,
            result_item_subtext_color: palette.placeholder_text,
            result_item_selection_text_color: palette.highlighted_text,
            result_item_selection_subtext_color: palette.placeholder_text,
            result_item_selection_background_brush: palette.highlight.into(),
            result_item_selection_border_brush: palette.highlight.into(),
            result_item_selection_border_radius: input_border_radius,
            result_item_selection_border_width: 0.0,
            result_item_padding: GENERAL_SPACING,

            action_item_font_size: BASE_FONT_SIZE,
            action_item_text_color: palette.window_text,
            action_item_selection_text_color: palette.highlighted_text,
            action_item_selection_background_brush: palette.highlight.into(),
            action_item_selection_border_brush: palette.highlight.into(),
            action_item_selection_border_radius: input_border_radius,
            action_item_selection_border_width: 0.0,
            action_item_padding: GENERAL_SPACING,
        }
    }

    /// Every non-palette field with its definition file key.
    pub fn fields_mut(&mut self) -> Vec<(&'static str, FieldMut<'_>)> {
        use FieldMut::{Brush as B, Color as C, Float as F, Uint as U};
        vec![
            ("window/action_item_font_size", U(&mut self.action_item_font_size)),
            ("window/action_item_padding", U(&mut self.action_item_padding)),
            ("window/action_item_selection_background_brush", B(&mut self.action_item_selection_background_brush)),
            ("window/action_item_selection_border_brush", B(&mut self.action_item_selection_border_brush)),
            ("window/action_item_selection_border_radius", F(&mut self.action_item_selection_border_radius)),
            ("window/action_item_selection_border_width", F(&mut self.action_item_selection_border_width)),
            ("window/action_item_selection_text_color", C(&mut self.action_item_selection_text_color)),
            ("window/action_item_text_color", C(&mut self.action_item_text_color)),
            ("window/input_action_color", C(&mut self.input_action_color)),
            ("window/input_background_brush", B(&mut self.input_background_brush)),
            ("window/input_border_brush", B(&mut self.input_border_brush)),
            ("window/input_border_radius", F(&mut self.input_border_radius)),
            ("window/input_border_width", F(&mut self.input_border_width)),
            ("window/input_font_size", U(&mut self.input_font_size)),
            ("window/input_hint_color", C(&mut self.input_hint_color)),
            ("window/input_padding", U(&mut self.input_padding)),
            ("window/input_trigger_color", C(&mut self.input_trigger_color)),
            ("window/result_item_horizontal_space", U(&mut self.result_item_horizontal_space)),
            ("window/result_item_icon_size", U(&mut self.result_item_icon_size)),
            ("window/result_item_padding", U(&mut self.result_item_padding)),
            ("window/result_item_selection_background_brush", B(&mut self.result_item_selection_background_brush)),
            ("window/result_item_selection_border_brush", B(&mut self.result_item_selection_border_brush)),
            ("window/result_item_selection_border_radius", F(&mut self.result_item_selection_border_radius)),
            ("window/result_item_selection_border_width", F(&mut self.result_item_selection_border_width)),
            ("window/result_item_selection_subtext_color", C(&mut self.result_item_selection_subtext_color)),
            ("window/result_item_selection_text_color", C(&mut self.result_item_selection_text_color)),
            ("window/result_item_subtext_color", C(&mut self.result_item_subtext_color)),
            ("window/result_item_subtext_font_size", U(&mut self.result_item_subtext_font_size)),
            ("window/result_item_text_color", C(&mut self.result_item_text_color)),
            ("window/result_item_text_font_size", U(&mut self.result_item_text_font_size)),
            ("window/result_item_vertical_space", U(&mut self.result_item_vertical_space)),
            ("window/settings_button_color", C(&mut self.settings_button_color)),
            ("window/settings_button_highlight_color", C(&mut self.settings_button_highlight_color)),
            ("window/window_background_brush", B(&mut self.window_background_brush)),
            ("window/window_border_brush", B(&mut self.window_border_brush)),
            ("window/window_border_radius", F(&mut self.window_border_radius)),
            ("window/window_border_width", F(&mut self.window_border_width)),
            ("window/window_padding", U(&mut self.window_padding)),
            ("window/window_shadow_brush", B(&mut self.window_shadow_brush)),
            ("window/window_shadow_offset", U(&mut self.window_shadow_offset)),
            ("window/window_shadow_size", U(&mut self.window_shadow_size)),
            ("window/window_spacing", U(&mut self.window_spacing)),
            ("window/window_width", U(&mut self.window_width)),
        ]
    }

    /// A complete definition file reproducing this style.
    #[must_use]
    pub fn to_ini(&self) -> String {
        let mut out =
            String::from("; Style definition. Values may reference other keys as $section/key.\n");
        out.push_str("; bases = OtherStyle, relative/path.ini\n\n[palette]\n");
        for (key, color) in palette_entries(&self.palette) {
            let _ = writeln!(out, "{key} = {color}");
        }

        out.push_str("\n[window]\n");
        let mut copy = self.clone();
        for (key, field) in copy.fields_mut() {
            let key = key.trim_start_matches("window/");
            let _ = writeln!(out, "{key} = {}", field.render());
        }
        out
    }
}

impl Default for Style {
    fn default() -> Self {
        Self::from_palette(&Palette::light())
    }
}

/// Palette keys without the section prefix, in definition order.
pub fn palette_entries(palette: &Palette) -> [(&'static str, Color); 14] {
    [
        ("base", palette.base),
        ("text", palette.text),
        ("window", palette.window),
        ("window_text", palette.window_text),
        ("button", palette.button),
        ("button_text", palette.button_text),
        ("light", palette.light),
        ("mid", palette.mid),
        ("dark", palette.dark),
        ("placeholder_text", palette.placeholder_text),
        ("highlight", palette.highlight),
        ("highlight_text", palette.highlighted_text),
        ("link", palette.link),
        ("link_visited", palette.link_visited),
    ]
}
