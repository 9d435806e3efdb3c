use super::panel::Panel;
use crate::placement::Point;
use crate::style::{Brush, Color, Palette, Style};

/// Space the drop shadow occupies around the frame contents.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Margins {
    pub left: u32,
    pub top: u32,
    pub right: u32,
    pub bottom: u32,
}

/// The top level window: a rounded panel with a drop shadow.
#[derive(Debug, Clone, PartialEq)]
pub struct WindowFrame {
    pub panel: Panel,
    pub shadow_brush: Brush,
    pub shadow_size: u32,
    pub shadow_offset: u32,
    pub padding: u32,
    pub spacing: u32,
    pub width: u32,
    pub palette: Palette,
    pub position: Option<Point>,
    pub visible: bool,
    pub always_on_top: bool,
}

impl Default for WindowFrame {
    fn default() -> Self {
        Self {
            panel: Panel::default(),
            shadow_brush: Color::TRANSPARENT.into(),
            shadow_size: 0,
            shadow_offset: 0,
            padding: 0,
            spacing: 0,
            width: 0,
            palette: Palette::default(),
            position: None,
            visible: false,
            always_on_top: true,
        }
    }
}

impl WindowFrame {
    pub fn apply_style(&mut self, style: &Style) {
        self.panel = Panel::new(
            style.window_background_brush.clone(),
            style.window_border_brush.clone(),
            style.window_border_width,
            style.window_border_radius,
        );
        self.shadow_brush = style.window_shadow_brush.clone();
        self.shadow_size = style.window_shadow_size;
        self.shadow_offset = style.window_shadow_offset;
        self.padding = style.window_padding;
        self.spacing = style.window_spacing;
        self.width = style.window_width;
        self.palette = style.palette;
    }

    /// The shadow is shifted down by the offset.
    #[must_use]
    pub fn margins(&self) -> Margins {
        Margins {
            left: self.shadow_size,
            top: self.shadow_size.saturating_sub(self.shadow_offset),
            right: self.shadow_size,
            bottom: self.shadow_size + self.shadow_offset,
        }
    }

    /// Width including the shadow margins.
    #[must_use]
    pub fn outer_width(&self) -> u32 {
        let m = self.margins();
        self.width + m.left + m.right
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_margins_follow_shadow_offset() {
        let mut frame = WindowFrame::default();
        frame.apply_style(&Style::default());
        assert_eq!(
            frame.margins(),
            Margins {
                left: 32,
                top: 24,
                right: 32,
                bottom: 40
            }
        );
        assert_eq!(frame.outer_width(), 640 + 64);
    }

    #[test]
    fn test_offset_larger_than_shadow_clamps_top() {
        let frame = WindowFrame {
            shadow_size: 4,
            shadow_offset: 10,
            ..WindowFrame::default()
        };
        assert_eq!(frame.margins().top, 0);
    }
}
