use crate::style::{Brush, Color};

/// A rounded, bordered rectangle. Composed into every container that paints
/// a background.
#[derive(Debug, Clone, PartialEq)]
pub struct Panel {
    pub background: Brush,
    pub border: Brush,
    pub border_width: f64,
    pub border_radius: f64,
}

impl Default for Panel {
    fn default() -> Self {
        Self {
            background: Color::TRANSPARENT.into(),
            border: Color::TRANSPARENT.into(),
            border_width: 0.0,
            border_radius: 0.0,
        }
    }
}

impl Panel {
    #[must_use]
    pub fn new(background: Brush, border: Brush, border_width: f64, border_radius: f64) -> Self {
        Self {
            background,
            border,
            border_width,
            border_radius,
        }
    }

    /// Whether drawing this panel would produce any pixels.
    #[must_use]
    pub fn is_visible(&self) -> bool {
        let paints = |brush: &Brush| brush.solid_color().is_none_or(|c| c.a > 0);
        paints(&self.background) || (self.border_width > 0.0 && paints(&self.border))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_panel_is_invisible() {
        assert!(!Panel::default().is_visible());
    }

    #[test]
    fn test_border_only_counts_with_width() {
        let mut panel = Panel {
            border: Color::BLACK.into(),
            ..Panel::default()
        };
        assert!(!panel.is_visible());
        panel.border_width = 1.0;
        assert!(panel.is_visible());
    }
}
