use crate::style::{Color, Style};
use std::time::Duration;

/// Revolutions per second while idle.
pub const SPEED_IDLE: f64 = 0.2;
/// Revolutions per second while a query runs.
pub const SPEED_BUSY: f64 = 0.5;

const SPEED_DURATION: Duration = Duration::from_millis(3000);
const FADE_DURATION: Duration = Duration::from_millis(500);
const HIGHLIGHT_DURATION: Duration = Duration::from_millis(1000);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Easing {
    OutQuad,
    InOutQuad,
}

/// A property animation the renderer runs towards `end`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Animation<T> {
    pub end: T,
    pub duration: Duration,
    pub easing: Easing,
}

/// The spinning gear in the input frame.
#[derive(Debug, Clone, PartialEq)]
pub struct SettingsButton {
    /// Current color, animated between the base and highlight colors.
    pub color: Color,
    pub base_color: Color,
    pub highlight_color: Color,
    pub visible: bool,
    pub speed: f64,
    color_animation: Option<Animation<Color>>,
    /// Hide once the running color animation finishes.
    hide_on_finish: bool,
    speed_animation: Option<Animation<f64>>,
}

impl Default for SettingsButton {
    fn default() -> Self {
        Self {
            color: Color::TRANSPARENT,
            base_color: Color::TRANSPARENT,
            highlight_color: Color::TRANSPARENT,
            visible: false,
            speed: SPEED_IDLE,
            color_animation: None,
            hide_on_finish: false,
            speed_animation: None,
        }
    }
}

impl SettingsButton {
    pub fn apply_style(&mut self, style: &Style) {
        self.base_color = style.settings_button_color;
        self.highlight_color = style.settings_button_highlight_color;
        if self.visible {
            self.color = self.base_color;
        }
    }

    #[must_use]
    pub fn color_animation(&self) -> Option<&Animation<Color>> {
        self.color_animation.as_ref()
    }

    #[must_use]
    pub fn speed_animation(&self) -> Option<&Animation<f64>> {
        self.speed_animation.as_ref()
    }

    /// Fade out, then hide.
    pub fn fade_out(&mut self) {
        self.animate_color(self.color.with_alpha(0), FADE_DURATION);
        self.hide_on_finish = true;
    }

    pub fn fade_in(&mut self) {
        self.visible = true;
        self.animate_color(self.base_color, FADE_DURATION);
    }

    pub fn highlight(&mut self) {
        self.visible = true;
        self.animate_color(self.highlight_color, HIGHLIGHT_DURATION);
    }

    pub fn spin_slow(&mut self) {
        self.speed_animation = Some(Animation {
            end: SPEED_IDLE,
            duration: SPEED_DURATION,
            easing: Easing::OutQuad,
        });
    }

    pub fn spin_fast(&mut self) {
        self.speed_animation = Some(Animation {
            end: SPEED_BUSY,
            duration: SPEED_DURATION,
            easing: Easing::InOutQuad,
        });
    }

    /// Jump every running animation to its end value.
    pub fn finish_animations(&mut self) {
        if let Some(animation) = self.color_animation.take() {
            self.color = animation.end;
            if std::mem::take(&mut self.hide_on_finish) {
                self.visible = false;
            }
        }
        if let Some(animation) = self.speed_animation.take() {
            self.speed = animation.end;
        }
    }

    fn animate_color(&mut self, end: Color, duration: Duration) {
        self.hide_on_finish = false;
        self.color_animation = Some(Animation {
            end,
            duration,
            easing: Easing::OutQuad,
        });
    }
}
