//! Screen geometry and window placement.

use serde::{Deserialize, Serialize};
use tracing::warn;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    #[must_use]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

/// A screen's available geometry.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl Rect {
    #[must_use]
    pub const fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    #[must_use]
    pub fn contains(&self, point: Point) -> bool {
        point.x >= self.x
            && point.y >= self.y
            && point.x < self.x + self.width
            && point.y < self.y + self.height
    }

    #[must_use]
    pub fn center_x(&self) -> i32 {
        self.x + self.width / 2
    }
}

/// What the window needs to know about the desktop it runs on.
pub trait Desktop {
    fn cursor_position(&self) -> Point;

    /// The screen containing `point`, if any.
    fn screen_at(&self, point: Point) -> Option<Rect>;

    fn primary_screen(&self) -> Rect;

    fn dark_mode(&self) -> bool;

    /// Whether showing the window should also raise and activate it.
    fn raise_on_show(&self) -> bool {
        !cfg!(target_os = "macos")
    }

    fn is_on_screen(&self, point: Point) -> bool {
        self.screen_at(point).is_some()
    }
}

/// The screen a centered window goes to.
pub fn target_screen(desktop: &dyn Desktop, follow_cursor: bool) -> Rect {
    if follow_cursor {
        if let Some(screen) = desktop.screen_at(desktop.cursor_position()) {
            return screen;
        }
        warn!("Could not retrieve screen for cursor position. Using primary screen.");
    }
    desktop.primary_screen()
}

/// Horizontally centered, a fifth of the screen height from the top.
#[must_use]
pub fn centered_position(screen: Rect, frame_width: i32) -> Point {
    Point::new(
        screen.center_x() - frame_width / 2,
        screen.y + screen.height / 5,
    )
}

/// A fixed desktop, for headless hosts and tests.
#[derive(Debug, Clone)]
pub struct StaticDesktop {
    pub screens: Vec<Rect>,
    pub cursor: Point,
    pub dark_mode: bool,
}

impl Default for StaticDesktop {
    fn default() -> Self {
        Self {
            screens: vec![Rect::new(0, 0, 1920, 1080)],
            cursor: Point::default(),
            dark_mode: false,
        }
    }
}

impl Desktop for StaticDesktop {
    fn cursor_position(&self) -> Point {
        self.cursor
    }

    fn screen_at(&self, point: Point) -> Option<Rect> {
        self.screens.iter().copied().find(|s| s.contains(point))
    }

    fn primary_screen(&self) -> Rect {
        self.screens.first().copied().unwrap_or_default()
    }

    fn dark_mode(&self) -> bool {
        self.dark_mode
    }
}
