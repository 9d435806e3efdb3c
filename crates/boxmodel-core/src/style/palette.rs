use super::color::Color;
use serde::{Deserialize, Serialize};

/// Color roles every style derives its defaults from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Palette {
    pub base: Color,
    pub text: Color,
    pub window: Color,
    pub window_text: Color,
    pub button: Color,
    pub button_text: Color,
    pub light: Color,
    pub mid: Color,
    pub dark: Color,
    pub highlight: Color,
    pub highlighted_text: Color,
    pub placeholder_text: Color,
    pub link: Color,
    pub link_visited: Color,
}

/// The eleven roles a palette override must define.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CoreRoles {
    pub base: Color,
    pub text: Color,
    pub window: Color,
    pub window_text: Color,
    pub button: Color,
    pub button_text: Color,
    pub highlight: Color,
    pub highlighted_text: Color,
    pub placeholder_text: Color,
    pub link: Color,
    pub link_visited: Color,
}

/// The optional 3D shades, defined together or derived together.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Shades {
    pub light: Color,
    pub mid: Color,
    pub dark: Color,
}

impl Shades {
    #[must_use]
    pub fn derive_from(button: Color) -> Self {
        let mid = button.darker(200);
        Self {
            light: button.lighter(150),
            mid,
            dark: mid.darker(200),
        }
    }
}

impl Palette {
    #[must_use]
    pub fn from_roles(roles: CoreRoles, shades: Option<Shades>) -> Self {
        let Shades { light, mid, dark } =
            shades.unwrap_or_else(|| Shades::derive_from(roles.button));
        Self {
            base: roles.base,
            text: roles.text,
            window: roles.window,
            window_text: roles.window_text,
            button: roles.button,
            button_text: roles.button_text,
            light,
            mid,
            dark,
            highlight: roles.highlight,
            highlighted_text: roles.highlighted_text,
            placeholder_text: roles.placeholder_text,
            link: roles.link,
            link_visited: roles.link_visited,
        }
    }

    #[must_use]
    pub fn light() -> Self {
        Self::from_roles(
            CoreRoles {
                base: Color::WHITE,
                text: Color::BLACK,
                window: Color::rgb(0xef, 0xef, 0xef),
                window_text: Color::BLACK,
                button: Color::rgb(0xef, 0xef, 0xef),
                button_text: Color::BLACK,
                highlight: Color::rgb(0x30, 0x8c, 0xc6),
                highlighted_text: Color::WHITE,
                placeholder_text: Color::rgba(0, 0, 0, 0x80),
                link: Color::rgb(0, 0, 0xff),
                link_visited: Color::rgb(0xff, 0, 0xff),
            },
            None,
        )
    }

    #[must_use]
    pub fn dark() -> Self {
        Self::from_roles(
            CoreRoles {
                base: Color::rgb(0x1e, 0x1e, 0x1e),
                text: Color::WHITE,
                window: Color::rgb(0x32, 0x32, 0x32),
                window_text: Color::WHITE,
                button: Color::rgb(0x35, 0x35, 0x35),
                button_text: Color::WHITE,
                highlight: Color::rgb(0x2a, 0x82, 0xda),
                highlighted_text: Color::WHITE,
                placeholder_text: Color::rgba(0xff, 0xff, 0xff, 0x80),
                link: Color::rgb(0x2a, 0x82, 0xda),
                link_visited: Color::rgb(0xa0, 0x70, 0xd0),
            },
            None,
        )
    }

    /// Platform-like palette for the given appearance mode.
    #[must_use]
    pub fn system(dark_mode: bool) -> Self {
        if dark_mode { Self::dark() } else { Self::light() }
    }
}

impl Default for Palette {
    fn default() -> Self {
        Self::light()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shades_derive_from_button() {
        let button = Color::rgb(100, 100, 100);
        let shades = Shades::derive_from(button);
        assert_eq!(shades.light, Color::rgb(150, 150, 150));
        assert_eq!(shades.mid, Color::rgb(50, 50, 50));
        assert_eq!(shades.dark, Color::rgb(25, 25, 25));
    }

    #[test]
    fn test_system_palette_follows_mode() {
        assert_eq!(Palette::system(false), Palette::light());
        assert_eq!(Palette::system(true), Palette::dark());
        assert_ne!(Palette::light().window, Palette::dark().window);
    }

    #[test]
    fn test_explicit_shades_are_kept() {
        let mut roles_palette = Palette::light();
        let shades = Shades {
            light: Color::rgb(1, 1, 1),
            mid: Color::rgb(2, 2, 2),
            dark: Color::rgb(3, 3, 3),
        };
        let palette = Palette::from_roles(
            CoreRoles {
                base: roles_palette.base,
                text: roles_palette.text,
                window: roles_palette.window,
                window_text: roles_palette.window_text,
                button: roles_palette.button,
                button_text: roles_palette.button_text,
                highlight: roles_palette.highlight,
                highlighted_text: roles_palette.highlighted_text,
                placeholder_text: roles_palette.placeholder_text,
                link: roles_palette.link,
                link_visited: roles_palette.link_visited,
            },
            Some(shades),
        );
        roles_palette.light = shades.light;
        roles_palette.mid = shades.mid;
        roles_palette.dark = shades.dark;
        assert_eq!(palette, roles_palette);
    }
}
