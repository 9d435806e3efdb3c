use super::brush::Brush;
use super::color::Color;
use super::entries::RawEntries;
use super::fields::{FieldMut, PALETTE_PREFIX, Style};
use super::palette::{CoreRoles, Palette, Shades};
use super::registry::StyleRegistry;
use super::resolve::Resolver;
use crate::error::{Error, Result, ValueKind};
use std::path::{Path, PathBuf};
use tracing::debug;

/// A style together with every file it was read from.
#[derive(Debug, Clone, PartialEq)]
pub struct LoadedStyle {
    pub style: Style,
    pub sources: Vec<PathBuf>,
}

/// Reads style definitions found through a registry.
///
/// Reading never touches a previously returned `Style`; callers fall back
/// explicitly when a read fails.
#[derive(Debug, Clone)]
pub struct StyleReader {
    registry: StyleRegistry,
    default_palette: Palette,
}

impl StyleReader {
    #[must_use]
    pub fn new(directories: Vec<PathBuf>) -> Self {
        Self::with_registry(StyleRegistry::scan(directories))
    }

    #[must_use]
    pub fn with_registry(registry: StyleRegistry) -> Self {
        Self {
            registry,
            default_palette: Palette::default(),
        }
    }

    /// Palette for styles that define no `palette/` keys.
    #[must_use]
    pub fn default_palette(mut self, palette: Palette) -> Self {
        self.default_palette = palette;
        self
    }

    #[must_use]
    pub fn registry(&self) -> &StyleRegistry {
        &self.registry
    }

    pub fn read(&self, name: &str) -> Result<Style> {
        self.load(name).map(|loaded| loaded.style)
    }

    pub fn read_path(&self, path: &Path) -> Result<Style> {
        self.load_path(path).map(|loaded| loaded.style)
    }

    pub fn load(&self, name: &str) -> Result<LoadedStyle> {
        let path = self
            .registry
            .path(name)
            .ok_or_else(|| Error::StyleNotFound(name.to_string()))?;
        self.load_path(path)
    }

    pub fn load_path(&self, path: &Path) -> Result<LoadedStyle> {
        debug!("Reading style {}", path.display());
        let raw = RawEntries::load(path, &self.registry)?;
        let style = Extractor::new(&raw, path).style(&self.default_palette)?;
        Ok(LoadedStyle {
            style,
            sources: raw.sources,
        })
    }
}

struct Extractor<'a> {
    raw: &'a RawEntries,
    resolver: Resolver<'a>,
    path: &'a Path,
}

impl<'a> Extractor<'a> {
    fn new(raw: &'a RawEntries, path: &'a Path) -> Self {
        Self {
            raw,
            resolver: Resolver::new(&raw.entries),
            path,
        }
    }

    fn style(&self, default_palette: &Palette) -> Result<Style> {
        self.resolver.check_cycles()?;

        let has_palette = self
            .raw
            .entries
            .keys()
            .any(|k| k.starts_with(PALETTE_PREFIX));

        let palette = if has_palette {
            self.palette()?
        } else {
            *default_palette
        };
        let mut style = Style::from_palette(&palette);

        for (key, field) in style.fields_mut() {
            self.optional(key, field)?;
        }
        Ok(style)
    }

    fn palette(&self) -> Result<Palette> {
        let roles = CoreRoles {
            base: self.mandatory_color("palette/base")?,
            text: self.mandatory_color("palette/text")?,
            window: self.mandatory_color("palette/window")?,
            window_text: self.mandatory_color("palette/window_text")?,
            button: self.mandatory_color("palette/button")?,
            button_text: self.mandatory_color("palette/button_text")?,
            highlight: self.mandatory_color("palette/highlight")?,
            highlighted_text: self.mandatory_color("palette/highlight_text")?,
            placeholder_text: self.mandatory_color("palette/placeholder_text")?,
            link: self.mandatory_color("palette/link")?,
            link_visited: self.mandatory_color("palette/link_visited")?,
        };

        let shades = self
            .shades()
            .inspect_err(|e| debug!("Deriving palette shades from button color: {e}"))
            .ok();

        Ok(Palette::from_roles(roles, shades))
    }

    fn shades(&self) -> Result<Shades> {
        Ok(Shades {
            light: self.mandatory_color("palette/light")?,
            mid: self.mandatory_color("palette/mid")?,
            dark: self.mandatory_color("palette/dark")?,
        })
    }

    fn mandatory_color(&self, key: &str) -> Result<Color> {
        let raw = match self.resolver.resolve(key) {
            Ok(Some(raw)) => raw,
            Ok(None) => return Err(self.missing(key, "not set".to_string())),
            Err(e @ Error::DanglingReference { .. }) => {
                return Err(self.missing(key, e.to_string()));
            }
            Err(e) => return Err(e),
        };
        Color::parse(raw).ok_or_else(|| self.invalid(key, ValueKind::Color, raw))
    }

    fn optional(&self, key: &str, field: FieldMut<'_>) -> Result<()> {
        let Some(raw) = self.resolver.resolve(key)? else {
            return Ok(());
        };

        match field {
            FieldMut::Uint(out) => *out = self.uint(key, raw)?,
            FieldMut::Float(out) => {
                *out = raw
                    .trim()
                    .parse::<f64>()
                    .ok()
                    .filter(|v| v.is_finite())
                    .ok_or_else(|| self.invalid(key, ValueKind::Float, raw))?;
            }
            FieldMut::Color(out) => {
                *out = Color::parse(raw).ok_or_else(|| self.invalid(key, ValueKind::Color, raw))?;
            }
            FieldMut::Brush(out) => {
                *out = Brush::parse(raw, self.path)
                    .ok_or_else(|| self.invalid(key, ValueKind::Brush, raw))?;
            }
        }
        Ok(())
    }

    fn uint(&self, key: &str, raw: &str) -> Result<u32> {
        let value = raw
            .trim()
            .parse::<i64>()
            .map_err(|_| self.invalid(key, ValueKind::Integer, raw))?;
        u32::try_from(value).map_err(|_| self.invalid(key, ValueKind::IntegerRange, raw))
    }

    fn missing(&self, key: &str, reason: String) -> Error {
        Error::MandatoryKey {
            key: key.to_string(),
            reason,
            path: self.path.to_path_buf(),
        }
    }

    fn invalid(&self, key: &str, kind: ValueKind, raw: &str) -> Error {
        Error::InvalidValue {
            key: key.to_string(),
            kind,
            value: raw.to_string(),
            path: self.path.to_path_buf(),
        }
    }
}
