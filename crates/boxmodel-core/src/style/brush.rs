//! Brushes: solid colors, linear gradients and images.
//!
//! Function syntax is `name(arg: value, arg: value, ...)`. Arguments may
//! repeat (gradient stops) and keep their declaration order.

use super::color::Color;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;

static FUNCTION_RE: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"^([\w-]+)\((.+)\)$").ok());

static ARGUMENT_RE: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"^\s*(\w+)\s*:\s*(.+?)\s*$").ok());

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Brush {
    Solid(Color),
    LinearGradient(LinearGradient),
    Image(PathBuf),
}

/// Gradient in object coordinates, (0, 0) top left and (1, 1) bottom right.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LinearGradient {
    pub start: (f64, f64),
    pub end: (f64, f64),
    pub stops: Vec<GradientStop>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GradientStop {
    pub position: f64,
    pub color: Color,
}

impl From<Color> for Brush {
    fn from(color: Color) -> Self {
        Brush::Solid(color)
    }
}

impl Brush {
    /// Parse a brush literal. Relative image sources resolve against the
    /// directory of `style_path`.
    #[must_use]
    pub fn parse(text: &str, style_path: &Path) -> Option<Self> {
        let text = text.trim();
        if let Some((name, args)) = parse_function(text) {
            return match name {
                "linear-gradient" => parse_linear_gradient(&args).map(Brush::LinearGradient),
                "image" => parse_image(&args, style_path),
                _ => {
                    tracing::debug!("Unknown brush function: {name}");
                    None
                }
            };
        }
        Color::parse(text).map(Brush::Solid)
    }

    /// The color of a solid brush.
    #[must_use]
    pub fn solid_color(&self) -> Option<Color> {
        match self {
            Brush::Solid(color) => Some(*color),
            _ => None,
        }
    }

    #[must_use]
    pub fn is_opaque(&self) -> bool {
        match self {
            Brush::Solid(color) => color.a == 255,
            Brush::LinearGradient(gradient) => gradient.stops.iter().all(|s| s.color.a == 255),
            Brush::Image(_) => false,
        }
    }
}

fn parse_function(text: &str) -> Option<(&str, Vec<(String, String)>)> {
    let function_re = FUNCTION_RE.as_ref()?;
    let argument_re = ARGUMENT_RE.as_ref()?;

    let captures = function_re.captures(text)?;
    let name = captures.get(1)?.as_str();
    let simplified = captures
        .get(2)?
        .as_str()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ");

    let mut args = Vec::new();
    for arg in simplified.split(',') {
        let Some(arg_captures) = argument_re.captures(arg) else {
            tracing::debug!("Invalid brush argument: {arg}");
            return None;
        };
        args.push((
            arg_captures[1].to_string(),
            unquote(&arg_captures[2]).to_string(),
        ));
    }
    Some((name, args))
}

fn unquote(value: &str) -> &str {
    value
        .strip_prefix('"')
        .and_then(|v| v.strip_suffix('"'))
        .unwrap_or(value)
}

fn first_arg<'a>(args: &'a [(String, String)], name: &str) -> Option<&'a str> {
    args.iter()
        .find(|(k, _)| k == name)
        .map(|(_, v)| v.as_str())
}

fn coordinate(args: &[(String, String)], name: &str) -> Option<f64> {
    first_arg(args, name)?
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
}

fn parse_linear_gradient(args: &[(String, String)]) -> Option<LinearGradient> {
    let start = (coordinate(args, "x1")?, coordinate(args, "y1")?);
    let end = (coordinate(args, "x2")?, coordinate(args, "y2")?);

    let stops = args
        .iter()
        .filter(|(k, _)| k == "stop")
        .map(|(_, v)| parse_stop(v))
        .collect::<Option<Vec<_>>>()?;

    if stops.is_empty() {
        tracing::debug!("Linear gradient without stops");
        return None;
    }

    Some(LinearGradient { start, end, stops })
}

fn parse_stop(text: &str) -> Option<GradientStop> {
    let parts: Vec<&str> = text.split_whitespace().collect();
    let [position, color] = parts.as_slice() else {
        tracing::debug!("Invalid gradient stop: {text}");
        return None;
    };
    let position = position
        .parse::<f64>()
        .ok()
        .filter(|p| (0.0..=1.0).contains(p))?;
    let color = Color::parse(color)?;
    Some(GradientStop { position, color })
}

fn parse_image(args: &[(String, String)], style_path: &Path) -> Option<Brush> {
    let src = Path::new(first_arg(args, "src")?);
    if src.is_absolute() {
        return Some(Brush::Image(src.to_path_buf()));
    }
    let dir = style_path.parent().unwrap_or_else(|| Path::new(""));
    Some(Brush::Image(dir.join(src)))
}

impl fmt::Display for Brush {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Brush::Solid(color) => write!(f, "{color}"),
            Brush::LinearGradient(gradient) => {
                write!(
                    f,
                    "linear-gradient(x1: {}, y1: {}, x2: {}, y2: {}",
                    gradient.start.0, gradient.start.1, gradient.end.0, gradient.end.1
                )?;
                for stop in &gradient.stops {
                    write!(f, ", stop: {} {}", stop.position, stop.color)?;
                }
                f.write_str(")")
            }
            Brush::Image(path) => write!(f, "image(src: {})", path.display()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn style_path() -> PathBuf {
        PathBuf::from("/styles/Mine.ini")
    }

    #[test]
    fn test_solid_color() {
        assert_eq!(
            Brush::parse("#ff0000", &style_path()),
            Some(Brush::Solid(Color::rgb(255, 0, 0)))
        );
    }

    #[test]
    fn test_linear_gradient_keeps_stop_order() {
        let brush = Brush::parse(
            "linear-gradient(x1:0, y1:0, x2:0, y2:1, stop:0 #ffffff, stop:\"0.5 red\", stop:1 black)",
            &style_path(),
        )
        .unwrap();
        let Brush::LinearGradient(gradient) = brush else {
            panic!("expected gradient");
        };
        assert_eq!(gradient.start, (0.0, 0.0));
        assert_eq!(gradient.end, (0.0, 1.0));
        let positions: Vec<f64> = gradient.stops.iter().map(|s| s.position).collect();
        assert_eq!(positions, vec![0.0, 0.5, 1.0]);
        assert_eq!(gradient.stops[1].color, Color::rgb(255, 0, 0));
    }

    #[test]
    fn test_gradient_requires_all_coordinates_and_stops() {
        let path = style_path();
        assert!(Brush::parse("linear-gradient(x1:0, y1:0, x2:0, stop:0 red)", &path).is_none());
        assert!(Brush::parse("linear-gradient(x1:0, y1:0, x2:0, y2:1)", &path).is_none());
    }

    #[test]
    fn test_gradient_rejects_bad_stops() {
        let path = style_path();
        assert!(
            Brush::parse("linear-gradient(x1:0, y1:0, x2:0, y2:1, stop:0 red blue)", &path)
                .is_none()
        );
        assert!(
            Brush::parse("linear-gradient(x1:0, y1:0, x2:0, y2:1, stop:2 red)", &path).is_none()
        );
        assert!(
            Brush::parse("linear-gradient(x1:0, y1:0, x2:0, y2:1, stop:0 nocolor)", &path)
                .is_none()
        );
    }

    #[test]
    fn test_image_relative_to_style_file() {
        assert_eq!(
            Brush::parse("image(src: bg.png)", &style_path()),
            Some(Brush::Image(PathBuf::from("/styles/bg.png")))
        );
        assert_eq!(
            Brush::parse("image(src: /abs/bg.png)", &style_path()),
            Some(Brush::Image(PathBuf::from("/abs/bg.png")))
        );
    }

    #[test]
    fn test_unknown_function_and_malformed_args() {
        let path = style_path();
        assert!(Brush::parse("radial-gradient(cx: 0)", &path).is_none());
        assert!(Brush::parse("image(bg.png)", &path).is_none());
        assert!(Brush::parse("not a brush", &path).is_none());
    }

    #[test]
    fn test_display_round_trips_through_parser() {
        let path = style_path();
        let original = Brush::parse(
            "linear-gradient(x1:0, y1:0, x2:1, y2:1, stop:0 #80000000, stop:1 white)",
            &path,
        )
        .unwrap();
        assert_eq!(Brush::parse(&original.to_string(), &path), Some(original));
    }
}
