//! Reader for the INI dialect style files are written in.
//!
//! Keys inside `[section]` become `section/key`; `[General]` holds top-level
//! keys. Unquoted values containing commas are list values whose items are
//! trimmed and joined back with `,`. Double-quoted values are taken verbatim.

use crate::error::{Error, Result};
use std::collections::BTreeMap;
use std::path::Path;

pub type IniEntries = BTreeMap<String, String>;

pub fn read_file(path: &Path) -> Result<IniEntries> {
    let text = std::fs::read_to_string(path)?;
    parse(&text, path)
}

pub fn parse(text: &str, path: &Path) -> Result<IniEntries> {
    let mut entries = IniEntries::new();
    let mut section = String::new();

    for (index, line) in text.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() || line.starts_with(';') || line.starts_with('#') {
            continue;
        }

        if let Some(header) = line.strip_prefix('[') {
            let Some(name) = header.strip_suffix(']') else {
                return Err(syntax(path, index, "unterminated section header"));
            };
            let name = name.trim();
            section = if name.eq_ignore_ascii_case("general") {
                String::new()
            } else {
                format!("{name}/")
            };
            continue;
        }

        let Some((key, value)) = line.split_once('=') else {
            return Err(syntax(path, index, "expected key = value"));
        };
        let key = key.trim();
        if key.is_empty() {
            return Err(syntax(path, index, "empty key"));
        }

        entries.insert(format!("{section}{key}"), parse_value(value.trim()));
    }

    Ok(entries)
}

fn syntax(path: &Path, index: usize, message: &str) -> Error {
    Error::Syntax {
        path: path.to_path_buf(),
        line: index + 1,
        message: message.to_string(),
    }
}

fn parse_value(value: &str) -> String {
    if value.len() >= 2 && value.starts_with('"') && value.ends_with('"') {
        return unescape(&value[1..value.len() - 1]);
    }
    if value.contains(',') {
        return value.split(',').map(str::trim).collect::<Vec<_>>().join(",");
    }
    value.to_string()
}

fn unescape(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    let mut chars = value.chars();
    while let Some(c) = chars.next() {
        if c == '\\' {
            match chars.next() {
                Some('n') => out.push('\n'),
                Some('t') => out.push('\t'),
                Some(other) => out.push(other),
                None => out.push('\\'),
            }
        } else {
            out.push(c);
        }
    }
    out
}

/// Quote a value so `parse` returns it unchanged.
#[must_use]
pub fn quote(value: &str) -> String {
    if !value.contains(',') && !value.contains('"') && value.trim() == value {
        return value.to_string();
    }
    let escaped = value.replace('\\', "\\\\").replace('"', "\\\"");
    format!("\"{escaped}\"")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse_str(text: &str) -> Result<IniEntries> {
        parse(text, Path::new("/styles/test.ini"))
    }

    #[test]
    fn test_sections_prefix_keys() {
        let entries = parse_str(
            "bases = Light\n\n[palette]\nbase = #fff\n\n[window]\nwindow_width = 700\n",
        )
        .unwrap();
        assert_eq!(entries["bases"], "Light");
        assert_eq!(entries["palette/base"], "#fff");
        assert_eq!(entries["window/window_width"], "700");
    }

    #[test]
    fn test_general_section_is_top_level() {
        let entries = parse_str("[General]\nbases=A, B\n").unwrap();
        assert_eq!(entries["bases"], "A,B");
    }

    #[test]
    fn test_comments_and_blank_lines_are_skipped() {
        let entries = parse_str("; comment\n# also\n\n[window]\nx=1\n").unwrap();
        assert_eq!(entries.len(), 1);
    }

    #[test]
    fn test_quoted_value_kept_verbatim() {
        let entries =
            parse_str("[window]\nbrush = \"linear-gradient(x1: 0, y1: 0, stop: 0 red)\"\n")
                .unwrap();
        assert_eq!(
            entries["window/brush"],
            "linear-gradient(x1: 0, y1: 0, stop: 0 red)"
        );
    }

    #[test]
    fn test_unquoted_list_is_joined() {
        let entries = parse_str("[window]\nbrush = linear-gradient(x1:0 , y1:0)\n").unwrap();
        assert_eq!(entries["window/brush"], "linear-gradient(x1:0,y1:0)");
    }

    #[test]
    fn test_last_duplicate_wins() {
        let entries = parse_str("[window]\nx=1\nx=2\n").unwrap();
        assert_eq!(entries["window/x"], "2");
    }

    #[test]
    fn test_syntax_error_names_line() {
        let err = parse_str("[window]\nx=1\nnot a pair\n").unwrap_err();
        match err {
            Error::Syntax { line, path, .. } => {
                assert_eq!(line, 3);
                assert_eq!(path, Path::new("/styles/test.ini"));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_quote_round_trip() {
        for value in ["plain", "a, b", "say \"hi\"", " padded "] {
            let text = format!("k = {}\n", quote(value));
            assert_eq!(parse_str(&text).unwrap()["k"], value);
        }
    }
}
