use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Style does not exist: {0}")]
    StyleNotFound(String),

    #[error("Could not find base style: {base} (in {})", .path.display())]
    BaseNotFound { base: String, path: PathBuf },

    #[error("Cyclic base styles: {}", render_paths(.chain))]
    BaseCycle { chain: Vec<PathBuf> },

    #[error("Syntax error in {}:{line}: {message}", .path.display())]
    Syntax {
        path: PathBuf,
        line: usize,
        message: String,
    },

    #[error("Key not found: {}", .chain.join(" > "))]
    DanglingReference { chain: Vec<String> },

    #[error("Cyclic reference: {}", .chain.join(" > "))]
    ReferenceCycle { chain: Vec<String> },

    #[error("Mandatory key missing in {}: {key} ({reason})", .path.display())]
    MandatoryKey {
        key: String,
        reason: String,
        path: PathBuf,
    },

    #[error("Invalid {kind} for {key} in {}: {value}", .path.display())]
    InvalidValue {
        key: String,
        kind: ValueKind,
        value: String,
        path: PathBuf,
    },

    #[error("Watcher error: {0}")]
    Watcher(#[from] notify::Error),
}

/// The typed value a style key failed to parse as
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueKind {
    Integer,
    IntegerRange,
    Float,
    Color,
    Brush,
}

impl std::fmt::Display for ValueKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            ValueKind::Integer => "integer",
            ValueKind::IntegerRange => "integer (out of range)",
            ValueKind::Float => "float",
            ValueKind::Color => "color",
            ValueKind::Brush => "brush",
        })
    }
}

fn render_paths(chain: &[PathBuf]) -> String {
    chain
        .iter()
        .map(|p| p.display().to_string())
        .collect::<Vec<_>>()
        .join(" > ")
}

impl Error {
    /// Whether this error comes from a style definition rather than the environment.
    #[must_use]
    pub fn is_configuration_error(&self) -> bool {
        !matches!(self, Error::Io(_) | Error::Json(_) | Error::Watcher(_))
    }
}

pub type Result<T> = std::result::Result<T, Error>;
