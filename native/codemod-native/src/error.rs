use std::path::PathBuf;
use thiserror::Error;

// ═══════════════════════════════════════════════════════════════════════════════
// ERROR CODES
// ═══════════════════════════════════════════════════════════════════════════════

pub const ERR_PARSE: &str = "CM-ERR-PARSE-001";
pub const ERR_NAMING_CONVENTION: &str = "CM-ERR-NAMING-001";
pub const ERR_OVERLAPPING_EDIT: &str = "CM-ERR-EDIT-001";
pub const ERR_INVALID_OUTPUT: &str = "CM-ERR-OUTPUT-001";
pub const ERR_IO: &str = "CM-ERR-IO-001";

/// Every failure that aborts the transform of a single file.
///
/// None of these carry partial output: a file either transforms completely
/// or is left as it was.
#[derive(Error, Debug)]
pub enum TransformError {
    #[error("Failed to parse {path}: {}", .messages.join("; "))]
    Parse { path: String, messages: Vec<String> },

    #[error("Invalid icon binding '{binding}': {reason}")]
    NamingConvention { binding: String, reason: String },

    #[error("Rewrite edits overlap at {start}..{end}")]
    OverlappingEdit { start: u32, end: u32 },

    #[error("Rewritten source no longer parses: {}", .messages.join("; "))]
    InvalidOutput { messages: Vec<String> },

    #[error("I/O error on {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl TransformError {
    pub fn naming(binding: &str, reason: impl Into<String>) -> Self {
        Self::NamingConvention {
            binding: binding.to_string(),
            reason: reason.into(),
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            TransformError::Parse { .. } => ERR_PARSE,
            TransformError::NamingConvention { .. } => ERR_NAMING_CONVENTION,
            TransformError::OverlappingEdit { .. } => ERR_OVERLAPPING_EDIT,
            TransformError::InvalidOutput { .. } => ERR_INVALID_OUTPUT,
            TransformError::Io { .. } => ERR_IO,
        }
    }
}

pub type Result<T, E = TransformError> = std::result::Result<T, E>;
