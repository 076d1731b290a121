use serde::{Deserialize, Serialize};
use std::fmt;

/// Error category, determined by error code range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ErrorCategory {
    Syntax,
    Scope,
    Structure,
}

/// Numeric error code (E100–E399).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ErrorCode(pub u16);

impl ErrorCode {
    // ── Syntax errors (E100–E199) ──
    pub const UNRECOGNIZED_STATEMENT: Self = Self(100);
    pub const MALFORMED_LOOP_HEADER: Self = Self(101);
    pub const MALFORMED_MOVE_CALL: Self = Self(102);
    pub const UNKNOWN_DIRECTION: Self = Self(103);
    pub const INVALID_VARIABLE_NAME: Self = Self(104);
    pub const INVALID_INTEGER: Self = Self(105);

    // ── Scope errors (E200–E299) ──
    pub const UNDEFINED_VARIABLE: Self = Self(200);

    // ── Structure errors (E300–E399) ──
    pub const UNSUPPORTED_IN_LOOP: Self = Self(300);
    pub const ACTION_LIMIT_EXCEEDED: Self = Self(301);

    /// Get the category for this error code.
    pub fn category(self) -> ErrorCategory {
        match self.0 {
            200..=299 => ErrorCategory::Scope,
            300..=399 => ErrorCategory::Structure,
            _ => ErrorCategory::Syntax,
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "E{}", self.0)
    }
}

impl fmt::Display for ErrorCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Syntax => write!(f, "syntax"),
            Self::Scope => write!(f, "scope"),
            Self::Structure => write!(f, "structure"),
        }
    }
}

/// A structured compile error.
///
/// Compilation stops at the first error, so a failed compile yields exactly
/// one of these. The UI layer renders it (and may forward `message` to a
/// hint service); it must not parse the `Display` output.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompileError {
    /// Error code (e.g., E200).
    pub code: ErrorCode,
    /// Error category (derived from code).
    pub category: ErrorCategory,
    /// Human-readable error message.
    pub message: String,
    /// 1-based line the error was detected on.
    pub line: u32,
    /// The exact source line for context.
    pub source_line: String,
    /// Optional fix suggestion.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub suggestion: Option<String>,
}

impl CompileError {
    /// Create a new error.
    pub fn new(
        code: ErrorCode,
        message: impl Into<String>,
        line: u32,
        source_line: impl Into<String>,
    ) -> Self {
        Self {
            code,
            category: code.category(),
            message: message.into(),
            line,
            source_line: source_line.into(),
            suggestion: None,
        }
    }

    /// Attach a fix suggestion.
    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestion = Some(suggestion.into());
        self
    }
}

impl fmt::Display for CompileError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "line {}: {} [{}] {}",
            self.line, self.code, self.category, self.message
        )
    }
}

impl std::error::Error for CompileError {}
