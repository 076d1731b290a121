//! Shared types for the CodeHero command language.
//!
//! This crate defines the move actions produced by the compiler, grid
//! positions and directions consumed by the executor, source files, and
//! the structured compile error reported back to the learner.

mod action;
mod error;
mod source;

pub use action::{Action, ActionSequence, Direction, Position};
pub use error::{CompileError, ErrorCategory, ErrorCode};
pub use source::SourceFile;

/// Result type used throughout the CodeHero compiler.
pub type Result<T> = std::result::Result<T, CompileError>;
