//! CodeHero compiler: turns program text into an [`ActionSequence`].
//!
//! ```text
//! Source → Parser (line classification) → Compiler (resolve + unroll) → [Action]
//! ```
//!
//! Variables are resolved and loops are unrolled ahead of execution, so the
//! executor only ever sees a flat list of unit moves. Compilation never
//! touches the grid.

mod compiler;
mod symbols;

pub use compiler::Compiler;
pub use symbols::SymbolTable;

use codehero_types::{ActionSequence, CompileError, Result, SourceFile};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use tracing::instrument;

/// Compiler settings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CompilerOptions {
    /// Upper bound on the number of actions a program may expand to.
    /// `None` means unlimited.
    pub max_actions: Option<usize>,
}

/// Compile a program with default options.
pub fn compile(source: &str) -> Result<ActionSequence> {
    compile_with_options(source, &CompilerOptions::default())
}

/// Compile a program with explicit options.
#[instrument(level = "debug", skip(source), fields(bytes = source.len()))]
pub fn compile_with_options(source: &str, options: &CompilerOptions) -> Result<ActionSequence> {
    let source_file = SourceFile::new(source);
    Compiler::new(&source_file, options.clone()).compile()
}

/// The serialisable outcome of a compile, for hosts that speak JSON.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompileResult {
    pub success: bool,
    pub actions: Option<ActionSequence>,
    pub error: Option<CompileError>,
    /// Hex SHA-256 of the program text.
    pub source_hash: String,
}

/// Compile and wrap the outcome in a [`CompileResult`].
pub fn compile_to_result(source: &str, options: &CompilerOptions) -> CompileResult {
    let source_hash = source_hash(source);
    match compile_with_options(source, options) {
        Ok(actions) => CompileResult {
            success: true,
            actions: Some(actions),
            error: None,
            source_hash,
        },
        Err(error) => CompileResult {
            success: false,
            actions: None,
            error: Some(error),
            source_hash,
        },
    }
}

/// Hex-encoded SHA-256 of a program's text.
pub fn source_hash(source: &str) -> String {
    Sha256::digest(source.as_bytes())
        .iter()
        .map(|b| format!("{b:02x}"))
        .collect()
}
