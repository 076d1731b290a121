//! CodeHero parser: splits program text into lines and classifies each
//! line as one of the fixed statement forms.
//!
//! The grammar is line oriented. Comments run from `#` to end of line,
//! and a `for` header owns the indented lines that follow it.

mod line;
mod parser;
mod statement;

pub use line::{Line, COMMENT_MARKER, INDENT};
pub use parser::{Parsed, Parser};
pub use statement::{classify, is_identifier, Operand, Statement};
