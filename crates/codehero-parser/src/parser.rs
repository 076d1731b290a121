//! Line cursor over a program: yields top-level statements in source order
//! and hands out the indented block that follows a loop header.

use crate::line::Line;
use crate::statement::{classify, Statement};
use codehero_types::{Result, SourceFile};
use tracing::trace;

/// A classified line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Parsed<'src> {
    pub line: Line<'src>,
    pub statement: Statement,
}

/// The CodeHero parser.
///
/// Top-level lines are classified lazily, one per call to
/// [`Parser::next_statement`], so that errors surface in source order
/// interleaved with whatever the caller does between statements.
pub struct Parser<'src> {
    /// All physical lines of the program.
    lines: Vec<Line<'src>>,
    /// Index of the next unread line.
    pos: usize,
}

impl<'src> Parser<'src> {
    /// Create a parser over the given source file.
    pub fn new(source_file: &'src SourceFile) -> Self {
        Self {
            lines: source_file
                .lines()
                .map(|(number, raw)| Line::new(number, raw))
                .collect(),
            pos: 0,
        }
    }

    /// Classify the next non-blank top-level line.
    ///
    /// Returns `None` at end of input.
    pub fn next_statement(&mut self) -> Option<Result<Parsed<'src>>> {
        while let Some(line) = self.lines.get(self.pos).copied() {
            self.pos += 1;
            if line.is_blank() {
                continue;
            }
            trace!(line = line.number, code = line.code, "classifying line");
            return Some(classify(&line).map(|statement| Parsed { line, statement }));
        }
        None
    }

    /// Consume the block following a loop header and return its non-blank
    /// lines.
    ///
    /// The block is the run of lines that are indented or blank, ending at
    /// the first line at outer indentation or at end of input. The cursor
    /// moves past the whole block.
    pub fn take_block(&mut self) -> Vec<Line<'src>> {
        let start = self.pos;
        let len = self.lines[start..]
            .iter()
            .take_while(|line| line.continues_block())
            .count();
        self.pos = start + len;
        self.lines[start..self.pos]
            .iter()
            .filter(|line| !line.is_blank())
            .copied()
            .collect()
    }
}
