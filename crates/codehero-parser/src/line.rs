//! Physical line scanning: comment stripping and indentation.

/// Everything from this character to end of line is ignored.
pub const COMMENT_MARKER: char = '#';

/// One level of block indentation. A leading tab counts as well.
pub const INDENT: &str = "    ";

/// A single physical source line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Line<'src> {
    /// 1-based line number.
    pub number: u32,
    /// The line as written (without the line terminator).
    pub raw: &'src str,
    /// The line with its comment removed and surrounding whitespace trimmed.
    pub code: &'src str,
    /// Whether the line starts with the indentation marker.
    pub indented: bool,
}

impl<'src> Line<'src> {
    pub fn new(number: u32, raw: &'src str) -> Self {
        let code = raw
            .split_once(COMMENT_MARKER)
            .map_or(raw, |(code, _)| code)
            .trim();
        Self {
            number,
            raw,
            code,
            indented: raw.starts_with(INDENT) || raw.starts_with('\t'),
        }
    }

    /// No code on this line (empty, whitespace, or comment only).
    pub fn is_blank(&self) -> bool {
        self.code.is_empty()
    }

    /// Whether this line continues a loop block: it is indented or
    /// contains nothing but whitespace.
    pub fn continues_block(&self) -> bool {
        self.indented || self.raw.trim().is_empty()
    }
}
