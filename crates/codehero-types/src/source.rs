use std::ops::Range;

/// Program text split into physical lines.
///
/// Line terminators (`\n`, `\r\n`) are not part of any line. A trailing
/// newline opens one final empty line, so `""` has one line and `"a\n"` two.
#[derive(Debug, Clone)]
pub struct SourceFile {
    text: String,
    /// Byte span of each line in `text`, terminator excluded.
    spans: Vec<Range<usize>>,
}

impl SourceFile {
    pub fn new(text: impl Into<String>) -> Self {
        let text = text.into();
        let mut offset = 0;
        let spans = text
            .split('\n')
            .map(|raw| {
                let span = offset..offset + raw.trim_end_matches('\r').len();
                offset += raw.len() + 1;
                span
            })
            .collect();
        Self { text, spans }
    }

    /// `(line_number, text)` pairs with 1-based numbers.
    pub fn lines(&self) -> impl Iterator<Item = (u32, &str)> + '_ {
        (1u32..)
            .zip(&self.spans)
            .map(|(number, span)| (number, &self.text[span.clone()]))
    }
}
