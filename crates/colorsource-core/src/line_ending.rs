//! Line ending helpers.
//!
//! The tokenizer works one physical line at a time. A line ends at `"\r\n"`, `'\r'` or
//! `'\n'`; the delimiter belongs to no line and is never covered by a style run.

use serde::Deserialize;
use std::ops::Range;

/// The newline sequence written when a line-break element is flattened to text.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LineBreak {
    /// Unix-style LF (`'\n'`).
    #[default]
    Lf,
    /// Classic Mac / legacy browser CR (`'\r'`).
    Cr,
    /// Windows-style CRLF (`"\r\n"`).
    Crlf,
}

impl LineBreak {
    /// The newline sequence as text.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Lf => "\n",
            Self::Cr => "\r",
            Self::Crlf => "\r\n",
        }
    }
}

/// One physical line of a text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PhysicalLine {
    /// Byte range of the line content, delimiter excluded.
    pub content: Range<usize>,
    /// Byte offset where the next line starts (after the delimiter).
    pub next_start: usize,
}

/// Iterate the physical lines of `text`.
///
/// Empty text yields no lines. A trailing delimiter does not produce an extra empty line.
pub fn physical_lines(text: &str) -> PhysicalLines<'_> {
    PhysicalLines { text, pos: 0 }
}

/// Iterator returned by [`physical_lines`].
#[derive(Debug, Clone)]
pub struct PhysicalLines<'a> {
    text: &'a str,
    pos: usize,
}

impl Iterator for PhysicalLines<'_> {
    type Item = PhysicalLine;

    fn next(&mut self) -> Option<Self::Item> {
        let len = self.text.len();
        if self.pos >= len {
            return None;
        }

        let start = self.pos;
        let bytes = self.text.as_bytes();
        let line = match bytes[start..].iter().position(|&b| b == b'\n' || b == b'\r') {
            None => PhysicalLine {
                content: start..len,
                next_start: len,
            },
            Some(rel) => {
                let end = start + rel;
                let delimiter = if bytes[end] == b'\r' && bytes.get(end + 1) == Some(&b'\n') {
                    2
                } else {
                    1
                };
                PhysicalLine {
                    content: start..end,
                    next_start: end + delimiter,
                }
            }
        };

        self.pos = line.next_start;
        Some(line)
    }
}
