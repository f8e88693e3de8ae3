//! Word-wrapping line layout.
//!
//! [`TextLayout`] is the line-layout oracle consumed by truncation: after wrapping a text at a
//! given cell width it reports, for every rendered line, the character offset at which that line
//! ends. Offsets count Unicode scalar values and include trailing whitespace and the line's `\n`.

use std::ops::Range;

use thiserror::Error;
use unicode_segmentation::UnicodeSegmentation;

use super::width::grapheme_width;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum LayoutError {
    #[error("text has not been laid out yet")]
    NotLaidOut,
    #[error("text was laid out at zero width")]
    ZeroWidth,
}

/// Query interface over the most recent layout pass.
pub trait LineLayout {
    fn line_count(&self) -> usize;

    /// Exclusive character offset where `line` ends; `Ok(0)` for lines past the last one.
    fn line_end(&self, line: usize) -> Result<usize, LayoutError>;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextLayout {
    lines: Vec<Range<usize>>,
    width: usize,
}

impl TextLayout {
    pub fn new(text: &str, width: usize) -> Self {
        if width == 0 {
            return Self {
                lines: Vec::new(),
                width,
            };
        }

        let mut lines = Vec::new();
        let mut line_start = 0;
        let mut pos = 0;
        let mut col = 0;
        // (char offset just past the last whitespace on this line, column at that point)
        let mut last_break: Option<(usize, usize)> = None;

        for grapheme in text.graphemes(true) {
            let len = grapheme.chars().count();

            if grapheme == "\n" || grapheme == "\r\n" {
                pos += len;
                lines.push(line_start..pos);
                line_start = pos;
                col = 0;
                last_break = None;
                continue;
            }

            let w = grapheme_width(grapheme);
            let whitespace = is_whitespace(grapheme);

            if col > 0 && col + w > width {
                if whitespace {
                    // Overflowing whitespace hangs off the end of the current line.
                    pos += len;
                    lines.push(line_start..pos);
                    line_start = pos;
                    col = 0;
                    last_break = None;
                    continue;
                }

                match last_break.take() {
                    Some((brk, brk_col)) if brk > line_start => {
                        lines.push(line_start..brk);
                        line_start = brk;
                        col -= brk_col;
                        if col > 0 && col + w > width {
                            lines.push(line_start..pos);
                            line_start = pos;
                            col = 0;
                        }
                    }
                    _ => {
                        lines.push(line_start..pos);
                        line_start = pos;
                        col = 0;
                    }
                }
            }

            col += w;
            pos += len;
            if whitespace {
                last_break = Some((pos, col));
            }
        }

        if line_start < pos {
            lines.push(line_start..pos);
        }

        Self { lines, width }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    /// Character ranges of the rendered lines, in order.
    pub fn lines(&self) -> &[Range<usize>] {
        &self.lines
    }
}

impl LineLayout for TextLayout {
    fn line_count(&self) -> usize {
        self.lines.len()
    }

    fn line_end(&self, line: usize) -> Result<usize, LayoutError> {
        if self.width == 0 {
            return Err(LayoutError::ZeroWidth);
        }
        Ok(self.lines.get(line).map(|range| range.end).unwrap_or(0))
    }
}

fn is_whitespace(grapheme: &str) -> bool {
    grapheme.chars().all(char::is_whitespace)
}

#[cfg(test)]
mod tests {
    use super::{LayoutError, LineLayout, TextLayout};
    use pretty_assertions::assert_eq;

    #[test]
    fn wraps_at_word_boundaries_keeping_trailing_space() {
        let layout = TextLayout::new("hello big world", 10);
        assert_eq!(layout.lines(), &[0..10, 10..15]);
        assert_eq!(layout.line_end(0), Ok(10));
        assert_eq!(layout.line_end(1), Ok(15));
    }

    #[test]
    fn hard_breaks_words_longer_than_the_line() {
        let layout = TextLayout::new("abcdefghij", 4);
        assert_eq!(layout.lines(), &[0..4, 4..8, 8..10]);
    }

    #[test]
    fn explicit_newlines_end_lines() {
        let layout = TextLayout::new("ab\ncd", 10);
        assert_eq!(layout.lines(), &[0..3, 3..5]);
    }

    #[test]
    fn long_word_after_a_break_still_hard_breaks() {
        let layout = TextLayout::new("a bcdefgh", 4);
        assert_eq!(layout.lines(), &[0..2, 2..6, 6..9]);
    }

    #[test]
    fn lines_past_the_end_report_zero() {
        let layout = TextLayout::new("short", 20);
        assert_eq!(layout.line_count(), 1);
        assert_eq!(layout.line_end(1), Ok(0));
        assert_eq!(layout.line_end(7), Ok(0));
    }

    #[test]
    fn zero_width_layout_fails() {
        let layout = TextLayout::new("text", 0);
        assert_eq!(layout.line_end(0), Err(LayoutError::ZeroWidth));
    }

    #[test]
    fn offsets_count_chars_not_bytes() {
        let layout = TextLayout::new("héé héé", 4);
        assert_eq!(layout.lines(), &[0..4, 4..7]);
    }
}
