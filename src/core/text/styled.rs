//! Styled text: plain text plus character-range style spans, rendered to ANSI SGR sequences.

use std::ops::Range;

use super::width::byte_index;
use crate::config::ConfigError;

const RESET: &str = "\x1b[0m";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const TRANSPARENT: Color = Color::rgba(0, 0, 0, 0);
    pub const BLUE: Color = Color::rgb(0, 0, 255);
    pub const WHITE: Color = Color::rgb(255, 255, 255);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    pub fn is_transparent(&self) -> bool {
        self.a == 0
    }

    /// Parses `#RRGGBB` or `#AARRGGBB`.
    pub fn parse(value: &str) -> Result<Self, ConfigError> {
        let invalid = || ConfigError::InvalidColor(value.to_string());
        let hex = value.trim().strip_prefix('#').ok_or_else(invalid)?;
        if !hex.chars().all(|ch| ch.is_ascii_hexdigit()) {
            return Err(invalid());
        }
        let byte = |idx: usize| u8::from_str_radix(&hex[idx..idx + 2], 16).map_err(|_| invalid());
        match hex.len() {
            6 => Ok(Self::rgb(byte(0)?, byte(2)?, byte(4)?)),
            8 => Ok(Self::rgba(byte(2)?, byte(4)?, byte(6)?, byte(0)?)),
            _ => Err(invalid()),
        }
    }

    /// Scales the color toward black by `coverage` (0.0..=1.0) and its own alpha.
    pub fn scaled(&self, coverage: f32) -> Color {
        let factor = coverage.clamp(0.0, 1.0) * (self.a as f32 / 255.0);
        let scale = |channel: u8| (channel as f32 * factor).round() as u8;
        Color::rgb(scale(self.r), scale(self.g), scale(self.b))
    }

    pub fn fg_sgr(&self) -> String {
        format!("\x1b[38;2;{};{};{}m", self.r, self.g, self.b)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SpanStyle {
    pub color: Option<Color>,
    pub underline: bool,
}

impl SpanStyle {
    fn sgr(&self) -> String {
        let mut out = String::new();
        if let Some(color) = self.color {
            out.push_str(&color.fg_sgr());
        }
        if self.underline {
            out.push_str("\x1b[4m");
        }
        out
    }

    fn is_plain(&self) -> bool {
        self.color.is_none() && !self.underline
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StyledSpan {
    /// Character range into the owning [`StyledText`].
    pub range: Range<usize>,
    pub style: SpanStyle,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct StyledText {
    text: String,
    spans: Vec<StyledSpan>,
    char_len: usize,
}

impl StyledText {
    pub fn plain(text: impl Into<String>) -> Self {
        let text = text.into();
        let char_len = text.chars().count();
        Self {
            text,
            spans: Vec::new(),
            char_len,
        }
    }

    pub fn styled(text: impl Into<String>, style: SpanStyle) -> Self {
        let mut styled = Self::plain(text);
        if !style.is_plain() && styled.char_len > 0 {
            styled.spans.push(StyledSpan {
                range: 0..styled.char_len,
                style,
            });
        }
        styled
    }

    pub fn as_str(&self) -> &str {
        &self.text
    }

    pub fn spans(&self) -> &[StyledSpan] {
        &self.spans
    }

    pub fn char_len(&self) -> usize {
        self.char_len
    }

    pub fn push_str(&mut self, text: &str) {
        self.text.push_str(text);
        self.char_len += text.chars().count();
    }

    pub fn append(&mut self, other: StyledText) {
        let offset = self.char_len;
        self.text.push_str(&other.text);
        self.char_len += other.char_len;
        self.spans
            .extend(other.spans.into_iter().map(|span| StyledSpan {
                range: span.range.start + offset..span.range.end + offset,
                style: span.style,
            }));
    }

    /// Sub-range by character offsets; spans are clipped to the range.
    pub fn slice(&self, range: Range<usize>) -> StyledText {
        let start = range.start.min(self.char_len);
        let end = range.end.clamp(start, self.char_len);
        let text = self.text[byte_index(&self.text, start)..byte_index(&self.text, end)].to_string();
        let spans = self
            .spans
            .iter()
            .filter_map(|span| {
                let lo = span.range.start.max(start);
                let hi = span.range.end.min(end);
                (lo < hi).then(|| StyledSpan {
                    range: lo - start..hi - start,
                    style: span.style,
                })
            })
            .collect();
        StyledText {
            text,
            spans,
            char_len: end - start,
        }
    }

    /// Drops trailing whitespace, including a line's `\n`.
    pub fn trim_end(&self) -> StyledText {
        let kept = self.text.trim_end().chars().count();
        self.slice(0..kept)
    }

    /// Text with SGR sequences around every span; each span ends with a full reset.
    pub fn to_ansi(&self) -> String {
        if self.spans.is_empty() {
            return self.text.clone();
        }

        let mut out = String::with_capacity(self.text.len() + self.spans.len() * 24);
        let mut cursor = 0;
        for span in &self.spans {
            out.push_str(self.char_slice(cursor, span.range.start));
            out.push_str(&span.style.sgr());
            out.push_str(self.char_slice(span.range.start, span.range.end));
            out.push_str(RESET);
            cursor = span.range.end;
        }
        out.push_str(self.char_slice(cursor, self.char_len));
        out
    }

    fn char_slice(&self, start: usize, end: usize) -> &str {
        &self.text[byte_index(&self.text, start)..byte_index(&self.text, end)]
    }
}

/// Affordance label carrying the affordance color and optional underline.
pub fn styled_label(label: &str, color: Color, underline: bool) -> StyledText {
    StyledText::styled(
        label,
        SpanStyle {
            color: Some(color),
            underline,
        },
    )
}

/// Whether `visible_prefix` already covers the whole `raw_text`, i.e. nothing is truncated.
pub fn is_all_text_visible(visible_prefix: &str, raw_text: &str) -> bool {
    visible_prefix == raw_text
}

#[cfg(test)]
mod tests {
    use super::{is_all_text_visible, styled_label, Color, StyledText};
    use crate::config::ConfigError;
    use pretty_assertions::assert_eq;

    #[test]
    fn parses_rgb_and_argb_colors() {
        assert_eq!(Color::parse("#0000FF"), Ok(Color::BLUE));
        assert_eq!(Color::parse("#80112233"), Ok(Color::rgba(0x11, 0x22, 0x33, 0x80)));
        assert_eq!(
            Color::parse("blue"),
            Err(ConfigError::InvalidColor("blue".to_string()))
        );
        assert!(Color::parse("#12345").is_err());
    }

    #[test]
    fn appended_label_span_is_offset() {
        let mut text = StyledText::plain("abc... ");
        text.append(styled_label("Read more", Color::BLUE, true));
        assert_eq!(text.as_str(), "abc... Read more");
        assert_eq!(text.spans().len(), 1);
        assert_eq!(text.spans()[0].range, 7..16);
        assert!(text.spans()[0].style.underline);
    }

    #[test]
    fn ansi_output_wraps_span_and_resets() {
        let mut text = StyledText::plain("go ");
        text.append(styled_label("on", Color::rgb(1, 2, 3), false));
        assert_eq!(text.to_ansi(), "go \x1b[38;2;1;2;3mon\x1b[0m");
    }

    #[test]
    fn slice_clips_spans() {
        let mut text = StyledText::plain("ab");
        text.append(styled_label("cdef", Color::BLUE, false));
        let slice = text.slice(1..4);
        assert_eq!(slice.as_str(), "bcd");
        assert_eq!(slice.spans()[0].range, 1..3);
        assert!(text.slice(0..2).spans().is_empty());
    }

    #[test]
    fn all_text_visible_is_plain_equality() {
        assert!(is_all_text_visible("same", "same"));
        assert!(!is_all_text_visible("sam", "same"));
    }
}
