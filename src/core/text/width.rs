//! Grapheme and string cell-width helpers.

use emojis::get as emoji_get;
use unicode_segmentation::UnicodeSegmentation;
use unicode_width::UnicodeWidthChar;

pub const TAB_WIDTH: usize = 3;

/// Terminal cell width of a single grapheme cluster.
pub fn grapheme_width(grapheme: &str) -> usize {
    if grapheme.is_empty() {
        return 0;
    }
    if grapheme == "\t" {
        return TAB_WIDTH;
    }
    if grapheme == "\n" || grapheme == "\r\n" {
        return 0;
    }

    if emoji_get(grapheme).is_some() {
        return 2;
    }

    let mut width = 0;
    for ch in grapheme.chars() {
        if ch == '\t' {
            width += TAB_WIDTH;
            continue;
        }
        width += UnicodeWidthChar::width(ch).unwrap_or(0);
    }
    width
}

/// Cell width of plain (escape-free) text.
pub fn text_width(input: &str) -> usize {
    input.graphemes(true).map(grapheme_width).sum()
}

/// Length in Unicode scalar values; all layout offsets in this crate use this unit.
pub fn char_len(input: &str) -> usize {
    input.chars().count()
}

/// Byte index of the `char_offset`-th scalar, clamped to the end of `input`.
pub fn byte_index(input: &str, char_offset: usize) -> usize {
    input
        .char_indices()
        .nth(char_offset)
        .map(|(idx, _)| idx)
        .unwrap_or(input.len())
}

/// Prefix of `input` holding the first `char_count` scalars.
pub fn char_prefix(input: &str, char_count: usize) -> &str {
    &input[..byte_index(input, char_count)]
}

#[cfg(test)]
mod tests {
    use super::{char_len, char_prefix, text_width};

    #[test]
    fn wide_and_emoji_graphemes_take_two_cells() {
        assert_eq!(text_width("😀"), 2);
        assert_eq!(text_width("日本"), 4);
        assert_eq!(text_width("ab"), 2);
    }

    #[test]
    fn tabs_expand_and_newlines_are_free() {
        assert_eq!(text_width("a\tb"), 5);
        assert_eq!(text_width("a\n"), 1);
    }

    #[test]
    fn char_prefix_clamps_past_end() {
        assert_eq!(char_prefix("héllo", 2), "hé");
        assert_eq!(char_prefix("hé", 10), "hé");
        assert_eq!(char_len("héllo"), 5);
    }
}
