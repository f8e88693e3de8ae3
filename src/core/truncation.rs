//! Line-budget truncation: which prefix of a text fits the collapsed line budget, and what text
//! is shown for a given expand state.

use std::num::NonZeroUsize;

use crate::core::text::layout::{LayoutError, LineLayout};
use crate::core::text::styled::{is_all_text_visible, styled_label, Color, StyledText};
use crate::core::text::width::{char_len, char_prefix};

/// Separates the truncated text (or the full text) from the affordance label.
pub const ELLIPSIS_MARKER: &str = "... ";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LineLimit {
    Limited(NonZeroUsize),
    /// No line budget; truncation and toggling are disabled.
    #[default]
    Unlimited,
}

impl LineLimit {
    /// `0` means no limit.
    pub fn from_count(lines: usize) -> Self {
        NonZeroUsize::new(lines)
            .map(LineLimit::Limited)
            .unwrap_or(LineLimit::Unlimited)
    }

    pub fn lines(&self) -> Option<usize> {
        match self {
            LineLimit::Limited(lines) => Some(lines.get()),
            LineLimit::Unlimited => None,
        }
    }

    pub fn is_unlimited(&self) -> bool {
        matches!(self, LineLimit::Unlimited)
    }
}

/// Prefix of `text` occupying the first `limit` rendered lines, minus room for `expand_label`.
///
/// Falls back to the full text when the limit is unlimited, the layout is missing or failing, or
/// the whole text already fits within the budget.
pub fn visible_prefix(
    text: &str,
    limit: LineLimit,
    expand_label: &str,
    layout: Option<&dyn LineLayout>,
) -> String {
    let Some(lines) = limit.lines() else {
        return text.to_string();
    };
    let Some(layout) = layout else {
        tracing::debug!("no line layout yet; visible prefix is the full text");
        return text.to_string();
    };

    let end = match budget_end(layout, lines) {
        Ok(end) => end,
        Err(err) => {
            tracing::debug!(%err, "line layout query failed; visible prefix is the full text");
            return text.to_string();
        }
    };

    if end == 0 || end >= char_len(text) {
        return text.to_string();
    }

    let keep = end.checked_sub(char_len(expand_label)).unwrap_or(end);
    char_prefix(text, keep).to_string()
}

/// Last nonzero line end within the first `lines` lines.
fn budget_end(layout: &dyn LineLayout, lines: usize) -> Result<usize, LayoutError> {
    let mut end = 0;
    for line in 0..lines {
        let line_end = layout.line_end(line)?;
        if line_end == 0 {
            break;
        }
        end = line_end;
    }
    Ok(end)
}

#[derive(Debug, Clone, Copy)]
pub struct ComposeRequest<'a> {
    pub expanded: bool,
    pub limit: LineLimit,
    pub visible_prefix: &'a str,
    pub original: &'a str,
    pub expand_label: &'a str,
    pub collapse_label: &'a str,
    pub affordance_color: Color,
    pub underline: bool,
}

impl ComposeRequest<'_> {
    /// Whether the collapsed rendering would cut text off.
    pub fn truncates(&self) -> bool {
        !self.limit.is_unlimited() && !is_all_text_visible(self.visible_prefix, self.original)
    }
}

/// Text actually shown: the full text with the collapse affordance, or the truncated prefix with
/// the expand affordance.
pub fn compose(request: &ComposeRequest<'_>) -> StyledText {
    if request.expanded || !request.truncates() {
        let mut text = StyledText::plain(request.original);
        text.push_str(ELLIPSIS_MARKER);
        text.append(styled_label(
            request.collapse_label,
            request.affordance_color,
            request.underline,
        ));
        return text;
    }

    let reserved = char_len(request.expand_label) + char_len(ELLIPSIS_MARKER);
    let end_index = char_len(request.visible_prefix).saturating_sub(reserved);
    let mut text = StyledText::plain(char_prefix(request.visible_prefix, end_index));
    text.push_str(ELLIPSIS_MARKER);
    text.append(styled_label(
        request.expand_label,
        request.affordance_color,
        request.underline,
    ));
    text
}
