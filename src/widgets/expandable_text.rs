//! Expandable text widget.
//!
//! Terminal host for [`ExpandableState`]: word-wraps the text at the render width to answer the
//! line-layout queries, clips to the collapsed line budget, draws the fade overlay over the bottom
//! rows and runs the expand/collapse animation across frames.

use std::sync::Arc;
use std::time::Instant;

use unicode_segmentation::UnicodeSegmentation;

use crate::config::{ExpandableTextOptions, HostCapabilities};
use crate::core::animation::{AnimatedProperty, AnimationSet, Tween, MAX_ALPHA};
use crate::core::component::Component;
use crate::core::expandable::ExpandableState;
use crate::core::input_event::InputEvent;
use crate::core::listeners::ListenerHandle;
use crate::core::text::layout::TextLayout;
use crate::core::text::styled::StyledText;
use crate::core::text::width::text_width;

pub type RenderRequester = Arc<dyn Fn() + Send + Sync>;

/// Tabs are laid out and drawn as this many spaces.
const TAB_SPACES: &str = "   ";

pub struct ExpandableText {
    state: ExpandableState,
    capabilities: HostCapabilities,
    padding_x: usize,
    render_requester: Option<RenderRequester>,
    laid_out_width: Option<usize>,
    last_rows: Option<usize>,
}

impl ExpandableText {
    pub fn new(text: impl Into<String>, mut options: ExpandableTextOptions) -> Self {
        options.expand_label = expand_tabs(options.expand_label);
        options.collapse_label = expand_tabs(options.collapse_label);
        Self {
            state: ExpandableState::new(expand_tabs(text), options),
            capabilities: HostCapabilities::from_env(),
            padding_x: 0,
            render_requester: None,
            laid_out_width: None,
            last_rows: None,
        }
    }

    pub fn with_capabilities(mut self, capabilities: HostCapabilities) -> Self {
        self.capabilities = capabilities;
        self
    }

    pub fn with_padding(mut self, padding_x: usize) -> Self {
        self.padding_x = padding_x;
        self.invalidate();
        self
    }

    /// Lets toggles and running animations ask the runtime for another frame.
    pub fn set_render_requester(&mut self, render_requester: Option<RenderRequester>) {
        self.render_requester = render_requester;
    }

    pub fn state(&self) -> &ExpandableState {
        &self.state
    }

    pub fn is_expanded(&self) -> bool {
        self.state.is_expanded()
    }

    pub fn set_text(&mut self, text: impl Into<String>) {
        self.state.set_text(expand_tabs(text));
    }

    pub fn set_expand_label(&mut self, label: impl Into<String>) {
        self.state.set_expand_label(expand_tabs(label));
    }

    pub fn set_collapse_label(&mut self, label: impl Into<String>) {
        self.state.set_collapse_label(expand_tabs(label));
    }

    pub fn add_state_listener(&mut self, listener: ListenerHandle) -> bool {
        self.state.add_state_listener(listener)
    }

    pub fn remove_state_listener(&mut self, listener: &ListenerHandle) -> bool {
        self.state.remove_state_listener(listener)
    }

    pub fn attach(&mut self) {
        self.apply(Instant::now(), ExpandableState::attach);
    }

    pub fn detach(&mut self) {
        self.state.detach();
    }

    pub fn expand(&mut self) -> bool {
        self.apply(Instant::now(), ExpandableState::expand)
    }

    pub fn collapse(&mut self) -> bool {
        self.apply(Instant::now(), ExpandableState::collapse)
    }

    pub fn click(&mut self) -> bool {
        self.click_at(Instant::now())
    }

    pub(crate) fn click_at(&mut self, now: Instant) -> bool {
        self.apply(now, ExpandableState::click)
    }

    pub(crate) fn render_at(&mut self, width: usize, now: Instant) -> Vec<String> {
        let content_width = width.saturating_sub(self.padding_x * 2).max(1);

        if self.state.needs_layout() || self.laid_out_width != Some(content_width) {
            let layout = TextLayout::new(self.state.text(), content_width);
            self.laid_out_width = Some(content_width);
            self.apply(now, |state| state.on_layout(Some(&layout)));
        }

        let mut rows = self.content_rows(content_width);
        let mut overlay = self.state.overlay();

        self.state.finish_animation(now);
        if let Some(animation) = self.state.animation() {
            if let Some(height) = animation.value(AnimatedProperty::Height, now) {
                rows.truncate(height.max(1) as usize);
            }
            if let Some(value) = animation.value(AnimatedProperty::Alpha, now) {
                overlay = overlay.with_alpha(value.clamp(0, MAX_ALPHA as i32) as u8);
            }
            self.request_render();
        }

        let left_padding = " ".repeat(self.padding_x);
        let right_padding = " ".repeat(self.padding_x);
        let mut lines: Vec<String> = rows
            .iter()
            .map(|row| {
                let line_width = text_width(row.as_str()) + self.padding_x * 2;
                let padding_needed = width.saturating_sub(line_width);
                format!(
                    "{left_padding}{}{right_padding}{}",
                    row.to_ansi(),
                    " ".repeat(padding_needed)
                )
            })
            .collect();

        if self.capabilities.overlay {
            overlay.apply(&mut lines);
        }

        self.last_rows = Some(rows.len());
        lines
    }

    /// Wrapped rows of the composed text, clipped to the line budget while truncated.
    ///
    /// The prefix is sized in characters; when its cells still wrap the affordance past the
    /// budget, trailing prefix graphemes are dropped until it fits.
    fn content_rows(&self, content_width: usize) -> Vec<StyledText> {
        let mut rows = wrap_rows(&self.state.rendered(), content_width);
        if !self.state.truncates() {
            return rows;
        }
        let (Some(limit), Some(prefix)) =
            (self.state.max_lines().lines(), self.state.visible_prefix())
        else {
            return rows;
        };

        let mut end = prefix.len();
        while rows.len() > limit && end > 0 {
            end = prefix[..end]
                .grapheme_indices(true)
                .next_back()
                .map_or(0, |(idx, _)| idx);
            rows = wrap_rows(&self.state.rendered_with_prefix(&prefix[..end]), content_width);
        }
        rows.truncate(limit);
        rows
    }

    /// Runs a state operation; a resulting toggle re-requests a frame and starts the animation.
    fn apply<R>(&mut self, now: Instant, op: impl FnOnce(&mut ExpandableState) -> R) -> R {
        let was_expanded = self.state.is_expanded();
        let alpha_before = self.current_alpha(now);

        let result = op(&mut self.state);

        if self.state.take_measure_request() {
            self.request_render();
        }
        if self.state.is_expanded() != was_expanded {
            self.start_animation(alpha_before, now);
        }
        result
    }

    fn current_alpha(&self, now: Instant) -> u8 {
        self.state
            .animation()
            .filter(|animation| !animation.is_finished(now))
            .and_then(|animation| animation.value(AnimatedProperty::Alpha, now))
            .map(|value| value.clamp(0, MAX_ALPHA as i32) as u8)
            .unwrap_or_else(|| self.state.overlay().alpha())
    }

    fn start_animation(&mut self, alpha_before: u8, now: Instant) {
        let duration = self.state.options().animation_duration;
        if !self.capabilities.animation || duration.is_zero() {
            return;
        }
        let (Some(start_rows), Some(content_width)) = (self.last_rows, self.laid_out_width) else {
            return;
        };
        let end_rows = self.content_rows(content_width).len();

        let animation = AnimationSet::new(now, duration)
            .play_together(
                AnimatedProperty::Height,
                Tween::new(start_rows as i32, end_rows as i32),
            )
            .play_together(
                AnimatedProperty::Alpha,
                Tween::new(alpha_before as i32, (MAX_ALPHA - alpha_before) as i32),
            );
        tracing::trace!(start_rows, end_rows, ?duration, "starting expand animation");
        self.state.start_animation(animation);
        self.request_render();
    }

    fn request_render(&self) {
        if let Some(requester) = self.render_requester.as_ref() {
            requester();
        }
    }
}

fn expand_tabs(text: impl Into<String>) -> String {
    let text = text.into();
    if text.contains('\t') {
        text.replace('\t', TAB_SPACES)
    } else {
        text
    }
}

fn wrap_rows(text: &StyledText, width: usize) -> Vec<StyledText> {
    TextLayout::new(text.as_str(), width)
        .lines()
        .iter()
        .map(|range| text.slice(range.clone()).trim_end())
        .collect()
}

impl Component for ExpandableText {
    fn render(&mut self, width: usize) -> Vec<String> {
        self.render_at(width, Instant::now())
    }

    fn handle_event(&mut self, event: &InputEvent) {
        if event.is_activation() {
            self.click();
        }
    }

    fn invalidate(&mut self) {
        self.state.request_layout();
    }
}
