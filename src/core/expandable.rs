//! Host-agnostic expand/collapse state machine.
//!
//! [`ExpandableState`] owns the original text, the visible prefix derived from the last layout
//! pass, the expand state and its listeners. A host drives it:
//!
//! 1. lay the original text out whenever [`ExpandableState::needs_layout`] is set (or the width
//!    changed) and report it through [`ExpandableState::on_layout`];
//! 2. display [`ExpandableState::rendered`], clipped to [`ExpandableState::max_lines`];
//! 3. forward clicks to [`ExpandableState::click`] and mirror display-tree membership with
//!    [`ExpandableState::attach`] / [`ExpandableState::detach`]. Clicks are ignored while detached.

use crate::config::ExpandableTextOptions;
use crate::core::animation::AnimationSet;
use crate::core::listeners::{ListenerHandle, ListenerRegistry};
use crate::core::overlay::FadeOverlay;
use crate::core::text::layout::LineLayout;
use crate::core::text::styled::{is_all_text_visible, StyledText};
use crate::core::truncation::{compose, visible_prefix, ComposeRequest, LineLimit};

#[derive(Debug)]
pub struct ExpandableState {
    options: ExpandableTextOptions,
    original: String,
    expanded: bool,
    visible_prefix: Option<String>,
    max_lines: LineLimit,
    listeners: ListenerRegistry,
    animation: Option<AnimationSet>,
    pending: Option<bool>,
    attached: bool,
    needs_layout: bool,
    measure_requested: bool,
}

impl ExpandableState {
    pub fn new(text: impl Into<String>, options: ExpandableTextOptions) -> Self {
        let expanded = options.initially_expanded;
        let max_lines = if expanded {
            LineLimit::Unlimited
        } else {
            options.collapsed_lines
        };
        Self {
            options,
            original: text.into(),
            expanded,
            visible_prefix: None,
            max_lines,
            listeners: ListenerRegistry::new(),
            animation: None,
            pending: None,
            attached: false,
            needs_layout: true,
            measure_requested: false,
        }
    }

    pub fn options(&self) -> &ExpandableTextOptions {
        &self.options
    }

    pub fn text(&self) -> &str {
        &self.original
    }

    pub fn set_text(&mut self, text: impl Into<String>) {
        self.original = text.into();
        self.visible_prefix = None;
        self.needs_layout = true;
    }

    pub fn set_expand_label(&mut self, label: impl Into<String>) {
        self.options.expand_label = label.into();
        self.needs_layout = true;
    }

    pub fn set_collapse_label(&mut self, label: impl Into<String>) {
        self.options.collapse_label = label.into();
    }

    pub fn add_state_listener(&mut self, listener: ListenerHandle) -> bool {
        self.listeners.add(listener)
    }

    pub fn remove_state_listener(&mut self, listener: &ListenerHandle) -> bool {
        self.listeners.remove(listener)
    }

    pub fn is_expanded(&self) -> bool {
        self.expanded
    }

    pub fn is_attached(&self) -> bool {
        self.attached
    }

    /// Line constraint for the next layout: the collapsed budget, or unlimited while expanded.
    pub fn max_lines(&self) -> LineLimit {
        self.max_lines
    }

    pub fn visible_prefix(&self) -> Option<&str> {
        self.visible_prefix.as_deref()
    }

    pub fn needs_layout(&self) -> bool {
        self.needs_layout
    }

    pub fn request_layout(&mut self) {
        self.needs_layout = true;
    }

    /// Takes the re-measure request raised by the last toggle.
    pub fn take_measure_request(&mut self) -> bool {
        std::mem::take(&mut self.measure_requested)
    }

    /// Records the result of a layout pass of [`Self::text`].
    ///
    /// `None` means the host has no layout to offer; the full text is then treated as visible.
    /// Blank text is not truncated. A deferred expand/collapse request is retried once here.
    pub fn on_layout(&mut self, layout: Option<&dyn LineLayout>) {
        self.needs_layout = false;
        if self.original.trim().is_empty() {
            self.visible_prefix = None;
        } else {
            self.visible_prefix = Some(visible_prefix(
                &self.original,
                self.options.collapsed_lines,
                &self.options.expand_label,
                layout,
            ));
        }
        self.retry_pending();
    }

    /// Whether the collapsed rendering cuts text off.
    pub fn truncates(&self) -> bool {
        self.visible_prefix
            .as_deref()
            .is_some_and(|prefix| self.compose_request(prefix).truncates())
    }

    /// Text to display for the current state.
    pub fn rendered(&self) -> StyledText {
        match self.visible_prefix.as_deref() {
            Some(prefix) => compose(&self.compose_request(prefix)),
            None => StyledText::plain(self.original.as_str()),
        }
    }

    /// Collapsed rendering built from `prefix` in place of the laid-out visible prefix.
    ///
    /// Hosts whose cells are narrower than characters use this to shorten the text until the
    /// affordance fits the line budget.
    pub fn rendered_with_prefix(&self, prefix: &str) -> StyledText {
        compose(&self.compose_request(prefix))
    }

    /// Fade overlay for the settled state.
    pub fn overlay(&self) -> FadeOverlay {
        FadeOverlay::for_state(self.options.overlay_color, self.expanded, self.truncates())
    }

    /// Toggles the current state; ignored while detached.
    pub fn click(&mut self) -> bool {
        if !self.attached {
            tracing::trace!("click while detached ignored");
            return false;
        }
        self.toggle(!self.expanded)
    }

    pub fn expand(&mut self) -> bool {
        self.request(true)
    }

    pub fn collapse(&mut self) -> bool {
        self.request(false)
    }

    /// Marks the state as attached. A deferred request is retried here once a layout exists,
    /// otherwise at the next layout pass.
    pub fn attach(&mut self) {
        self.attached = true;
        if self.visible_prefix.is_some() {
            self.retry_pending();
        }
    }

    pub fn detach(&mut self) {
        self.attached = false;
        self.cancel_animation();
        if let Some(expand) = self.pending.take() {
            tracing::debug!(expand, "dropping deferred request on detach");
        }
    }

    /// Applies `expand` if text is truncated and the state actually changes.
    ///
    /// Cancels the in-flight animation, switches the line constraint, raises a re-measure
    /// request and notifies listeners in registration order.
    pub fn toggle(&mut self, expand: bool) -> bool {
        let Some(prefix) = self.visible_prefix.as_deref() else {
            tracing::trace!("toggle before first layout ignored");
            return false;
        };
        if self.options.collapsed_lines.is_unlimited()
            || is_all_text_visible(prefix, &self.original)
        {
            return false;
        }
        if expand == self.expanded {
            return false;
        }

        self.cancel_animation();
        self.expanded = expand;
        self.max_lines = if expand {
            LineLimit::Unlimited
        } else {
            self.options.collapsed_lines
        };
        self.measure_requested = true;
        tracing::debug!(expanded = expand, "expandable text toggled");

        self.listeners.notify(expand);
        true
    }

    pub fn animation(&self) -> Option<&AnimationSet> {
        self.animation.as_ref()
    }

    pub fn start_animation(&mut self, animation: AnimationSet) {
        self.cancel_animation();
        self.animation = Some(animation);
    }

    pub fn cancel_animation(&mut self) {
        if let Some(mut animation) = self.animation.take() {
            animation.cancel();
            tracing::trace!("cancelled in-flight animation");
        }
    }

    /// Releases the animation once it has run to completion.
    pub fn finish_animation(&mut self, now: std::time::Instant) {
        if self
            .animation
            .as_ref()
            .is_some_and(|animation| animation.is_finished(now))
        {
            self.animation = None;
        }
    }

    fn request(&mut self, expand: bool) -> bool {
        if self.attached && self.visible_prefix.is_some() {
            return self.toggle(expand);
        }
        tracing::debug!(
            expand,
            attached = self.attached,
            "deferring expand request until attached and laid out"
        );
        self.pending = Some(expand);
        false
    }

    fn retry_pending(&mut self) {
        let Some(expand) = self.pending.take() else {
            return;
        };
        if self.attached {
            self.toggle(expand);
        } else {
            tracing::debug!(expand, "dropping deferred request; not attached");
        }
    }

    fn compose_request<'a>(&'a self, prefix: &'a str) -> ComposeRequest<'a> {
        ComposeRequest {
            expanded: self.expanded,
            limit: self.options.collapsed_lines,
            visible_prefix: prefix,
            original: &self.original,
            expand_label: &self.options.expand_label,
            collapse_label: &self.options.collapse_label,
            affordance_color: self.options.affordance_color,
            underline: self.options.underline_affordance,
        }
    }
}
