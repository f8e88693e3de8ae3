//! Collapsible text for terminal UIs.
//!
//! A text is collapsed to a fixed number of lines with a "Read more" affordance and expands to
//! its full content with a "Read less" affordance. The truncation and toggle logic lives in
//! [`ExpandableState`] and is host-agnostic: any host that can report where its rendered lines
//! end (a [`LineLayout`]) can drive it. [`ExpandableText`] is the terminal host.
//!
//! # Public API Overview
//! - Build an [`ExpandableText`] from text and [`ExpandableTextOptions`] and render it as a
//!   [`Component`].
//! - Toggle with clicks ([`Component::handle_event`]) or programmatically with
//!   [`ExpandableText::expand`] / [`ExpandableText::collapse`].
//! - Observe changes with an [`ExpandStateListener`].
//! - Use [`visible_prefix`] and [`compose`] directly for custom hosts.

pub mod config;
pub mod logging;

pub mod core;
pub mod widgets;

/// Options, environment switches and host capabilities.
pub use crate::config::{
    ConfigError, EnvConfig, ExpandableTextOptions, HostCapabilities, DEFAULT_ANIMATION_DURATION,
    DEFAULT_COLLAPSE_LABEL, DEFAULT_EXPAND_LABEL,
};

/// Animation and overlay primitives.
pub use crate::core::animation::{AnimatedProperty, AnimationSet, Tween, MAX_ALPHA, MIN_ALPHA};
pub use crate::core::overlay::{FadeOverlay, FADE_ROWS};

/// Component trait and input events.
pub use crate::core::component::Component;
pub use crate::core::input_event::{parse_input_event, InputEvent, KeyEventType};

/// Host-agnostic state machine and listeners.
pub use crate::core::expandable::ExpandableState;
pub use crate::core::listeners::{ExpandStateListener, ListenerHandle, ListenerRegistry};

/// Line layout, styled text and truncation helpers.
pub use crate::core::text::ansi::strip_ansi;
pub use crate::core::text::layout::{LayoutError, LineLayout, TextLayout};
pub use crate::core::text::styled::{
    is_all_text_visible, styled_label, Color, SpanStyle, StyledSpan, StyledText,
};
pub use crate::core::text::width::text_width;
pub use crate::core::truncation::{
    compose, visible_prefix, ComposeRequest, LineLimit, ELLIPSIS_MARKER,
};

/// Built-in widgets.
pub use crate::widgets::{ExpandableText, RenderRequester};
