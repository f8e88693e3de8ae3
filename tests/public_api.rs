#![allow(unused_imports)]

use expandable_text::{
    compose, is_all_text_visible, parse_input_event, strip_ansi, styled_label, text_width,
    visible_prefix,
    AnimatedProperty, AnimationSet, Color, Component, ComposeRequest, ConfigError, EnvConfig,
    ExpandStateListener, ExpandableState, ExpandableText, ExpandableTextOptions, FadeOverlay,
    HostCapabilities, InputEvent, KeyEventType, LayoutError, LineLayout, LineLimit,
    ListenerHandle, ListenerRegistry, RenderRequester, SpanStyle, StyledSpan, StyledText,
    TextLayout, Tween, DEFAULT_ANIMATION_DURATION, DEFAULT_COLLAPSE_LABEL, DEFAULT_EXPAND_LABEL,
    ELLIPSIS_MARKER, FADE_ROWS, MAX_ALPHA, MIN_ALPHA,
};

#[test]
fn public_api_exports_compile() {}
