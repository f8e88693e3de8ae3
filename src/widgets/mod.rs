//! Widgets built on the core state machine.

pub mod expandable_text;

pub use expandable_text::{ExpandableText, RenderRequester};
