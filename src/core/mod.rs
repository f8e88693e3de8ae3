//! Core interfaces and host-agnostic logic.

pub mod animation;
pub mod component;
pub mod expandable;
pub mod input_event;
pub mod listeners;
pub mod overlay;
pub mod text;
pub mod truncation;
