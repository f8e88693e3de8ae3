//! Widget options and environment configuration.

use std::env;
use std::time::Duration;

use once_cell::sync::Lazy;
use thiserror::Error;

use crate::core::text::styled::Color;
use crate::core::truncation::LineLimit;

pub const DEFAULT_EXPAND_LABEL: &str = "Read more";
pub const DEFAULT_COLLAPSE_LABEL: &str = "Read less";
pub const DEFAULT_ANIMATION_DURATION: Duration = Duration::from_millis(300);

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("invalid color {0:?}; expected #RRGGBB or #AARRGGBB")]
    InvalidColor(String),
    #[error("attribute {key} expects {expected}, got {value:?}")]
    InvalidAttribute {
        key: String,
        expected: &'static str,
        value: String,
    },
}

/// Construction-time options for an expandable text. Every field has a default.
#[derive(Debug, Clone, PartialEq)]
pub struct ExpandableTextOptions {
    pub collapsed_lines: LineLimit,
    pub animation_duration: Duration,
    pub expand_label: String,
    pub collapse_label: String,
    pub affordance_color: Color,
    pub underline_affordance: bool,
    pub initially_expanded: bool,
    pub overlay_color: Color,
}

impl Default for ExpandableTextOptions {
    fn default() -> Self {
        Self {
            collapsed_lines: LineLimit::Unlimited,
            animation_duration: DEFAULT_ANIMATION_DURATION,
            expand_label: DEFAULT_EXPAND_LABEL.to_string(),
            collapse_label: DEFAULT_COLLAPSE_LABEL.to_string(),
            affordance_color: Color::BLUE,
            underline_affordance: false,
            initially_expanded: false,
            overlay_color: Color::TRANSPARENT,
        }
    }
}

impl ExpandableTextOptions {
    pub fn with_collapsed_lines(mut self, lines: usize) -> Self {
        self.collapsed_lines = LineLimit::from_count(lines);
        self
    }

    pub fn with_animation_duration(mut self, duration: Duration) -> Self {
        self.animation_duration = duration;
        self
    }

    pub fn with_expand_label(mut self, label: impl Into<String>) -> Self {
        self.expand_label = label.into();
        self
    }

    pub fn with_collapse_label(mut self, label: impl Into<String>) -> Self {
        self.collapse_label = label.into();
        self
    }

    pub fn with_affordance_color(mut self, color: Color) -> Self {
        self.affordance_color = color;
        self
    }

    pub fn with_underline_affordance(mut self, underline: bool) -> Self {
        self.underline_affordance = underline;
        self
    }

    pub fn with_initially_expanded(mut self, expanded: bool) -> Self {
        self.initially_expanded = expanded;
        self
    }

    pub fn with_overlay_color(mut self, color: Color) -> Self {
        self.overlay_color = color;
        self
    }

    /// Builds options from declarative widget attributes.
    ///
    /// Recognized keys: `collapsedLines`, `animDuration` (milliseconds), `readMoreText`,
    /// `readLessText`, `foregroundColor`, `isUnderlined`, `isExpanded`, `ellipsizeTextColor`.
    /// Unknown keys are ignored.
    pub fn from_attributes<'a, I>(attributes: I) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = (&'a str, &'a str)>,
    {
        let mut options = Self::default();
        for (key, value) in attributes {
            match key {
                "collapsedLines" => {
                    let lines = parse_number(key, value)?;
                    options.collapsed_lines = LineLimit::from_count(lines as usize);
                }
                "animDuration" => {
                    options.animation_duration = Duration::from_millis(parse_number(key, value)?);
                }
                "readMoreText" => options.expand_label = value.to_string(),
                "readLessText" => options.collapse_label = value.to_string(),
                "foregroundColor" => options.overlay_color = Color::parse(value)?,
                "ellipsizeTextColor" => options.affordance_color = Color::parse(value)?,
                "isUnderlined" => options.underline_affordance = parse_bool(key, value)?,
                "isExpanded" => options.initially_expanded = parse_bool(key, value)?,
                _ => {
                    tracing::trace!(key, "ignoring unknown expandable text attribute");
                }
            }
        }
        Ok(options)
    }
}

fn parse_number(key: &str, value: &str) -> Result<u64, ConfigError> {
    value
        .trim()
        .parse()
        .map_err(|_| ConfigError::InvalidAttribute {
            key: key.to_string(),
            expected: "a non-negative integer",
            value: value.to_string(),
        })
}

fn parse_bool(key: &str, value: &str) -> Result<bool, ConfigError> {
    match value.trim() {
        "true" => Ok(true),
        "false" => Ok(false),
        _ => Err(ConfigError::InvalidAttribute {
            key: key.to_string(),
            expected: "true or false",
            value: value.to_string(),
        }),
    }
}

/// Optional host features. Without them text and state still change; only visuals are skipped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HostCapabilities {
    pub animation: bool,
    pub overlay: bool,
}

impl Default for HostCapabilities {
    fn default() -> Self {
        Self {
            animation: true,
            overlay: true,
        }
    }
}

impl HostCapabilities {
    pub fn none() -> Self {
        Self {
            animation: false,
            overlay: false,
        }
    }

    pub fn from_env() -> Self {
        let config = EnvConfig::global();
        Self {
            animation: !config.no_animation,
            overlay: !config.no_overlay,
        }
    }
}

#[derive(Debug, Clone)]
pub struct EnvConfig {
    pub debug: bool,
    pub write_log: Option<String>,
    pub no_animation: bool,
    pub no_overlay: bool,
}

static ENV_CONFIG: Lazy<EnvConfig> = Lazy::new(EnvConfig::from_env);

impl EnvConfig {
    pub fn from_env() -> Self {
        Self {
            debug: env_flag("EXPANDABLE_TEXT_DEBUG"),
            write_log: env_string_opt("EXPANDABLE_TEXT_WRITE_LOG"),
            no_animation: env_flag("EXPANDABLE_TEXT_NO_ANIMATION"),
            no_overlay: env_flag("EXPANDABLE_TEXT_NO_OVERLAY"),
        }
    }

    /// Process-wide snapshot taken on first use.
    pub fn global() -> &'static EnvConfig {
        &ENV_CONFIG
    }
}

fn env_flag(key: &str) -> bool {
    env::var(key).map(|value| value == "1").unwrap_or(false)
}

fn env_string_opt(key: &str) -> Option<String> {
    env::var(key).ok().and_then(|value| {
        if value.trim().is_empty() {
            None
        } else {
            Some(value)
        }
    })
}

#[cfg(test)]
mod tests {
    use super::{ConfigError, EnvConfig, ExpandableTextOptions};
    use crate::core::text::styled::Color;
    use crate::core::truncation::LineLimit;
    use pretty_assertions::assert_eq;
    use std::env;
    use std::sync::{Mutex, OnceLock};
    use std::time::Duration;

    struct EnvGuard {
        key: &'static str,
        previous: Option<String>,
    }

    impl Drop for EnvGuard {
        fn drop(&mut self) {
            if let Some(value) = &self.previous {
                env::set_var(self.key, value);
            } else {
                env::remove_var(self.key);
            }
        }
    }

    fn env_lock() -> std::sync::MutexGuard<'static, ()> {
        static LOCK: OnceLock<Mutex<()>> = OnceLock::new();
        LOCK.get_or_init(|| Mutex::new(()))
            .lock()
            .expect("env lock poisoned")
    }

    fn set_env_guard(key: &'static str, value: Option<&str>) -> EnvGuard {
        let previous = env::var(key).ok();
        if let Some(value) = value {
            env::set_var(key, value);
        } else {
            env::remove_var(key);
        }
        EnvGuard { key, previous }
    }

    #[test]
    fn env_defaults_are_off() {
        let _lock = env_lock();
        let _g1 = set_env_guard("EXPANDABLE_TEXT_DEBUG", None);
        let _g2 = set_env_guard("EXPANDABLE_TEXT_WRITE_LOG", None);
        let _g3 = set_env_guard("EXPANDABLE_TEXT_NO_ANIMATION", None);
        let _g4 = set_env_guard("EXPANDABLE_TEXT_NO_OVERLAY", None);

        let config = EnvConfig::from_env();
        assert!(!config.debug);
        assert!(config.write_log.is_none());
        assert!(!config.no_animation);
        assert!(!config.no_overlay);
    }

    #[test]
    fn env_flags_set_to_one_enable() {
        let _lock = env_lock();
        let _g1 = set_env_guard("EXPANDABLE_TEXT_DEBUG", Some("1"));
        let _g2 = set_env_guard("EXPANDABLE_TEXT_WRITE_LOG", Some("/tmp/expandable.log"));
        let _g3 = set_env_guard("EXPANDABLE_TEXT_NO_ANIMATION", Some("1"));
        let _g4 = set_env_guard("EXPANDABLE_TEXT_NO_OVERLAY", Some("yes"));

        let config = EnvConfig::from_env();
        assert!(config.debug);
        assert_eq!(config.write_log.as_deref(), Some("/tmp/expandable.log"));
        assert!(config.no_animation);
        assert!(!config.no_overlay);
    }

    #[test]
    fn blank_write_log_is_ignored() {
        let _lock = env_lock();
        let _g = set_env_guard("EXPANDABLE_TEXT_WRITE_LOG", Some("  "));
        assert!(EnvConfig::from_env().write_log.is_none());
    }

    #[test]
    fn defaults_match_documented_values() {
        let options = ExpandableTextOptions::default();
        assert_eq!(options.collapsed_lines, LineLimit::Unlimited);
        assert_eq!(options.animation_duration, Duration::from_millis(300));
        assert_eq!(options.expand_label, "Read more");
        assert_eq!(options.collapse_label, "Read less");
        assert_eq!(options.affordance_color, Color::BLUE);
        assert!(!options.underline_affordance);
        assert!(!options.initially_expanded);
        assert_eq!(options.overlay_color, Color::TRANSPARENT);
    }

    #[test]
    fn attributes_override_defaults() {
        let options = ExpandableTextOptions::from_attributes([
            ("collapsedLines", "3"),
            ("animDuration", "150"),
            ("readMoreText", "More"),
            ("readLessText", "Less"),
            ("foregroundColor", "#FFFFFF"),
            ("ellipsizeTextColor", "#FF0000"),
            ("isUnderlined", "true"),
            ("isExpanded", "false"),
            ("layout_width", "match_parent"),
        ])
        .expect("valid attributes");

        assert_eq!(options.collapsed_lines, LineLimit::from_count(3));
        assert_eq!(options.animation_duration, Duration::from_millis(150));
        assert_eq!(options.expand_label, "More");
        assert_eq!(options.collapse_label, "Less");
        assert_eq!(options.overlay_color, Color::WHITE);
        assert_eq!(options.affordance_color, Color::rgb(255, 0, 0));
        assert!(options.underline_affordance);
        assert!(!options.initially_expanded);
    }

    #[test]
    fn malformed_attribute_is_reported() {
        let err = ExpandableTextOptions::from_attributes([("isExpanded", "maybe")]).unwrap_err();
        assert_eq!(
            err,
            ConfigError::InvalidAttribute {
                key: "isExpanded".to_string(),
                expected: "true or false",
                value: "maybe".to_string(),
            }
        );
    }

}
