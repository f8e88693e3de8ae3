//! Structured input events delivered to components.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyEventType {
    Press,
    Release,
}

/// Input event delivered to components.
///
/// Notes:
/// - `raw` is the exact byte sequence received from the terminal (UTF-8 decoded).
/// - `key_id` is a normalized identifier (`"enter"`, `"space"`, `"escape"`, `"tab"`).
/// - Mouse coordinates are zero-based cells relative to the terminal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputEvent {
    Key {
        raw: String,
        key_id: String,
        event_type: KeyEventType,
    },
    Text {
        raw: String,
        text: String,
    },
    Click {
        raw: String,
        column: u16,
        row: u16,
    },
    UnknownRaw {
        raw: String,
    },
}

impl InputEvent {
    /// Whether this event activates the focused widget (enter, space, or a left-button press).
    pub fn is_activation(&self) -> bool {
        match self {
            InputEvent::Key {
                key_id, event_type, ..
            } => *event_type == KeyEventType::Press && (key_id == "enter" || key_id == "space"),
            InputEvent::Click { .. } => true,
            _ => false,
        }
    }
}

pub fn parse_input_event(data: &str) -> Option<InputEvent> {
    if data.is_empty() {
        return None;
    }

    let key = |key_id: &str| InputEvent::Key {
        raw: data.to_string(),
        key_id: key_id.to_string(),
        event_type: KeyEventType::Press,
    };

    match data {
        "\r" | "\n" => return Some(key("enter")),
        " " => return Some(key("space")),
        "\x1b" => return Some(key("escape")),
        "\t" => return Some(key("tab")),
        _ => {}
    }

    if let Some(body) = data.strip_prefix("\x1b[<") {
        return Some(parse_sgr_mouse(data, body).unwrap_or_else(|| InputEvent::UnknownRaw {
            raw: data.to_string(),
        }));
    }

    if !data.starts_with('\x1b') && !data.chars().any(char::is_control) {
        return Some(InputEvent::Text {
            raw: data.to_string(),
            text: data.to_string(),
        });
    }

    Some(InputEvent::UnknownRaw {
        raw: data.to_string(),
    })
}

/// SGR mouse report `ESC [ < button ; column ; row (M|m)`; only left-button presses are clicks.
fn parse_sgr_mouse(raw: &str, body: &str) -> Option<InputEvent> {
    let (params, pressed) = match body.strip_suffix('M') {
        Some(params) => (params, true),
        None => (body.strip_suffix('m')?, false),
    };
    let mut parts = params.split(';');
    let button: u16 = parts.next()?.parse().ok()?;
    let column: u16 = parts.next()?.parse().ok()?;
    let row: u16 = parts.next()?.parse().ok()?;
    if parts.next().is_some() || !pressed || button != 0 {
        return None;
    }
    Some(InputEvent::Click {
        raw: raw.to_string(),
        column: column.saturating_sub(1),
        row: row.saturating_sub(1),
    })
}
