//! Generic input event types delivered by the host shell.

/// Generic key representation.
///
/// Hosts map their native key codes onto these values before handing them
/// to the editor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    /// Regular character key (a-z, 0-9, symbols)
    Char(char),
    Escape,
    Return,
    Backspace,
    Delete,
    Tab,
    Space,
    /// Function key F1-F12
    F(u8),
    /// Unmapped or unrecognized key
    Unknown,
}

impl Key {
    /// Name of the key as written in keybinding strings, if it can be bound.
    pub fn binding_name(&self) -> Option<String> {
        let name = match self {
            Key::Char(c) => c.to_string(),
            Key::Escape => "Escape".to_string(),
            Key::Return => "Return".to_string(),
            Key::Backspace => "Backspace".to_string(),
            Key::Delete => "Delete".to_string(),
            Key::Tab => "Tab".to_string(),
            Key::Space => "Space".to_string(),
            Key::F(n) => format!("F{n}"),
            Key::Unknown => return None,
        };
        Some(name)
    }

    /// Inverse of [`Key::binding_name`].
    pub fn from_name(name: &str) -> Key {
        let mut chars = name.chars();
        if let (Some(c), None) = (chars.next(), chars.next()) {
            return Key::Char(c);
        }

        match name.to_ascii_lowercase().as_str() {
            "escape" | "esc" => Key::Escape,
            "return" | "enter" => Key::Return,
            "backspace" => Key::Backspace,
            "delete" | "del" => Key::Delete,
            "tab" => Key::Tab,
            "space" => Key::Space,
            lower => lower
                .strip_prefix('f')
                .and_then(|n| n.parse::<u8>().ok())
                .filter(|n| (1..=12).contains(n))
                .map(Key::F)
                .unwrap_or(Key::Unknown),
        }
    }
}

/// Pointer button identification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MouseButton {
    /// Primary button; the only one that draws
    #[default]
    Left,
    /// Secondary button; cancels the gesture in progress
    Right,
    /// Left to the host (panning and the like)
    Middle,
}
