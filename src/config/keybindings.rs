//! Keybinding configuration types and parsing.
//!
//! Hosts forward raw key presses; the editor resolves them to [`Action`]s
//! through a map built from these user-editable binding strings.

use crate::input::ShapeKind;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Editor actions that can be bound to keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Action {
    Undo,
    Redo,

    // Tool selection
    SelectLine,
    SelectCircle,
    SelectSquare,
    SelectRectangle,
    SelectRhombus,
    SelectRightTriangle,
    SelectEquilateralTriangle,
    SelectEraser,
}

impl Action {
    /// The tool this action selects, if it is a tool selection.
    pub fn tool(self) -> Option<ShapeKind> {
        match self {
            Action::Undo | Action::Redo => None,
            Action::SelectLine => Some(ShapeKind::Line),
            Action::SelectCircle => Some(ShapeKind::Circle),
            Action::SelectSquare => Some(ShapeKind::Square),
            Action::SelectRectangle => Some(ShapeKind::Rectangle),
            Action::SelectRhombus => Some(ShapeKind::Rhombus),
            Action::SelectRightTriangle => Some(ShapeKind::RightTriangle),
            Action::SelectEquilateralTriangle => Some(ShapeKind::EquilateralTriangle),
            Action::SelectEraser => Some(ShapeKind::Eraser),
        }
    }
}

/// A single keybinding: a key name with optional modifiers.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct KeyBinding {
    pub key: String,
    pub ctrl: bool,
    pub shift: bool,
    pub alt: bool,
}

impl KeyBinding {
    /// Parse a keybinding string like "Ctrl+Shift+Z" or "Escape".
    ///
    /// Modifiers may appear in any order and spaces around `+` are allowed.
    /// Key names are stored lowercased so lookups are case-insensitive.
    pub fn parse(s: &str) -> Result<Self, String> {
        let s = s.trim();
        if s.is_empty() {
            return Err("Empty keybinding string".to_string());
        }

        let normalized = s.replace(" + ", "+").replace("+ ", "+").replace(" +", "+");

        let mut ctrl = false;
        let mut shift = false;
        let mut alt = false;
        let mut key_parts = Vec::new();

        for part in normalized.split('+') {
            match part.to_lowercase().as_str() {
                "ctrl" | "control" => ctrl = true,
                "shift" => shift = true,
                "alt" => alt = true,
                _ => key_parts.push(part),
            }
        }

        if key_parts.is_empty() {
            return Err(format!("No key specified in: {}", s));
        }

        // "Ctrl++" splits into ["Ctrl", "", ""]; the key is '+' itself.
        let key = key_parts.join("+");
        let key = if key.chars().all(|c| c == '+') {
            "+".to_string()
        } else {
            key
        };

        Ok(Self {
            key: key.to_lowercase(),
            ctrl,
            shift,
            alt,
        })
    }

    /// Builds the binding that a key press with these modifiers would match.
    pub fn from_press(key: &str, ctrl: bool, shift: bool, alt: bool) -> Self {
        Self {
            key: key.to_lowercase(),
            ctrl,
            shift,
            alt,
        }
    }
}

/// Configuration for all keybindings.
///
/// Each action can have several bindings:
/// ```toml
/// [keybindings]
/// undo = ["Ctrl+Z"]
/// redo = ["Ctrl+Y", "Ctrl+Shift+Z"]
/// select_circle = ["2", "C"]
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct KeybindingsConfig {
    #[serde(default = "default_undo")]
    pub undo: Vec<String>,

    #[serde(default = "default_redo")]
    pub redo: Vec<String>,

    #[serde(default = "default_select_line")]
    pub select_line: Vec<String>,

    #[serde(default = "default_select_circle")]
    pub select_circle: Vec<String>,

    #[serde(default = "default_select_square")]
    pub select_square: Vec<String>,

    #[serde(default = "default_select_rectangle")]
    pub select_rectangle: Vec<String>,

    #[serde(default = "default_select_rhombus")]
    pub select_rhombus: Vec<String>,

    #[serde(default = "default_select_right_triangle")]
    pub select_right_triangle: Vec<String>,

    #[serde(default = "default_select_equilateral_triangle")]
    pub select_equilateral_triangle: Vec<String>,

    #[serde(default = "default_select_eraser")]
    pub select_eraser: Vec<String>,
}

impl Default for KeybindingsConfig {
    fn default() -> Self {
        Self {
            undo: default_undo(),
            redo: default_redo(),
            select_line: default_select_line(),
            select_circle: default_select_circle(),
            select_square: default_select_square(),
            select_rectangle: default_select_rectangle(),
            select_rhombus: default_select_rhombus(),
            select_right_triangle: default_select_right_triangle(),
            select_equilateral_triangle: default_select_equilateral_triangle(),
            select_eraser: default_select_eraser(),
        }
    }
}

impl KeybindingsConfig {
    /// Build a lookup map from keybindings to actions.
    ///
    /// Fails on the first unparsable binding or on a binding assigned to
    /// two actions.
    pub fn build_action_map(&self) -> Result<HashMap<KeyBinding, Action>, String> {
        let groups: [(&[String], Action); 10] = [
            (&self.undo, Action::Undo),
            (&self.redo, Action::Redo),
            (&self.select_line, Action::SelectLine),
            (&self.select_circle, Action::SelectCircle),
            (&self.select_square, Action::SelectSquare),
            (&self.select_rectangle, Action::SelectRectangle),
            (&self.select_rhombus, Action::SelectRhombus),
            (&self.select_right_triangle, Action::SelectRightTriangle),
            (
                &self.select_equilateral_triangle,
                Action::SelectEquilateralTriangle,
            ),
            (&self.select_eraser, Action::SelectEraser),
        ];

        let mut map = HashMap::new();
        for (bindings, action) in groups {
            for binding_str in bindings {
                let binding = KeyBinding::parse(binding_str)?;
                if let Some(existing) = map.insert(binding, action) {
                    return Err(format!(
                        "Duplicate keybinding '{}' assigned to both {:?} and {:?}",
                        binding_str, existing, action
                    ));
                }
            }
        }

        Ok(map)
    }
}

fn default_undo() -> Vec<String> {
    vec!["Ctrl+Z".to_string()]
}

fn default_redo() -> Vec<String> {
    vec!["Ctrl+Y".to_string(), "Ctrl+Shift+Z".to_string()]
}

fn default_select_line() -> Vec<String> {
    vec!["1".to_string()]
}

fn default_select_circle() -> Vec<String> {
    vec!["2".to_string()]
}

fn default_select_square() -> Vec<String> {
    vec!["3".to_string()]
}

fn default_select_rectangle() -> Vec<String> {
    vec!["4".to_string()]
}

fn default_select_rhombus() -> Vec<String> {
    vec!["5".to_string()]
}

fn default_select_right_triangle() -> Vec<String> {
    vec!["6".to_string()]
}

fn default_select_equilateral_triangle() -> Vec<String> {
    vec!["7".to_string()]
}

fn default_select_eraser() -> Vec<String> {
    vec!["8".to_string(), "E".to_string()]
}
