//! Scripted input for driving an [`Editor`] without a window.
//!
//! A script is a TOML document holding an ordered `[[event]]` array:
//!
//! ```toml
//! [[event]]
//! kind = "tool"
//! tool = "circle"
//!
//! [[event]]
//! kind = "down"
//! x = 10.0
//! y = 10.0
//!
//! [[event]]
//! kind = "up"
//! x = 13.0
//! y = 14.0
//! ```
//!
//! Unless manual frames are requested, every `move` and `up` is followed by
//! one frame, which is what an interactive host running at a fixed tick
//! would produce.

use crate::config::{ColorSpec, KeyBinding};
use crate::draw::{CanvasError, Point};
use crate::editor::Editor;
use crate::input::{Key, Modifiers, MouseButton, ShapeKind};
use cairo::{Context, Format, ImageSurface};
use log::{debug, info, warn};
use serde::Deserialize;
use std::fs;
use std::path::Path;
use thiserror::Error;

/// Errors raised while loading or replaying a script.
#[derive(Debug, Error)]
pub enum ScriptError {
    #[error("Failed to read script: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse script: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Event {index}: invalid key '{key}': {reason}")]
    InvalidKey {
        index: usize,
        key: String,
        reason: String,
    },

    #[error("Event {index}: unknown color {spec:?}")]
    InvalidColor { index: usize, spec: ColorSpec },

    #[error(transparent)]
    Canvas(#[from] CanvasError),
}

/// One scripted input event.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum ScriptEvent {
    Down {
        x: f64,
        y: f64,
        #[serde(default)]
        button: MouseButton,
    },
    Move {
        x: f64,
        y: f64,
    },
    Up {
        x: f64,
        y: f64,
        #[serde(default)]
        button: MouseButton,
    },
    Tool {
        tool: ShapeKind,
    },
    Color {
        color: ColorSpec,
    },
    Key {
        key: String,
    },
    Frame {
        #[serde(default = "default_frame_count")]
        count: u32,
    },
}

fn default_frame_count() -> u32 {
    1
}

/// An ordered list of events.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Script {
    #[serde(rename = "event", default)]
    pub events: Vec<ScriptEvent>,
}

/// Replay behaviour.
#[derive(Debug, Clone, Copy, Default)]
pub struct ReplayOptions {
    /// Only run frames where the script asks for them
    pub manual_frames: bool,
}

/// Counters reported after a replay.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReplayStats {
    pub events: usize,
    pub frames: usize,
}

impl Script {
    pub fn parse(source: &str) -> Result<Self, ScriptError> {
        Ok(toml::from_str(source)?)
    }

    pub fn load(path: &Path) -> Result<Self, ScriptError> {
        let source = fs::read_to_string(path)?;
        let script = Self::parse(&source)?;
        info!(
            "Loaded {} events from {}",
            script.events.len(),
            path.display()
        );
        Ok(script)
    }

    /// Feeds every event to `editor`, running frames against a scratch
    /// surface the size of the canvas.
    pub fn replay(
        &self,
        editor: &mut Editor,
        options: ReplayOptions,
    ) -> Result<ReplayStats, ScriptError> {
        let target = ImageSurface::create(
            Format::ARgb32,
            editor.canvas().width(),
            editor.canvas().height(),
        )
        .map_err(CanvasError::from)?;
        let ctx = Context::new(&target).map_err(CanvasError::from)?;

        let mut stats = ReplayStats::default();
        for (index, event) in self.events.iter().enumerate() {
            debug!("Event {index}: {event:?}");
            let frames = apply_event(editor, index, event, options)?;
            for _ in 0..frames {
                editor.frame(&ctx)?;
            }
            stats.events += 1;
            stats.frames += frames as usize;
        }

        info!(
            "Replayed {} events over {} frames",
            stats.events, stats.frames
        );
        Ok(stats)
    }
}

/// Applies one event and returns how many frames should follow it.
fn apply_event(
    editor: &mut Editor,
    index: usize,
    event: &ScriptEvent,
    options: ReplayOptions,
) -> Result<u32, ScriptError> {
    let implicit = if options.manual_frames { 0 } else { 1 };

    match event {
        ScriptEvent::Down { x, y, button } => {
            editor.on_mouse_press(*button, Point::new(*x, *y));
            Ok(0)
        }
        ScriptEvent::Move { x, y } => {
            editor.on_mouse_motion(Point::new(*x, *y));
            Ok(implicit)
        }
        ScriptEvent::Up { x, y, button } => {
            editor.on_mouse_release(*button, Point::new(*x, *y));
            Ok(implicit)
        }
        ScriptEvent::Tool { tool } => {
            editor.select_tool(*tool);
            Ok(0)
        }
        ScriptEvent::Color { color } => {
            let resolved = color
                .try_to_color()
                .ok_or_else(|| ScriptError::InvalidColor {
                    index,
                    spec: color.clone(),
                })?;
            editor.set_color(resolved);
            Ok(0)
        }
        ScriptEvent::Key { key } => {
            let binding = KeyBinding::parse(key).map_err(|reason| ScriptError::InvalidKey {
                index,
                key: key.clone(),
                reason,
            })?;
            let modifiers = Modifiers {
                shift: binding.shift,
                ctrl: binding.ctrl,
                alt: binding.alt,
            };
            if editor
                .on_key_press(Key::from_name(&binding.key), modifiers)?
                .is_none()
            {
                warn!("Event {index}: '{key}' is not bound to any action");
            }
            Ok(0)
        }
        ScriptEvent::Frame { count } => Ok(*count),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::KeybindingsConfig;
    use crate::draw::Canvas;
    use crate::draw::color::{BLACK, RED, WHITE};

    const CIRCLE: &str = r#"
[[event]]
kind = "tool"
tool = "circle"

[[event]]
kind = "down"
x = 10.0
y = 10.0

[[event]]
kind = "up"
x = 13.0
y = 14.0
"#;

    fn test_editor() -> Editor {
        let action_map = KeybindingsConfig::default().build_action_map().unwrap();
        let canvas = Canvas::new(32, 32, WHITE, 8).unwrap();
        Editor::new(canvas, ShapeKind::Line, BLACK, 5.0, action_map)
    }

    #[test]
    fn parses_every_event_kind() {
        let script = Script::parse(
            r#"
[[event]]
kind = "down"
x = 1.0
y = 2.0
button = "right"

[[event]]
kind = "move"
x = 3.0
y = 4.0

[[event]]
kind = "up"
x = 3.0
y = 4.0

[[event]]
kind = "color"
color = [255, 0, 0]

[[event]]
kind = "key"
key = "Ctrl+Z"

[[event]]
kind = "tool"
tool = "right-triangle"

[[event]]
kind = "frame"
"#,
        )
        .unwrap();

        assert_eq!(script.events.len(), 7);
        assert_eq!(
            script.events[0],
            ScriptEvent::Down {
                x: 1.0,
                y: 2.0,
                button: MouseButton::Right
            }
        );
        assert_eq!(
            script.events[2],
            ScriptEvent::Up {
                x: 3.0,
                y: 4.0,
                button: MouseButton::Left
            }
        );
        assert_eq!(
            script.events[3],
            ScriptEvent::Color {
                color: ColorSpec::Rgb([255, 0, 0])
            }
        );
        assert_eq!(
            script.events[5],
            ScriptEvent::Tool {
                tool: ShapeKind::RightTriangle
            }
        );
        assert_eq!(script.events[6], ScriptEvent::Frame { count: 1 });
    }

    #[test]
    fn unknown_kind_is_a_parse_error() {
        let err = Script::parse("[[event]]\nkind = \"teleport\"\n").unwrap_err();
        assert!(matches!(err, ScriptError::Parse(_)));
    }

    #[test]
    fn empty_document_has_no_events() {
        assert!(Script::parse("").unwrap().events.is_empty());
    }

    #[test]
    fn release_is_followed_by_a_committing_frame() {
        let mut editor = test_editor();
        let stats = Script::parse(CIRCLE)
            .unwrap()
            .replay(&mut editor, ReplayOptions::default())
            .unwrap();

        assert_eq!(stats, ReplayStats { events: 3, frames: 1 });
        assert_eq!(editor.canvas().undo_depth(), 2);
    }

    #[test]
    fn manual_frames_wait_for_explicit_frame_events() {
        let options = ReplayOptions {
            manual_frames: true,
        };
        let mut editor = test_editor();
        Script::parse(CIRCLE)
            .unwrap()
            .replay(&mut editor, options)
            .unwrap();
        assert_eq!(editor.canvas().undo_depth(), 1);

        let mut editor = test_editor();
        let with_frame = format!("{CIRCLE}\n[[event]]\nkind = \"frame\"\ncount = 2\n");
        let stats = Script::parse(&with_frame)
            .unwrap()
            .replay(&mut editor, options)
            .unwrap();
        assert_eq!(stats.frames, 2);
        assert_eq!(editor.canvas().undo_depth(), 2);
    }

    #[test]
    fn key_and_color_events_reach_the_editor() {
        let mut editor = test_editor();
        let script = format!(
            "{CIRCLE}\n[[event]]\nkind = \"key\"\nkey = \"Ctrl+Z\"\n\n\
             [[event]]\nkind = \"color\"\ncolor = \"red\"\n"
        );
        Script::parse(&script)
            .unwrap()
            .replay(&mut editor, ReplayOptions::default())
            .unwrap();

        assert_eq!(editor.canvas().undo_depth(), 1);
        assert!(editor.canvas().can_redo());
        assert_eq!(editor.color(), RED);
    }

    #[test]
    fn eraser_tolerates_unbounded_coordinates() {
        let mut editor = test_editor();
        let stats = Script::parse(
            r#"
[[event]]
kind = "tool"
tool = "eraser"

[[event]]
kind = "down"
x = 5.0
y = 5.0

[[event]]
kind = "move"
x = 1e20
y = 5.0

[[event]]
kind = "move"
x = inf
y = -inf

[[event]]
kind = "up"
x = inf
y = -inf
"#,
        )
        .unwrap()
        .replay(&mut editor, ReplayOptions::default())
        .unwrap();

        assert_eq!(stats.frames, 3);
        assert_eq!(editor.canvas().undo_depth(), 2);
    }

    #[test]
    fn unknown_color_reports_event_index() {
        let mut editor = test_editor();
        let err = Script::parse("[[event]]\nkind = \"color\"\ncolor = \"mauve\"\n")
            .unwrap()
            .replay(&mut editor, ReplayOptions::default())
            .unwrap_err();
        assert!(matches!(err, ScriptError::InvalidColor { index: 0, .. }));
    }

    #[test]
    fn malformed_key_is_rejected() {
        let mut editor = test_editor();
        let err = Script::parse("[[event]]\nkind = \"key\"\nkey = \"Ctrl+Shift\"\n")
            .unwrap()
            .replay(&mut editor, ReplayOptions::default())
            .unwrap_err();
        assert!(matches!(err, ScriptError::InvalidKey { index: 0, .. }));
    }
}
