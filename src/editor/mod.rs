//! Editor orchestration: routes input to the active tool and drives the
//! per-frame paint and compose cycle.

use crate::config::{Action, Config, KeyBinding};
use crate::draw::{Canvas, CanvasError, Color, Point};
use crate::input::{Key, Modifiers, MouseButton, ShapeKind, Tool, ToolState};
use log::{debug, info};
use std::collections::HashMap;
use thiserror::Error;

/// Errors raised while building an editor from configuration.
#[derive(Debug, Error)]
pub enum EditorError {
    #[error("Failed to create canvas: {0}")]
    Canvas(#[from] CanvasError),

    #[error("Invalid keybindings: {0}")]
    Keybindings(String),
}

/// Owns the canvas, the active tool, and the active color.
///
/// The host calls the `on_*` methods as events arrive and [`Editor::frame`]
/// once per tick. Switching tools discards any gesture in progress.
pub struct Editor {
    canvas: Canvas,
    tool: Tool,
    color: Color,
    eraser_radius: f64,
    action_map: HashMap<KeyBinding, Action>,
    /// Set whenever an event changed what the next frame will show
    pub needs_redraw: bool,
}

impl Editor {
    pub fn new(
        canvas: Canvas,
        tool: ShapeKind,
        color: Color,
        eraser_radius: f64,
        action_map: HashMap<KeyBinding, Action>,
    ) -> Self {
        Self {
            canvas,
            tool: Tool::with_eraser_radius(tool, eraser_radius),
            color,
            eraser_radius,
            action_map,
            needs_redraw: true,
        }
    }

    /// Builds a canvas and editor from the loaded settings.
    pub fn from_config(config: &Config) -> Result<Self, EditorError> {
        let action_map = config
            .keybindings
            .build_action_map()
            .map_err(EditorError::Keybindings)?;
        let canvas = Canvas::new(
            config.canvas.width,
            config.canvas.height,
            config.canvas.background.to_color(),
            config.canvas.history_depth,
        )?;

        Ok(Self::new(
            canvas,
            config.drawing.default_tool,
            config.drawing.default_color.to_color(),
            config.eraser.radius,
            action_map,
        ))
    }

    pub fn canvas(&self) -> &Canvas {
        &self.canvas
    }

    pub fn tool(&self) -> &Tool {
        &self.tool
    }

    pub fn color(&self) -> Color {
        self.color
    }

    /// Pointer pressed. Only the primary button starts a gesture; the
    /// secondary button abandons the current one.
    pub fn on_mouse_press(&mut self, button: MouseButton, pos: Point) {
        match button {
            MouseButton::Left => {
                self.tool.activate(pos);
                self.needs_redraw = true;
            }
            MouseButton::Right => {
                if self.tool.state() != ToolState::Inactive {
                    debug!("Cancelled {} gesture", self.tool.kind().label());
                    self.reset_tool(self.tool.kind());
                    self.needs_redraw = true;
                }
            }
            MouseButton::Middle => {}
        }
    }

    pub fn on_mouse_motion(&mut self, pos: Point) {
        if self.tool.state() == ToolState::InProgress {
            self.tool.update(pos);
            self.needs_redraw = true;
        }
    }

    pub fn on_mouse_release(&mut self, button: MouseButton, pos: Point) {
        if button != MouseButton::Left {
            return;
        }
        self.tool.finish(pos);
        self.needs_redraw = true;
    }

    /// Resolves a key press through the keybinding map and performs the
    /// bound action. Returns the action, if any was bound.
    pub fn on_key_press(
        &mut self,
        key: Key,
        modifiers: Modifiers,
    ) -> Result<Option<Action>, CanvasError> {
        let Some(action) = self.find_action(key, modifiers) else {
            return Ok(None);
        };
        self.handle_action(action)?;
        Ok(Some(action))
    }

    pub fn handle_action(&mut self, action: Action) -> Result<(), CanvasError> {
        match action {
            Action::Undo => {
                self.undo()?;
            }
            Action::Redo => {
                self.redo()?;
            }
            select => {
                if let Some(kind) = select.tool() {
                    self.select_tool(kind);
                }
            }
        }
        Ok(())
    }

    /// Replaces the active tool with a fresh, inactive one.
    pub fn select_tool(&mut self, kind: ShapeKind) {
        if self.tool.state() != ToolState::Inactive {
            debug!(
                "Discarding {} gesture on switch to {}",
                self.tool.kind().label(),
                kind.label()
            );
        }
        self.reset_tool(kind);
        info!("Tool: {}", kind.label());
        self.needs_redraw = true;
    }

    pub fn set_color(&mut self, color: Color) {
        self.color = color;
        self.needs_redraw = true;
    }

    pub fn undo(&mut self) -> Result<bool, CanvasError> {
        let changed = self.canvas.undo()?;
        self.needs_redraw |= changed;
        Ok(changed)
    }

    pub fn redo(&mut self) -> Result<bool, CanvasError> {
        let changed = self.canvas.redo()?;
        self.needs_redraw |= changed;
        Ok(changed)
    }

    /// One frame: fetch the tool's command, route it to the overlay or the
    /// persistent image, then composite everything onto `target`.
    pub fn frame(&mut self, target: &cairo::Context) -> Result<(), CanvasError> {
        let color = self.paint_color();
        let command = self.tool.command(color);
        self.canvas.execute(&command, command.is_preview())?;
        self.canvas.compose(target)?;
        self.needs_redraw = false;
        Ok(())
    }

    /// The eraser paints with the background; every other tool with the
    /// active color.
    fn paint_color(&self) -> Color {
        if self.tool.kind() == ShapeKind::Eraser {
            self.canvas.background()
        } else {
            self.color
        }
    }

    fn reset_tool(&mut self, kind: ShapeKind) {
        self.tool = Tool::with_eraser_radius(kind, self.eraser_radius);
    }

    fn find_action(&self, key: Key, modifiers: Modifiers) -> Option<Action> {
        let name = key.binding_name()?;
        let binding = KeyBinding::from_press(&name, modifiers.ctrl, modifiers.shift, modifiers.alt);
        let action = self.action_map.get(&binding).copied();
        if action.is_none() && (modifiers.ctrl || modifiers.alt) {
            debug!("No action bound to {:?} with {:?}", key, modifiers);
        }
        action
    }
}
