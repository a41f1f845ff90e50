//! gesso: a small vector drawing editor core.
//!
//! The editor keeps a persistent raster image and a transparent overlay for
//! gesture previews, with bounded snapshot undo/redo. Hosts feed it pointer
//! and key events and call [`Editor::frame`] once per tick; the bundled
//! binary drives it headlessly from a TOML event script.

pub mod config;
pub mod draw;
pub mod editor;
pub mod export;
pub mod input;
pub mod script;
pub mod util;

pub use config::Config;
pub use draw::{Canvas, CanvasError, Color, PaintCommand, Point};
pub use editor::{Editor, EditorError};
pub use input::{ShapeKind, Tool, ToolState};
pub use script::{ReplayOptions, Script, ScriptError};
