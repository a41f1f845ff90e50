//! Rendering primitives, paint commands, and the layered canvas (Cairo-based).
//!
//! - [`Color`] and [`geometry`]: value types and shape derivations
//! - [`PaintCommand`]: a replayable paint operation
//! - [`History`]: bounded undo/redo of image snapshots
//! - [`Canvas`]: persistent image plus preview overlay

pub mod canvas;
pub mod color;
pub mod command;
pub mod geometry;
pub mod history;

pub use canvas::{Canvas, CanvasError};
pub use color::Color;
pub use command::PaintCommand;
pub use geometry::{Point, Rect};
pub use history::History;
