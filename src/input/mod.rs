//! Input handling: events from the host and the drawing tool state machine.

pub mod events;
pub mod modifiers;
pub mod tool;

pub use events::{Key, MouseButton};
pub use modifiers::Modifiers;
pub use tool::{ShapeKind, Tool, ToolState};
