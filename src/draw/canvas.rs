//! Two-layer drawing canvas with snapshot history.
//!
//! The canvas owns two Cairo image surfaces of the same size:
//! - the persistent image, which only changes through committed commands
//!   and undo/redo;
//! - the overlay, which receives preview commands and is wiped by every
//!   [`Canvas::compose`].

use super::color::Color;
use super::command::PaintCommand;
use super::history::History;
use cairo::{Context, Format, ImageSurface, Operator};
use log::debug;
use thiserror::Error;

/// Errors raised while creating or copying canvas surfaces.
#[derive(Debug, Error)]
pub enum CanvasError {
    #[error("Cairo error: {0}")]
    Cairo(#[from] cairo::Error),

    #[error("Surface data is borrowed elsewhere: {0}")]
    Borrow(#[from] cairo::BorrowError),

    #[error("Failed to encode PNG: {0}")]
    Png(#[from] cairo::IoError),

    #[error("Failed to write image: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid canvas size {width}x{height}")]
    InvalidSize { width: i32, height: i32 },
}

/// Persistent image, preview overlay, and the undo history of the former.
pub struct Canvas {
    persistent: ImageSurface,
    overlay: ImageSurface,
    background: Color,
    history: History<ImageSurface>,
}

impl Canvas {
    /// Creates a blank canvas. Both layers start fully transparent and the
    /// blank image is the history floor.
    pub fn new(
        width: i32,
        height: i32,
        background: Color,
        history_depth: usize,
    ) -> Result<Self, CanvasError> {
        if width <= 0 || height <= 0 {
            return Err(CanvasError::InvalidSize { width, height });
        }

        let persistent = ImageSurface::create(Format::ARgb32, width, height)?;
        let overlay = ImageSurface::create(Format::ARgb32, width, height)?;
        let history = History::new(history_depth, copy_surface(&persistent)?);

        debug!("Created {width}x{height} canvas with history depth {history_depth}");
        Ok(Self {
            persistent,
            overlay,
            background,
            history,
        })
    }

    pub fn width(&self) -> i32 {
        self.persistent.width()
    }

    pub fn height(&self) -> i32 {
        self.persistent.height()
    }

    pub fn background(&self) -> Color {
        self.background
    }

    /// Paints `command` onto one of the layers.
    ///
    /// Preview commands go to the overlay and leave history alone. Anything
    /// else is committed: painted onto the persistent image, which is then
    /// snapshotted into history. Commands that paint nothing are skipped
    /// entirely.
    pub fn execute(
        &mut self,
        command: &PaintCommand,
        preview_only: bool,
    ) -> Result<(), CanvasError> {
        if command.is_noop() {
            return Ok(());
        }

        if preview_only {
            let ctx = Context::new(&self.overlay)?;
            command.execute(&ctx);
            return Ok(());
        }

        {
            let ctx = Context::new(&self.persistent)?;
            command.execute(&ctx);
        }
        self.history.push(copy_surface(&self.persistent)?);
        debug!(
            "Committed command; undo depth {}, redo cleared",
            self.history.undo_len() - 1
        );
        Ok(())
    }

    /// Restores the previous committed image. Returns `false` at the floor.
    pub fn undo(&mut self) -> Result<bool, CanvasError> {
        let Some(previous) = self.history.undo() else {
            return Ok(false);
        };
        paint_over(&self.persistent, previous)?;
        debug!("Undo; {} step(s) left", self.history.undo_len() - 1);
        Ok(true)
    }

    /// Re-applies the most recently undone image. Returns `false` if none.
    pub fn redo(&mut self) -> Result<bool, CanvasError> {
        let Some(next) = self.history.redo() else {
            return Ok(false);
        };
        paint_over(&self.persistent, next)?;
        debug!("Redo; {} step(s) left", self.history.redo_len());
        Ok(true)
    }

    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    /// Undo stack entries including the current image.
    pub fn undo_depth(&self) -> usize {
        self.history.undo_len()
    }

    pub fn redo_depth(&self) -> usize {
        self.history.redo_len()
    }

    /// Composites background, persistent image and overlay onto `target`,
    /// then clears the overlay for the next frame.
    pub fn compose(&mut self, target: &Context) -> Result<(), CanvasError> {
        self.composite_onto(target)?;

        let ctx = Context::new(&self.overlay)?;
        ctx.set_operator(Operator::Clear);
        ctx.paint()?;
        Ok(())
    }

    /// Renders the current composition into a new surface without touching
    /// the overlay.
    pub fn composite_image(&self) -> Result<ImageSurface, CanvasError> {
        let surface = ImageSurface::create(Format::ARgb32, self.width(), self.height())?;
        {
            let ctx = Context::new(&surface)?;
            self.composite_onto(&ctx)?;
        }
        surface.flush();
        Ok(surface)
    }

    /// Owned copy of the persistent image.
    pub fn snapshot(&self) -> Result<ImageSurface, CanvasError> {
        copy_surface(&self.persistent)
    }

    /// Raw ARGB32 bytes of the persistent image.
    pub fn persistent_bytes(&self) -> Result<Vec<u8>, CanvasError> {
        surface_bytes(&self.persistent)
    }

    /// Raw ARGB32 bytes of the overlay.
    pub fn overlay_bytes(&self) -> Result<Vec<u8>, CanvasError> {
        surface_bytes(&self.overlay)
    }

    /// Writes the composited image as PNG.
    pub fn write_png<W: std::io::Write>(&self, writer: &mut W) -> Result<(), CanvasError> {
        self.composite_image()?.write_to_png(writer)?;
        Ok(())
    }

    fn composite_onto(&self, target: &Context) -> Result<(), CanvasError> {
        target.save()?;
        target.set_operator(Operator::Source);
        self.background.apply(target);
        target.paint()?;

        target.set_operator(Operator::Over);
        target.set_source_surface(&self.persistent, 0.0, 0.0)?;
        target.paint()?;
        target.set_source_surface(&self.overlay, 0.0, 0.0)?;
        target.paint()?;
        target.restore()?;
        Ok(())
    }
}

/// Replaces every pixel of `dst` with those of `src`.
fn paint_over(dst: &ImageSurface, src: &ImageSurface) -> Result<(), CanvasError> {
    let ctx = Context::new(dst)?;
    ctx.set_operator(Operator::Source);
    ctx.set_source_surface(src, 0.0, 0.0)?;
    ctx.paint()?;
    Ok(())
}

/// Deep copy; the result shares no pixel buffer with `src`.
fn copy_surface(src: &ImageSurface) -> Result<ImageSurface, CanvasError> {
    let copy = ImageSurface::create(Format::ARgb32, src.width(), src.height())?;
    paint_over(&copy, src)?;
    copy.flush();
    Ok(copy)
}

fn surface_bytes(src: &ImageSurface) -> Result<Vec<u8>, CanvasError> {
    let mut copy = copy_surface(src)?;
    let data = copy.data()?;
    Ok(data.to_vec())
}
