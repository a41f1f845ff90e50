//! Replayable paint operations.
//!
//! A [`PaintCommand`] carries everything needed to draw one shape: the
//! derived geometry and the color. Executing it against a Cairo context is
//! deterministic, so painting the same command twice onto identical
//! surfaces yields identical pixels.

use super::color::Color;
use super::geometry::{self, Point, Rect};

/// A single paint operation bound to its geometry and color.
#[derive(Clone, Debug, PartialEq)]
pub enum PaintCommand {
    /// Paints nothing; the tool has no visible output right now.
    Empty,
    /// Preview-only wrapper. Painted the same way, but routed to the overlay.
    Overlay(Box<PaintCommand>),
    /// Thin anti-aliased segment
    Line {
        start: Point,
        end: Point,
        color: Color,
    },
    /// Filled disc
    Circle {
        center: Point,
        radius: f64,
        color: Color,
    },
    /// Filled axis-aligned box
    Rect { rect: Rect, color: Color },
    /// Filled closed polygon with an anti-aliased border
    Polygon { points: Vec<Point>, color: Color },
    /// Row of disc stamps approximating a thick stroke
    WideLine {
        start: Point,
        end: Point,
        radius: f64,
        color: Color,
    },
}

impl PaintCommand {
    /// Wraps this command so the canvas paints it onto the overlay.
    ///
    /// Wrapping is idempotent and `Empty` stays `Empty`.
    pub fn into_overlay(self) -> PaintCommand {
        match self {
            PaintCommand::Empty | PaintCommand::Overlay(_) => self,
            other => PaintCommand::Overlay(Box::new(other)),
        }
    }

    /// Whether this command belongs on the overlay layer.
    pub fn is_preview(&self) -> bool {
        matches!(self, PaintCommand::Overlay(_))
    }

    /// Whether executing this command leaves every surface untouched.
    pub fn is_noop(&self) -> bool {
        match self {
            PaintCommand::Empty => true,
            PaintCommand::Overlay(inner) => inner.is_noop(),
            PaintCommand::WideLine { start, end, .. } => {
                geometry::stroke_sample_count(*start, *end) == 0
            }
            _ => false,
        }
    }

    /// Paints the command onto whatever surface `ctx` targets.
    ///
    /// Cairo drawing status is ignored per primitive; a failed fill leaves
    /// the surface as it was.
    pub fn execute(&self, ctx: &cairo::Context) {
        let _ = ctx.save();
        ctx.set_antialias(cairo::Antialias::Default);
        ctx.set_operator(cairo::Operator::Over);

        match self {
            PaintCommand::Empty => {}
            PaintCommand::Overlay(inner) => inner.execute(ctx),
            PaintCommand::Line { start, end, color } => {
                color.apply(ctx);
                ctx.set_line_width(1.0);
                ctx.move_to(start.x, start.y);
                ctx.line_to(end.x, end.y);
                let _ = ctx.stroke();
            }
            PaintCommand::Circle {
                center,
                radius,
                color,
            } => render_disc(ctx, *center, *radius, *color),
            PaintCommand::Rect { rect, color } => {
                color.apply(ctx);
                ctx.rectangle(rect.x, rect.y, rect.width, rect.height);
                let _ = ctx.fill();
            }
            PaintCommand::Polygon { points, color } => render_polygon(ctx, points, *color),
            PaintCommand::WideLine {
                start,
                end,
                radius,
                color,
            } => render_wide_line(ctx, *start, *end, *radius, *color),
        }

        let _ = ctx.restore();
    }
}

/// Outline then fill, so border and interior share one edge.
fn render_disc(ctx: &cairo::Context, center: Point, radius: f64, color: Color) {
    if radius <= 0.0 {
        return;
    }

    color.apply(ctx);
    ctx.new_path();
    ctx.arc(center.x, center.y, radius, 0.0, std::f64::consts::TAU);
    ctx.set_line_width(1.0);
    let _ = ctx.stroke_preserve();
    let _ = ctx.fill();
}

/// Stamps the part of the segment lying within `radius` of the clip region.
fn render_wide_line(ctx: &cairo::Context, start: Point, end: Point, radius: f64, color: Color) {
    let Ok((x1, y1, x2, y2)) = ctx.clip_extents() else {
        return;
    };
    let clip = Rect::new(Point::new(x1, y1), Point::new(x2 - x1, y2 - y1));
    let bounds = clip.inflate(radius + 1.0);
    let Some((from, to)) = geometry::clip_segment(start, end, bounds) else {
        return;
    };

    for center in geometry::stroke_samples(from, to) {
        render_disc(ctx, center, radius, color);
    }
}

fn render_polygon(ctx: &cairo::Context, points: &[Point], color: Color) {
    let Some((first, rest)) = points.split_first() else {
        return;
    };

    color.apply(ctx);
    ctx.new_path();
    ctx.move_to(first.x, first.y);
    for point in rest {
        ctx.line_to(point.x, point.y);
    }
    ctx.close_path();
    ctx.set_line_width(1.0);
    ctx.set_line_join(cairo::LineJoin::Miter);
    let _ = ctx.stroke_preserve();
    let _ = ctx.fill();
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::draw::color::{BLACK, RED};
    use cairo::{Context, Format, ImageSurface};

    fn paint(command: &PaintCommand) -> Vec<u8> {
        let mut surface = ImageSurface::create(Format::ARgb32, 40, 40).unwrap();
        {
            let ctx = Context::new(&surface).unwrap();
            command.execute(&ctx);
        }
        surface.flush();
        surface.data().unwrap().to_vec()
    }

    fn pixel_alpha(data: &[u8], x: usize, y: usize) -> u8 {
        // ARGB32 is native-endian u32; alpha is the high byte.
        let offset = (y * 40 + x) * 4;
        let word = u32::from_ne_bytes(data[offset..offset + 4].try_into().unwrap());
        (word >> 24) as u8
    }

    #[test]
    fn empty_paints_nothing() {
        assert!(paint(&PaintCommand::Empty).iter().all(|b| *b == 0));
    }

    #[test]
    fn repeated_execution_is_pixel_identical() {
        let command = PaintCommand::Polygon {
            points: geometry::rhombus(Point::new(20.0, 20.0), Point::new(30.0, 28.0)),
            color: RED,
        };
        assert_eq!(paint(&command), paint(&command));
    }

    #[test]
    fn overlay_paints_like_inner_command() {
        let inner = PaintCommand::Circle {
            center: Point::new(20.0, 20.0),
            radius: 8.0,
            color: BLACK,
        };
        let wrapped = inner.clone().into_overlay();
        assert!(wrapped.is_preview());
        assert_eq!(paint(&inner), paint(&wrapped));
    }

    #[test]
    fn into_overlay_does_not_nest() {
        let once = PaintCommand::Rect {
            rect: Rect::default(),
            color: RED,
        }
        .into_overlay();
        assert_eq!(once.clone().into_overlay(), once);
        assert_eq!(PaintCommand::Empty.into_overlay(), PaintCommand::Empty);
    }

    #[test]
    fn circle_fills_its_interior() {
        let data = paint(&PaintCommand::Circle {
            center: Point::new(20.0, 20.0),
            radius: 6.0,
            color: BLACK,
        });
        assert_eq!(pixel_alpha(&data, 20, 20), 255);
        assert_eq!(pixel_alpha(&data, 2, 2), 0);
    }

    #[test]
    fn wide_line_stamps_along_segment() {
        let data = paint(&PaintCommand::WideLine {
            start: Point::new(5.0, 20.0),
            end: Point::new(35.0, 20.0),
            radius: 3.0,
            color: BLACK,
        });
        assert_eq!(pixel_alpha(&data, 20, 20), 255);
        assert_eq!(pixel_alpha(&data, 20, 5), 0);
    }

    #[test]
    fn wide_line_to_far_point_paints_visible_part() {
        let data = paint(&PaintCommand::WideLine {
            start: Point::new(5.0, 20.0),
            end: Point::new(1e20, 20.0),
            radius: 3.0,
            color: BLACK,
        });
        assert_eq!(pixel_alpha(&data, 30, 20), 255);
        assert_eq!(pixel_alpha(&data, 30, 5), 0);
    }

    #[test]
    fn wide_line_to_infinity_is_noop() {
        let command = PaintCommand::WideLine {
            start: Point::new(5.0, 20.0),
            end: Point::new(f64::INFINITY, 20.0),
            radius: 3.0,
            color: BLACK,
        };
        assert!(command.is_noop());
        assert!(paint(&command).iter().all(|b| *b == 0));
    }

    #[test]
    fn zero_length_wide_line_is_noop() {
        let p = Point::new(3.0, 3.0);
        let command = PaintCommand::WideLine {
            start: p,
            end: p,
            radius: 5.0,
            color: BLACK,
        };
        assert!(command.is_noop());
        assert!(!PaintCommand::Line {
            start: p,
            end: p,
            color: BLACK
        }
        .is_noop());
    }
}
