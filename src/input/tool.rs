//! Drawing tools: the shape kinds and the gesture state machine.

use crate::draw::{Color, PaintCommand, Point, geometry};
use log::debug;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Radius of the eraser stamp when nothing else is configured.
pub const DEFAULT_ERASER_RADIUS: f64 = 5.0;

/// Every shape the editor can draw.
///
/// The order matches the toolbar and the default digit shortcuts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "kebab-case")]
pub enum ShapeKind {
    /// Straight segment between press and release
    Line,
    /// Disc centered on the press point
    Circle,
    /// Square centered on the press point
    Square,
    /// Box spanned by press and release
    Rectangle,
    /// Rhombus centered on the press point
    Rhombus,
    /// Right triangle with the right angle at the press point
    RightTriangle,
    /// Upright equilateral triangle centered on the press point
    EquilateralTriangle,
    /// Continuous wide stroke in the background color
    Eraser,
}

impl ShapeKind {
    pub const ALL: [ShapeKind; 8] = [
        ShapeKind::Line,
        ShapeKind::Circle,
        ShapeKind::Square,
        ShapeKind::Rectangle,
        ShapeKind::Rhombus,
        ShapeKind::RightTriangle,
        ShapeKind::EquilateralTriangle,
        ShapeKind::Eraser,
    ];

    /// Builds the committed paint command for a gesture from `start` to `end`.
    pub fn derive(
        self,
        start: Point,
        end: Point,
        color: Color,
        eraser_radius: f64,
    ) -> PaintCommand {
        match self {
            ShapeKind::Line => PaintCommand::Line { start, end, color },
            ShapeKind::Circle => {
                let (center, radius) = geometry::circle(start, end);
                PaintCommand::Circle {
                    center,
                    radius,
                    color,
                }
            }
            ShapeKind::Square => PaintCommand::Rect {
                rect: geometry::square(start, end),
                color,
            },
            ShapeKind::Rectangle => PaintCommand::Rect {
                rect: geometry::rectangle(start, end),
                color,
            },
            ShapeKind::Rhombus => PaintCommand::Polygon {
                points: geometry::rhombus(start, end),
                color,
            },
            ShapeKind::RightTriangle => PaintCommand::Polygon {
                points: geometry::right_triangle(start, end),
                color,
            },
            ShapeKind::EquilateralTriangle => PaintCommand::Polygon {
                points: geometry::equilateral_triangle(start, end),
                color,
            },
            ShapeKind::Eraser => PaintCommand::WideLine {
                start,
                end,
                radius: eraser_radius,
                color,
            },
        }
    }

    /// Whether output streams to the canvas while the pointer is down.
    pub fn is_continuous(self) -> bool {
        self == ShapeKind::Eraser
    }

    pub fn label(self) -> &'static str {
        match self {
            ShapeKind::Line => "Line",
            ShapeKind::Circle => "Circle",
            ShapeKind::Square => "Square",
            ShapeKind::Rectangle => "Rectangle",
            ShapeKind::Rhombus => "Rhombus",
            ShapeKind::RightTriangle => "Right triangle",
            ShapeKind::EquilateralTriangle => "Equilateral triangle",
            ShapeKind::Eraser => "Eraser",
        }
    }
}

/// Gesture progress of a [`Tool`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToolState {
    /// Waiting for a pointer press
    Inactive,
    /// Pointer is down; output is a preview (or a stream, for the eraser)
    InProgress,
    /// Pointer released; the next command is the committed shape
    Finished,
}

/// Accumulates two control points from pointer activity and turns them into
/// paint commands.
///
/// Out-of-order calls are ignored rather than rejected: nothing is ever
/// committed unless the gesture reached [`ToolState::Finished`] or the tool
/// streams continuously.
#[derive(Debug, Clone)]
pub struct Tool {
    kind: ShapeKind,
    state: ToolState,
    start: Point,
    current: Point,
    eraser_radius: f64,
}

impl Tool {
    pub fn new(kind: ShapeKind) -> Self {
        Self::with_eraser_radius(kind, DEFAULT_ERASER_RADIUS)
    }

    pub fn with_eraser_radius(kind: ShapeKind, eraser_radius: f64) -> Self {
        Self {
            kind,
            state: ToolState::Inactive,
            start: Point::default(),
            current: Point::default(),
            eraser_radius,
        }
    }

    pub fn kind(&self) -> ShapeKind {
        self.kind
    }

    pub fn state(&self) -> ToolState {
        self.state
    }

    pub fn start(&self) -> Point {
        self.start
    }

    pub fn current(&self) -> Point {
        self.current
    }

    /// Starts a gesture at `pos`. Ignored unless the tool is inactive.
    pub fn activate(&mut self, pos: Point) {
        if self.state != ToolState::Inactive {
            debug!("{} tool: activate ignored in {:?}", self.kind.label(), self.state);
            return;
        }
        self.start = pos;
        self.current = pos;
        self.state = ToolState::InProgress;
    }

    /// Moves the live control point. Ignored outside a gesture.
    pub fn update(&mut self, pos: Point) {
        if self.state == ToolState::InProgress {
            self.current = pos;
        }
    }

    /// Ends the gesture at `pos`. Ignored outside a gesture.
    pub fn finish(&mut self, pos: Point) {
        if self.state == ToolState::InProgress {
            self.current = pos;
            self.state = ToolState::Finished;
        }
    }

    /// Returns this frame's output.
    ///
    /// - `Inactive`: [`PaintCommand::Empty`].
    /// - `InProgress`: the shape as an overlay preview. The eraser instead
    ///   returns the committed segment since its last call and moves its
    ///   start up to the cursor.
    /// - `Finished`: the committed shape, once. The tool returns to
    ///   `Inactive`.
    pub fn command(&mut self, color: Color) -> PaintCommand {
        match self.state {
            ToolState::Inactive => PaintCommand::Empty,
            ToolState::InProgress if self.kind.is_continuous() => {
                let segment = self.derive(color);
                self.start = self.current;
                segment
            }
            ToolState::InProgress => self.derive(color).into_overlay(),
            ToolState::Finished => {
                self.state = ToolState::Inactive;
                self.derive(color)
            }
        }
    }

    fn derive(&self, color: Color) -> PaintCommand {
        self.kind
            .derive(self.start, self.current, color, self.eraser_radius)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::draw::color::{BLACK, RED};
    use crate::draw::geometry::Rect;

    #[test]
    fn inactive_tool_has_no_output() {
        for kind in ShapeKind::ALL {
            assert_eq!(Tool::new(kind).command(RED), PaintCommand::Empty);
        }
    }

    #[test]
    fn circle_gesture_commits_once() {
        let mut tool = Tool::new(ShapeKind::Circle);
        tool.activate(Point::new(0.0, 0.0));
        tool.update(Point::new(3.0, 4.0));
        tool.finish(Point::new(3.0, 4.0));
        assert_eq!(tool.state(), ToolState::Finished);

        let command = tool.command(BLACK);
        assert_eq!(
            command,
            PaintCommand::Circle {
                center: Point::new(0.0, 0.0),
                radius: 5.0,
                color: BLACK
            }
        );
        assert!(!command.is_preview());
        assert_eq!(tool.state(), ToolState::Inactive);
        assert_eq!(tool.command(BLACK), PaintCommand::Empty);
    }

    #[test]
    fn rectangle_from_reverse_drag() {
        let mut tool = Tool::new(ShapeKind::Rectangle);
        tool.activate(Point::new(10.0, 10.0));
        tool.finish(Point::new(2.0, 6.0));
        assert_eq!(
            tool.command(RED),
            PaintCommand::Rect {
                rect: Rect::new(Point::new(2.0, 6.0), Point::new(8.0, 4.0)),
                color: RED
            }
        );
    }

    #[test]
    fn in_progress_preview_is_stable() {
        for kind in ShapeKind::ALL.into_iter().filter(|k| !k.is_continuous()) {
            let mut tool = Tool::new(kind);
            tool.activate(Point::new(5.0, 5.0));
            tool.update(Point::new(9.0, 12.0));
            let first = tool.command(RED);
            let second = tool.command(RED);
            assert!(first.is_preview(), "{kind:?} preview must be overlay");
            assert_eq!(first, second);
            assert_eq!(tool.state(), ToolState::InProgress);
        }
    }

    #[test]
    fn reactivation_mid_gesture_is_ignored() {
        let mut tool = Tool::new(ShapeKind::Line);
        tool.activate(Point::new(1.0, 1.0));
        tool.activate(Point::new(50.0, 50.0));
        assert_eq!(tool.start(), Point::new(1.0, 1.0));
        assert_eq!(tool.state(), ToolState::InProgress);
    }

    #[test]
    fn update_and_finish_outside_gesture_are_noops() {
        let mut tool = Tool::new(ShapeKind::Line);
        tool.update(Point::new(4.0, 4.0));
        tool.finish(Point::new(4.0, 4.0));
        assert_eq!(tool.state(), ToolState::Inactive);
        assert_eq!(tool.current(), Point::default());
    }

    #[test]
    fn zero_length_gesture_yields_degenerate_shape() {
        let mut tool = Tool::new(ShapeKind::Circle);
        let p = Point::new(8.0, 8.0);
        tool.activate(p);
        tool.finish(p);
        assert_eq!(
            tool.command(RED),
            PaintCommand::Circle {
                center: p,
                radius: 0.0,
                color: RED
            }
        );
    }

    #[test]
    fn eraser_streams_committed_segments() {
        let mut tool = Tool::with_eraser_radius(ShapeKind::Eraser, 3.0);
        tool.activate(Point::new(0.0, 0.0));
        tool.update(Point::new(10.0, 0.0));

        let first = tool.command(RED);
        assert!(!first.is_preview());
        assert_eq!(
            first,
            PaintCommand::WideLine {
                start: Point::new(0.0, 0.0),
                end: Point::new(10.0, 0.0),
                radius: 3.0,
                color: RED
            }
        );
        assert_eq!(tool.start(), Point::new(10.0, 0.0));

        // No motion since the last frame: nothing new to erase.
        assert!(tool.command(RED).is_noop());

        tool.update(Point::new(10.0, 6.0));
        tool.finish(Point::new(10.0, 6.0));
        let last = tool.command(RED);
        assert_eq!(
            last,
            PaintCommand::WideLine {
                start: Point::new(10.0, 0.0),
                end: Point::new(10.0, 6.0),
                radius: 3.0,
                color: RED
            }
        );
        assert_eq!(tool.state(), ToolState::Inactive);
    }

    #[test]
    fn shape_kind_uses_kebab_case_names() {
        let json = serde_json::to_string(&ShapeKind::EquilateralTriangle).unwrap();
        assert_eq!(json, "\"equilateral-triangle\"");
        let kind: ShapeKind = serde_json::from_str("\"right-triangle\"").unwrap();
        assert_eq!(kind, ShapeKind::RightTriangle);
    }
}
