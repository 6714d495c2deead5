use egui::Pos2;
use log::debug;

use crate::command::Command;
use crate::config::{ToolKind, ToolSettings};
use crate::geometry::smooth_path;
use crate::shape::{
    ArrowShape, BoxShape, LineShape, PathShape, PolyShape, Shape, ShapeKind, StrokeStyle, TextShape,
};
use crate::tools::{Tool, ToolContext};

/// Freehand samples closer than this to the previous one are dropped.
pub const MIN_SAMPLE_DISTANCE: f32 = 5.0;

#[derive(Debug, Clone, Default)]
pub enum DrawShapeState {
    #[default]
    Idle,
    /// Pointer held down on a drag tool. `last_sample` is the raw pointer
    /// position of the last accepted freehand sample.
    Drawing { shape: Shape, last_sample: Pos2 },
    /// Polygon or bezier collecting clicks until finished explicitly.
    Placing { shape: Shape },
}

/// Creates one kind of shape from pointer gestures.
#[derive(Debug, Clone)]
pub struct DrawShapeTool {
    kind: ShapeKind,
    state: DrawShapeState,
}

impl DrawShapeTool {
    pub fn new(kind: ShapeKind) -> Self {
        Self {
            kind,
            state: DrawShapeState::Idle,
        }
    }

    pub fn shape_kind(&self) -> ShapeKind {
        self.kind
    }

    pub fn tool_kind(&self) -> ToolKind {
        match self.kind {
            ShapeKind::Freehand => ToolKind::Freehand,
            ShapeKind::SmoothFreehand => ToolKind::SmoothFreehand,
            ShapeKind::Line => ToolKind::Line,
            ShapeKind::Arrow => ToolKind::Arrow,
            ShapeKind::Rectangle => ToolKind::Rectangle,
            ShapeKind::Ellipse => ToolKind::Ellipse,
            ShapeKind::Polygon => ToolKind::Polygon,
            ShapeKind::Bezier => ToolKind::Bezier,
            ShapeKind::Text => ToolKind::Text,
        }
    }

    pub fn state(&self) -> &DrawShapeState {
        &self.state
    }

    /// Commit the polygon or bezier being placed, or drop it if it is too short.
    pub fn finish_multi_point(&mut self) -> Option<Command> {
        match std::mem::take(&mut self.state) {
            DrawShapeState::Placing { shape } => Self::commit(shape),
            other => {
                self.state = other;
                None
            }
        }
    }

    /// Forget the shape under construction without committing it.
    pub fn cancel(&mut self) {
        self.state = DrawShapeState::Idle;
    }

    fn commit(shape: Shape) -> Option<Command> {
        if shape.is_complete() {
            debug!("Committing {}", shape.kind().name());
            Some(Command::AddShape(shape))
        } else {
            debug!("Discarding incomplete {}", shape.kind().name());
            None
        }
    }

    /// Seed a new shape at `pos` from the current settings.
    fn create_shape(&self, pos: Pos2, pressure: f32, ctx: &mut ToolContext<'_>) -> Option<Shape> {
        let settings: &ToolSettings = ctx.settings;
        let style = StrokeStyle::new(settings.color.clone(), settings.line_width * pressure);

        let shape = match self.kind {
            ShapeKind::Freehand => Shape::Freehand(PathShape {
                points: vec![pos],
                style,
            }),
            ShapeKind::SmoothFreehand => Shape::SmoothFreehand(PathShape {
                points: vec![pos],
                style,
            }),
            ShapeKind::Line => Shape::Line(LineShape {
                start: pos,
                end: pos,
                style,
            }),
            ShapeKind::Arrow => Shape::Arrow(ArrowShape {
                start: pos,
                end: pos,
                style,
                head_size: settings.arrow_size,
            }),
            ShapeKind::Rectangle => Shape::Rectangle(BoxShape {
                start: pos,
                end: pos,
                style,
                fill: settings.fill(),
            }),
            ShapeKind::Ellipse => Shape::Ellipse(BoxShape {
                start: pos,
                end: pos,
                style,
                fill: settings.fill(),
            }),
            ShapeKind::Polygon => Shape::Polygon(PolyShape {
                points: vec![pos],
                style,
                fill: settings.fill(),
            }),
            ShapeKind::Bezier => Shape::Bezier(PolyShape {
                points: vec![pos],
                style,
                fill: settings.fill(),
            }),
            ShapeKind::Text => {
                let content = ctx.prompt.as_mut()?.request_text(pos)?;
                if content.is_empty() {
                    return None;
                }
                Shape::Text(TextShape {
                    anchor: pos,
                    content,
                    font_size: settings.font_size,
                    font_family: settings.font_family.clone(),
                    color: settings.color.clone(),
                })
            }
        };
        Some(shape)
    }
}

impl Tool for DrawShapeTool {
    fn name(&self) -> &'static str {
        self.kind.name()
    }

    fn deactivate(&mut self) -> Option<Command> {
        let command = self.finish_multi_point();
        self.state = DrawShapeState::Idle;
        command
    }

    fn on_pointer_down(&mut self, pos: Pos2, pressure: f32, ctx: &mut ToolContext<'_>) -> Option<Command> {
        let snapped = ctx.settings.snap(pos);

        if let DrawShapeState::Placing { shape: Shape::Polygon(poly) | Shape::Bezier(poly) } = &mut self.state {
            poly.points.push(snapped);
            return None;
        }

        let shape = self.create_shape(snapped, pressure, ctx)?;
        self.state = if self.kind.is_multi_point() {
            DrawShapeState::Placing { shape }
        } else {
            DrawShapeState::Drawing {
                shape,
                last_sample: pos,
            }
        };
        None
    }

    fn on_pointer_move(&mut self, pos: Pos2, ctx: &mut ToolContext<'_>) -> Option<Command> {
        let DrawShapeState::Drawing { shape, last_sample } = &mut self.state else {
            return None;
        };
        let snapped = ctx.settings.snap(pos);

        match shape {
            Shape::Freehand(path) | Shape::SmoothFreehand(path) => {
                if pos.distance(*last_sample) >= MIN_SAMPLE_DISTANCE {
                    path.points.push(snapped);
                    *last_sample = pos;
                }
            }
            Shape::Line(LineShape { end, .. })
            | Shape::Arrow(ArrowShape { end, .. })
            | Shape::Rectangle(BoxShape { end, .. })
            | Shape::Ellipse(BoxShape { end, .. }) => {
                *end = snapped;
            }
            _ => {}
        }
        None
    }

    fn on_pointer_up(&mut self, _pos: Pos2, _ctx: &mut ToolContext<'_>) -> Option<Command> {
        let shape = match std::mem::take(&mut self.state) {
            DrawShapeState::Drawing { shape, .. } => shape,
            other => {
                // Placing survives releases; only Enter/Escape or a tool switch ends it.
                self.state = other;
                return None;
            }
        };

        let shape = match shape {
            Shape::Freehand(mut path) if path.points.len() > 2 => {
                path.points = smooth_path(&path.points);
                Shape::Freehand(path)
            }
            other => other,
        };
        Self::commit(shape)
    }

    fn current_shape(&self) -> Option<&Shape> {
        match &self.state {
            DrawShapeState::Idle => None,
            DrawShapeState::Drawing { shape, .. } | DrawShapeState::Placing { shape } => Some(shape),
        }
    }

    fn current_state_name(&self) -> &'static str {
        match self.state {
            DrawShapeState::Idle => "Idle",
            DrawShapeState::Drawing { .. } => "Drawing",
            DrawShapeState::Placing { .. } => "Placing",
        }
    }
}
