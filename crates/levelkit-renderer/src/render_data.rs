use serde::{Deserialize, Serialize};

use levelkit_core::{Color, EntityRef};

/// Highlight stroke for the selected entity.
pub const HIGHLIGHT: Color = Color::rgb(0xff, 0xcc, 0x00);
/// Outline and translucent fill of in-progress entities.
pub const TEMP_ACCENT: Color = Color::rgb(0x00, 0x88, 0xff);
pub const OUTLINE: Color = Color::rgb(0x00, 0x00, 0x00);
pub const GRID_LINE: Color = Color::rgb(0xe0, 0xe0, 0xe0);
pub const ROTATION_MARK: Color = Color::rgb(0xff, 0x33, 0x00);
pub const SPAWN_MARK: Color = Color::rgb(0xff, 0x00, 0x00);

/// Draw layers, in the order they are painted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum DrawLayer {
    Floors,
    Grid,
    Steps,
    Blocks,
    TempBlock,
    Walls,
    TempWall,
    TempFloor,
    TempStep,
    Spawn,
}

/// Geometry of one draw command, in plane coordinates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Shape {
    Line { x1: f64, y1: f64, x2: f64, y2: f64 },
    Rect { x: f64, y: f64, width: f64, height: f64 },
    /// Rectangle centered on (`cx`, `cy`) and turned by `rotation` radians.
    OrientedRect { cx: f64, cy: f64, width: f64, depth: f64, rotation: f64 },
    Text { x: f64, y: f64, text: String, size: f64 },
}

/// How a shape is painted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Paint {
    pub fill: Option<[f32; 4]>,
    pub stroke: Option<[f32; 4]>,
    pub line_width: f64,
    pub dashed: bool,
}

impl Paint {
    pub fn fill(color: Color, opacity: f32) -> Self {
        Self {
            fill: Some(color.to_f32_array(opacity)),
            stroke: None,
            line_width: 0.0,
            dashed: false,
        }
    }

    pub fn stroke(color: Color, line_width: f64) -> Self {
        Self {
            fill: None,
            stroke: Some(color.to_f32_array(1.0)),
            line_width,
            dashed: false,
        }
    }

    /// Solid fill with a thin black border.
    pub fn outlined(color: Color) -> Self {
        Self {
            stroke: Some(OUTLINE.to_f32_array(1.0)),
            line_width: 1.0,
            ..Self::fill(color, 1.0)
        }
    }

    pub fn dashed(mut self) -> Self {
        self.dashed = true;
        self
    }
}

/// A single draw call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DrawCommand {
    pub layer: DrawLayer,
    /// Permanent entity this command draws, if any.
    pub entity: Option<EntityRef>,
    pub shape: Shape,
    pub paint: Paint,
    /// Set on the extra stroke drawn over the selected entity.
    pub highlight: bool,
}

/// Complete, ordered frame for the editor canvas.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RenderFrame {
    pub commands: Vec<DrawCommand>,
    pub viewport: crate::Viewport,
    pub grid_visible: bool,
    pub grid_spacing: f64,
}

impl RenderFrame {
    pub fn empty(viewport: crate::Viewport, grid_spacing: f64) -> Self {
        Self {
            commands: Vec::new(),
            viewport,
            grid_visible: false,
            grid_spacing,
        }
    }

    pub fn push(&mut self, layer: DrawLayer, entity: Option<EntityRef>, shape: Shape, paint: Paint) {
        self.commands.push(DrawCommand {
            layer,
            entity,
            shape,
            paint,
            highlight: false,
        });
    }

    pub fn push_highlight(&mut self, layer: DrawLayer, entity: EntityRef, shape: Shape, line_width: f64) {
        self.commands.push(DrawCommand {
            layer,
            entity: Some(entity),
            shape,
            paint: Paint::stroke(HIGHLIGHT, line_width),
            highlight: true,
        });
    }

    pub fn layer(&self, layer: DrawLayer) -> impl Iterator<Item = &DrawCommand> {
        self.commands.iter().filter(move |c| c.layer == layer)
    }

    /// Serialize for the canvas frontend.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}
