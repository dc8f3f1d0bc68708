//! Turns the scene, the active placement and the selection into an ordered
//! list of draw commands. Reads state only; never mutates it.

use std::collections::BTreeMap;

use levelkit_core::entity::Oriented;
use levelkit_core::{
    Block, Editor, EntityKind, EntityRef, Material, Placement, Rotation, Scene, Selection, Step,
};

use crate::render_data::{
    DrawLayer, Paint, RenderFrame, Shape, GRID_LINE, OUTLINE, ROTATION_MARK, SPAWN_MARK, TEMP_ACCENT,
};
use crate::viewport::Viewport;

const WALL_WIDTH: f64 = 10.0;
const WALL_HIGHLIGHT_WIDTH: f64 = 12.0;
const TEMP_WALL_WIDTH: f64 = 8.0;
const HIGHLIGHT_WIDTH: f64 = 2.0;
const TEMP_OPACITY: f32 = 0.3;

/// Project the editor's current state.
pub fn project_editor(editor: &Editor, viewport: Viewport) -> RenderFrame {
    project(
        editor.scene(),
        editor.placement(),
        editor.selection(),
        editor.show_grid(),
        viewport,
    )
}

/// Build a frame in layer order: floors, grid, steps, blocks, temp block,
/// walls, temp wall, temp floor, temp step, spawn marker. The selected
/// entity gets a highlight stroke right after its own draw.
pub fn project(
    scene: &Scene,
    placement: Option<&Placement>,
    selection: Option<&Selection>,
    show_grid: bool,
    viewport: Viewport,
) -> RenderFrame {
    let grid_spacing = scene.config().grid_size;
    let mut frame = RenderFrame::empty(viewport, grid_spacing);
    frame.grid_visible = show_grid;
    let selected = |target: EntityRef| selection.is_some_and(|s| s.is(target));

    for floor in scene.floors() {
        let target = EntityRef::new(EntityKind::Floor, floor.id);
        let shape = Shape::Rect {
            x: floor.x,
            y: floor.y,
            width: floor.width,
            height: floor.height,
        };
        frame.push(DrawLayer::Floors, Some(target), shape.clone(), Paint::outlined(floor.material.color()));
        if selected(target) {
            frame.push_highlight(DrawLayer::Floors, target, shape, HIGHLIGHT_WIDTH);
        }
    }

    if show_grid {
        for (a, b) in viewport.grid_lines(grid_spacing) {
            let shape = Shape::Line {
                x1: a.x,
                y1: a.y,
                x2: b.x,
                y2: b.y,
            };
            frame.push(DrawLayer::Grid, None, shape, Paint::stroke(GRID_LINE, 0.5));
        }
    }

    for step in draw_order(scene.steps()) {
        let target = EntityRef::new(EntityKind::Step, step.id);
        let shape = oriented_shape(step);
        frame.push(DrawLayer::Steps, Some(target), shape.clone(), Paint::outlined(step.material.color()));
        if selected(target) {
            frame.push_highlight(DrawLayer::Steps, target, shape, HIGHLIGHT_WIDTH);
        }
    }

    for block in scene.blocks() {
        let target = EntityRef::new(EntityKind::Block, block.id);
        let shape = oriented_shape(block);
        frame.push(DrawLayer::Blocks, Some(target), shape.clone(), Paint::outlined(block.material.color()));
        if selected(target) {
            frame.push_highlight(DrawLayer::Blocks, target, shape, HIGHLIGHT_WIDTH);
        }
    }

    if let Some(Placement::Block { block, .. }) = placement {
        draw_temp_block(&mut frame, block);
    }

    for wall in scene.walls() {
        let target = EntityRef::new(EntityKind::Wall, wall.id);
        let shape = Shape::Line {
            x1: wall.x1,
            y1: wall.y1,
            x2: wall.x2,
            y2: wall.y2,
        };
        frame.push(DrawLayer::Walls, Some(target), shape.clone(), Paint::stroke(wall.material.color(), WALL_WIDTH));
        if selected(target) {
            frame.push_highlight(DrawLayer::Walls, target, shape, WALL_HIGHLIGHT_WIDTH);
        }
    }

    match placement {
        Some(Placement::Wall { wall, .. }) => {
            let shape = Shape::Line {
                x1: wall.x1,
                y1: wall.y1,
                x2: wall.x2,
                y2: wall.y2,
            };
            frame.push(DrawLayer::TempWall, None, shape, Paint::stroke(TEMP_ACCENT, TEMP_WALL_WIDTH).dashed());
        }
        Some(Placement::Floor { floor, .. }) => {
            let shape = Shape::Rect {
                x: floor.x,
                y: floor.y,
                width: floor.width,
                height: floor.height,
            };
            frame.push(DrawLayer::TempFloor, None, shape.clone(), Paint::fill(TEMP_ACCENT, TEMP_OPACITY));
            frame.push(DrawLayer::TempFloor, None, shape, Paint::stroke(TEMP_ACCENT, HIGHLIGHT_WIDTH).dashed());
        }
        Some(Placement::Step(step)) => draw_temp_step(&mut frame, step),
        Some(Placement::Block { .. }) | None => {}
    }

    if let Some(spawn) = scene.spawn_point() {
        let shape = Shape::Text {
            x: spawn.x,
            y: spawn.z,
            text: "P".to_string(),
            size: 25.0,
        };
        frame.push(DrawLayer::Spawn, None, shape, Paint::fill(SPAWN_MARK, 1.0));
    }

    log::trace!("Projected {} draw commands", frame.commands.len());
    frame
}

/// Order treads back to front. Flights are grouped by direction tag in
/// ascending tag order; North flights run by ascending z, South flights by
/// descending z, East and West keep insertion order. Untagged treads follow.
pub fn draw_order(steps: &[Step]) -> Vec<&Step> {
    let mut groups: BTreeMap<Rotation, Vec<&Step>> = BTreeMap::new();
    let mut untagged = Vec::new();
    for step in steps {
        match step.dir {
            Some(dir) => groups.entry(dir).or_default().push(step),
            None => untagged.push(step),
        }
    }

    let mut ordered = Vec::with_capacity(steps.len());
    for (dir, mut group) in groups {
        match dir {
            Rotation::North => group.sort_by(|a, b| a.z.total_cmp(&b.z)),
            Rotation::South => group.sort_by(|a, b| b.z.total_cmp(&a.z)),
            Rotation::East | Rotation::West => {}
        }
        ordered.extend(group);
    }
    ordered.extend(untagged);
    ordered
}

fn oriented_shape<T: Oriented>(entity: &T) -> Shape {
    let center = entity.center();
    let (width, depth) = entity.footprint();
    Shape::OrientedRect {
        cx: center.x,
        cy: center.y,
        width,
        depth,
        rotation: entity.rotation().radians(),
    }
}

fn draw_temp_block(frame: &mut RenderFrame, block: &Block) {
    let shape = oriented_shape(block);
    frame.push(DrawLayer::TempBlock, None, shape.clone(), Paint::fill(TEMP_ACCENT, TEMP_OPACITY));
    frame.push(DrawLayer::TempBlock, None, shape, Paint::stroke(TEMP_ACCENT, HIGHLIGHT_WIDTH).dashed());
}

/// Tread outline plus a marker pointing the way the flight will face.
fn draw_temp_step(frame: &mut RenderFrame, step: &Step) {
    let shape = oriented_shape(step);
    let fill = Paint::fill(Material::default_step().color(), 1.0);
    frame.push(DrawLayer::TempStep, None, shape.clone(), fill);
    frame.push(DrawLayer::TempStep, None, shape, Paint::stroke(TEMP_ACCENT, HIGHLIGHT_WIDTH).dashed());

    let (mx, my) = step.rotation.to_world(0.0, -step.depth / 2.0 - 15.0);
    frame.push(
        DrawLayer::TempStep,
        None,
        Shape::Line {
            x1: step.x,
            y1: step.z,
            x2: step.x + mx,
            y2: step.z + my,
        },
        Paint::stroke(ROTATION_MARK, HIGHLIGHT_WIDTH),
    );

    let (tx, ty) = step.rotation.to_world(0.0, -step.depth / 2.0 - 20.0);
    frame.push(
        DrawLayer::TempStep,
        None,
        Shape::Text {
            x: step.x + tx,
            y: step.z + ty,
            text: format!("{}°", step.rotation.degrees()),
            size: 12.0,
        },
        Paint::fill(OUTLINE, 1.0),
    );
}
