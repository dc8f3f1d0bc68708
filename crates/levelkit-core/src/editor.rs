//! The editor controller: edit mode, the placement gesture state machine,
//! selection and the toolbar-facing setters.
//!
//! All mutation happens synchronously inside the pointer, wheel and key
//! handlers. At most one placement gesture is active; switching mode cancels
//! it first.

use std::cell::Cell;
use std::f64::consts::{FRAC_PI_2, TAU};
use std::rc::Rc;

use serde::{Deserialize, Serialize};

use crate::config::EditorConfig;
use crate::entity::{Block, EntityKind, EntityRef, Floor, SpawnPoint, Step, Wall};
use crate::export::{self, Room3D};
use crate::geometry::{Point, Rotation};
use crate::material::Material;
use crate::scene::Scene;
use crate::selection::{self, Selection};
use crate::snap::Snapper;
use crate::stairs;

/// Which tool the toolbar has active.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum EditMode {
    #[default]
    Select,
    AddWall,
    AddFloor,
    AddStep,
    AddBlock,
    AddRoom,
    SpawnPoint,
}

impl EditMode {
    /// The entity kind this mode places, if it is a placement mode.
    pub fn places(self) -> Option<EntityKind> {
        match self {
            EditMode::AddWall => Some(EntityKind::Wall),
            EditMode::AddFloor => Some(EntityKind::Floor),
            EditMode::AddStep => Some(EntityKind::Step),
            EditMode::AddBlock => Some(EntityKind::Block),
            EditMode::Select | EditMode::AddRoom | EditMode::SpawnPoint => None,
        }
    }
}

/// The in-progress entity of an active placement gesture.
#[derive(Debug, Clone, PartialEq)]
pub enum Placement {
    Wall { start: Point, wall: Wall },
    Floor { anchor: Point, floor: Floor },
    /// The tread a flight will be generated from.
    Step(Step),
    Block { anchor: Point, block: Block },
}

impl Placement {
    fn begin(mode: EditMode, at: Point, grid: f64) -> Option<Self> {
        Some(match mode.places()? {
            EntityKind::Wall => Placement::Wall {
                start: at,
                wall: Wall::new(at, at),
            },
            EntityKind::Floor => Placement::Floor {
                anchor: at,
                floor: Floor::spanning(at, at),
            },
            EntityKind::Step => Placement::Step(stairs::temp_step(at, grid)),
            EntityKind::Block => Placement::Block {
                anchor: at,
                block: Block::spanning(at, at, Rotation::North),
            },
        })
    }

    pub fn kind(&self) -> EntityKind {
        match self {
            Placement::Wall { .. } => EntityKind::Wall,
            Placement::Floor { .. } => EntityKind::Floor,
            Placement::Step(_) => EntityKind::Step,
            Placement::Block { .. } => EntityKind::Block,
        }
    }

    /// Follow the pointer.
    fn track(&mut self, snapper: &Snapper, pointer: Point) {
        match self {
            Placement::Wall { start, wall } => {
                let end = snapper.enforce_angle(*start, pointer);
                wall.x2 = end.x;
                wall.y2 = end.y;
            }
            Placement::Floor { anchor, floor } => {
                let material = floor.material;
                *floor = Floor::spanning(*anchor, snapper.snap_to_grid(pointer));
                floor.material = material;
            }
            Placement::Step(step) => {
                let at = snapper.snap_to_grid(pointer);
                step.x = at.x;
                step.z = at.y;
            }
            Placement::Block { anchor, block } => {
                let (rotation, material) = (block.rotation, block.material);
                *block = Block::spanning(*anchor, snapper.snap_to_grid(pointer), rotation);
                block.material = material;
            }
        }
    }

    fn rotate(&mut self, clockwise: bool) -> bool {
        let turn = |r: Rotation| {
            if clockwise {
                r.clockwise()
            } else {
                r.counter_clockwise()
            }
        };
        match self {
            Placement::Step(step) => {
                step.rotation = turn(step.rotation);
                step.normal = step.rotation.normal();
                true
            }
            Placement::Block { block, .. } => {
                block.rotation = turn(block.rotation);
                true
            }
            Placement::Wall { .. } | Placement::Floor { .. } => false,
        }
    }
}

/// Holds the host's escape-key listener open while a gesture runs. Dropping
/// the gesture, by commit or cancel, releases it.
#[derive(Debug)]
pub struct EscapeSubscription {
    listeners: Rc<Cell<usize>>,
}

impl EscapeSubscription {
    fn new(listeners: &Rc<Cell<usize>>) -> Self {
        listeners.set(listeners.get() + 1);
        Self {
            listeners: Rc::clone(listeners),
        }
    }
}

impl Drop for EscapeSubscription {
    fn drop(&mut self) {
        self.listeners.set(self.listeners.get().saturating_sub(1));
    }
}

#[derive(Debug)]
struct Gesture {
    placement: Placement,
    _escape: EscapeSubscription,
}

/// Keys the editor reacts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Escape,
    Delete,
}

/// What an input event did, for the host to react to.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    None,
    GestureStarted(EntityKind),
    /// Entities added to the scene; a staircase commit yields a whole flight.
    Committed(Vec<EntityRef>),
    /// The gesture ended but its entity was too small to keep.
    Dropped(EntityKind),
    Cancelled(EntityKind),
    Selected(EntityRef),
    SelectionCleared,
    Deleted(EntityRef),
    SpawnPointPlaced(SpawnPoint),
    RenderNeeded,
}

/// Owns the scene and every piece of transient editor state.
#[derive(Debug)]
pub struct Editor {
    scene: Scene,
    snapper: Snapper,
    mode: EditMode,
    gesture: Option<Gesture>,
    selection: Option<Selection>,
    show_grid: bool,
    room_input: String,
    escape_listeners: Rc<Cell<usize>>,
}

impl Default for Editor {
    fn default() -> Self {
        Self::new(EditorConfig::default())
    }
}

impl Editor {
    pub fn new(config: EditorConfig) -> Self {
        Self {
            snapper: Snapper::new(config.grid_size),
            scene: Scene::new(config),
            mode: EditMode::Select,
            gesture: None,
            selection: None,
            show_grid: true,
            room_input: String::new(),
            escape_listeners: Rc::new(Cell::new(0)),
        }
    }

    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    pub fn config(&self) -> &EditorConfig {
        self.scene.config()
    }

    // ── Toolbar state ────────────────────────────────────────────────

    pub fn mode(&self) -> EditMode {
        self.mode
    }

    /// Switch tool. Any gesture in progress is cancelled and the selection
    /// cleared.
    pub fn set_mode(&mut self, mode: EditMode) {
        self.cancel_gesture();
        self.selection = None;
        self.mode = mode;
    }

    pub fn show_grid(&self) -> bool {
        self.show_grid
    }

    pub fn set_show_grid(&mut self, show: bool) {
        self.show_grid = show;
    }

    pub fn toggle_grid(&mut self) {
        self.show_grid = !self.show_grid;
    }

    pub fn room_input(&self) -> &str {
        &self.room_input
    }

    pub fn set_room_input(&mut self, text: &str) {
        self.room_input = text.to_string();
    }

    /// Declare the room named in the room input.
    pub fn add_room_from_input(&mut self) -> bool {
        let name = self.room_input.clone();
        self.scene.add_room(&name)
    }

    // ── Gesture and selection state ──────────────────────────────────

    pub fn placement(&self) -> Option<&Placement> {
        self.gesture.as_ref().map(|g| &g.placement)
    }

    pub fn is_placing(&self) -> bool {
        self.gesture.is_some()
    }

    /// Whether the host should route the escape key to [`Editor::key_down`].
    pub fn escape_subscribed(&self) -> bool {
        self.escape_listeners.get() > 0
    }

    pub fn selection(&self) -> Option<&Selection> {
        self.selection.as_ref()
    }

    // ── Input handlers ───────────────────────────────────────────────

    pub fn pointer_down(&mut self, pointer: Point) -> Action {
        match self.mode {
            EditMode::Select => self.select(pointer),
            EditMode::AddRoom => Action::None,
            EditMode::SpawnPoint => {
                let spawn = SpawnPoint::at(self.snapper.snap_to_grid(pointer));
                self.scene.set_spawn_point(Some(spawn));
                Action::SpawnPointPlaced(spawn)
            }
            EditMode::AddWall | EditMode::AddFloor | EditMode::AddStep | EditMode::AddBlock => {
                match self.gesture.take() {
                    None => self.begin(pointer),
                    Some(mut gesture) => {
                        gesture.placement.track(&self.snapper, pointer);
                        self.commit(gesture.placement)
                    }
                }
            }
        }
    }

    pub fn pointer_move(&mut self, pointer: Point) -> Action {
        match self.gesture.as_mut() {
            Some(gesture) => {
                gesture.placement.track(&self.snapper, pointer);
                Action::RenderNeeded
            }
            None => Action::None,
        }
    }

    /// Positive `delta_y` (wheel down) turns clockwise.
    pub fn wheel(&mut self, delta_y: f64) -> Action {
        if delta_y == 0.0 {
            return Action::None;
        }
        let clockwise = delta_y > 0.0;

        if let Some(gesture) = self.gesture.as_mut() {
            return if gesture.placement.rotate(clockwise) {
                Action::RenderNeeded
            } else {
                Action::None
            };
        }

        if self.mode == EditMode::SpawnPoint {
            if let Some(spawn) = self.scene.spawn_point().copied() {
                let turn = if clockwise { FRAC_PI_2 } else { -FRAC_PI_2 };
                let rotated = SpawnPoint {
                    rotation: (spawn.rotation + turn).rem_euclid(TAU),
                    ..spawn
                };
                self.scene.set_spawn_point(Some(rotated));
                return Action::RenderNeeded;
            }
        }
        Action::None
    }

    pub fn key_down(&mut self, key: Key) -> Action {
        match key {
            Key::Escape => self.cancel_gesture(),
            Key::Delete if self.mode == EditMode::Select => self.delete_selected(),
            Key::Delete => Action::None,
        }
    }

    /// Drop the in-progress entity, leaving the scene untouched.
    pub fn cancel_gesture(&mut self) -> Action {
        match self.gesture.take() {
            Some(gesture) => {
                let kind = gesture.placement.kind();
                log::debug!("Cancelled {} placement", kind.name());
                Action::Cancelled(kind)
            }
            None => Action::None,
        }
    }

    fn begin(&mut self, pointer: Point) -> Action {
        let at = self.snapper.snap_to_grid(pointer);
        let Some(placement) = Placement::begin(self.mode, at, self.snapper.grid()) else {
            return Action::None;
        };
        let kind = placement.kind();
        log::debug!("Started {} placement at ({}, {})", kind.name(), at.x, at.y);
        self.selection = None;
        self.gesture = Some(Gesture {
            placement,
            _escape: EscapeSubscription::new(&self.escape_listeners),
        });
        Action::GestureStarted(kind)
    }

    fn commit(&mut self, placement: Placement) -> Action {
        let kind = placement.kind();
        let committed = match placement {
            Placement::Wall { wall, .. } => self.scene.add_wall(wall).into_iter().collect(),
            Placement::Floor { floor, .. } => self.scene.add_floor(floor).into_iter().collect(),
            Placement::Block { block, .. } => self.scene.add_block(block).into_iter().collect(),
            Placement::Step(temp) => {
                let config = self.scene.config();
                let flight = stairs::generate_flight(&temp, config.flight_size, config.grid_size);
                log::debug!(
                    "Generated {} treads facing {:?} from ({}, {})",
                    flight.len(),
                    temp.rotation,
                    temp.x,
                    temp.z
                );
                self.scene.add_flight(flight)
            }
        };

        if committed.is_empty() {
            Action::Dropped(kind)
        } else {
            log::debug!("Committed {} {}(s)", committed.len(), kind.name());
            Action::Committed(committed)
        }
    }

    fn select(&mut self, pointer: Point) -> Action {
        self.selection = selection::select_at(&self.scene, pointer);
        match &self.selection {
            Some(selected) => Action::Selected(selected.entity),
            None => Action::SelectionCleared,
        }
    }

    // ── Selected-entity operations ───────────────────────────────────

    pub fn delete_selected(&mut self) -> Action {
        match self.selection.take() {
            Some(selected) if self.scene.remove(selected.entity) => Action::Deleted(selected.entity),
            _ => Action::None,
        }
    }

    pub fn assign_selected_to_room(&mut self, room: &str) -> bool {
        let Some(selected) = self.selection.as_mut() else {
            return false;
        };
        if !self.scene.assign_room(selected.entity, room) {
            return false;
        }
        selected.room_id = Some(room.to_string());
        true
    }

    pub fn set_selected_material(&mut self, material: Material) -> bool {
        let Some(selected) = self.selection.as_mut() else {
            return false;
        };
        if !self.scene.set_material(selected.entity, material) {
            return false;
        }
        selected.material = material;
        true
    }

    // ── Export ───────────────────────────────────────────────────────

    pub fn export_rooms(&self) -> Vec<Room3D> {
        export::export_rooms(&self.scene)
    }

    pub fn export_spawn_point(&self) -> Option<SpawnPoint> {
        export::spawn_to_world(self.scene.spawn_point(), self.scene.config())
    }
}
