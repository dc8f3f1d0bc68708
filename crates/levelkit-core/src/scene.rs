use uuid::Uuid;

use crate::config::EditorConfig;
use crate::entity::{Block, EntityKind, EntityRef, Floor, Oriented, RoomId, SpawnPoint, Step, Wall};
use crate::geometry::Point;
use crate::material::Material;
use crate::spatial::{SpatialEntry, SpatialIndex};

/// Name of the room every new scene starts with.
pub const DEFAULT_ROOM: &str = "1";

/// The permanent entity collections of a level, with the declared rooms and
/// spawn point. Creation-time size policy is enforced here: entities that
/// are too small are dropped without trace.
#[derive(Debug)]
pub struct Scene {
    config: EditorConfig,
    walls: Vec<Wall>,
    floors: Vec<Floor>,
    steps: Vec<Step>,
    blocks: Vec<Block>,
    rooms: Vec<RoomId>,
    spawn_point: Option<SpawnPoint>,
    index: SpatialIndex,
}

impl Default for Scene {
    fn default() -> Self {
        Self::new(EditorConfig::default())
    }
}

impl Scene {
    pub fn new(config: EditorConfig) -> Self {
        Self {
            config,
            walls: Vec::new(),
            floors: Vec::new(),
            steps: Vec::new(),
            blocks: Vec::new(),
            rooms: vec![DEFAULT_ROOM.to_string()],
            spawn_point: None,
            index: SpatialIndex::new(),
        }
    }

    pub fn config(&self) -> &EditorConfig {
        &self.config
    }

    // ── Entity creation ──────────────────────────────────────────────

    /// Keep the wall if it is longer than the minimum, under a fresh id.
    pub fn add_wall(&mut self, mut wall: Wall) -> Option<EntityRef> {
        let length = wall.length();
        if length <= self.config.min_wall_length {
            log::debug!(
                "Dropping wall of length {length:.2} (minimum {})",
                self.config.min_wall_length
            );
            return None;
        }
        wall.id = Uuid::new_v4();
        self.index.insert(SpatialEntry {
            kind: EntityKind::Wall,
            index: self.walls.len(),
            bbox: wall.bbox(self.config.wall_thickness),
        });
        let target = EntityRef::new(EntityKind::Wall, wall.id);
        self.walls.push(wall);
        Some(target)
    }

    pub fn add_floor(&mut self, mut floor: Floor) -> Option<EntityRef> {
        if floor.width < 0.0 || floor.height < 0.0 || floor.area() < self.config.min_area {
            log::debug!(
                "Dropping floor of {:.1} x {:.1} (minimum area {})",
                floor.width,
                floor.height,
                self.config.min_area
            );
            return None;
        }
        floor.id = Uuid::new_v4();
        self.index.insert(SpatialEntry {
            kind: EntityKind::Floor,
            index: self.floors.len(),
            bbox: floor.bbox(),
        });
        let target = EntityRef::new(EntityKind::Floor, floor.id);
        self.floors.push(floor);
        Some(target)
    }

    pub fn add_block(&mut self, mut block: Block) -> Option<EntityRef> {
        if block.width < 0.0 || block.depth < 0.0 || block.area() < self.config.min_area {
            log::debug!(
                "Dropping block of {:.1} x {:.1} (minimum area {})",
                block.width,
                block.depth,
                self.config.min_area
            );
            return None;
        }
        block.id = Uuid::new_v4();
        self.index.insert(SpatialEntry {
            kind: EntityKind::Block,
            index: self.blocks.len(),
            bbox: block.bbox(),
        });
        let target = EntityRef::new(EntityKind::Block, block.id);
        self.blocks.push(block);
        Some(target)
    }

    /// Store a generated flight, each tread under a fresh id.
    pub fn add_flight(&mut self, flight: Vec<Step>) -> Vec<EntityRef> {
        flight
            .into_iter()
            .map(|mut step| {
                step.id = Uuid::new_v4();
                self.index.insert(SpatialEntry {
                    kind: EntityKind::Step,
                    index: self.steps.len(),
                    bbox: step.bbox(),
                });
                let target = EntityRef::new(EntityKind::Step, step.id);
                self.steps.push(step);
                target
            })
            .collect()
    }

    // ── Lookup and mutation ──────────────────────────────────────────

    pub fn walls(&self) -> &[Wall] {
        &self.walls
    }

    pub fn floors(&self) -> &[Floor] {
        &self.floors
    }

    pub fn steps(&self) -> &[Step] {
        &self.steps
    }

    pub fn blocks(&self) -> &[Block] {
        &self.blocks
    }

    pub fn entity_count(&self) -> usize {
        self.walls.len() + self.floors.len() + self.steps.len() + self.blocks.len()
    }

    pub fn contains(&self, target: EntityRef) -> bool {
        self.position(target).is_some()
    }

    fn position(&self, target: EntityRef) -> Option<usize> {
        match target.kind {
            EntityKind::Wall => self.walls.iter().position(|w| w.id == target.id),
            EntityKind::Floor => self.floors.iter().position(|f| f.id == target.id),
            EntityKind::Step => self.steps.iter().position(|s| s.id == target.id),
            EntityKind::Block => self.blocks.iter().position(|b| b.id == target.id),
        }
    }

    fn tags_mut(&mut self, target: EntityRef) -> Option<(&mut Material, &mut Option<RoomId>)> {
        let idx = self.position(target)?;
        Some(match target.kind {
            EntityKind::Wall => {
                let w = &mut self.walls[idx];
                (&mut w.material, &mut w.room_id)
            }
            EntityKind::Floor => {
                let f = &mut self.floors[idx];
                (&mut f.material, &mut f.room_id)
            }
            EntityKind::Step => {
                let s = &mut self.steps[idx];
                (&mut s.material, &mut s.room_id)
            }
            EntityKind::Block => {
                let b = &mut self.blocks[idx];
                (&mut b.material, &mut b.room_id)
            }
        })
    }

    pub fn material_of(&self, target: EntityRef) -> Option<Material> {
        let idx = self.position(target)?;
        Some(match target.kind {
            EntityKind::Wall => self.walls[idx].material,
            EntityKind::Floor => self.floors[idx].material,
            EntityKind::Step => self.steps[idx].material,
            EntityKind::Block => self.blocks[idx].material,
        })
    }

    pub fn room_of(&self, target: EntityRef) -> Option<&RoomId> {
        let idx = self.position(target)?;
        match target.kind {
            EntityKind::Wall => self.walls[idx].room_id.as_ref(),
            EntityKind::Floor => self.floors[idx].room_id.as_ref(),
            EntityKind::Step => self.steps[idx].room_id.as_ref(),
            EntityKind::Block => self.blocks[idx].room_id.as_ref(),
        }
    }

    pub fn remove(&mut self, target: EntityRef) -> bool {
        let Some(idx) = self.position(target) else {
            return false;
        };
        match target.kind {
            EntityKind::Wall => {
                self.walls.remove(idx);
            }
            EntityKind::Floor => {
                self.floors.remove(idx);
            }
            EntityKind::Step => {
                self.steps.remove(idx);
            }
            EntityKind::Block => {
                self.blocks.remove(idx);
            }
        }
        self.rebuild_index();
        true
    }

    pub fn set_material(&mut self, target: EntityRef, material: Material) -> bool {
        match self.tags_mut(target) {
            Some((current, _)) => {
                *current = material;
                true
            }
            None => false,
        }
    }

    /// Put an entity into a declared room.
    pub fn assign_room(&mut self, target: EntityRef, room: &str) -> bool {
        if !self.has_room(room) {
            log::warn!("Room '{room}' is not declared; {} left unchanged", target.kind.name());
            return false;
        }
        match self.tags_mut(target) {
            Some((_, room_id)) => {
                *room_id = Some(room.to_string());
                true
            }
            None => false,
        }
    }

    // ── Rooms and spawn point ────────────────────────────────────────

    pub fn rooms(&self) -> &[RoomId] {
        &self.rooms
    }

    pub fn has_room(&self, room: &str) -> bool {
        self.rooms.iter().any(|r| r == room)
    }

    /// Declare a room. Blank and already declared names are refused.
    pub fn add_room(&mut self, name: &str) -> bool {
        let name = name.trim();
        if name.is_empty() || self.has_room(name) {
            return false;
        }
        self.rooms.push(name.to_string());
        true
    }

    pub fn spawn_point(&self) -> Option<&SpawnPoint> {
        self.spawn_point.as_ref()
    }

    pub fn set_spawn_point(&mut self, spawn_point: Option<SpawnPoint>) {
        self.spawn_point = spawn_point;
    }

    // ── Spatial queries ──────────────────────────────────────────────

    /// Collection indices of `kind` that may contain the point, ascending.
    pub fn candidates(&self, kind: EntityKind, point: &Point) -> Vec<usize> {
        self.index.candidates(kind, point)
    }

    fn rebuild_index(&mut self) {
        let thickness = self.config.wall_thickness;
        let entries = self
            .walls
            .iter()
            .enumerate()
            .map(|(index, w)| SpatialEntry {
                kind: EntityKind::Wall,
                index,
                bbox: w.bbox(thickness),
            })
            .chain(self.floors.iter().enumerate().map(|(index, f)| SpatialEntry {
                kind: EntityKind::Floor,
                index,
                bbox: f.bbox(),
            }))
            .chain(self.steps.iter().enumerate().map(|(index, s)| SpatialEntry {
                kind: EntityKind::Step,
                index,
                bbox: s.bbox(),
            }))
            .chain(self.blocks.iter().enumerate().map(|(index, b)| SpatialEntry {
                kind: EntityKind::Block,
                index,
                bbox: b.bbox(),
            }))
            .collect();
        self.index = SpatialIndex::build(entries);
    }
}
