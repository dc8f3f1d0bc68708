//! # LevelKit Core
//!
//! Geometry engine of the LevelKit level editor: the entity model (walls,
//! floors, stair treads, blocks, rooms, spawn point), grid and angle
//! snapping, pointer hit-testing backed by an R-tree, staircase flight
//! generation, and the plane-to-world scene export.
//!
//! The [`Editor`] controller owns a [`Scene`] and drives it from pointer,
//! wheel and key events.

pub mod geometry;
pub mod material;
pub mod config;
pub mod entity;
pub mod snap;
pub mod collision;
pub mod spatial;
pub mod stairs;
pub mod scene;
pub mod selection;
pub mod export;
pub mod editor;

pub use config::EditorConfig;
pub use editor::{Action, EditMode, Editor, Key, Placement};
pub use entity::{Block, EntityId, EntityKind, EntityRef, Floor, RoomId, SpawnPoint, Step, Wall};
pub use export::{Floor3D, Room3D, Wall3D};
pub use geometry::{Point, Rotation, Vec3};
pub use material::{Color, Material};
pub use scene::Scene;
pub use selection::Selection;
