//! Plane space to world space conversion of a scene, partitioned by room.
//!
//! World space is the plane scaled by the export factor, with plane `y`
//! becoming world `z`. Rotations, heights and normals are never scaled.

use std::f64::consts::FRAC_PI_2;

use serde::{Deserialize, Serialize};

use crate::config::EditorConfig;
use crate::entity::{Block, Floor, SpawnPoint, Step, Wall};
use crate::geometry::Vec3;
use crate::material::Material;
use crate::scene::Scene;

/// World y of every exported floor.
pub const FLOOR_LEVEL: f64 = -1.0;

/// A wall as a zero-thickness oriented plane.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Wall3D {
    pub x: f64,
    pub y: f64,
    pub z: f64,
    pub width: f64,
    pub height: f64,
    pub rotation: f64,
    pub texture: Material,
    pub depth: f64,
    pub normal: Vec3,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Floor3D {
    pub x: f64,
    pub y: f64,
    pub z: f64,
    pub width: f64,
    pub length: f64,
    pub texture: Material,
    pub rotation: f64,
}

/// Everything exported for one room.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Room3D {
    pub walls: Vec<Wall3D>,
    pub floors: Vec<Floor3D>,
    pub steps: Vec<Step>,
    pub blocks: Vec<Block>,
}

pub fn wall_to_world(wall: &Wall, config: &EditorConfig) -> Wall3D {
    let s = config.scale;
    let (x, z, width, rotation, normal) = if wall.x1 == wall.x2 {
        (
            wall.x1,
            (wall.y1 + wall.y2) / 2.0,
            (wall.y2 - wall.y1).abs(),
            -FRAC_PI_2,
            Vec3::new(-1.0, 0.0, 0.0),
        )
    } else if wall.y1 == wall.y2 {
        (
            (wall.x1 + wall.x2) / 2.0,
            wall.y1,
            (wall.x2 - wall.x1).abs(),
            0.0,
            Vec3::new(0.0, 0.0, -1.0),
        )
    } else {
        let dx = wall.x2 - wall.x1;
        let dy = wall.y2 - wall.y1;
        let length = (dx * dx + dy * dy).sqrt();
        (
            (wall.x1 + wall.x2) / 2.0,
            (wall.y1 + wall.y2) / 2.0,
            length,
            -dy.atan2(dx),
            Vec3::new(dy / length, 0.0, -dx / length),
        )
    };

    Wall3D {
        x: x * s,
        y: 0.0,
        z: z * s,
        width: width * s,
        height: config.wall_height,
        rotation,
        texture: wall.material,
        depth: 0.0,
        normal,
    }
}

pub fn floor_to_world(floor: &Floor, config: &EditorConfig) -> Floor3D {
    let s = config.scale;
    Floor3D {
        x: (floor.x + floor.width / 2.0) * s,
        y: FLOOR_LEVEL,
        z: (floor.y + floor.height / 2.0) * s,
        width: floor.width * s,
        length: floor.height * s,
        texture: floor.material,
        rotation: -FRAC_PI_2,
    }
}

pub fn step_to_world(step: &Step, config: &EditorConfig) -> Step {
    let s = config.scale;
    Step {
        x: step.x * s,
        z: step.z * s,
        width: step.width * s,
        depth: step.depth * s,
        ..step.clone()
    }
}

pub fn block_to_world(block: &Block, config: &EditorConfig) -> Block {
    let s = config.scale;
    Block {
        x: block.x * s,
        z: block.z * s,
        width: block.width * s,
        depth: block.depth * s,
        ..block.clone()
    }
}

pub fn spawn_to_world(spawn: Option<&SpawnPoint>, config: &EditorConfig) -> Option<SpawnPoint> {
    spawn.map(|p| SpawnPoint {
        x: p.x * config.scale,
        y: p.y * config.scale,
        z: p.z * config.scale,
        rotation: p.rotation,
    })
}

fn in_room(room_id: Option<&String>, room: &str) -> bool {
    room_id.is_some_and(|id| id == room)
}

/// Export the entities whose room id equals `room`.
pub fn export_room(scene: &Scene, room: &str) -> Room3D {
    let config = scene.config();
    Room3D {
        walls: scene
            .walls()
            .iter()
            .filter(|w| in_room(w.room_id.as_ref(), room))
            .map(|w| wall_to_world(w, config))
            .collect(),
        floors: scene
            .floors()
            .iter()
            .filter(|f| in_room(f.room_id.as_ref(), room))
            .map(|f| floor_to_world(f, config))
            .collect(),
        steps: scene
            .steps()
            .iter()
            .filter(|s| in_room(s.room_id.as_ref(), room))
            .map(|s| step_to_world(s, config))
            .collect(),
        blocks: scene
            .blocks()
            .iter()
            .filter(|b| in_room(b.room_id.as_ref(), room))
            .map(|b| block_to_world(b, config))
            .collect(),
    }
}

/// One record per declared room, in declaration order. Entities outside
/// every declared room are left out.
pub fn export_rooms(scene: &Scene) -> Vec<Room3D> {
    let rooms: Vec<Room3D> = scene
        .rooms()
        .iter()
        .map(|room| export_room(scene, room))
        .collect();
    log::info!(
        "Exported {} rooms ({} walls, {} floors, {} steps, {} blocks)",
        rooms.len(),
        rooms.iter().map(|r| r.walls.len()).sum::<usize>(),
        rooms.iter().map(|r| r.floors.len()).sum::<usize>(),
        rooms.iter().map(|r| r.steps.len()).sum::<usize>(),
        rooms.iter().map(|r| r.blocks.len()).sum::<usize>(),
    );
    rooms
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entity::EntityKind;
    use crate::geometry::{Point, Rotation};
    use crate::stairs;

    const EPS: f64 = 1e-9;

    fn config() -> EditorConfig {
        EditorConfig::default()
    }

    fn wall(x1: f64, y1: f64, x2: f64, y2: f64) -> Wall {
        Wall::new(Point::new(x1, y1), Point::new(x2, y2))
    }

    #[test]
    fn test_horizontal_wall() {
        let w = wall_to_world(&wall(0.0, 100.0, 400.0, 100.0), &config());
        assert!((w.width - 40.0).abs() < EPS);
        assert!((w.x - 20.0).abs() < EPS);
        assert!((w.z - 10.0).abs() < EPS);
        assert!(w.rotation.abs() < EPS);
        assert_eq!(w.normal, Vec3::new(0.0, 0.0, -1.0));
        assert_eq!(w.texture, Material::North);
        assert!((w.height - 5.0).abs() < EPS);
        assert!(w.y.abs() < EPS && w.depth.abs() < EPS);
        // scaling inverts
        assert!((w.width / 0.1 - 400.0).abs() < EPS);
    }

    #[test]
    fn test_vertical_wall() {
        let w = wall_to_world(&wall(50.0, 300.0, 50.0, 100.0), &config());
        assert!((w.width - 20.0).abs() < EPS);
        assert!((w.x - 5.0).abs() < EPS);
        assert!((w.z - 20.0).abs() < EPS);
        assert!((w.rotation + FRAC_PI_2).abs() < EPS);
        assert_eq!(w.normal, Vec3::new(-1.0, 0.0, 0.0));
    }

    #[test]
    fn test_diagonal_wall() {
        let w = wall_to_world(&wall(0.0, 0.0, 300.0, 400.0), &config());
        assert!((w.width - 50.0).abs() < EPS);
        assert!((w.x - 15.0).abs() < EPS);
        assert!((w.z - 20.0).abs() < EPS);
        assert!((w.rotation + 400.0_f64.atan2(300.0)).abs() < EPS);
        assert!((w.normal.x - 0.8).abs() < EPS);
        assert!((w.normal.z + 0.6).abs() < EPS);
        assert!(w.normal.y.abs() < EPS);
    }

    #[test]
    fn test_floor_recentered() {
        let mut floor = Floor::spanning(Point::new(100.0, 50.0), Point::new(300.0, 150.0));
        floor.material = Material::TileFloor;
        let f = floor_to_world(&floor, &config());
        assert!((f.x - 20.0).abs() < EPS);
        assert!((f.z - 10.0).abs() < EPS);
        assert!((f.y - FLOOR_LEVEL).abs() < EPS);
        assert!((f.width - 20.0).abs() < EPS);
        assert!((f.length - 10.0).abs() < EPS);
        assert!((f.rotation + FRAC_PI_2).abs() < EPS);
        assert_eq!(f.texture, Material::TileFloor);
    }

    #[test]
    fn test_step_keeps_vertical_fields() {
        let mut temp = stairs::temp_step(Point::new(100.0, 200.0), 50.0);
        temp.rotation = Rotation::East;
        temp.normal = Rotation::East.normal();
        let step = &stairs::generate_flight(&temp, 1, 50.0)[0];
        let world = step_to_world(step, &config());
        assert!((world.x - step.x * 0.1).abs() < EPS);
        assert!((world.z - step.z * 0.1).abs() < EPS);
        assert!((world.width - 5.0).abs() < EPS);
        assert!((world.depth - 1.0).abs() < EPS);
        assert!((world.height - step.height).abs() < EPS);
        assert!((world.y - step.y).abs() < EPS);
        assert_eq!(world.rotation, Rotation::East);
        assert_eq!(world.normal, step.normal);
    }

    #[test]
    fn test_block_keeps_thickness() {
        let mut block = Block::spanning(Point::new(0.0, 0.0), Point::new(100.0, 50.0), Rotation::South);
        block.height = 3.0;
        let world = block_to_world(&block, &config());
        assert!((world.x - 5.0).abs() < EPS);
        assert!((world.z - 2.5).abs() < EPS);
        assert!((world.width - 10.0).abs() < EPS);
        assert!((world.depth - 5.0).abs() < EPS);
        assert!((world.height - 3.0).abs() < EPS);
        assert_eq!(world.rotation, Rotation::South);
    }

    #[test]
    fn test_spawn_point_scaling() {
        let spawn = SpawnPoint {
            x: 150.0,
            y: 0.0,
            z: 250.0,
            rotation: 1.25,
        };
        let world = spawn_to_world(Some(&spawn), &config()).unwrap();
        assert!((world.x - 15.0).abs() < EPS);
        assert!((world.z - 25.0).abs() < EPS);
        assert!((world.rotation - 1.25).abs() < EPS);
        assert!(spawn_to_world(None, &config()).is_none());
    }

    #[test]
    fn test_rooms_partition_entities() {
        let mut scene = Scene::new(config());
        assert!(scene.add_room("2"));
        let a = scene.add_wall(wall(0.0, 100.0, 400.0, 100.0)).unwrap();
        let b = scene.add_wall(wall(0.0, 300.0, 0.0, 500.0)).unwrap();
        scene.add_wall(wall(0.0, 0.0, 100.0, 100.0)).unwrap();
        assert!(scene.assign_room(a, "1"));
        assert!(scene.assign_room(b, "2"));

        let rooms = export_rooms(&scene);
        assert_eq!(rooms.len(), 2);
        assert_eq!(rooms[0].walls.len(), 1);
        assert!((rooms[0].walls[0].width - 40.0).abs() < EPS);
        assert_eq!(rooms[1].walls.len(), 1);
        assert!((rooms[1].walls[0].rotation + FRAC_PI_2).abs() < EPS);
        assert!((rooms[1].walls[0].z - 40.0).abs() < EPS);
        assert_eq!(b.kind, EntityKind::Wall);
    }

    #[test]
    fn test_unassigned_entities_are_omitted() {
        let mut scene = Scene::new(config());
        scene.add_wall(wall(0.0, 100.0, 400.0, 100.0)).unwrap();
        scene
            .add_floor(Floor::spanning(Point::new(0.0, 0.0), Point::new(100.0, 100.0)))
            .unwrap();
        let rooms = export_rooms(&scene);
        assert_eq!(rooms.len(), 1);
        assert_eq!(rooms[0], Room3D::default());
    }
}
