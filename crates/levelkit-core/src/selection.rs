use serde::{Deserialize, Serialize};

use crate::collision::DetectCollision;
use crate::entity::{EntityKind, EntityRef, RoomId};
use crate::geometry::Point;
use crate::material::Material;
use crate::scene::Scene;

/// Kinds in the order they are tested when picking.
pub const PICK_ORDER: [EntityKind; 4] = [
    EntityKind::Wall,
    EntityKind::Step,
    EntityKind::Block,
    EntityKind::Floor,
];

/// The entity picked by the last selection click.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Selection {
    pub entity: EntityRef,
    #[serde(rename = "texture")]
    pub material: Material,
    pub room_id: Option<RoomId>,
    pub click_point: Point,
}

impl Selection {
    pub fn is(&self, target: EntityRef) -> bool {
        self.entity == target
    }
}

/// Pick the entity under `point`. Kinds are tried in [`PICK_ORDER`]; within
/// a kind the earliest entity in the collection wins.
pub fn select_at(scene: &Scene, point: Point) -> Option<Selection> {
    let detect = DetectCollision::new(point, scene.config().wall_thickness);

    for kind in PICK_ORDER {
        let candidates = scene.candidates(kind, &point);
        let hit = match kind {
            EntityKind::Wall => candidates
                .into_iter()
                .map(|i| &scene.walls()[i])
                .find(|w| detect.is_point_on_wall(w))
                .map(|w| (w.id, w.material, w.room_id.clone())),
            EntityKind::Step => candidates
                .into_iter()
                .map(|i| &scene.steps()[i])
                .find(|s| detect.is_point_on_step(s))
                .map(|s| (s.id, s.material, s.room_id.clone())),
            EntityKind::Block => candidates
                .into_iter()
                .map(|i| &scene.blocks()[i])
                .find(|b| detect.is_point_on_block(b))
                .map(|b| (b.id, b.material, b.room_id.clone())),
            EntityKind::Floor => candidates
                .into_iter()
                .map(|i| &scene.floors()[i])
                .find(|f| detect.is_point_on_floor(f))
                .map(|f| (f.id, f.material, f.room_id.clone())),
        };

        if let Some((id, material, room_id)) = hit {
            return Some(Selection {
                entity: EntityRef::new(kind, id),
                material,
                room_id,
                click_point: point,
            });
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entity::{Block, Floor, Wall};
    use crate::geometry::Rotation;
    use crate::stairs;

    fn scene_with_overlap() -> (Scene, EntityRef, EntityRef) {
        let mut scene = Scene::default();
        let floor = scene
            .add_floor(Floor::spanning(Point::new(0.0, 0.0), Point::new(400.0, 400.0)))
            .unwrap();
        let wall = scene
            .add_wall(Wall::new(Point::new(0.0, 100.0), Point::new(400.0, 100.0)))
            .unwrap();
        (scene, wall, floor)
    }

    #[test]
    fn test_wall_beats_floor() {
        let (scene, wall, floor) = scene_with_overlap();
        let picked = select_at(&scene, Point::new(200.0, 102.0)).unwrap();
        assert_eq!(picked.entity, wall);
        assert!(!picked.is(floor));
        assert_eq!(picked.click_point, Point::new(200.0, 102.0));
    }

    #[test]
    fn test_floor_when_no_wall() {
        let (scene, _, floor) = scene_with_overlap();
        let picked = select_at(&scene, Point::new(200.0, 300.0)).unwrap();
        assert_eq!(picked.entity, floor);
        assert_eq!(picked.material, Material::Floor);
    }

    #[test]
    fn test_step_beats_block() {
        let mut scene = Scene::default();
        let block = Block::spanning(Point::new(0.0, 0.0), Point::new(200.0, 200.0), Rotation::North);
        let block = scene.add_block(block).unwrap();
        let temp = stairs::temp_step(Point::new(100.0, 100.0), 50.0);
        let flight = scene.add_flight(stairs::generate_flight(&temp, 6, 50.0));

        let tread = &scene.steps()[0];
        let picked = select_at(&scene, Point::new(tread.x, tread.z)).unwrap();
        assert_eq!(picked.entity, flight[0]);

        let picked = select_at(&scene, Point::new(10.0, 10.0)).unwrap();
        assert_eq!(picked.entity, block);
    }

    #[test]
    fn test_first_in_collection_wins() {
        let mut scene = Scene::default();
        let first = scene
            .add_floor(Floor::spanning(Point::new(0.0, 0.0), Point::new(100.0, 100.0)))
            .unwrap();
        scene
            .add_floor(Floor::spanning(Point::new(50.0, 50.0), Point::new(150.0, 150.0)))
            .unwrap();
        let picked = select_at(&scene, Point::new(75.0, 75.0)).unwrap();
        assert_eq!(picked.entity, first);
    }

    #[test]
    fn test_empty_space() {
        let (scene, _, _) = scene_with_overlap();
        assert!(select_at(&scene, Point::new(900.0, 900.0)).is_none());
    }
}
