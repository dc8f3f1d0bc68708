use serde::{Deserialize, Serialize};

use levelkit_core::export;
use levelkit_core::{Editor, Material, Room3D, Scene, SpawnPoint, Vec3};

/// Which surface family a texture belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TextureKind {
    Wall,
    Floor,
    Block,
}

/// One entry of the texture manifest shipped with every level.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextureEntry {
    #[serde(rename = "type")]
    pub kind: TextureKind,
    pub name: Material,
    pub path: String,
}

impl TextureEntry {
    fn new(kind: TextureKind, name: Material, path: &str) -> Self {
        Self {
            kind,
            name,
            path: path.to_string(),
        }
    }
}

/// The texture manifest. Fixed; it does not depend on what the scene uses.
pub fn default_textures() -> Vec<TextureEntry> {
    vec![
        TextureEntry::new(TextureKind::Wall, Material::North, "FreeDoomWall1.png"),
        TextureEntry::new(TextureKind::Wall, Material::South, "FreeDoomWall1.png"),
        TextureEntry::new(TextureKind::Wall, Material::East, "FreeDoomWall2.png"),
        TextureEntry::new(TextureKind::Wall, Material::West, "FreeDoomWall2.png"),
        TextureEntry::new(TextureKind::Floor, Material::Floor, "FreeDoomFloor1.png"),
        TextureEntry::new(TextureKind::Block, Material::Block, "FreeDoomFloor2.png"),
    ]
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ActorKind {
    Player,
    Enemy,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ActorProperties {
    Player { speed: f64, health: u32 },
    Enemy { ai: String, damage: u32 },
}

/// A game actor placed in the level.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Actor {
    #[serde(rename = "type")]
    pub kind: ActorKind,
    pub position: Vec3,
    pub properties: ActorProperties,
}

/// Demonstration player and enemy, at fixed plane positions scaled to world.
pub fn demo_actors(scale: f64) -> Vec<Actor> {
    vec![
        Actor {
            kind: ActorKind::Player,
            position: Vec3::new(2.0 * scale, 0.0, 2.0 * scale),
            properties: ActorProperties::Player {
                speed: 5.0,
                health: 100,
            },
        },
        Actor {
            kind: ActorKind::Enemy,
            position: Vec3::new(8.0 * scale, 0.0, 8.0 * scale),
            properties: ActorProperties::Enemy {
                ai: "patrol".to_string(),
                damage: 10,
            },
        },
    ]
}

/// The exported level, as consumed by the game runtime.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LevelDocument {
    pub name: String,
    pub spawn_point: Option<SpawnPoint>,
    pub textures: Vec<TextureEntry>,
    pub rooms: Vec<Room3D>,
    pub enemies: Vec<Actor>,
    pub entities: Vec<Actor>,
}

impl LevelDocument {
    pub fn from_scene(scene: &Scene) -> Self {
        let config = scene.config();
        Self {
            name: config.level_name.clone(),
            spawn_point: export::spawn_to_world(scene.spawn_point(), config),
            textures: default_textures(),
            rooms: export::export_rooms(scene),
            enemies: Vec::new(),
            entities: demo_actors(config.scale),
        }
    }

    pub fn from_editor(editor: &Editor) -> Self {
        Self::from_scene(editor.scene())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use levelkit_core::{EditorConfig, Point, Wall};

    #[test]
    fn test_empty_scene_document() {
        let doc = LevelDocument::from_scene(&Scene::default());
        assert_eq!(doc.name, "Level 1");
        assert!(doc.spawn_point.is_none());
        assert_eq!(doc.rooms.len(), 1);
        assert_eq!(doc.rooms[0], Room3D::default());
        assert!(doc.enemies.is_empty());
        assert_eq!(doc.textures.len(), 6);
    }

    #[test]
    fn test_document_uses_config() {
        let config = EditorConfig {
            level_name: "Crypt".to_string(),
            scale: 0.5,
            ..Default::default()
        };
        let mut scene = Scene::new(config);
        scene.set_spawn_point(Some(SpawnPoint::at(Point::new(100.0, 40.0))));
        let wall = scene
            .add_wall(Wall::new(Point::new(0.0, 100.0), Point::new(400.0, 100.0)))
            .unwrap();
        assert!(scene.assign_room(wall, "1"));

        let doc = LevelDocument::from_scene(&scene);
        assert_eq!(doc.name, "Crypt");
        let spawn = doc.spawn_point.unwrap();
        assert!((spawn.x - 50.0).abs() < 1e-9);
        assert!((spawn.z - 20.0).abs() < 1e-9);
        assert!((doc.rooms[0].walls[0].width - 200.0).abs() < 1e-9);
        assert!((doc.entities[1].position.x - 4.0).abs() < 1e-9);
    }

    #[test]
    fn test_manifest_json_shape() {
        let json = serde_json::to_value(default_textures()).unwrap();
        assert_eq!(json[0]["type"], "wall");
        assert_eq!(json[0]["name"], "north");
        assert_eq!(json[3]["path"], "FreeDoomWall2.png");
        assert_eq!(json[5]["type"], "block");

        let actors = serde_json::to_value(demo_actors(0.1)).unwrap();
        assert_eq!(actors[0]["type"], "player");
        assert_eq!(actors[0]["properties"]["health"], 100);
        assert_eq!(actors[1]["properties"]["ai"], "patrol");
    }
}
