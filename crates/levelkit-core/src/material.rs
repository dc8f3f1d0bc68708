use serde::{Deserialize, Serialize};

/// Surface material of an entity. Serialized under the texture name the
/// exported level and the editor palette both use.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Material {
    North,
    South,
    East,
    West,
    Floor,
    Block,
    BrickWall,
    ConcreteFloor,
    WoodFloor,
    TileFloor,
}

impl Material {
    pub const ALL: [Material; 10] = [
        Material::North,
        Material::South,
        Material::East,
        Material::West,
        Material::Floor,
        Material::Block,
        Material::BrickWall,
        Material::ConcreteFloor,
        Material::WoodFloor,
        Material::TileFloor,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Material::North => "north",
            Material::South => "south",
            Material::East => "east",
            Material::West => "west",
            Material::Floor => "floor",
            Material::Block => "block",
            Material::BrickWall => "brickWall",
            Material::ConcreteFloor => "concreteFloor",
            Material::WoodFloor => "woodFloor",
            Material::TileFloor => "tileFloor",
        }
    }

    /// Flat color used when drawing the material on the editor canvas.
    pub fn color(self) -> Color {
        match self {
            Material::North | Material::South | Material::BrickWall => Color::rgb(0xa5, 0x2a, 0x2a),
            Material::East | Material::West => Color::rgb(0x8b, 0x45, 0x13),
            Material::Floor | Material::ConcreteFloor => Color::rgb(0xcc, 0xcc, 0xcc),
            Material::Block => Color::rgb(0x70, 0x70, 0x70),
            Material::WoodFloor => Color::rgb(0xd2, 0xb4, 0x8c),
            Material::TileFloor => Color::rgb(0xad, 0xd8, 0xe6),
        }
    }

    pub fn default_wall() -> Self {
        Material::North
    }

    pub fn default_floor() -> Self {
        Material::Floor
    }

    pub fn default_step() -> Self {
        Material::WoodFloor
    }

    pub fn default_block() -> Self {
        Material::Block
    }
}

/// RGB display color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    pub fn to_f32_array(&self, opacity: f32) -> [f32; 4] {
        [
            f32::from(self.r) / 255.0,
            f32::from(self.g) / 255.0,
            f32::from(self.b) / 255.0,
            opacity,
        ]
    }

    pub fn to_hex(&self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_material_names_match_serde() {
        for material in Material::ALL {
            let json = serde_json::to_string(&material).unwrap();
            assert_eq!(json, format!("\"{}\"", material.name()));
        }
    }

    #[test]
    fn test_palette_colors() {
        assert_eq!(Material::BrickWall.color().to_hex(), "#a52a2a");
        assert_eq!(Material::WoodFloor.color().to_hex(), "#d2b48c");
        assert_eq!(Material::TileFloor.color().to_hex(), "#add8e6");
    }
}
