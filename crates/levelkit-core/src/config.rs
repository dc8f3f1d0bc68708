use serde::{Deserialize, Serialize};

/// Grid unit of the export-oriented editor.
pub const GRID_SIZE: f64 = 50.0;
/// Grid unit of the original small-grid floor plan editor.
pub const LEGACY_GRID_SIZE: f64 = 20.0;
/// Plane units to world units.
pub const SCALE_FACTOR: f64 = 0.1;
pub const MIN_WALL_LENGTH: f64 = 20.0;
pub const MIN_AREA: f64 = 100.0;
pub const WALL_THICKNESS: f64 = 20.0;
pub const FLIGHT_SIZE: usize = 6;
/// Exported wall height, in world units.
pub const WALL_HEIGHT: f64 = 5.0;

/// Tunables of the editor and exporter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct EditorConfig {
    pub grid_size: f64,
    pub scale: f64,
    /// Walls must be strictly longer than this to be kept.
    pub min_wall_length: f64,
    /// Floors and blocks need at least this footprint area.
    pub min_area: f64,
    pub wall_thickness: f64,
    /// Steps generated per staircase placement.
    pub flight_size: usize,
    pub wall_height: f64,
    pub level_name: String,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            grid_size: GRID_SIZE,
            scale: SCALE_FACTOR,
            min_wall_length: MIN_WALL_LENGTH,
            min_area: MIN_AREA,
            wall_thickness: WALL_THICKNESS,
            flight_size: FLIGHT_SIZE,
            wall_height: WALL_HEIGHT,
            level_name: "Level 1".to_string(),
        }
    }
}

impl EditorConfig {
    /// Small-grid preset.
    pub fn legacy() -> Self {
        Self {
            grid_size: LEGACY_GRID_SIZE,
            ..Default::default()
        }
    }
}
