//! Staircase flights: one placement gesture yields a run of treads.

use uuid::Uuid;

use crate::entity::Step;
use crate::geometry::{Point, Rotation};
use crate::material::Material;

/// Run-axis depth of every tread.
pub const TREAD_DEPTH: f64 = 10.0;
/// Height change between neighbouring treads.
pub const RISE: f64 = 0.25;
const TOP_HEIGHT: f64 = 1.5;
const BOTTOM_HEIGHT: f64 = 0.25;

/// Placeholder tread shown while a flight is being placed.
pub fn temp_step(at: Point, grid: f64) -> Step {
    Step {
        id: Uuid::nil(),
        x: at.x,
        y: 0.0,
        z: at.y,
        width: grid,
        depth: TREAD_DEPTH,
        height: TOP_HEIGHT,
        rotation: Rotation::North,
        material: Material::default_step(),
        dir: None,
        normal: Rotation::North.normal(),
        room_id: None,
    }
}

/// Expand a placed tread into a flight of `count` treads.
///
/// Tread `i` is pushed along the run axis by `i * grid / 7 + 7 - grid / 2`:
/// toward negative plane-y for North, negative x for East, and the opposite
/// way for South and West. Heights ramp down from 1.5 by 0.25 per tread,
/// except South flights which ramp up from 0.25.
pub fn generate_flight(temp: &Step, count: usize, grid: f64) -> Vec<Step> {
    let rotation = temp.rotation;
    let (start_height, rise) = match rotation {
        Rotation::South => (BOTTOM_HEIGHT, RISE),
        _ => (TOP_HEIGHT, -RISE),
    };

    (0..count)
        .map(|i| {
            let i = i as f64;
            let shift = i * grid / 7.0 + 7.0 - grid / 2.0;
            let (x, z) = match rotation {
                Rotation::North => (temp.x, temp.z - shift),
                Rotation::East => (temp.x - shift, temp.z),
                Rotation::South => (temp.x, temp.z + shift),
                Rotation::West => (temp.x + shift, temp.z),
            };
            Step {
                id: Uuid::nil(),
                x,
                y: temp.y,
                z,
                width: grid,
                depth: TREAD_DEPTH,
                height: start_height + rise * i,
                rotation,
                material: temp.material,
                dir: Some(rotation),
                normal: temp.normal,
                room_id: temp.room_id.clone(),
            }
        })
        .collect()
}
