//! Editor settings loaded from JSON. Missing fields take their defaults.

use std::fs::File;
use std::io::{self, BufReader, Read};
use std::path::Path;
use thiserror::Error;

use levelkit_core::EditorConfig;

#[derive(Error, Debug)]
pub enum SettingsError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid setting '{field}': {message}")]
    Invalid { field: &'static str, message: String },
}

fn invalid(field: &'static str, message: impl Into<String>) -> SettingsError {
    SettingsError::Invalid {
        field,
        message: message.into(),
    }
}

fn positive(field: &'static str, value: f64) -> Result<(), SettingsError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(invalid(field, format!("must be positive and finite, got {value}")))
    }
}

fn non_negative(field: &'static str, value: f64) -> Result<(), SettingsError> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(invalid(field, format!("must be non-negative and finite, got {value}")))
    }
}

pub fn validate(config: &EditorConfig) -> Result<(), SettingsError> {
    positive("gridSize", config.grid_size)?;
    positive("scale", config.scale)?;
    positive("wallHeight", config.wall_height)?;
    non_negative("minWallLength", config.min_wall_length)?;
    non_negative("minArea", config.min_area)?;
    non_negative("wallThickness", config.wall_thickness)?;
    if config.flight_size == 0 {
        return Err(invalid("flightSize", "a flight needs at least one step"));
    }
    Ok(())
}

pub fn load_settings<R: Read>(reader: R) -> Result<EditorConfig, SettingsError> {
    let config: EditorConfig = serde_json::from_reader(reader)?;
    validate(&config)?;
    log::info!(
        "Loaded settings: grid {}, scale {}, flight of {}",
        config.grid_size,
        config.scale,
        config.flight_size
    );
    Ok(config)
}

pub fn load_settings_file(path: impl AsRef<Path>) -> Result<EditorConfig, SettingsError> {
    let file = File::open(path.as_ref())?;
    load_settings(BufReader::new(file))
}
