//! # LevelKit I/O
//!
//! The exported level document (rooms in world space, spawn point, texture
//! manifest and demo actors), its JSON reader and writer, and the settings
//! loader that builds an [`levelkit_core::EditorConfig`] from JSON.

pub mod level;
pub mod writer;
pub mod settings;

pub use level::{LevelDocument, TextureEntry};
pub use settings::{load_settings, SettingsError};
pub use writer::{ExportError, LevelReader, LevelWriter};
