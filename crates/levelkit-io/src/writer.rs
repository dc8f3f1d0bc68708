//! JSON reader and writer for level documents.

use std::io::{self, Read, Write};
use thiserror::Error;

use levelkit_core::Editor;

use crate::level::LevelDocument;

#[derive(Error, Debug)]
pub enum ExportError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub struct LevelWriter<W: Write> {
    writer: W,
    pretty: bool,
}

impl<W: Write> LevelWriter<W> {
    pub fn new(writer: W) -> Self {
        Self {
            writer,
            pretty: false,
        }
    }

    /// Indent the output for humans.
    pub fn pretty(mut self) -> Self {
        self.pretty = true;
        self
    }

    pub fn write(&mut self, doc: &LevelDocument) -> Result<(), ExportError> {
        if self.pretty {
            serde_json::to_writer_pretty(&mut self.writer, doc)?;
        } else {
            serde_json::to_writer(&mut self.writer, doc)?;
        }
        self.writer.flush()?;
        log::info!(
            "Wrote level '{}' with {} rooms",
            doc.name,
            doc.rooms.len()
        );
        Ok(())
    }

    /// Export the editor's scene and write it.
    pub fn write_editor(&mut self, editor: &Editor) -> Result<LevelDocument, ExportError> {
        let doc = LevelDocument::from_editor(editor);
        self.write(&doc)?;
        Ok(doc)
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

pub struct LevelReader<R: Read> {
    reader: R,
}

impl<R: Read> LevelReader<R> {
    pub fn new(reader: R) -> Self {
        Self { reader }
    }

    pub fn read(&mut self) -> Result<LevelDocument, ExportError> {
        let doc: LevelDocument = serde_json::from_reader(&mut self.reader)?;
        log::info!("Read level '{}' with {} rooms", doc.name, doc.rooms.len());
        Ok(doc)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use levelkit_core::{EditMode, EntityKind, Point, Rotation};

    fn init_logger() {
        let _ = env_logger::builder().is_test(true).try_init();
    }

    fn furnished_editor() -> Editor {
        let mut ed = Editor::default();
        ed.set_mode(EditMode::AddWall);
        ed.pointer_down(Point::new(0.0, 100.0));
        ed.pointer_down(Point::new(400.0, 100.0));
        ed.set_mode(EditMode::AddStep);
        ed.pointer_down(Point::new(200.0, 200.0));
        ed.pointer_down(Point::new(200.0, 200.0));
        ed.set_mode(EditMode::SpawnPoint);
        ed.pointer_down(Point::new(50.0, 50.0));

        ed.set_mode(EditMode::Select);
        ed.pointer_down(Point::new(200.0, 100.0));
        assert!(ed.assign_selected_to_room("1"));
        let tread = ed.scene().steps()[0].clone();
        ed.pointer_down(Point::new(tread.x, tread.z));
        assert_eq!(ed.selection().unwrap().entity.kind, EntityKind::Step);
        assert!(ed.assign_selected_to_room("1"));
        ed
    }

    #[test]
    fn test_write_document_json() {
        init_logger();
        let ed = furnished_editor();
        let mut writer = LevelWriter::new(Vec::new());
        writer.write_editor(&ed).unwrap();
        let bytes = writer.into_inner();

        let json: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(json["name"], "Level 1");
        assert!(json["enemies"].as_array().unwrap().is_empty());
        assert_eq!(json["textures"].as_array().unwrap().len(), 6);
        assert_eq!(json["entities"][0]["type"], "player");

        let spawn = &json["spawnPoint"];
        assert!((spawn["x"].as_f64().unwrap() - 5.0).abs() < 1e-9);

        let room = &json["rooms"][0];
        let wall = &room["walls"][0];
        assert!((wall["width"].as_f64().unwrap() - 40.0).abs() < 1e-9);
        assert!((wall["x"].as_f64().unwrap() - 20.0).abs() < 1e-9);
        assert!((wall["z"].as_f64().unwrap() - 10.0).abs() < 1e-9);
        assert_eq!(wall["rotation"], 0.0);
        assert_eq!(wall["texture"], "north");

        let step = &room["steps"][0];
        assert_eq!(step["roomId"], "1");
        assert_eq!(step["rotation"], 0);
        let id = step["id"].as_str().unwrap();
        assert!(uuid::Uuid::parse_str(id).is_ok());
        assert_eq!(room["steps"].as_array().unwrap().len(), 1);
    }

    #[test]
    fn test_write_then_read() {
        init_logger();
        let ed = furnished_editor();
        let mut writer = LevelWriter::new(Vec::new()).pretty();
        let written = writer.write_editor(&ed).unwrap();
        let bytes = writer.into_inner();
        assert!(bytes.contains(&b'\n'));

        let read = LevelReader::new(bytes.as_slice()).read().unwrap();
        assert_eq!(read, written);
        assert_eq!(read.rooms[0].steps[0].dir, Some(Rotation::North));
    }

    #[test]
    fn test_read_rejects_garbage() {
        let err = LevelReader::new(&b"{\"name\": 3"[..]).read().unwrap_err();
        assert!(matches!(err, ExportError::Json(_)));
    }

    #[test]
    fn test_write_reports_io_failure() {
        struct Broken;
        impl Write for Broken {
            fn write(&mut self, _: &[u8]) -> io::Result<usize> {
                Err(io::Error::new(io::ErrorKind::Other, "disk full"))
            }
            fn flush(&mut self) -> io::Result<()> {
                Ok(())
            }
        }

        let doc = LevelDocument::from_editor(&Editor::default());
        let err = LevelWriter::new(Broken).write(&doc).unwrap_err();
        // serde_json wraps writer failures in its own error type
        assert!(matches!(err, ExportError::Json(ref e) if e.is_io()));
    }
}
