/// Test fixtures: throwaway character stores and portrait files

use rusqlite::Connection;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

use super::store::CharacterStore;

/// (last_name, first_name, occupation, image_path)
pub type Row = (&'static str, &'static str, &'static str, &'static str);

pub fn row(
    last: &'static str,
    first: &'static str,
    occupation: &'static str,
    image: &'static str,
) -> Row {
    (last, first, occupation, image)
}

/// Create `characters.db` in a fresh temp dir and insert the rows in order.
/// Keep the returned `TempDir` alive for as long as the store is used.
pub fn create_store(rows: &[Row]) -> (TempDir, CharacterStore) {
    let dir = tempfile::tempdir().unwrap();
    let db_path = dir.path().join("characters.db");

    let conn = Connection::open(&db_path).unwrap();
    conn.execute(
        "CREATE TABLE characters (
            last_name   TEXT,
            first_name  TEXT,
            occupation  TEXT,
            image_path  TEXT
        )",
        [],
    )
    .unwrap();

    for (last, first, occupation, image) in rows {
        conn.execute(
            "INSERT INTO characters (last_name, first_name, occupation, image_path)
             VALUES (?1, ?2, ?3, ?4)",
            rusqlite::params![last, first, occupation, image],
        )
        .unwrap();
    }

    (dir, CharacterStore::new(db_path))
}

/// Write a solid-colour PNG of the given size
pub fn write_png(dir: &Path, name: &str, width: u32, height: u32) -> PathBuf {
    let path = dir.join(name);
    image::RgbaImage::from_pixel(width, height, image::Rgba([120, 40, 200, 255]))
        .save(&path)
        .unwrap();
    path
}
