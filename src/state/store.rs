use rusqlite::{Connection, OpenFlags};
use std::path::{Path, PathBuf};

use super::data::{Character, Identity, Lookup};
use crate::error::ViewerError;

/// Read-only access to the SQLite character store.
///
/// Every query opens its own connection and drops it before returning.
/// Nothing is pooled and nothing is written.
#[derive(Debug, Clone)]
pub struct CharacterStore {
    db_path: PathBuf,
}

impl CharacterStore {
    pub fn new(db_path: impl Into<PathBuf>) -> Self {
        Self {
            db_path: db_path.into(),
        }
    }

    /// Get the path to the database file
    pub fn path(&self) -> &Path {
        &self.db_path
    }

    /// Open a read-only connection.
    /// A missing file is an error here; SQLite would otherwise create an empty one.
    fn connect(&self) -> Result<Connection, ViewerError> {
        let flags = OpenFlags::SQLITE_OPEN_READ_ONLY | OpenFlags::SQLITE_OPEN_NO_MUTEX;

        Connection::open_with_flags(&self.db_path, flags).map_err(|e| {
            ViewerError::StoreConnection {
                path: self.db_path.clone(),
                reason: e.to_string(),
            }
        })
    }

    /// All identities in storage order (no ORDER BY is requested).
    /// NULL columns read as empty strings, here and in `lookup`.
    pub fn list_identities(&self) -> Result<Vec<Identity>, ViewerError> {
        let conn = self.connect()?;
        let mut stmt = conn.prepare(
            "SELECT COALESCE(last_name, ''), COALESCE(first_name, '') FROM characters",
        )?;

        let identity_iter = stmt.query_map([], |row| {
            Ok(Identity {
                last_name: row.get(0)?,
                first_name: row.get(1)?,
            })
        })?;

        let mut identities = Vec::new();
        for identity in identity_iter {
            identities.push(identity?);
        }

        log::debug!("Listed {} identities from {}", identities.len(), self.db_path.display());
        Ok(identities)
    }

    /// Full details for one identity.
    ///
    /// Duplicate names are possible; the first row in storage order wins and
    /// the match count is reported so the caller can flag the ambiguity.
    pub fn lookup(&self, identity: &Identity) -> Result<Lookup, ViewerError> {
        let conn = self.connect()?;
        let mut stmt = conn.prepare(
            "SELECT COALESCE(last_name, ''), COALESCE(first_name, ''),
                    COALESCE(occupation, ''), COALESCE(image_path, '')
             FROM characters
             WHERE COALESCE(last_name, '') = ?1 AND COALESCE(first_name, '') = ?2",
        )?;

        let character_iter = stmt.query_map(
            rusqlite::params![identity.last_name, identity.first_name],
            |row| {
                Ok(Character {
                    last_name: row.get(0)?,
                    first_name: row.get(1)?,
                    occupation: row.get(2)?,
                    image_path: row.get(3)?,
                })
            },
        )?;

        let mut rows = Vec::new();
        for character in character_iter {
            rows.push(character?);
        }

        let matches = rows.len();
        match rows.into_iter().next() {
            Some(character) => {
                if matches > 1 {
                    log::warn!("{} rows share the name {}; using the first", matches, identity);
                }
                Ok(Lookup { character, matches })
            }
            None => Err(ViewerError::LookupMiss(identity.clone())),
        }
    }

    /// Resolve a stored image path.
    /// Relative paths are tried next to the database file first, then as given.
    pub fn resolve_image_path(&self, image_path: &str) -> PathBuf {
        let path = Path::new(image_path);
        if path.is_absolute() {
            return path.to_path_buf();
        }

        if let Some(parent) = self.db_path.parent() {
            let beside_db = parent.join(path);
            if beside_db.exists() {
                return beside_db;
            }
        }

        path.to_path_buf()
    }
}
