use clap::Parser;
use rfd::FileDialog;
use std::path::PathBuf;

use crate::error::ViewerError;
use crate::portrait::PORTRAIT_BOX;

/// Database file looked up in the working directory when none is given
pub const DEFAULT_DATABASE: &str = "harry_potter_characters.db";

/// Browse characters stored in a SQLite database
#[derive(Debug, Parser)]
#[command(name = "character-viewer", version, about)]
pub struct Args {
    /// SQLite file with a `characters` table
    pub database: Option<PathBuf>,
}

/// Resolved runtime settings
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub database: PathBuf,
    /// Side of the square portraits are shrunk to fit
    pub portrait_box: u32,
}

impl Config {
    pub fn new(database: impl Into<PathBuf>) -> Self {
        Self {
            database: database.into(),
            portrait_box: PORTRAIT_BOX,
        }
    }

    /// Build the config from parsed arguments.
    ///
    /// An explicit path is used as-is, even if it does not exist (the store
    /// reports that). Without one, the default file is used if present,
    /// otherwise the user is asked to pick a database.
    pub fn from_args(args: Args) -> Result<Self, ViewerError> {
        if let Some(database) = args.database {
            return Ok(Self::new(database));
        }

        let default = PathBuf::from(DEFAULT_DATABASE);
        if default.exists() {
            return Ok(Self::new(default));
        }

        log::info!("{} not found, asking for a database file", DEFAULT_DATABASE);
        FileDialog::new()
            .set_title("Select Character Database")
            .add_filter("SQLite database", &["db", "sqlite", "sqlite3"])
            .pick_file()
            .map(Self::new)
            .ok_or(ViewerError::NoDatabaseChosen)
    }
}
