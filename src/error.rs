use std::path::PathBuf;
use thiserror::Error;

use crate::state::data::Identity;

/// Everything that can go wrong between the store, the image decoder and the window.
///
/// Errors travel inside iced messages, so they carry rendered reasons
/// instead of the source error values (which are not `Clone`).
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ViewerError {
    /// The database file could not be opened
    #[error("Cannot open character store {}: {reason}", .path.display())]
    StoreConnection { path: PathBuf, reason: String },

    /// The statement failed, usually because the schema does not match
    #[error("Character store query failed: {0}")]
    StoreQuery(String),

    /// No row matched the selected identity
    #[error("No character named {} {} in the store", .0.first_name, .0.last_name)]
    LookupMiss(Identity),

    /// The portrait is missing, unreadable or not a decodable image
    #[error("Cannot load image {path}: {reason}")]
    ImageLoad { path: String, reason: String },

    /// A background job panicked or was cancelled
    #[error("Background task failed: {0}")]
    Worker(String),

    /// The user closed the file picker without choosing a database
    #[error("No character database was chosen")]
    NoDatabaseChosen,

    /// The iced runtime failed to start or crashed
    #[error("Window error: {0}")]
    Gui(String),
}

impl From<rusqlite::Error> for ViewerError {
    fn from(err: rusqlite::Error) -> Self {
        ViewerError::StoreQuery(err.to_string())
    }
}

impl From<iced::Error> for ViewerError {
    fn from(err: iced::Error) -> Self {
        ViewerError::Gui(err.to_string())
    }
}
