use super::data::{Character, Identity};
use crate::error::ViewerError;
use crate::portrait::Portrait;

/// Everything the background job produces for one selection
#[derive(Debug, Clone)]
pub struct LoadedCharacter {
    pub character: Character,
    /// Rows sharing the selected name
    pub matches: usize,
    pub portrait: Portrait,
}

/// The image and text regions, always replaced together.
#[derive(Debug, Clone, Default)]
pub enum DisplayState {
    /// Nothing selected yet
    #[default]
    Empty,
    Showing {
        identity: Identity,
        portrait: Portrait,
        caption: String,
    },
    /// The lookup or image load failed; both regions show the message instead
    Failed {
        identity: Identity,
        message: String,
    },
}

/// Text region contents: name line, then occupation line
pub fn caption(character: &Character) -> String {
    format!(
        "Name: {} {}\nOccupation: {}",
        character.first_name, character.last_name, character.occupation
    )
}

impl DisplayState {
    /// Build the next display from a finished load.
    pub fn render(identity: Identity, result: Result<LoadedCharacter, ViewerError>) -> Self {
        match result {
            Ok(loaded) => DisplayState::Showing {
                caption: caption(&loaded.character),
                identity,
                portrait: loaded.portrait,
            },
            Err(err) => DisplayState::Failed {
                identity,
                message: err.to_string(),
            },
        }
    }

    pub fn identity(&self) -> Option<&Identity> {
        match self {
            DisplayState::Empty => None,
            DisplayState::Showing { identity, .. } | DisplayState::Failed { identity, .. } => {
                Some(identity)
            }
        }
    }

    pub fn portrait(&self) -> Option<&Portrait> {
        match self {
            DisplayState::Showing { portrait, .. } => Some(portrait),
            _ => None,
        }
    }

    pub fn caption(&self) -> Option<&str> {
        match self {
            DisplayState::Showing { caption, .. } => Some(caption),
            _ => None,
        }
    }

    pub fn error_message(&self) -> Option<&str> {
        match self {
            DisplayState::Failed { message, .. } => Some(message),
            _ => None,
        }
    }
}
