/// Shared data structures for the application state
///
/// These structs represent the data model that flows between
/// the store layer and the UI layer.

use std::fmt;

/// The key used to pick a character and re-query its details.
/// Nothing in the schema makes it unique.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Identity {
    pub last_name: String,
    pub first_name: String,
}

impl Identity {
    pub fn new(last_name: impl Into<String>, first_name: impl Into<String>) -> Self {
        Self {
            last_name: last_name.into(),
            first_name: first_name.into(),
        }
    }
}

/// Dropdown label: "Potter, Harry"
impl fmt::Display for Identity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}, {}", self.last_name, self.first_name)
    }
}

/// A full row of the `characters` table
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Character {
    pub last_name: String,
    pub first_name: String,
    pub occupation: String,
    /// Filesystem reference to the portrait, as stored
    pub image_path: String,
}

impl Character {
    pub fn identity(&self) -> Identity {
        Identity::new(&self.last_name, &self.first_name)
    }
}

/// Result of looking an identity up in the store
#[derive(Debug, Clone, PartialEq)]
pub struct Lookup {
    /// First matching row in storage order
    pub character: Character,
    /// How many rows matched; more than one means the name is ambiguous
    pub matches: usize,
}
