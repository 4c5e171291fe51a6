/// State management module
///
/// This module handles all application state, including:
/// - Read-only queries against the character store (store.rs)
/// - Shared data structures (data.rs)
/// - The display value shown for the current selection (display.rs)

pub mod data;
pub mod display;
pub mod store;

#[cfg(test)]
pub mod fixtures;
