/// Portrait loading module
///
/// This module handles:
/// - Decoding character images from disk
/// - Downscaling them to fit the display bounding box
/// - Handing the pixels to iced as an image handle

pub mod loader;

pub use loader::{load_portrait, Portrait, PORTRAIT_BOX};
