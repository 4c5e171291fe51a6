use iced::widget::image::Handle;
use image::{imageops::FilterType, ImageReader};
use std::path::Path;

use crate::error::ViewerError;

/// Side of the square box portraits are scaled to fit
pub const PORTRAIT_BOX: u32 = 300;

/// A decoded, display-ready portrait
#[derive(Debug, Clone)]
pub struct Portrait {
    pub width: u32,
    pub height: u32,
    pub handle: Handle,
}

/// Size of a `width`×`height` image scaled down to fit a `bound`×`bound` box.
///
/// Aspect ratio is kept and images that already fit are left alone.
/// Neither side drops below 1 pixel.
pub fn fit_within(width: u32, height: u32, bound: u32) -> (u32, u32) {
    let bound = bound.max(1);
    if width <= bound && height <= bound {
        return (width, height);
    }

    let scale = f64::min(
        bound as f64 / width as f64,
        bound as f64 / height as f64,
    );

    let scaled = |side: u32| ((side as f64 * scale).round() as u32).clamp(1, bound);
    (scaled(width), scaled(height))
}

/// Decode the image at `path` and shrink it to fit the bounding box.
/// The format is guessed from the file content, not the extension.
pub fn load_portrait(path: &Path, bound: u32) -> Result<Portrait, ViewerError> {
    let image_error = |reason: String| ViewerError::ImageLoad {
        path: path.display().to_string(),
        reason,
    };

    let img = ImageReader::open(path)
        .map_err(|e| image_error(e.to_string()))?
        .with_guessed_format()
        .map_err(|e| image_error(e.to_string()))?
        .decode()
        .map_err(|e| image_error(e.to_string()))?;

    let (width, height) = fit_within(img.width(), img.height(), bound);
    let img = if (width, height) == (img.width(), img.height()) {
        img
    } else {
        img.resize_exact(width, height, FilterType::Lanczos3)
    };

    log::debug!("🖼️  Loaded portrait {} at {}x{}", path.display(), width, height);

    let pixels = img.into_rgba8().into_raw();
    Ok(Portrait {
        width,
        height,
        handle: Handle::from_rgba(width, height, pixels),
    })
}
