//! Adapters between the lightweight core buffer types and the `image` crate.

use foosvision_core::{ColorImage, ColorImageView};

/// Borrow an `image::RgbImage` as the core view type.
pub fn color_view(img: &::image::RgbImage) -> ColorImageView<'_> {
    ColorImageView {
        width: img.width() as usize,
        height: img.height() as usize,
        data: img.as_raw(),
    }
}

/// Convert an owned core buffer into an `image::RgbImage`.
///
/// Returns `None` if the buffer dimensions are inconsistent with its data
/// length.
pub fn to_rgb8(img: &ColorImage) -> Option<::image::RgbImage> {
    ::image::RgbImage::from_raw(img.width as u32, img.height as u32, img.data.clone())
}
