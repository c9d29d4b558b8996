use crate::{sample_bilinear_color, ColorImage, ColorImageView, Homography};
use nalgebra::Point2;

/// Warp into the canonical frame: for each destination pixel, map its center
/// through `h_img_from_rect` and sample the source bilinearly per channel.
///
/// Sampling is center-aligned, so an identity homography reproduces the
/// source buffer exactly.
pub fn warp_perspective_color(
    src: &ColorImageView<'_>,
    h_img_from_rect: Homography,
    out_w: usize,
    out_h: usize,
) -> ColorImage {
    let mut out = ColorImage::new(out_w, out_h);

    for y in 0..out_h {
        for x in 0..out_w {
            let pr = Point2::new(x as f32 + 0.5, y as f32 + 0.5);
            let pi = h_img_from_rect.apply(pr);
            let px = sample_bilinear_color(src, pi.x - 0.5, pi.y - 0.5);
            out.put_pixel(x, y, px);
        }
    }

    out
}
