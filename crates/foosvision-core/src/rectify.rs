use nalgebra::Point2;
use serde::{Deserialize, Serialize};

use crate::{homography_from_4pt, warp_perspective_color, ColorImage, ColorImageView, MarkerSet};

/// Fixed dimensions of the canonical top-down view of the playing surface.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CanonicalSize {
    pub width: usize,
    pub height: usize,
}

impl CanonicalSize {
    /// Canonical rectangle corners in the fixed correspondence order
    /// bottom-right, bottom-left, top-left, top-right.
    ///
    /// Markers iterated in ascending id order pair positionally with these,
    /// so the physical corner carrying the lowest id must be the one that
    /// should land bottom-right in the rectified view.
    pub fn corners(&self) -> [Point2<f32>; 4] {
        let w = self.width as f32;
        let h = self.height as f32;
        [
            Point2::new(w, h),
            Point2::new(0.0, h),
            Point2::new(0.0, 0.0),
            Point2::new(w, 0.0),
        ]
    }
}

#[derive(thiserror::Error, Debug, PartialEq, Eq)]
pub enum RectifyError {
    #[error("marker set has {count} markers, rectification needs exactly 4")]
    IncompleteMarkerSet { count: usize },
    #[error("marker corners are degenerate, no homography exists")]
    DegenerateCorners,
}

/// Rectify a frame into the canonical top-down view.
///
/// Estimates the canonical-to-image homography from the marker set's four
/// representative corners, then inverse-maps every canonical pixel into the
/// source frame. Pure function of its inputs; marker-loss fallback is the
/// caller's concern.
pub fn rectify_frame(
    frame: &ColorImageView<'_>,
    markers: &MarkerSet,
    canonical: CanonicalSize,
) -> Result<ColorImage, RectifyError> {
    let img_pts = markers
        .corner_points()
        .ok_or(RectifyError::IncompleteMarkerSet {
            count: markers.len(),
        })?;

    let h_img_from_rect = homography_from_4pt(&canonical.corners(), &img_pts)
        .ok_or(RectifyError::DegenerateCorners)?;

    Ok(warp_perspective_color(
        frame,
        h_img_from_rect,
        canonical.width,
        canonical.height,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Marker;

    fn marker_at(id: u32, p: Point2<f32>) -> Marker {
        Marker {
            id,
            corners: [p, p, p, p],
        }
    }

    /// Markers placed exactly on the canonical corners make the transform the
    /// identity, so rectifying a canonical-size image must reproduce it.
    #[test]
    fn identity_correspondence_reproduces_canonical_image() {
        let canonical = CanonicalSize {
            width: 20,
            height: 12,
        };
        let corners = canonical.corners();
        let markers = MarkerSet::from_detections(
            corners
                .iter()
                .enumerate()
                .map(|(i, &p)| marker_at(i as u32, p)),
        );

        let mut img = ColorImage::new(20, 12);
        for y in 0..12 {
            for x in 0..20 {
                img.put_pixel(x, y, [(x * 12) as u8, (y * 20) as u8, 3]);
            }
        }

        let out = rectify_frame(&img.view(), &markers, canonical).expect("rectifiable");
        assert_eq!(out, img);
    }

    #[test]
    fn incomplete_set_is_rejected_with_count() {
        let canonical = CanonicalSize {
            width: 10,
            height: 10,
        };
        let markers = MarkerSet::from_detections(vec![
            marker_at(0, Point2::new(0.0, 0.0)),
            marker_at(1, Point2::new(5.0, 0.0)),
            marker_at(2, Point2::new(5.0, 5.0)),
        ]);
        let img = ColorImage::new(10, 10);

        let err = rectify_frame(&img.view(), &markers, canonical).unwrap_err();
        assert_eq!(err, RectifyError::IncompleteMarkerSet { count: 3 });
    }

    #[test]
    fn collinear_markers_are_degenerate() {
        let canonical = CanonicalSize {
            width: 10,
            height: 10,
        };
        let markers = MarkerSet::from_detections(
            (0..4).map(|i| marker_at(i, Point2::new(i as f32, 0.0))),
        );
        let img = ColorImage::new(10, 10);

        let err = rectify_frame(&img.view(), &markers, canonical).unwrap_err();
        assert_eq!(err, RectifyError::DegenerateCorners);
    }
}
