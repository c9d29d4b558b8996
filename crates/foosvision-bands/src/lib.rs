//! Rod-band extraction for the calibration phase.
//!
//! During a fixed-length calibration window every rectified frame is run
//! through an edge detector and a straight-line detector; near-horizontal
//! segments are OR-stamped onto a shared [`CalibrationMask`]. At the end of
//! the window the mask is collapsed row-wise and each contiguous run of
//! active rows becomes one [`RodBand`].
//!
//! The edge and line stages are capabilities behind traits so callers can
//! substitute their own primitives; [`SobelEdgeDetector`] and
//! [`HoughLineDetector`] are the built-in implementations.

mod edges;
mod extract;
mod hough;
mod mask;

pub use edges::{EdgeDetector, SobelEdgeDetector};
pub use extract::{bands_from_rows, extract_bands};
pub use hough::{HoughLineDetector, LineDetector, LineSegment};
pub use mask::CalibrationMask;

use foosvision_core::ColorImageView;
use serde::{Deserialize, Serialize};

/// Mask-accumulation settings.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct BandParams {
    /// Keep only segments whose endpoints differ vertically by less than
    /// this many pixels. Rods are horizontal in the rectified view; anything
    /// steeper is table edge or noise.
    #[serde(default = "default_max_skew")]
    pub max_skew: f32,
    /// Stroke thickness in rows when stamping a segment onto the mask.
    #[serde(default = "default_stroke")]
    pub stroke: usize,
}

fn default_max_skew() -> f32 {
    20.0
}

fn default_stroke() -> usize {
    10
}

impl Default for BandParams {
    fn default() -> Self {
        Self {
            max_skew: default_max_skew(),
            stroke: default_stroke(),
        }
    }
}

/// One calibration step: detect line segments in `frame` and stamp the
/// near-horizontal ones onto `mask`. Pixels once set stay set for the rest
/// of the window.
pub fn accumulate(
    mask: &mut CalibrationMask,
    frame: &ColorImageView<'_>,
    edges: &dyn EdgeDetector,
    lines: &dyn LineDetector,
    params: &BandParams,
) {
    let edge_map = edges.detect_edges(frame);
    let segments = lines.detect_lines(&edge_map.view());

    let mut kept = 0usize;
    for seg in &segments {
        if (seg.p1.y - seg.p0.y).abs() < params.max_skew {
            mask.stamp_segment(seg, params.stroke);
            kept += 1;
        }
    }
    log::debug!(
        "calibration step: {} segments, {} near-horizontal",
        segments.len(),
        kept
    );
}
