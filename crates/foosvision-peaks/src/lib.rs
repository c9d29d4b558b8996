//! Per-frame piece localization within a rod band.
//!
//! A rod viewed from above differs from the background/team color mainly in
//! the lateral position of its pieces. Averaging colors vertically inside the
//! band cancels piece orientation noise while preserving the lateral signal;
//! bucketing adjacent columns trades lateral resolution for per-sample
//! robustness, and Gaussian smoothing restores positional precision before
//! local maxima are read off.

mod indexes;
mod profile;

pub use indexes::indexes;
pub use profile::{contrast_profile, upsample_profile};

use foosvision_core::{gaussian_filter1d, ColorImageView, RodBand};
use serde::{Deserialize, Serialize};

#[derive(thiserror::Error, Debug, PartialEq, Eq)]
pub enum PeakError {
    #[error("step size {step_size} does not divide frame width {width}")]
    StepSizeMismatch { width: usize, step_size: usize },
    #[error("rod band {y0}..{y1} does not fit a frame of height {height}")]
    BandOutOfRange {
        y0: usize,
        y1: usize,
        height: usize,
    },
}

/// Peak-detection settings for one rod.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct PeakParams {
    /// Gaussian sigma for smoothing the lateral contrast profile.
    #[serde(default = "default_sigma")]
    pub sigma: f32,
    /// Relative threshold: maxima must exceed
    /// `min + threshold * (max - min)` of the smoothed profile.
    #[serde(default = "default_threshold")]
    pub threshold: f32,
    /// Columns per averaging bucket. Must divide the frame width; this is a
    /// static configuration invariant, not a per-frame condition.
    #[serde(default = "default_step_size")]
    pub step_size: usize,
}

fn default_sigma() -> f32 {
    5.0
}

fn default_threshold() -> f32 {
    0.4
}

fn default_step_size() -> usize {
    3
}

impl Default for PeakParams {
    fn default() -> Self {
        Self {
            sigma: default_sigma(),
            threshold: default_threshold(),
            step_size: default_step_size(),
        }
    }
}

/// Detect piece positions in one rod band.
///
/// Returns the lateral indices of local maxima of the smoothed contrast
/// profile against `target`, separated by at least `width / 30` positions.
pub fn find_peaks(
    frame: &ColorImageView<'_>,
    target: [u8; 3],
    band: RodBand,
    params: &PeakParams,
) -> Result<Vec<usize>, PeakError> {
    let reduced = contrast_profile(frame, target, band, params.step_size)?;
    let full = upsample_profile(&reduced, params.step_size);
    let smoothed = gaussian_filter1d(&full, params.sigma);

    let min_dist = frame.width / 30;
    Ok(indexes(&smoothed, params.threshold, min_dist))
}

#[cfg(test)]
mod tests {
    use super::*;
    use foosvision_core::ColorImage;

    /// Regression case: two 5-wide target-colored blocks at columns 10..15
    /// and 20..25 inside the band leave the midpoint between their inner
    /// edges as the single contrast maximum.
    #[test]
    fn two_blocks_yield_one_peak_between_them() {
        let mut frame = ColorImage::new(100, 100);
        for y in 4..7 {
            for x in 10..15 {
                frame.put_pixel(x, y, [255, 0, 0]);
            }
            for x in 20..25 {
                frame.put_pixel(x, y, [255, 0, 0]);
            }
        }

        let params = PeakParams {
            sigma: 2.0,
            threshold: 0.01,
            step_size: 1,
        };
        let peaks = find_peaks(&frame.view(), [255, 0, 0], RodBand::new(4, 6), &params)
            .expect("valid parameters");
        assert_eq!(peaks, vec![17]);
    }

    #[test]
    fn single_piece_peaks_at_its_center() {
        let mut frame = ColorImage::new(90, 30);
        for y in 9..12 {
            for x in 40..49 {
                frame.put_pixel(x, y, [0, 200, 0]);
            }
        }

        let params = PeakParams {
            sigma: 2.0,
            threshold: 0.5,
            step_size: 1,
        };
        // target is the background color: the piece is the divergence
        let peaks = find_peaks(&frame.view(), [0, 0, 0], RodBand::new(9, 12), &params)
            .expect("valid parameters");
        assert_eq!(peaks, vec![44]);
    }

    #[test]
    fn indivisible_step_size_fails_with_no_output() {
        let frame = ColorImage::new(100, 20);
        let params = PeakParams {
            step_size: 7,
            ..PeakParams::default()
        };
        let err = find_peaks(&frame.view(), [0, 0, 0], RodBand::new(2, 4), &params).unwrap_err();
        assert_eq!(
            err,
            PeakError::StepSizeMismatch {
                width: 100,
                step_size: 7
            }
        );
    }

    #[test]
    fn bucketed_detection_still_finds_the_piece() {
        let mut frame = ColorImage::new(90, 10);
        for y in 2..5 {
            for x in 30..45 {
                frame.put_pixel(x, y, [220, 40, 40]);
            }
        }

        let params = PeakParams {
            sigma: 3.0,
            threshold: 0.5,
            step_size: 3,
        };
        let peaks = find_peaks(&frame.view(), [0, 0, 0], RodBand::new(2, 5), &params)
            .expect("valid parameters");
        assert_eq!(peaks.len(), 1);
        let center = peaks[0] as f32;
        assert!((center - 37.0).abs() <= 3.0, "peak at {center}");
    }
}
