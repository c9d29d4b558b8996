use foosvision_bands::{
    accumulate, extract_bands, CalibrationMask, EdgeDetector, HoughLineDetector, LineDetector,
    SobelEdgeDetector,
};
use foosvision_core::{rectify_frame, ColorImageView, Marker, MarkerSet, RectifyError, RodBand};
use foosvision_peaks::{find_peaks, PeakError, PeakParams};
use log::{debug, info, warn};
use serde::Serialize;

use crate::TrackerConfig;

#[derive(thiserror::Error, Debug)]
pub enum PipelineError {
    #[error(transparent)]
    Rectify(#[from] RectifyError),
    #[error(transparent)]
    Peaks(#[from] PeakError),
}

/// Detected piece positions of one rod in one frame.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct RodObservation {
    pub index: usize,
    pub band: RodBand,
    /// Lateral piece positions in canonical coordinates.
    pub peaks: Vec<usize>,
}

/// Result of processing one frame.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum FrameOutcome {
    /// Fewer than four markers and no previous complete set: nothing to do.
    Skipped,
    /// Frame went into the calibration mask; `remaining` more to go.
    Calibrating { remaining: u32 },
    /// Per-rod piece positions.
    Tracked { rods: Vec<RodObservation> },
}

/// Frame-sequential tracking session.
///
/// Owns the two pieces of carried-forward state: the last complete marker
/// set (read and possibly replaced every frame) and the calibration mask
/// (monotonically updated during the calibration window only). Updates
/// happen in a fixed order per frame: markers, rectification, mask, peaks.
pub struct TrackerSession {
    config: TrackerConfig,
    edges: Box<dyn EdgeDetector>,
    lines: Box<dyn LineDetector>,
    last_markers: Option<MarkerSet>,
    mask: Option<CalibrationMask>,
    calibration_left: u32,
    bands: Vec<RodBand>,
}

impl TrackerSession {
    /// Session with the built-in Sobel and Hough capabilities.
    pub fn new(config: TrackerConfig) -> Self {
        Self::with_detectors(
            config,
            Box::new(SobelEdgeDetector::default()),
            Box::new(HoughLineDetector::default()),
        )
    }

    /// Session with caller-provided edge/line capabilities.
    pub fn with_detectors(
        config: TrackerConfig,
        edges: Box<dyn EdgeDetector>,
        lines: Box<dyn LineDetector>,
    ) -> Self {
        let calibration_left = config.calibration_frames;
        Self {
            config,
            edges,
            lines,
            last_markers: None,
            mask: None,
            calibration_left,
            bands: Vec::new(),
        }
    }

    pub fn config(&self) -> &TrackerConfig {
        &self.config
    }

    /// `true` while frames still feed the calibration mask.
    pub fn is_calibrating(&self) -> bool {
        self.calibration_left > 0
    }

    /// Rod bands extracted at calibration end; empty before that.
    pub fn bands(&self) -> &[RodBand] {
        &self.bands
    }

    /// Process one frame with that frame's marker detections.
    ///
    /// A complete detection (exactly four marker ids) replaces the stored
    /// fallback set; an incomplete one falls back to the previous complete
    /// set, and if none exists yet the frame is skipped entirely: no
    /// rectification, no mask update, no output.
    pub fn process_frame(
        &mut self,
        frame: &ColorImageView<'_>,
        detections: &[Marker],
    ) -> Result<FrameOutcome, PipelineError> {
        let set = MarkerSet::from_detections(detections.iter().cloned());
        if set.is_complete() {
            self.last_markers = Some(set);
        } else {
            debug!(
                "{} markers detected, falling back to previous set",
                set.len()
            );
        }
        let Some(markers) = self.last_markers.as_ref() else {
            warn!("missing corners and no previous marker set, skipping frame");
            return Ok(FrameOutcome::Skipped);
        };

        let rectified = rectify_frame(frame, markers, self.config.canonical)?;
        let view = rectified.view();

        if self.calibration_left > 0 {
            let mask = self
                .mask
                .get_or_insert_with(|| CalibrationMask::new(view.width, view.height));
            accumulate(
                mask,
                &view,
                self.edges.as_ref(),
                self.lines.as_ref(),
                &self.config.band,
            );
            self.calibration_left -= 1;

            if self.calibration_left == 0 {
                self.bands = extract_bands(mask);
                info!("calibration finished: {} rod bands", self.bands.len());
            }
            return Ok(FrameOutcome::Calibrating {
                remaining: self.calibration_left,
            });
        }

        let mut rods = Vec::with_capacity(self.bands.len());
        for (index, &band) in self.bands.iter().enumerate() {
            let profile = self.config.rods.profile_for(index);
            let params = PeakParams {
                sigma: profile.sigma,
                threshold: profile.threshold,
                step_size: self.config.step_size,
            };
            let peaks = find_peaks(&view, profile.target_color, band, &params)?;
            rods.push(RodObservation { index, band, peaks });
        }

        Ok(FrameOutcome::Tracked { rods })
    }
}
