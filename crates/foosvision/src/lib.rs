//! High-level facade crate for the `foosvision-*` workspace.
//!
//! The library tracks player-rod piece positions on a table-top game surface
//! from overhead video in three stages:
//!
//! 1. **Rectify** each frame to a canonical top-down view from four fiducial
//!    markers, falling back to the last complete marker set when detection
//!    drops below four.
//! 2. **Calibrate** for a fixed number of frames by accumulating detected
//!    near-horizontal line segments into a mask, then collapse the mask into
//!    one thin [`RodBand`] per rod.
//! 3. **Track** per frame by reading piece positions off a smoothed lateral
//!    color-contrast profile inside each band.
//!
//! Frame acquisition, marker *detection* and rendering stay outside: callers
//! feed [`TrackerSession::process_frame`] a frame buffer plus that frame's
//! `(id, corner-quad)` marker observations.
//!
//! ## Quickstart
//!
//! ```no_run
//! use foosvision::{Marker, TrackerConfig, TrackerSession};
//! use foosvision::core::ColorImageView;
//!
//! let mut session = TrackerSession::new(TrackerConfig::default());
//! # let (width, height, data, markers): (usize, usize, Vec<u8>, Vec<Marker>) = todo!();
//! let frame = ColorImageView { width, height, data: &data };
//! match session.process_frame(&frame, &markers)? {
//!     foosvision::FrameOutcome::Tracked { rods } => {
//!         for rod in rods {
//!             println!("rod {}: pieces at {:?}", rod.index, rod.peaks);
//!         }
//!     }
//!     _ => {}
//! }
//! # Ok::<(), foosvision::PipelineError>(())
//! ```
//!
//! ## API map
//! - [`core`](foosvision_core): image buffers, homography, markers, warping.
//! - [`bands`](foosvision_bands): calibration mask and rod-band extraction.
//! - [`peaks`](foosvision_peaks): contrast profiles and peak finding.
//! - [`TrackerSession`]: the per-frame orchestration of all three.

pub use foosvision_bands as bands;
pub use foosvision_core as core;
pub use foosvision_peaks as peaks;

pub use foosvision_bands::{BandParams, HoughLineDetector, LineSegment, SobelEdgeDetector};
pub use foosvision_core::{CanonicalSize, Marker, MarkerSet, RodBand};
pub use foosvision_peaks::PeakParams;

mod config;
mod pipeline;

pub use config::{RodProfile, RodProfileTable, TrackerConfig};
pub use pipeline::{FrameOutcome, PipelineError, RodObservation, TrackerSession};

#[cfg(feature = "image")]
pub mod interop;
