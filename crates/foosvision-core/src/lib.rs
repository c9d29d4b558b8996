//! Core types and utilities for overhead table tracking.
//!
//! This crate is intentionally small and purely geometric/numeric. It does
//! *not* depend on any concrete marker detector, image codec or video source.

mod band;
mod homography;
mod image;
mod logger;
mod marker;
mod rectify;
mod smooth;
mod warp;

pub use band::RodBand;
pub use homography::{homography_from_4pt, Homography};
pub use image::{
    sample_bilinear_color, to_luma, ColorImage, ColorImageView, GrayImage, GrayImageView,
};
pub use marker::{Marker, MarkerSet};
pub use rectify::{rectify_frame, CanonicalSize, RectifyError};
pub use smooth::gaussian_filter1d;
pub use warp::warp_perspective_color;

pub use logger::init_with_level;
