use std::collections::BTreeMap;

use nalgebra::Point2;
use serde::{Deserialize, Serialize};

/// One detected fiducial: a dictionary id plus the quad of its four corners
/// in detection order. Which detector produced it is irrelevant here; the
/// reference deployment uses 6x6 ArUco tags glued to the table corners.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Marker {
    pub id: u32,
    pub corners: [Point2<f32>; 4],
}

/// Markers of one frame keyed by id, iterated in ascending id order.
///
/// A set is *complete* when exactly four distinct ids were seen, one per
/// physical table corner. Only complete sets may drive rectification;
/// incomplete ones are discarded by the session in favor of the last
/// complete set.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct MarkerSet {
    markers: BTreeMap<u32, Marker>,
}

impl MarkerSet {
    pub fn from_detections<I>(detections: I) -> Self
    where
        I: IntoIterator<Item = Marker>,
    {
        let mut markers = BTreeMap::new();
        for m in detections {
            // duplicate ids keep the latest observation
            markers.insert(m.id, m);
        }
        Self { markers }
    }

    pub fn len(&self) -> usize {
        self.markers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.markers.is_empty()
    }

    /// Exactly four distinct ids.
    pub fn is_complete(&self) -> bool {
        self.markers.len() == 4
    }

    pub fn markers(&self) -> impl Iterator<Item = &Marker> {
        self.markers.values()
    }

    /// One representative point per marker: the first corner of each quad,
    /// in ascending id order. `None` unless the set is complete.
    pub fn corner_points(&self) -> Option<[Point2<f32>; 4]> {
        if !self.is_complete() {
            return None;
        }
        let mut pts = [Point2::new(0.0_f32, 0.0); 4];
        for (slot, m) in pts.iter_mut().zip(self.markers.values()) {
            *slot = m.corners[0];
        }
        Some(pts)
    }
}
