use serde::{Deserialize, Serialize};

/// Vertical extent of one rod in canonical coordinates, rows `y0..y1`.
///
/// Band extraction deliberately collapses each detected run to a thin
/// two-row slit around its midpoint, so `y1 - y0` is normally 2. The slit
/// absorbs jitter of partially detected line segments while still giving a
/// stable pair of scan rows to sample from.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RodBand {
    pub y0: usize,
    pub y1: usize,
}

impl RodBand {
    pub fn new(y0: usize, y1: usize) -> Self {
        Self { y0, y1 }
    }

    pub fn height(&self) -> usize {
        self.y1 - self.y0
    }
}
