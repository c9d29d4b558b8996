use crate::LineSegment;

/// Binary accumulator for the calibration window. Same dimensions as the
/// rectified frame, all-zero at the start of calibration, OR-updated every
/// frame and never reset while the window runs.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CalibrationMask {
    pub width: usize,
    pub height: usize,
    pub data: Vec<u8>,
}

impl CalibrationMask {
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            data: vec![0u8; width * height],
        }
    }

    /// Stamp a segment onto the mask with the given vertical stroke
    /// thickness. Already-set pixels stay set.
    ///
    /// The stroke extends `stroke` rows around the traced line, which is
    /// equivalent to a perpendicular brush for the near-horizontal segments
    /// this mask is fed with.
    pub fn stamp_segment(&mut self, seg: &LineSegment, stroke: usize) {
        let half = (stroke / 2) as isize;
        let dx = seg.p1.x - seg.p0.x;
        let dy = seg.p1.y - seg.p0.y;
        let steps = dx.abs().max(dy.abs()).ceil() as usize;

        for i in 0..=steps {
            let t = if steps == 0 { 0.0 } else { i as f32 / steps as f32 };
            let x = (seg.p0.x + t * dx).round() as isize;
            let y = (seg.p0.y + t * dy).round() as isize;
            if x < 0 || x >= self.width as isize {
                continue;
            }
            for row in (y - half)..(y - half + stroke.max(1) as isize) {
                if row < 0 || row >= self.height as isize {
                    continue;
                }
                self.data[row as usize * self.width + x as usize] = 255;
            }
        }
    }

    /// Row activity: `true` for every row with at least one set pixel. This
    /// is the column-wise maximum of the mask.
    pub fn row_activity(&self) -> Vec<bool> {
        self.data
            .chunks_exact(self.width.max(1))
            .map(|row| row.iter().any(|&v| v != 0))
            .collect()
    }
}
