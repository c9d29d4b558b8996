use foosvision_core::GrayImageView;
use nalgebra::Point2;
use serde::{Deserialize, Serialize};

/// Straight line segment in image coordinates.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct LineSegment {
    pub p0: Point2<f32>,
    pub p1: Point2<f32>,
}

impl LineSegment {
    pub fn length(&self) -> f32 {
        (self.p1 - self.p0).norm()
    }
}

/// Line-detection capability: extract straight segments from a binary edge
/// map.
pub trait LineDetector {
    fn detect_lines(&self, edges: &GrayImageView<'_>) -> Vec<LineSegment>;
}

const THETA_BINS: usize = 180;

/// Hough-transform segment detector.
///
/// Votes every edge pixel into a (rho, theta) accumulator with 1-degree
/// theta bins, picks local vote maxima above `vote_threshold`, then walks
/// each winning line through the edge map to measure the longest supported
/// pixel run, tolerating gaps up to `max_gap`.
///
/// Defaults mirror the reference deployment's probabilistic-Hough settings
/// (rho 2, threshold 300, min length 220, max gap 50).
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct HoughLineDetector {
    #[serde(default = "default_rho_resolution")]
    pub rho_resolution: f32,
    #[serde(default = "default_vote_threshold")]
    pub vote_threshold: u32,
    #[serde(default = "default_min_length")]
    pub min_length: f32,
    #[serde(default = "default_max_gap")]
    pub max_gap: f32,
    #[serde(default = "default_max_lines")]
    pub max_lines: usize,
}

fn default_rho_resolution() -> f32 {
    2.0
}

fn default_vote_threshold() -> u32 {
    300
}

fn default_min_length() -> f32 {
    220.0
}

fn default_max_gap() -> f32 {
    50.0
}

fn default_max_lines() -> usize {
    32
}

impl Default for HoughLineDetector {
    fn default() -> Self {
        Self {
            rho_resolution: default_rho_resolution(),
            vote_threshold: default_vote_threshold(),
            min_length: default_min_length(),
            max_gap: default_max_gap(),
            max_lines: default_max_lines(),
        }
    }
}

struct Accumulator {
    data: Vec<u32>,
    rho_bins: usize,
    max_rho: f32,
    resolution: f32,
    sin_table: [f32; THETA_BINS],
    cos_table: [f32; THETA_BINS],
}

impl Accumulator {
    fn new(width: usize, height: usize, resolution: f32) -> Self {
        let max_rho = ((width * width + height * height) as f64).sqrt() as f32;
        let rho_bins = (2.0 * max_rho / resolution).ceil() as usize + 1;

        let mut sin_table = [0.0f32; THETA_BINS];
        let mut cos_table = [0.0f32; THETA_BINS];
        for (deg, (s, c)) in sin_table.iter_mut().zip(cos_table.iter_mut()).enumerate() {
            let theta = (deg as f64).to_radians();
            *s = theta.sin() as f32;
            *c = theta.cos() as f32;
        }

        Self {
            data: vec![0u32; rho_bins * THETA_BINS],
            rho_bins,
            max_rho,
            resolution,
            sin_table,
            cos_table,
        }
    }

    #[inline]
    fn rho_to_index(&self, rho: f32) -> usize {
        let idx = ((rho + self.max_rho) / self.resolution).round() as isize;
        idx.clamp(0, self.rho_bins as isize - 1) as usize
    }

    #[inline]
    fn index_to_rho(&self, index: usize) -> f32 {
        index as f32 * self.resolution - self.max_rho
    }

    #[inline]
    fn votes(&self, rho_idx: usize, theta: usize) -> u32 {
        self.data[theta * self.rho_bins + rho_idx]
    }
}

impl HoughLineDetector {
    fn vote(&self, edges: &GrayImageView<'_>, acc: &mut Accumulator) {
        for y in 0..edges.height {
            for x in 0..edges.width {
                if edges.data[y * edges.width + x] == 0 {
                    continue;
                }
                for theta in 0..THETA_BINS {
                    let rho = x as f32 * acc.cos_table[theta] + y as f32 * acc.sin_table[theta];
                    let idx = theta * acc.rho_bins + acc.rho_to_index(rho);
                    acc.data[idx] = acc.data[idx].saturating_add(1);
                }
            }
        }
    }

    /// Local maxima of the accumulator above the vote threshold, strongest
    /// first, at most `max_lines`.
    fn peaks(&self, acc: &Accumulator) -> Vec<(usize, usize, u32)> {
        const NMS_RHO: isize = 2;
        const NMS_THETA: isize = 1;

        let mut peaks = Vec::new();
        for theta in 0..THETA_BINS {
            for rho_idx in 0..acc.rho_bins {
                let votes = acc.votes(rho_idx, theta);
                if votes < self.vote_threshold {
                    continue;
                }

                let mut is_max = true;
                'nms: for dt in -NMS_THETA..=NMS_THETA {
                    for dr in -NMS_RHO..=NMS_RHO {
                        if dt == 0 && dr == 0 {
                            continue;
                        }
                        let t = theta as isize + dt;
                        let r = rho_idx as isize + dr;
                        if t < 0 || t >= THETA_BINS as isize || r < 0 || r >= acc.rho_bins as isize
                        {
                            continue;
                        }
                        if acc.votes(r as usize, t as usize) > votes {
                            is_max = false;
                            break 'nms;
                        }
                    }
                }

                if is_max {
                    peaks.push((rho_idx, theta, votes));
                }
            }
        }

        peaks.sort_by(|a, b| b.2.cmp(&a.2));
        peaks.truncate(self.max_lines);
        peaks
    }

    /// Walk the line `(rho, theta)` across the edge map and return the
    /// longest run of supporting pixels with gaps below `max_gap`, if it is
    /// at least `min_length` long.
    fn trace_segment(
        &self,
        edges: &GrayImageView<'_>,
        acc: &Accumulator,
        rho_idx: usize,
        theta: usize,
    ) -> Option<LineSegment> {
        let rho = acc.index_to_rho(rho_idx);
        let (sin_t, cos_t) = (acc.sin_table[theta], acc.cos_table[theta]);
        // base point on the line, direction along it
        let base = Point2::new(rho * cos_t, rho * sin_t);
        let dir = Point2::new(-sin_t, cos_t);

        let diag = ((edges.width * edges.width + edges.height * edges.height) as f64).sqrt();
        let span = diag.ceil() as i32;

        let mut best: Option<(f32, f32)> = None;
        let mut run_start: Option<f32> = None;
        let mut last_hit = 0.0f32;

        let close_run = |start: f32, end: f32, best: &mut Option<(f32, f32)>| {
            let longer = match best {
                Some((s, e)) => end - start > *e - *s,
                None => true,
            };
            if longer {
                *best = Some((start, end));
            }
        };

        for step in -span..=span {
            let t = step as f32;
            let x = base.x + t * dir.x;
            let y = base.y + t * dir.y;
            let hit = edge_near(edges, x, y);

            if hit {
                if run_start.is_none() {
                    run_start = Some(t);
                }
                last_hit = t;
            } else if let Some(start) = run_start {
                if t - last_hit > self.max_gap {
                    close_run(start, last_hit, &mut best);
                    run_start = None;
                }
            }
        }
        if let Some(start) = run_start {
            close_run(start, last_hit, &mut best);
        }

        let (t0, t1) = best?;
        if t1 - t0 < self.min_length {
            return None;
        }
        Some(LineSegment {
            p0: Point2::new(base.x + t0 * dir.x, base.y + t0 * dir.y),
            p1: Point2::new(base.x + t1 * dir.x, base.y + t1 * dir.y),
        })
    }
}

/// Edge support within a 3x3 neighborhood of the rounded position. Absorbs
/// rho quantization error when walking a binned line over discrete pixels.
#[inline]
fn edge_near(edges: &GrayImageView<'_>, x: f32, y: f32) -> bool {
    let xi = x.round() as isize;
    let yi = y.round() as isize;
    for dy in -1..=1 {
        for dx in -1..=1 {
            let px = xi + dx;
            let py = yi + dy;
            if px < 0 || py < 0 || px >= edges.width as isize || py >= edges.height as isize {
                continue;
            }
            if edges.data[py as usize * edges.width + px as usize] != 0 {
                return true;
            }
        }
    }
    false
}

impl LineDetector for HoughLineDetector {
    fn detect_lines(&self, edges: &GrayImageView<'_>) -> Vec<LineSegment> {
        if edges.width == 0 || edges.height == 0 {
            return Vec::new();
        }

        let mut acc = Accumulator::new(edges.width, edges.height, self.rho_resolution);
        self.vote(edges, &mut acc);

        self.peaks(&acc)
            .into_iter()
            .filter_map(|(rho_idx, theta, _)| self.trace_segment(edges, &acc, rho_idx, theta))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use foosvision_core::GrayImage;

    fn horizontal_edge_row(w: usize, h: usize, row: usize, x0: usize, x1: usize) -> GrayImage {
        let mut img = GrayImage::new(w, h);
        for x in x0..x1 {
            img.data[row * w + x] = 255;
        }
        img
    }

    #[test]
    fn recovers_a_horizontal_segment() {
        let edges = horizontal_edge_row(64, 48, 20, 5, 59);

        let det = HoughLineDetector {
            rho_resolution: 1.0,
            vote_threshold: 40,
            min_length: 30.0,
            max_gap: 3.0,
            max_lines: 4,
        };
        let lines = det.detect_lines(&edges.view());

        assert!(!lines.is_empty(), "expected at least one detected line");
        let seg = lines
            .iter()
            .max_by(|a, b| a.length().total_cmp(&b.length()))
            .expect("non-empty");

        assert!((seg.p0.y - 20.0).abs() < 2.0, "p0.y = {}", seg.p0.y);
        assert!((seg.p1.y - 20.0).abs() < 2.0, "p1.y = {}", seg.p1.y);
        assert!(
            (seg.p1.x - seg.p0.x).abs() > 40.0,
            "segment too short: {:?}",
            seg
        );
    }

    #[test]
    fn gap_larger_than_tolerance_splits_the_run() {
        let mut edges = horizontal_edge_row(100, 20, 10, 0, 40);
        for x in 60..100 {
            edges.data[10 * 100 + x] = 255;
        }

        let det = HoughLineDetector {
            rho_resolution: 1.0,
            vote_threshold: 50,
            min_length: 40.0,
            max_gap: 3.0,
            max_lines: 4,
        };
        let lines = det.detect_lines(&edges.view());

        // each half is about 40 px, the 20 px gap exceeds the tolerance, so
        // no run ever spans the full width
        for seg in &lines {
            assert!(seg.length() < 60.0, "run crossed the gap: {:?}", seg);
        }
    }

    #[test]
    fn vote_threshold_suppresses_short_clutter() {
        let edges = horizontal_edge_row(64, 48, 11, 30, 36);
        let det = HoughLineDetector {
            rho_resolution: 1.0,
            vote_threshold: 40,
            min_length: 30.0,
            max_gap: 3.0,
            max_lines: 4,
        };
        assert!(det.detect_lines(&edges.view()).is_empty());
    }
}
