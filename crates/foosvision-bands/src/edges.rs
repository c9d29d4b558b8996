use foosvision_core::{ColorImageView, GrayImage};
use serde::{Deserialize, Serialize};

/// Edge-detection capability: produce a binary edge map (0 or 255) from a
/// rectified frame.
pub trait EdgeDetector {
    fn detect_edges(&self, frame: &ColorImageView<'_>) -> GrayImage;
}

const SOBEL_GX: [[i32; 3]; 3] = [[-1, 0, 1], [-2, 0, 2], [-1, 0, 1]];
const SOBEL_GY: [[i32; 3]; 3] = [[-1, -2, -1], [0, 0, 0], [1, 2, 1]];

/// Per-channel 3x3 Sobel with a threshold on the strongest channel
/// magnitude. Border pixels are never edges.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SobelEdgeDetector {
    #[serde(default = "default_magnitude_threshold")]
    pub magnitude_threshold: u32,
}

fn default_magnitude_threshold() -> u32 {
    200
}

impl Default for SobelEdgeDetector {
    fn default() -> Self {
        Self {
            magnitude_threshold: default_magnitude_threshold(),
        }
    }
}

impl EdgeDetector for SobelEdgeDetector {
    fn detect_edges(&self, frame: &ColorImageView<'_>) -> GrayImage {
        let w = frame.width;
        let h = frame.height;
        let mut out = GrayImage::new(w, h);
        if w < 3 || h < 3 {
            return out;
        }

        for y in 1..h - 1 {
            for x in 1..w - 1 {
                let mut gx = [0i32; 3];
                let mut gy = [0i32; 3];

                for ky in 0..3 {
                    for kx in 0..3 {
                        let px = frame.pixel(x + kx - 1, y + ky - 1);
                        let wx = SOBEL_GX[ky][kx];
                        let wy = SOBEL_GY[ky][kx];
                        for c in 0..3 {
                            gx[c] += px[c] as i32 * wx;
                            gy[c] += px[c] as i32 * wy;
                        }
                    }
                }

                let mag = (0..3)
                    .map(|c| ((gx[c] * gx[c] + gy[c] * gy[c]) as f64).sqrt() as u32)
                    .max()
                    .unwrap_or(0);

                if mag > self.magnitude_threshold {
                    out.data[y * w + x] = 255;
                }
            }
        }

        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use foosvision_core::ColorImage;

    #[test]
    fn vertical_step_edge_is_detected_at_the_boundary() {
        let mut img = ColorImage::new(10, 6);
        for y in 0..6 {
            for x in 5..10 {
                img.put_pixel(x, y, [255, 255, 255]);
            }
        }

        let det = SobelEdgeDetector::default();
        let edges = det.detect_edges(&img.view());

        // boundary columns fire, flat regions stay silent
        assert_eq!(edges.data[2 * 10 + 4], 255);
        assert_eq!(edges.data[2 * 10 + 5], 255);
        assert_eq!(edges.data[2 * 10 + 2], 0);
        assert_eq!(edges.data[2 * 10 + 8], 0);
    }

    #[test]
    fn border_pixels_are_never_edges() {
        let mut img = ColorImage::new(6, 6);
        for y in 0..6 {
            for x in 0..6 {
                img.put_pixel(x, y, if x % 2 == 0 { [0, 0, 0] } else { [255, 255, 255] });
            }
        }
        let edges = SobelEdgeDetector::default().detect_edges(&img.view());
        for x in 0..6 {
            assert_eq!(edges.data[x], 0);
            assert_eq!(edges.data[5 * 6 + x], 0);
        }
        for y in 0..6 {
            assert_eq!(edges.data[y * 6], 0);
            assert_eq!(edges.data[y * 6 + 5], 0);
        }
    }
}
