use foosvision_core::{ColorImageView, RodBand};

use crate::PeakError;

/// Bucketed lateral contrast profile of one rod band.
///
/// Rows `band.y0..band.y1` are partitioned into groups of `step_size`
/// adjacent columns. Each group's mean color is compared to `target` (mean
/// absolute per-channel difference), and the per-group scalars are averaged
/// over the band's rows, yielding one contrast value per lateral bucket.
pub fn contrast_profile(
    frame: &ColorImageView<'_>,
    target: [u8; 3],
    band: RodBand,
    step_size: usize,
) -> Result<Vec<f32>, PeakError> {
    let w = frame.width;
    if step_size == 0 || w % step_size != 0 {
        return Err(PeakError::StepSizeMismatch {
            width: w,
            step_size,
        });
    }
    if band.y0 >= band.y1 || band.y1 > frame.height {
        return Err(PeakError::BandOutOfRange {
            y0: band.y0,
            y1: band.y1,
            height: frame.height,
        });
    }

    let buckets = w / step_size;
    let rows = band.height() as f32;
    let mut profile = vec![0.0_f32; buckets];

    for y in band.y0..band.y1 {
        for (b, acc) in profile.iter_mut().enumerate() {
            let mut mean = [0.0_f32; 3];
            for dx in 0..step_size {
                let px = frame.pixel(b * step_size + dx, y);
                for c in 0..3 {
                    mean[c] += px[c] as f32;
                }
            }

            let mut dist = 0.0_f32;
            for c in 0..3 {
                dist += (mean[c] / step_size as f32 - target[c] as f32).abs();
            }
            *acc += dist / 3.0;
        }
    }

    for v in &mut profile {
        *v /= rows;
    }
    Ok(profile)
}

/// Expand a bucketed profile back to full width by repeating each value
/// `step_size` times. Intentionally blocky; smoothing happens afterwards.
pub fn upsample_profile(profile: &[f32], step_size: usize) -> Vec<f32> {
    let mut out = Vec::with_capacity(profile.len() * step_size);
    for &v in profile {
        for _ in 0..step_size {
            out.push(v);
        }
    }
    out
}
