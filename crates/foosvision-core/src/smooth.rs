//! 1-D Gaussian smoothing for lateral contrast profiles.

/// Reflect an index into `0..n` with edge-repeat reflection
/// (`d c b a | a b c d | d c b a`).
#[inline]
fn reflect(idx: isize, n: isize) -> usize {
    let period = 2 * n;
    let mut i = idx.rem_euclid(period);
    if i >= n {
        i = period - 1 - i;
    }
    i as usize
}

fn gaussian_taps(sigma: f32, radius: usize) -> Vec<f32> {
    let mut taps = Vec::with_capacity(2 * radius + 1);
    let inv = 1.0 / (sigma * sigma);
    for j in -(radius as isize)..=(radius as isize) {
        taps.push((-0.5 * (j * j) as f32 * inv).exp());
    }
    let sum: f32 = taps.iter().sum();
    for t in &mut taps {
        *t /= sum;
    }
    taps
}

/// Smooth `data` with a normalized Gaussian kernel of the given `sigma`.
///
/// The kernel is truncated at radius `4*sigma + 0.5` and the signal is
/// extended by reflection at both ends. `sigma <= 0` returns the input
/// unchanged.
pub fn gaussian_filter1d(data: &[f32], sigma: f32) -> Vec<f32> {
    if sigma <= 0.0 || data.is_empty() {
        return data.to_vec();
    }

    let radius = (4.0 * sigma + 0.5) as usize;
    let taps = gaussian_taps(sigma, radius);
    let n = data.len() as isize;

    let mut out = Vec::with_capacity(data.len());
    for i in 0..n {
        let mut acc = 0.0_f32;
        for (k, tap) in taps.iter().enumerate() {
            let j = i + k as isize - radius as isize;
            acc += tap * data[reflect(j, n)];
        }
        out.push(acc);
    }
    out
}
