//! Local-maxima extraction with relative threshold and minimum-distance
//! suppression.

/// Indices of local maxima of `y` that exceed the threshold, ascending.
///
/// `thres` is relative: the effective cutoff is
/// `min + thres * (max - min)`, so a value of `0.4` keeps maxima in the top
/// 60% of the profile's span regardless of its absolute magnitude. A peak is
/// a strict rise followed by a strict fall; plateaus are resolved by giving
/// their left half the left neighbor's slope and their right half the right
/// neighbor's slope, so a flat-topped bump still counts once. When two
/// maxima sit closer than `min_dist`, the higher one wins.
pub fn indexes(y: &[f32], thres: f32, min_dist: usize) -> Vec<usize> {
    let n = y.len();
    if n < 3 {
        return Vec::new();
    }

    let min = y.iter().copied().fold(f32::INFINITY, f32::min);
    let max = y.iter().copied().fold(f32::NEG_INFINITY, f32::max);
    let cutoff = thres * (max - min) + min;

    let mut dy: Vec<f32> = y.windows(2).map(|w| w[1] - w[0]).collect();
    resolve_plateaus(&mut dy);

    // rise at i-1, fall at i, value above cutoff
    let peaks: Vec<usize> = (1..n - 1)
        .filter(|&i| dy[i - 1] > 0.0 && dy[i] < 0.0 && y[i] > cutoff)
        .collect();

    if peaks.len() <= 1 || min_dist <= 1 {
        return peaks;
    }

    // greedy suppression, highest peak first
    let mut order = peaks.clone();
    order.sort_by(|&a, &b| y[b].total_cmp(&y[a]));

    let mut removed = vec![true; n];
    for &p in &peaks {
        removed[p] = false;
    }
    for &p in &order {
        if removed[p] {
            continue;
        }
        let lo = p.saturating_sub(min_dist);
        let hi = (p + min_dist + 1).min(n);
        for r in &mut removed[lo..hi] {
            *r = true;
        }
        removed[p] = false;
    }

    (0..n).filter(|&i| !removed[i]).collect()
}

/// Replace zero runs of the first difference so plateaus behave like single
/// points. Boundary plateaus take the inner neighbor's value; interior
/// plateaus split at their median, left half copying the left neighbor and
/// right half the right neighbor.
fn resolve_plateaus(dy: &mut [f32]) {
    let n = dy.len();
    let mut runs: Vec<(usize, usize)> = Vec::new();

    let mut i = 0;
    while i < n {
        if dy[i] == 0.0 {
            let start = i;
            while i < n && dy[i] == 0.0 {
                i += 1;
            }
            runs.push((start, i - 1));
        } else {
            i += 1;
        }
    }

    let mut runs = runs.as_slice();
    if let Some(&(start, end)) = runs.first() {
        if start == 0 {
            if end + 1 < n {
                let v = dy[end + 1];
                for d in &mut dy[start..=end] {
                    *d = v;
                }
            }
            runs = &runs[1..];
        }
    }
    if let Some(&(start, end)) = runs.last() {
        if end == n - 1 {
            let v = dy[start - 1];
            for d in &mut dy[start..=end] {
                *d = v;
            }
            runs = &runs[..runs.len() - 1];
        }
    }

    for &(start, end) in runs {
        let left = dy[start - 1];
        let right = dy[end + 1];
        for k in start..=end {
            // strictly left of the run's median index
            dy[k] = if 2 * k < start + end { left } else { right };
        }
    }
}
