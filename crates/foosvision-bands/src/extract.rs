use foosvision_core::RodBand;

use crate::CalibrationMask;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum ScanState {
    Idle,
    InRun { start: usize },
}

/// Scan a row-activity sequence top to bottom and emit one band per maximal
/// run of active rows.
///
/// Each run of rows `start..end` collapses to the slit
/// `(mid - 1, mid + 1)` with `mid = start + (end - start) / 2`. A run still
/// open at the last row is closed there, so a rod touching the bottom edge
/// is not dropped. A run whose midpoint is row 0 clamps to `(0, 2)`.
pub fn bands_from_rows(rows: &[bool]) -> Vec<RodBand> {
    let mut bands = Vec::new();
    let mut state = ScanState::Idle;

    for (i, &active) in rows.iter().enumerate() {
        state = match (state, active) {
            (ScanState::Idle, true) => ScanState::InRun { start: i },
            (ScanState::InRun { start }, false) => {
                bands.push(run_to_band(start, i));
                ScanState::Idle
            }
            (s, _) => s,
        };
    }
    if let ScanState::InRun { start } = state {
        bands.push(run_to_band(start, rows.len()));
    }

    bands
}

fn run_to_band(start: usize, end: usize) -> RodBand {
    let mid = start + (end - start) / 2;
    if mid == 0 {
        RodBand::new(0, 2)
    } else {
        RodBand::new(mid - 1, mid + 1)
    }
}

/// Collapse the calibration mask and extract rod bands, top to bottom.
/// Called once, at the end of the calibration window.
pub fn extract_bands(mask: &CalibrationMask) -> Vec<RodBand> {
    bands_from_rows(&mask.row_activity())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn each_maximal_run_yields_one_midpoint_slit() {
        let mut rows = vec![false; 30];
        for r in 4..9 {
            rows[r] = true; // run 4..9, mid 6
        }
        rows[15] = true; // run 15..16, mid 15
        for r in 20..24 {
            rows[r] = true; // run 20..24, mid 22
        }

        let bands = bands_from_rows(&rows);
        assert_eq!(
            bands,
            vec![
                RodBand::new(5, 7),
                RodBand::new(14, 16),
                RodBand::new(21, 23),
            ]
        );
        assert!(bands.iter().all(|b| b.height() == 2));
    }

    #[test]
    fn run_touching_the_last_row_is_closed() {
        let mut rows = vec![false; 10];
        rows[8] = true;
        rows[9] = true;

        let bands = bands_from_rows(&rows);
        assert_eq!(bands, vec![RodBand::new(8, 10)]);
    }

    #[test]
    fn run_at_row_zero_clamps_to_a_valid_band() {
        let mut rows = vec![false; 10];
        rows[0] = true;

        let bands = bands_from_rows(&rows);
        assert_eq!(bands, vec![RodBand::new(0, 2)]);
    }

    #[test]
    fn extraction_is_deterministic() {
        let rows: Vec<bool> = (0..64).map(|i| (i / 5) % 2 == 1).collect();
        let a = bands_from_rows(&rows);
        let b = bands_from_rows(&rows);
        assert_eq!(a, b);
        assert!(a.windows(2).all(|w| w[0].y1 <= w[1].y0));
    }

    #[test]
    fn empty_and_all_inactive_rows_yield_no_bands() {
        assert!(bands_from_rows(&[]).is_empty());
        assert!(bands_from_rows(&[false; 16]).is_empty());
    }
}
