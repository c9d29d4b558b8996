use std::collections::BTreeMap;

use foosvision_bands::BandParams;
use foosvision_core::CanonicalSize;
use serde::{Deserialize, Serialize};

/// Color target and peak-detection tuning for one rod.
///
/// `target_color` is the color detection diverges *from* (background or team
/// color), expressed in whatever color space the frames use. These values
/// must be calibrated per color scheme and lighting situation; the defaults
/// are the reference deployment's HSV green.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct RodProfile {
    pub target_color: [u8; 3],
    #[serde(default = "default_sigma")]
    pub sigma: f32,
    #[serde(default = "default_threshold")]
    pub threshold: f32,
}

fn default_sigma() -> f32 {
    5.0
}

fn default_threshold() -> f32 {
    0.7
}

impl Default for RodProfile {
    fn default() -> Self {
        Self {
            target_color: [110, 68, 44],
            sigma: default_sigma(),
            threshold: default_threshold(),
        }
    }
}

/// Per-rod profile lookup: a default profile plus sparse overrides keyed by
/// rod index (bands indexed top to bottom, in extraction order).
///
/// Which indices belong to which team depends on the physical rod layout;
/// a standard table alternates teams, e.g. rods 2, 4, 6 and 7 for the side
/// whose pieces need the second color. Build such a table with
/// [`RodProfileTable::two_team`].
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct RodProfileTable {
    pub default: RodProfile,
    #[serde(default)]
    pub overrides: BTreeMap<usize, RodProfile>,
}

impl RodProfileTable {
    /// Table giving `second` to the listed rod indices and `first` to all
    /// others.
    pub fn two_team(first: RodProfile, second: RodProfile, second_rods: &[usize]) -> Self {
        Self {
            default: first,
            overrides: second_rods.iter().map(|&i| (i, second)).collect(),
        }
    }

    pub fn profile_for(&self, rod_index: usize) -> &RodProfile {
        self.overrides.get(&rod_index).unwrap_or(&self.default)
    }
}

/// Static configuration of a tracking session.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TrackerConfig {
    /// Canonical top-down view dimensions. `canonical.width` must be
    /// divisible by `step_size`.
    pub canonical: CanonicalSize,
    /// Number of frames spent accumulating the calibration mask.
    #[serde(default = "default_calibration_frames")]
    pub calibration_frames: u32,
    #[serde(default)]
    pub band: BandParams,
    #[serde(default)]
    pub rods: RodProfileTable,
    /// Columns per contrast-averaging bucket.
    #[serde(default = "default_step_size")]
    pub step_size: usize,
}

fn default_calibration_frames() -> u32 {
    50
}

fn default_step_size() -> usize {
    3
}

impl Default for TrackerConfig {
    fn default() -> Self {
        Self {
            canonical: CanonicalSize {
                width: 960,
                height: 540,
            },
            calibration_frames: default_calibration_frames(),
            band: BandParams::default(),
            rods: RodProfileTable::default(),
            step_size: default_step_size(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn overrides_win_and_everything_else_falls_back() {
        let second = RodProfile {
            target_color: [255, 255, 255],
            sigma: 20.0,
            threshold: 0.5,
        };
        let table = RodProfileTable::two_team(RodProfile::default(), second, &[2, 4, 6, 7]);

        assert_eq!(table.profile_for(2), &second);
        assert_eq!(table.profile_for(7), &second);
        assert_eq!(table.profile_for(0), &RodProfile::default());
        assert_eq!(table.profile_for(5), &RodProfile::default());
        // indices beyond any physical rod still resolve
        assert_eq!(table.profile_for(99), &RodProfile::default());
    }

    #[test]
    fn config_round_trips_through_json() {
        let config = TrackerConfig {
            rods: RodProfileTable::two_team(
                RodProfile::default(),
                RodProfile {
                    target_color: [255, 255, 255],
                    sigma: 20.0,
                    threshold: 0.5,
                },
                &[2, 4, 6, 7],
            ),
            ..TrackerConfig::default()
        };

        let json = serde_json::to_string(&config).expect("serializable");
        let back: TrackerConfig = serde_json::from_str(&json).expect("deserializable");
        assert_eq!(back, config);
    }

    #[test]
    fn sparse_fields_take_documented_defaults() {
        let json = r#"{ "canonical": { "width": 300, "height": 200 } }"#;
        let config: TrackerConfig = serde_json::from_str(json).expect("deserializable");
        assert_eq!(config.calibration_frames, 50);
        assert_eq!(config.step_size, 3);
        assert_eq!(config.band, BandParams::default());
    }
}
