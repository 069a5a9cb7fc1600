//! Built-in Bass Presets
//!
//! Each preset is one cascade topology; they differ only in stage counts,
//! cutoff and boost.

use crate::params::BassParams;

/// Named bass preset
pub type Preset = (&'static str, BassParams);

/// List of built-in presets (the first one is the default)
pub const PRESETS: &[Preset] = &[
    ("Clean", BassParams::CLEAN),
    (
        "Deep",
        BassParams {
            lowpass_cutoff_hz: 80.0,
            lowpass_order: 3,
            highpass_order: 2,
            boost_gain: 2.5, // ~+8 dB
            ..BassParams::CLEAN
        },
    ),
    (
        "Tight",
        BassParams {
            lowpass_cutoff_hz: 90.0,
            highpass_order: 2,
            ..BassParams::CLEAN
        },
    ),
];

/// Look up a preset by name (case-insensitive)
pub fn preset(name: &str) -> Option<BassParams> {
    PRESETS
        .iter()
        .find(|(preset_name, _)| preset_name.eq_ignore_ascii_case(name))
        .map(|(_, params)| *params)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_preset_first() {
        assert_eq!(PRESETS[0].0, "Clean");
        assert_eq!(PRESETS[0].1, BassParams::default());
    }

    #[test]
    fn test_lookup_ignores_case() {
        let deep = preset("deep").unwrap();
        assert_eq!(deep.lowpass_order, 3);
        assert_eq!(deep.highpass_order, 2);
        assert_eq!(deep.boost_gain, 2.5);
        assert!(preset("missing").is_none());
    }

    #[test]
    fn test_presets_need_no_clamping() {
        for (name, params) in PRESETS {
            let mut report = crate::ConfigReport::default();
            params.validated(44_100.0, &mut report);
            assert!(report.is_clean(), "{} preset was clamped", name);
        }
    }
}
