//! Frequency to amateur-radio band resolution.
//!
//! Cabrillo logs record frequencies inconsistently: sometimes in kHz
//! (the documented format), sometimes in MHz or raw Hz, and often with
//! stray characters. This module normalizes a raw frequency string to
//! Hz using a magnitude heuristic, then looks the value up in a fixed
//! table of band allocations.
//!
//! All failure paths return [`UNKNOWN_BAND`]; resolution never errors.

/// Sentinel returned when a frequency cannot be resolved to a band.
pub const UNKNOWN_BAND: &str = "UNKNOWN";

/// Amateur band allocations as inclusive Hz ranges.
///
/// Covers 2200M through 3CM. Ranges are non-overlapping, so lookup
/// order does not affect the result.
pub static BANDS: [(u64, u64, &str); 23] = [
    (135_700, 137_800, "2200M"),
    (472_000, 479_000, "630M"),
    (1_800_000, 2_000_000, "160M"),
    (3_500_000, 4_000_000, "80M"),
    (5_330_500, 5_406_500, "60M"),
    (7_000_000, 7_300_000, "40M"),
    (10_100_000, 10_150_000, "30M"),
    (14_000_000, 14_350_000, "20M"),
    (18_068_000, 18_168_000, "17M"),
    (21_000_000, 21_450_000, "15M"),
    (24_890_000, 24_990_000, "12M"),
    (28_000_000, 29_700_000, "10M"),
    (50_000_000, 54_000_000, "6M"),
    (70_000_000, 70_500_000, "4M"),
    (144_000_000, 148_000_000, "2M"),
    (222_000_000, 225_000_000, "1.25M"),
    (430_000_000, 440_000_000, "70CM"),
    (902_000_000, 928_000_000, "33CM"),
    (1_240_000_000, 1_300_000_000, "23CM"),
    (2_300_000_000, 2_450_000_000, "13CM"),
    (3_300_000_000, 3_500_000_000, "9CM"),
    (5_650_000_000, 5_925_000_000, "6CM"),
    (10_000_000_000, 10_500_000_000, "3CM"),
];

/// Normalize a raw frequency string to Hz.
///
/// Strips everything except digits and `.`, then infers the unit from
/// the magnitude of the remaining number: values below 1000 are taken
/// as MHz, values below 1,000,000 as kHz, anything larger as Hz. This
/// matches how Cabrillo logs omit units (`14250` means 14250 kHz while
/// `14.25` means 14.25 MHz).
///
/// Returns `None` if nothing numeric remains.
pub fn normalize_frequency(raw: &str) -> Option<u64> {
    let cleaned: String = raw
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == '.')
        .collect();

    if cleaned.is_empty() {
        return None;
    }

    let value: f64 = cleaned.parse().ok()?;

    let hz = if value < 1_000.0 {
        value * 1_000_000.0
    } else if value < 1_000_000.0 {
        value * 1_000.0
    } else {
        value
    };

    Some(hz as u64)
}

/// Look up the band for an exact frequency in Hz.
pub fn band_for_hz(hz: u64) -> &'static str {
    for &(min, max, band) in &BANDS {
        if (min..=max).contains(&hz) {
            return band;
        }
    }
    UNKNOWN_BAND
}

/// Resolve a raw frequency string to a band label.
///
/// # Example
///
/// ```
/// use cab2adif::band::frequency_to_band;
///
/// assert_eq!(frequency_to_band("14250"), "20M");
/// assert_eq!(frequency_to_band("14.25"), "20M");
/// assert_eq!(frequency_to_band("bogus"), "UNKNOWN");
/// ```
pub fn frequency_to_band(raw: &str) -> &'static str {
    match normalize_frequency(raw) {
        Some(hz) => {
            let band = band_for_hz(hz);
            if band == UNKNOWN_BAND {
                tracing::warn!("No band for frequency: {} Hz", hz);
            }
            band
        }
        None => {
            tracing::warn!("Invalid frequency: {}", raw);
            UNKNOWN_BAND
        }
    }
}

/// All supported band labels, sorted.
pub fn all_bands() -> Vec<&'static str> {
    let mut bands: Vec<&'static str> = BANDS.iter().map(|(_, _, b)| *b).collect();
    bands.sort_unstable();
    bands.dedup();
    bands
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_band_boundaries_inclusive() {
        for &(min, max, band) in &BANDS {
            assert_eq!(band_for_hz(min), band, "lower edge of {}", band);
            assert_eq!(band_for_hz(max), band, "upper edge of {}", band);
        }
    }

    #[test]
    fn test_just_outside_every_band() {
        for &(min, max, band) in &BANDS {
            assert_eq!(
                band_for_hz(min - 1),
                UNKNOWN_BAND,
                "1 Hz below {}",
                band
            );
            assert_eq!(
                band_for_hz(max + 1),
                UNKNOWN_BAND,
                "1 Hz above {}",
                band
            );
        }
    }

    #[test]
    fn test_unit_inference() {
        // Same dial frequency written three ways
        assert_eq!(frequency_to_band("14000"), "20M"); // kHz
        assert_eq!(frequency_to_band("14.0"), "20M"); // MHz
        assert_eq!(frequency_to_band("14000000"), "20M"); // Hz
    }

    #[test]
    fn test_strips_non_numeric_characters() {
        assert_eq!(frequency_to_band("7 025 kHz"), "40M");
        assert_eq!(frequency_to_band("~3525~"), "80M");
    }

    #[test]
    fn test_invalid_frequencies() {
        assert_eq!(frequency_to_band(""), UNKNOWN_BAND);
        assert_eq!(frequency_to_band("kHz"), UNKNOWN_BAND);
        assert_eq!(frequency_to_band("1.2.3.4"), UNKNOWN_BAND);
    }

    #[test]
    fn test_out_of_band_frequency() {
        assert_eq!(frequency_to_band("6999"), UNKNOWN_BAND);
        assert_eq!(frequency_to_band("27000"), UNKNOWN_BAND);
    }

    #[test]
    fn test_all_bands_sorted_and_distinct() {
        let bands = all_bands();
        assert_eq!(bands.len(), 23);
        assert!(bands.contains(&"20M"));
        assert!(bands.contains(&"3CM"));
    }

    proptest! {
        /// Unit inference is consistent: a kHz-scale string and the
        /// equivalent Hz value resolve to the same band.
        #[test]
        fn prop_khz_and_hz_agree(khz in 1_000u64..1_000_000) {
            let from_str = frequency_to_band(&khz.to_string());
            let from_hz = band_for_hz(khz * 1_000);
            prop_assert_eq!(from_str, from_hz);
        }

        /// Resolution never panics on arbitrary input.
        #[test]
        fn prop_never_panics(s in "\\PC*") {
            let _ = frequency_to_band(&s);
        }

        /// A resolved band's range actually contains the frequency.
        #[test]
        fn prop_resolved_band_contains_hz(hz in 0u64..11_000_000_000) {
            let band = band_for_hz(hz);
            if band != UNKNOWN_BAND {
                let (min, max, _) = BANDS
                    .iter()
                    .find(|(_, _, b)| *b == band)
                    .expect("band is in table");
                prop_assert!((*min..=*max).contains(&hz));
            }
        }
    }
}
