//! Conversion and parsing statistics.
//!
//! [`ConversionStats`] counts what the ADIF generator did with each
//! QSO; [`LogStatistics`] summarizes what the parser found in the input
//! file. Both are plain snapshots with `Display` impls for the CLI
//! report.

use serde::Serialize;

/// Counters produced by one ADIF generation pass.
///
/// Reset at the start of every [`generate`](crate::adif::AdifGenerator::generate)
/// call; returned to callers as a copy, never a live view.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ConversionStats {
    /// QSOs submitted to the generator, including ones later skipped.
    pub total_qsos: u64,

    /// QSOs that carried a mode (recognized or passed through).
    pub qsos_with_mode: u64,

    /// QSOs with an empty mode field.
    pub qsos_without_mode: u64,

    /// QSOs whose frequency parsed and produced a FREQ field.
    pub qsos_with_frequency: u64,

    /// QSOs with a missing or unparseable frequency.
    pub qsos_without_frequency: u64,
}

impl std::fmt::Display for ConversionStats {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Conversion statistics:")?;
        writeln!(f, "  Total QSOs: {}", self.total_qsos)?;
        writeln!(
            f,
            "  With mode: {} / without: {}",
            self.qsos_with_mode, self.qsos_without_mode
        )?;
        write!(
            f,
            "  With frequency: {} / without: {}",
            self.qsos_with_frequency, self.qsos_without_frequency
        )
    }
}

/// Summary of a parsed Cabrillo log.
#[derive(Debug, Clone, Serialize)]
pub struct LogStatistics {
    /// All QSO records kept by the parser.
    pub total_qsos: usize,

    /// Records passing the stricter validity filter (both callsigns
    /// present and at least 3 characters each).
    pub valid_qsos: usize,

    /// Contest name from the header, or "Unknown".
    pub contest_name: String,

    /// Station callsign from the header, or "Unknown".
    pub station_call: String,

    /// Distinct modes seen across QSO lines, uppercased and sorted.
    pub modes: Vec<String>,

    /// Distinct bands seen across QSO lines, sorted.
    pub bands: Vec<String>,
}

impl std::fmt::Display for LogStatistics {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Log statistics:")?;
        writeln!(f, "  Contest: {}", self.contest_name)?;
        writeln!(f, "  Station: {}", self.station_call)?;
        writeln!(
            f,
            "  QSOs: {} ({} valid)",
            self.total_qsos, self.valid_qsos
        )?;
        writeln!(f, "  Modes: {}", self.modes.join(", "))?;
        write!(f, "  Bands: {}", self.bands.join(", "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_conversion_stats_display() {
        let stats = ConversionStats {
            total_qsos: 10,
            qsos_with_mode: 9,
            qsos_without_mode: 1,
            qsos_with_frequency: 8,
            qsos_without_frequency: 2,
        };

        let report = stats.to_string();
        assert!(report.contains("Total QSOs: 10"));
        assert!(report.contains("With mode: 9 / without: 1"));
        assert!(report.contains("With frequency: 8 / without: 2"));
    }

    #[test]
    fn test_log_statistics_display() {
        let stats = LogStatistics {
            total_qsos: 3,
            valid_qsos: 2,
            contest_name: "CQ-WW-CW".to_string(),
            station_call: "W1AW".to_string(),
            modes: vec!["CW".to_string(), "PH".to_string()],
            bands: vec!["20M".to_string()],
        };

        let report = stats.to_string();
        assert!(report.contains("Contest: CQ-WW-CW"));
        assert!(report.contains("QSOs: 3 (2 valid)"));
        assert!(report.contains("Modes: CW, PH"));
    }
}
