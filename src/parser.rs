//! Parser for Cabrillo contest log files.
//!
//! Cabrillo is a loosely-structured, line-oriented format: a header
//! section of `KEY: value` lines followed by one `QSO:` line per
//! contact. Real-world logs deviate from the published format in every
//! imaginable way, so this parser is tolerant by design: a malformed
//! line is logged and skipped, never fatal. Only a file that yields no
//! text at all fails the whole parse.
//!
//! # QSO line format
//!
//! ```text
//! QSO: freq mode date time my-call rst-s exch-s dx-call rst-r exch-r [tx-id]
//! ```
//!
//! Example:
//! ```text
//! QSO: 14250 CW 2025-01-15 0130 W1AW 599 001 G4ABC 599 002
//! ```

use chrono::NaiveDate;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::qso::{ContestMetadata, QsoRecord};
use crate::stats::LogStatistics;

/// Errors that can occur while reading a Cabrillo file.
///
/// Per-line problems are not errors; they degrade gracefully. These
/// variants cover only total failure to obtain input text.
#[derive(Debug, Error)]
pub enum ParseError {
    #[error("File not found: {0}")]
    FileNotFound(PathBuf),

    #[error("Failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Could not read file with any supported encoding")]
    UnreadableFile,
}

/// Result type for parsing operations.
pub type ParseResult<T> = Result<T, ParseError>;

/// Date formats accepted on QSO lines. The canonical Cabrillo form is
/// `YYYY-MM-DD`, but logging software emits all of these.
const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%Y%m%d", "%m/%d/%Y", "%d.%m.%Y"];

/// Parses Cabrillo contest log files.
///
/// Holds the accumulated QSO list and header metadata from the most
/// recent parse. Each call to [`parse_file`](Self::parse_file) or
/// [`parse_str`](Self::parse_str) starts fresh.
#[derive(Debug, Default)]
pub struct CabrilloParser {
    qsos: Vec<QsoRecord>,
    metadata: ContestMetadata,
}

impl CabrilloParser {
    /// Create a new parser with empty state.
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a Cabrillo file from disk.
    ///
    /// Tries UTF-8 first, then falls back to a Latin-1/CP1252 style
    /// single-byte decode so that legacy logging software output still
    /// reads. Returns the kept QSO records.
    pub fn parse_file(&mut self, path: &Path) -> ParseResult<&[QsoRecord]> {
        if !path.exists() {
            return Err(ParseError::FileNotFound(path.to_path_buf()));
        }

        info!("Parsing Cabrillo file: {}", path.display());

        let bytes = std::fs::read(path).map_err(|source| ParseError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        self.parse_bytes(&bytes)
    }

    /// Parse Cabrillo content from raw bytes, attempting each supported
    /// encoding in turn.
    pub fn parse_bytes(&mut self, bytes: &[u8]) -> ParseResult<&[QsoRecord]> {
        let content = decode_text(bytes);
        if content.is_empty() {
            return Err(ParseError::UnreadableFile);
        }
        self.parse_str(&content)
    }

    /// Parse Cabrillo content from already-decoded text.
    pub fn parse_str(&mut self, content: &str) -> ParseResult<&[QsoRecord]> {
        self.qsos.clear();
        self.metadata = ContestMetadata::default();

        for (line_num, raw) in content.split('\n').enumerate() {
            let line = raw.trim();

            if line.is_empty() || line.starts_with('#') {
                continue;
            }

            let is_qso = line
                .get(..4)
                .is_some_and(|prefix| prefix.eq_ignore_ascii_case("QSO:"));

            if is_qso {
                if let Some(qso) = self.parse_qso_line(line) {
                    debug!("Parsed QSO {}: {}", self.qsos.len() + 1, qso.dx_call);
                    self.qsos.push(qso);
                } else {
                    debug!("Dropped QSO line {}: {}", line_num + 1, line);
                }
            } else {
                self.parse_header_line(line);
            }
        }

        info!("Parsed {} QSOs", self.qsos.len());

        if self.qsos.is_empty() {
            warn!("No QSOs found in input");
        }

        Ok(&self.qsos)
    }

    /// Parse one `QSO:` line into a record, or `None` to drop it.
    fn parse_qso_line(&self, line: &str) -> Option<QsoRecord> {
        let data = line[4..].trim();
        let parts: Vec<&str> = data.split_whitespace().collect();

        if parts.len() < 10 {
            warn!(
                "QSO line has only {} fields, expected at least 10: {}",
                parts.len(),
                line
            );
            if parts.len() < 6 {
                return None;
            }
        }

        let field = |i: usize| parts.get(i).copied().unwrap_or("").to_string();

        let mut qso = QsoRecord {
            frequency: field(0),
            mode: field(1),
            date: field(2),
            time: field(3),
            my_call: field(4),
            my_rst_sent: field(5),
            my_exchange_sent: field(6),
            dx_call: field(7),
            dx_rst_rcvd: field(8),
            dx_exchange_rcvd: field(9),
            transmitter_id: field(10),
            raw_line: line.to_string(),
        };

        qso.dx_call = qso.dx_call.trim().to_uppercase();
        qso.my_call = qso.my_call.trim().to_uppercase();

        if qso.dx_call.is_empty() {
            warn!("No DX call found in QSO: {}", line);
            return None;
        }
        if qso.my_call.is_empty() {
            warn!("No station call found in QSO: {}", line);
            return None;
        }

        if !qso.frequency.is_empty() && qso.frequency.parse::<f64>().is_err() {
            warn!("Invalid frequency: {}", qso.frequency);
            qso.frequency.clear();
        }

        if !qso.date.is_empty() && !is_valid_date(&qso.date) {
            warn!("Invalid date format: {}", qso.date);
            qso.date.clear();
        }

        if !qso.time.is_empty() && !is_valid_time(&qso.time) {
            warn!("Invalid time format: {}", qso.time);
            qso.time.clear();
        }

        Some(qso)
    }

    /// Parse one header line, updating the metadata.
    ///
    /// Lines without a `:` and unrecognized keys are ignored. `ADDRESS`
    /// accumulates since it legitimately spans multiple lines.
    fn parse_header_line(&mut self, line: &str) {
        let Some((key, value)) = line.split_once(':') else {
            return;
        };

        let key = key.trim().to_uppercase();
        let value = value.trim().to_string();

        let meta = &mut self.metadata;
        match key.as_str() {
            "CONTEST" => meta.contest = Some(value),
            "CALLSIGN" => meta.callsign = Some(value),
            "CATEGORY-OPERATOR" => meta.category_operator = Some(value),
            "CATEGORY-TRANSMITTER" => meta.category_transmitter = Some(value),
            "CATEGORY-POWER" => meta.category_power = Some(value),
            "CATEGORY-BAND" => meta.category_band = Some(value),
            "CATEGORY-MODE" => meta.category_mode = Some(value),
            "CLAIMED-SCORE" => meta.claimed_score = Some(value),
            "CLUB" => meta.club = Some(value),
            "LOCATION" => meta.location = Some(value),
            "NAME" => meta.name = Some(value),
            "EMAIL" => meta.email = Some(value),
            "OPERATORS" => meta.operators = Some(value),
            "CREATED-BY" => meta.created_by = Some(value),
            "ADDRESS" => meta.address.push(value),
            _ => {}
        }
    }

    /// The QSO records kept by the most recent parse.
    pub fn qsos(&self) -> &[QsoRecord] {
        &self.qsos
    }

    /// The contest metadata from the most recent parse.
    pub fn metadata(&self) -> &ContestMetadata {
        &self.metadata
    }

    /// Number of kept QSO records.
    pub fn qso_count(&self) -> usize {
        self.qsos.len()
    }

    /// Records passing a stricter validity check: both callsigns present
    /// and at least 3 characters long.
    pub fn valid_qsos(&self) -> Vec<&QsoRecord> {
        let valid: Vec<&QsoRecord> = self
            .qsos
            .iter()
            .filter(|q| q.my_call.len() >= 3 && q.dx_call.len() >= 3)
            .collect();

        let invalid = self.qsos.len() - valid.len();
        if invalid > 0 {
            warn!("Found {} invalid QSOs", invalid);
        }

        valid
    }

    /// Summary statistics over the parsed log.
    ///
    /// Band detection here is a coarse HF/VHF kHz range check over the
    /// raw frequency text, independent of the full band table in
    /// [`crate::band`].
    pub fn statistics(&self) -> LogStatistics {
        let mut modes = std::collections::BTreeSet::new();
        let mut bands = std::collections::BTreeSet::new();

        for qso in &self.qsos {
            if !qso.mode.is_empty() {
                modes.insert(qso.mode.to_uppercase());
            }

            if let Ok(freq) = qso.frequency.parse::<f64>() {
                let band = match freq {
                    f if (1800.0..=2000.0).contains(&f) => Some("160M"),
                    f if (3500.0..=4000.0).contains(&f) => Some("80M"),
                    f if (7000.0..=7300.0).contains(&f) => Some("40M"),
                    f if (14000.0..=14350.0).contains(&f) => Some("20M"),
                    f if (21000.0..=21450.0).contains(&f) => Some("15M"),
                    f if (28000.0..=29700.0).contains(&f) => Some("10M"),
                    f if (50000.0..=54000.0).contains(&f) => Some("6M"),
                    f if (144000.0..=148000.0).contains(&f) => Some("2M"),
                    _ => None,
                };
                if let Some(band) = band {
                    bands.insert(band.to_string());
                }
            }
        }

        LogStatistics {
            total_qsos: self.qsos.len(),
            valid_qsos: self.valid_qsos().len(),
            contest_name: self
                .metadata
                .contest
                .clone()
                .unwrap_or_else(|| "Unknown".to_string()),
            station_call: self
                .metadata
                .callsign
                .clone()
                .unwrap_or_else(|| "Unknown".to_string()),
            modes: modes.into_iter().collect(),
            bands: bands.into_iter().collect(),
        }
    }
}

/// Decode raw file bytes to text.
///
/// Strict UTF-8 wins when it applies. Otherwise every byte is mapped
/// through Latin-1, which cannot fail and covers the CP1252-era logs
/// still in circulation; the occasional wrong glyph beats refusing the
/// file.
fn decode_text(bytes: &[u8]) -> String {
    match std::str::from_utf8(bytes) {
        Ok(s) => s.to_string(),
        Err(_) => {
            debug!("Input is not valid UTF-8, falling back to Latin-1");
            bytes.iter().map(|&b| b as char).collect()
        }
    }
}

/// Check a QSO date against the accepted input formats.
fn is_valid_date(date: &str) -> bool {
    DATE_FORMATS
        .iter()
        .any(|fmt| NaiveDate::parse_from_str(date, fmt).is_ok())
}

/// Check a QSO time: HHMM or HH:MM with valid hour and minute.
fn is_valid_time(time: &str) -> bool {
    let cleaned = time.replace(':', "");
    if cleaned.len() != 4 || !cleaned.chars().all(|c| c.is_ascii_digit()) {
        return false;
    }

    let hour: u32 = cleaned[..2].parse().unwrap_or(99);
    let minute: u32 = cleaned[2..].parse().unwrap_or(99);
    hour <= 23 && minute <= 59
}
