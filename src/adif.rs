//! ADIF 3.1.4 generation from parsed Cabrillo data.
//!
//! Maps contest header metadata and QSO records onto ADIF tagged
//! fields, keeping as much of the Cabrillo information as the ADIF
//! vocabulary allows. Fields with no standard ADIF home are emitted
//! under the `APP_C2A_` application namespace rather than dropped.
//!
//! Every tag is written as `<NAME:LENGTH>VALUE` where LENGTH is the
//! byte length of VALUE. Header fields go one per line; record fields
//! are space-joined on a single line ending in `<EOR>`.

use chrono::{NaiveDate, Utc};
use serde::Serialize;
use tracing::{info, warn};

use crate::band::{UNKNOWN_BAND, frequency_to_band};
use crate::qso::{ContestMetadata, QsoRecord};
use crate::stats::ConversionStats;

/// ADIF banner line written at the top of every export.
pub const ADIF_BANNER: &str = "ADIF Export from Cabrillo2ADIF Converter v0.9";

/// ADIF version advertised in the header.
pub const ADIF_VERSION: &str = "3.1.4";

/// PROGRAMID value advertised in the header.
pub const PROGRAM_ID: &str = "Cabrillo2ADIF_v0.9";

/// Cabrillo mode abbreviations mapped to ADIF mode names.
///
/// Phone variants collapse to SSB; everything else passes through.
/// Unlisted modes fall back to the uppercased input, so conversion
/// never fails on an exotic mode.
static MODE_MAPPINGS: [(&str, &str); 16] = [
    ("CW", "CW"),
    ("PH", "SSB"),
    ("SSB", "SSB"),
    ("USB", "SSB"),
    ("LSB", "SSB"),
    ("AM", "AM"),
    ("FM", "FM"),
    ("RTTY", "RTTY"),
    ("PSK31", "PSK31"),
    ("PSK63", "PSK63"),
    ("MFSK", "MFSK"),
    ("JT65", "JT65"),
    ("JT9", "JT9"),
    ("FT8", "FT8"),
    ("FT4", "FT4"),
    ("MSK144", "MSK144"),
];

/// Result of [`AdifGenerator::validate_adif`].
///
/// A coarse self-check on generated output, not a schema validator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AdifValidation {
    /// True when a version tag was found and at least one record exists.
    pub valid: bool,

    /// Whether an `<ADIF_VER:` tag was found.
    pub header_found: bool,

    /// Number of `<EOR>` record terminators.
    pub qso_count: usize,

    /// Total line count of the document.
    pub total_lines: usize,
}

/// Generates ADIF text from Cabrillo QSOs and contest metadata.
#[derive(Debug, Default)]
pub struct AdifGenerator {
    stats: ConversionStats,
}

impl AdifGenerator {
    /// Create a new generator.
    pub fn new() -> Self {
        Self::default()
    }

    /// Generate a complete ADIF document.
    ///
    /// Produces the header block (banner, version tags, mapped contest
    /// metadata, `<EOH>`) followed by one record line per QSO. Records
    /// that cannot be emitted are skipped with a warning; generation
    /// itself never fails.
    pub fn generate(&mut self, qsos: &[QsoRecord], metadata: &ContestMetadata) -> String {
        self.stats = ConversionStats {
            total_qsos: qsos.len() as u64,
            ..Default::default()
        };

        info!("Generating ADIF for {} QSOs", qsos.len());

        let mut out = self.generate_header(metadata);

        for qso in qsos {
            if let Some(record) = self.generate_record(qso) {
                out.push_str(&record);
                out.push('\n');
            }
        }

        info!("ADIF generation completed");
        out
    }

    /// Build the ADIF header block, terminated by `<EOH>`.
    fn generate_header(&self, meta: &ContestMetadata) -> String {
        let now = Utc::now();

        let mut header = String::new();
        header.push_str(ADIF_BANNER);
        header.push('\n');
        header.push_str(&format!(
            "Generated: {}\n",
            now.format("%Y-%m-%d %H:%M:%S UTC")
        ));
        header.push('\n');
        header.push_str(&format!("{}\n", tag("ADIF_VER", ADIF_VERSION)));
        header.push_str(&format!("{}\n", tag("PROGRAMID", PROGRAM_ID)));
        header.push_str(&format!(
            "{}\n",
            tag("CREATED_TIMESTAMP", &now.format("%Y%m%d %H%M%S").to_string())
        ));

        push_field(&mut header, "CONTEST_ID", &meta.contest);
        push_field(&mut header, "STATION_CALLSIGN", &meta.callsign);
        push_field(&mut header, "CATEGORY_OPERATOR", &meta.category_operator);
        push_field(&mut header, "CATEGORY_POWER", &meta.category_power);
        push_field(&mut header, "CATEGORY_TRANSMITTER", &meta.category_transmitter);
        push_field(&mut header, "CATEGORY_BAND", &meta.category_band);
        push_field(&mut header, "CATEGORY_MODE", &meta.category_mode);
        push_field(&mut header, "CLAIMED_SCORE", &meta.claimed_score);
        push_field(&mut header, "NAME", &meta.name);
        push_field(&mut header, "EMAIL", &meta.email);
        push_field(&mut header, "APP_C2A_CLUB", &meta.club);

        if let Some(location) = &meta.location
            && !location.is_empty()
        {
            let loc_up = location.to_uppercase();
            header.push_str(&format!("{}\n", tag("APP_C2A_LOCATION", &loc_up)));
            // Two-letter locations are assumed to be US/VE state codes
            if loc_up.len() == 2 && loc_up.chars().all(|c| c.is_ascii_alphabetic()) {
                header.push_str(&format!("{}\n", tag("MY_STATE", &loc_up)));
            }
        }

        let address = meta
            .address
            .iter()
            .filter(|a| !a.trim().is_empty())
            .cloned()
            .collect::<Vec<_>>()
            .join(", ");
        if !address.is_empty() {
            header.push_str(&format!("{}\n", tag("ADDRESS", &address)));
        }

        push_field(&mut header, "APP_C2A_CREATED_BY", &meta.created_by);

        if let Some(operators) = &meta.operators {
            for line in operator_tags(operators) {
                header.push_str(&line);
                header.push('\n');
            }
        }

        header.push('\n');
        header.push_str("<EOH>\n");
        header
    }

    /// Build one ADIF record line, or `None` to skip the QSO.
    ///
    /// The gates here are deliberately asymmetric: a missing callsign
    /// or an unparseable (non-empty) date aborts the whole record,
    /// while a bad time or frequency only omits those fields.
    fn generate_record(&mut self, qso: &QsoRecord) -> Option<String> {
        let mut fields: Vec<String> = Vec::new();

        if qso.dx_call.is_empty() {
            warn!("QSO missing call sign, skipping");
            return None;
        }
        fields.push(tag("CALL", &qso.dx_call.to_uppercase()));

        if !qso.date.is_empty() {
            match NaiveDate::parse_from_str(&qso.date, "%Y-%m-%d") {
                Ok(date) => {
                    fields.push(tag("QSO_DATE", &date.format("%Y%m%d").to_string()));
                }
                Err(_) => {
                    warn!("Invalid date format: {}", qso.date);
                    return None;
                }
            }
        }

        if !qso.time.is_empty() {
            let time = format!("{:0>4}", qso.time.replace(':', ""));
            if time.len() == 4 && time.chars().all(|c| c.is_ascii_digit()) {
                fields.push(tag("TIME_ON", &time));
            } else {
                warn!("Invalid time format: {}", qso.time);
            }
        }

        if qso.frequency.is_empty() {
            self.stats.qsos_without_frequency += 1;
        } else {
            match qso.frequency.parse::<f64>() {
                Ok(freq) => {
                    fields.push(tag("FREQ", &format_freq_mhz(freq)));
                    let band = frequency_to_band(&qso.frequency);
                    if band != UNKNOWN_BAND {
                        fields.push(tag("BAND", band));
                    }
                    self.stats.qsos_with_frequency += 1;
                }
                Err(_) => {
                    warn!("Invalid frequency: {}", qso.frequency);
                    self.stats.qsos_without_frequency += 1;
                }
            }
        }

        if qso.mode.is_empty() {
            self.stats.qsos_without_mode += 1;
        } else {
            fields.push(tag("MODE", &convert_mode(&qso.mode)));
            self.stats.qsos_with_mode += 1;
        }

        if !qso.my_rst_sent.is_empty() {
            fields.push(tag("RST_SENT", &qso.my_rst_sent));
        }
        if !qso.dx_rst_rcvd.is_empty() {
            fields.push(tag("RST_RCVD", &qso.dx_rst_rcvd));
        }
        if !qso.my_exchange_sent.is_empty() {
            fields.push(tag("STX_STRING", &qso.my_exchange_sent));
        }
        if !qso.dx_exchange_rcvd.is_empty() {
            fields.push(tag("SRX_STRING", &qso.dx_exchange_rcvd));
        }
        if !qso.my_call.is_empty() {
            fields.push(tag("STATION_CALLSIGN", &qso.my_call.to_uppercase()));
        }

        // Transmitter id is an opaque identifier, never transmit power
        if !qso.transmitter_id.is_empty() {
            fields.push(tag("APP_C2A_TXID", &qso.transmitter_id));
        }

        Some(format!("{} <EOR>", fields.join(" ")))
    }

    /// Snapshot of the counters from the most recent generation.
    pub fn conversion_stats(&self) -> ConversionStats {
        self.stats
    }

    /// Coarse self-check of generated ADIF text.
    pub fn validate_adif(&self, content: &str) -> AdifValidation {
        let mut header_found = false;
        let mut qso_count = 0;
        let mut total_lines = 0;

        for line in content.split('\n') {
            total_lines += 1;
            if line.contains("<ADIF_VER:") {
                header_found = true;
            }
            if line.contains("<EOR>") {
                qso_count += 1;
            }
        }

        let result = AdifValidation {
            valid: header_found && qso_count > 0,
            header_found,
            qso_count,
            total_lines,
        };
        info!("ADIF validation: {:?}", result);
        result
    }
}

/// Cabrillo modes the converter recognizes.
pub fn supported_modes() -> Vec<&'static str> {
    MODE_MAPPINGS.iter().map(|(from, _)| *from).collect()
}

/// Format a single ADIF field as `<NAME:LEN>VALUE` with byte length.
fn tag(name: &str, value: &str) -> String {
    format!("<{}:{}>{}", name, value.len(), value)
}

/// Append a header tag line when the metadata value is present and
/// non-empty.
fn push_field(header: &mut String, name: &str, value: &Option<String>) {
    if let Some(v) = value
        && !v.is_empty()
    {
        header.push_str(&tag(name, v));
        header.push('\n');
    }
}

/// Map a Cabrillo mode to its ADIF name, falling back to the
/// uppercased input.
fn convert_mode(cabrillo_mode: &str) -> String {
    let upper = cabrillo_mode.to_uppercase();
    MODE_MAPPINGS
        .iter()
        .find(|(from, _)| *from == upper)
        .map(|(_, to)| to.to_string())
        .unwrap_or(upper)
}

/// Render a raw frequency value as MHz with up to 6 decimal places,
/// trailing zeros stripped.
///
/// Uses the same magnitude heuristic as the band resolver: values over
/// a million are Hz, values over a thousand are kHz, smaller values
/// are already MHz.
fn format_freq_mhz(freq: f64) -> String {
    let mhz = if freq > 1_000_000.0 {
        freq / 1_000_000.0
    } else if freq > 1_000.0 {
        freq / 1_000.0
    } else {
        freq
    };

    format!("{:.6}", mhz)
        .trim_end_matches('0')
        .trim_end_matches('.')
        .to_string()
}

/// Build the `OPERATOR` (and, for multi-op entries, `OPERATORS`) tags
/// from the raw OPERATORS header value.
///
/// Tokens are split on commas, semicolons and whitespace, uppercased,
/// and deduplicated preserving first-seen order. The first operator
/// becomes `OPERATOR`; the full roster is comma-joined into
/// `OPERATORS` only when more than one remains.
fn operator_tags(raw: &str) -> Vec<String> {
    let mut unique: Vec<String> = Vec::new();
    for token in raw.split(|c: char| c.is_whitespace() || c == ',' || c == ';') {
        let op = token.trim().to_uppercase();
        if !op.is_empty() && !unique.contains(&op) {
            unique.push(op);
        }
    }

    let mut tags = Vec::new();
    if let Some(primary) = unique.first() {
        tags.push(tag("OPERATOR", primary));
        if unique.len() > 1 {
            tags.push(tag("OPERATORS", &unique.join(",")));
        }
    }
    tags
}
