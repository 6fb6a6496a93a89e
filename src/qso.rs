//! Data structures for parsed Cabrillo logs.
//!
//! A Cabrillo file has two kinds of content: `KEY: value` header lines
//! describing the contest entry, and `QSO:` lines recording individual
//! contacts. [`ContestMetadata`] captures the recognized header fields
//! and [`QsoRecord`] captures one contact, both as they appeared on the
//! wire (normalization happens during ADIF generation).

use serde::{Deserialize, Serialize};
use std::fmt;

/// A single contact parsed from a `QSO:` line.
///
/// All fields are kept as raw strings. The parser clears fields that
/// fail validation (frequency, date, time) rather than dropping the
/// record; only a missing callsign drops the whole record.
///
/// # Example
///
/// A line like:
/// ```text
/// QSO: 14250 CW 2025-01-15 0130 W1AW 599 001 G4ABC 599 002
/// ```
///
/// produces a record with `frequency` "14250", `mode` "CW", `my_call`
/// "W1AW" and `dx_call` "G4ABC".
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct QsoRecord {
    /// Raw frequency text, typically kHz without a unit.
    pub frequency: String,

    /// Raw Cabrillo mode (CW, PH, RY, ...).
    pub mode: String,

    /// Contact date; validated against several input formats but stored
    /// as received.
    pub date: String,

    /// Contact time, HHMM after validation.
    pub time: String,

    /// The logging station's callsign.
    pub my_call: String,

    /// RST the logging station sent.
    pub my_rst_sent: String,

    /// Exchange the logging station sent.
    pub my_exchange_sent: String,

    /// The worked station's callsign.
    pub dx_call: String,

    /// RST received from the worked station.
    pub dx_rst_rcvd: String,

    /// Exchange received from the worked station.
    pub dx_exchange_rcvd: String,

    /// Optional trailing transmitter identifier (multi-transmitter logs).
    pub transmitter_id: String,

    /// The original input line, kept for diagnostics.
    pub raw_line: String,
}

impl fmt::Display for QsoRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} {} {} {} -> {}",
            self.date, self.time, self.frequency, self.mode, self.my_call, self.dx_call
        )
    }
}

/// Contest header metadata accumulated while scanning a Cabrillo file.
///
/// Only recognized header keys are retained; anything else is dropped
/// by the parser. `ADDRESS` may appear multiple times and accumulates
/// in order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ContestMetadata {
    /// CONTEST header (e.g. "CQ-WW-CW").
    pub contest: Option<String>,

    /// CALLSIGN header: the station callsign of the entry.
    pub callsign: Option<String>,

    /// CATEGORY-OPERATOR header.
    pub category_operator: Option<String>,

    /// CATEGORY-TRANSMITTER header.
    pub category_transmitter: Option<String>,

    /// CATEGORY-POWER header.
    pub category_power: Option<String>,

    /// CATEGORY-BAND header.
    pub category_band: Option<String>,

    /// CATEGORY-MODE header.
    pub category_mode: Option<String>,

    /// CLAIMED-SCORE header.
    pub claimed_score: Option<String>,

    /// CLUB header.
    pub club: Option<String>,

    /// LOCATION header (ARRL section or similar region code).
    pub location: Option<String>,

    /// NAME header: the operator's name.
    pub name: Option<String>,

    /// EMAIL header.
    pub email: Option<String>,

    /// OPERATORS header, raw and unsplit.
    pub operators: Option<String>,

    /// CREATED-BY header: the software that wrote the log.
    pub created_by: Option<String>,

    /// ADDRESS header lines, in file order.
    pub address: Vec<String>,
}

impl ContestMetadata {
    /// Returns true if no header field was captured.
    pub fn is_empty(&self) -> bool {
        self == &ContestMetadata::default()
    }
}
