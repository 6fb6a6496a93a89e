//! cab2adif - Convert amateur-radio contest logs from Cabrillo to ADIF.
//!
//! This crate provides:
//! - A tolerant line-oriented parser for Cabrillo contest logs
//! - An ADIF 3.1.4 generator preserving header and per-QSO information
//! - Frequency-to-band resolution over the full amateur allocations
//!
//! # Example
//!
//! ```rust
//! use cab2adif::{AdifGenerator, CabrilloParser};
//!
//! let log = "\
//! CONTEST: CQ-WW-CW
//! CALLSIGN: W1AW
//! QSO: 14250 CW 2025-01-15 0130 W1AW 599 001 G4ABC 599 002
//! ";
//!
//! let mut parser = CabrilloParser::new();
//! parser.parse_str(log).expect("Failed to parse log");
//!
//! let mut generator = AdifGenerator::new();
//! let adif = generator.generate(parser.qsos(), parser.metadata());
//!
//! assert!(adif.contains("<CALL:5>G4ABC"));
//! ```

pub mod adif;
pub mod band;
pub mod config;
pub mod parser;
pub mod qso;
pub mod stats;

pub use adif::{AdifGenerator, AdifValidation, supported_modes};
pub use band::{UNKNOWN_BAND, all_bands, frequency_to_band};
pub use config::Config;
pub use parser::{CabrilloParser, ParseError};
pub use qso::{ContestMetadata, QsoRecord};
pub use stats::{ConversionStats, LogStatistics};
