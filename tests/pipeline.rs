//! End-to-end tests over the parse -> generate pipeline.

use cab2adif::{AdifGenerator, CabrilloParser};

const SAMPLE_LOG: &str = "\
START-OF-LOG: 3.0
CONTEST: CQ-WW-CW
CALLSIGN: W1AW
CATEGORY-OPERATOR: SINGLE-OP
CATEGORY-POWER: HIGH
CLAIMED-SCORE: 12345
CLUB: Yankee Clipper Contest Club
LOCATION: CT
NAME: Hiram Maxim
EMAIL: w1aw@arrl.net
OPERATORS: K1ABC, W2DEF
ADDRESS: 225 Main Street
ADDRESS: Newington, CT 06111
CREATED-BY: TestLogger 1.0
QSO: 14250 CW 2025-01-15 0130 W1AW 599 001 G4ABC 599 002
QSO:  7025 PH 2025-01-15 0215 W1AW 59 002 DL1XYZ 59 014
END-OF-LOG:
";

fn convert(log: &str) -> (String, cab2adif::ConversionStats) {
    let mut parser = CabrilloParser::new();
    parser.parse_str(log).expect("log should parse");
    let mut generator = AdifGenerator::new();
    let adif = generator.generate(parser.qsos(), parser.metadata());
    (adif, generator.conversion_stats())
}

#[test]
fn full_conversion_produces_expected_tags() {
    let (adif, stats) = convert(SAMPLE_LOG);

    // Header
    assert!(adif.starts_with("ADIF Export from Cabrillo2ADIF Converter v0.9"));
    assert!(adif.contains("<ADIF_VER:5>3.1.4"));
    assert!(adif.contains("<PROGRAMID:20>Cabrillo2ADIF_v0.9"));
    assert!(adif.contains("<CONTEST_ID:9>CQ-WW-CW"));
    assert!(adif.contains("<STATION_CALLSIGN:4>W1AW"));
    assert!(adif.contains("<CATEGORY_OPERATOR:9>SINGLE-OP"));
    assert!(adif.contains("<CLAIMED_SCORE:5>12345"));
    assert!(adif.contains("<APP_C2A_CLUB:27>Yankee Clipper Contest Club"));
    assert!(adif.contains("<APP_C2A_LOCATION:2>CT"));
    assert!(adif.contains("<MY_STATE:2>CT"));
    assert!(adif.contains("<OPERATOR:5>K1ABC"));
    assert!(adif.contains("<OPERATORS:11>K1ABC,W2DEF"));
    assert!(adif.contains("<ADDRESS:36>225 Main Street, Newington, CT 06111"));
    assert!(adif.contains("<APP_C2A_CREATED_BY:14>TestLogger 1.0"));
    assert!(adif.contains("<EOH>"));

    // Records
    assert!(adif.contains(
        "<CALL:5>G4ABC <QSO_DATE:8>20250115 <TIME_ON:4>0130 <FREQ:5>14.25 \
         <BAND:3>20M <MODE:2>CW <RST_SENT:3>599 <RST_RCVD:3>599 \
         <STX_STRING:3>001 <SRX_STRING:3>002 <STATION_CALLSIGN:4>W1AW <EOR>"
    ));
    assert!(adif.contains("<CALL:6>DL1XYZ"));
    assert!(adif.contains("<MODE:3>SSB")); // PH maps to SSB
    assert!(adif.contains("<FREQ:5>7.025"));
    assert!(adif.contains("<BAND:3>40M"));

    // Stats
    assert_eq!(stats.total_qsos, 2);
    assert_eq!(stats.qsos_with_mode, 2);
    assert_eq!(stats.qsos_with_frequency, 2);
}

#[test]
fn qso_with_invalid_date_stays_parsed_but_is_not_emitted() {
    // The parser clears the bogus date but keeps the record; a record
    // with a non-empty unparseable date would be dropped at generation.
    let log = "\
QSO: 14250 CW 2025-01-15 0130 W1AW 599 001 G4ABC 599 002
QSO: 14250 CW 2025-13-40 0131 W1AW 599 002 DL1XYZ 599 003
";
    let mut parser = CabrilloParser::new();
    parser.parse_str(log).expect("log should parse");
    assert_eq!(parser.qso_count(), 2);
    assert_eq!(parser.qsos()[1].date, "");

    let mut generator = AdifGenerator::new();
    let adif = generator.generate(parser.qsos(), parser.metadata());

    // Both records emit; the second simply has no QSO_DATE
    assert_eq!(adif.matches("<EOR>").count(), 2);
    assert_eq!(adif.matches("<QSO_DATE:8>").count(), 1);

    // A date that bypasses the parser is the hard gate
    let mut bad = parser.qsos()[0].clone();
    bad.date = "2025-13-40".to_string();
    let adif = generator.generate(&[bad], parser.metadata());
    assert_eq!(adif.matches("<EOR>").count(), 0);
    assert_eq!(generator.conversion_stats().total_qsos, 1);
}

#[test]
fn tag_lengths_are_exact_byte_lengths() {
    let log = "\
NAME: Jürgen Müller
QSO: 14250 CW 2025-01-15 0130 W1AW 599 001 G4ABC 599 002
";
    let (adif, _) = convert(log);

    // Every <NAME:LEN>VALUE tag's LEN is exactly the byte length of
    // VALUE: the byte right after LEN value bytes must be a field
    // separator, the start of the next tag, or the end of the line.
    for line in adif.lines() {
        let mut rest = line;
        while let Some(start) = rest.find('<') {
            let tag = &rest[start + 1..];
            let Some(end) = tag.find('>') else { break };
            let inner = &tag[..end];
            if let Some((_, len)) = inner.split_once(':')
                && let Ok(len) = len.parse::<usize>()
            {
                let value = &tag[end + 1..];
                assert!(value.len() >= len, "tag <{}> overruns its line", inner);
                let after = value.as_bytes().get(len);
                assert!(
                    matches!(after, None | Some(b' ') | Some(b'<')),
                    "tag <{}> length is not exact on line: {}",
                    inner,
                    line
                );
            }
            rest = &tag[end + 1..];
        }
    }

    // And the non-ASCII value specifically uses byte length (15, not
    // the 13-character count)
    assert!(adif.contains("<NAME:15>Jürgen Müller"));
}

#[test]
fn validation_passes_on_generated_output() {
    let (adif, _) = convert(SAMPLE_LOG);

    let generator = AdifGenerator::new();
    let report = generator.validate_adif(&adif);

    assert!(report.valid);
    assert!(report.header_found);
    assert_eq!(report.qso_count, 2);
}

#[test]
fn zero_qso_log_parses_to_empty_list() {
    let mut parser = CabrilloParser::new();
    let qsos = parser
        .parse_str("CONTEST: CQ-WW-CW\nCALLSIGN: W1AW\n")
        .expect("header-only log should parse");

    // The parser accepts a zero-QSO file; rejecting it is caller policy
    assert!(qsos.is_empty());
}
