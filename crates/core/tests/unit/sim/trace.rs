//! Trace Parsing Tests.

use pretty_assertions::assert_eq;
use rstest::rstest;

use cachesim_core::common::{AccessType, TraceError};
use cachesim_core::sim::{TraceEvent, TraceReader, parse_line};

#[rstest]
#[case("r 0", AccessType::Read, 0)]
#[case("R 7fffed80", AccessType::Read, 0x7fff_ed80)]
#[case("w 0x10004a28", AccessType::Write, 0x1000_4a28)]
#[case("W 0XFF", AccessType::Write, 0xff)]
#[case("  r\tdeadbeef  extra", AccessType::Read, 0xdead_beef)]
#[case("w ffffffffffffffff", AccessType::Write, u64::MAX)]
fn parses_events(#[case] line: &str, #[case] kind: AccessType, #[case] address: u64) {
    assert_eq!(
        parse_line(line, 1).unwrap(),
        Some(TraceEvent { kind, address })
    );
}

#[rstest]
#[case("")]
#[case("   ")]
#[case("# comment")]
fn skips_non_events(#[case] line: &str) {
    assert_eq!(parse_line(line, 1).unwrap(), None);
}

#[test]
fn rejects_address_overflow() {
    let err = parse_line("r 1ffffffffffffffff", 9).unwrap_err();
    assert!(matches!(err, TraceError::InvalidAddress { line: 9, .. }));
    assert_eq!(
        err.to_string(),
        "line 9: invalid address '1ffffffffffffffff'"
    );
}

#[test]
fn reader_yields_all_events() {
    let trace = "r 0\nw 40\n\nr 400\n";
    let events: Vec<TraceEvent> = TraceReader::new(trace.as_bytes())
        .collect::<Result<_, _>>()
        .unwrap();
    assert_eq!(
        events,
        vec![
            TraceEvent::read(0),
            TraceEvent::write(0x40),
            TraceEvent::read(0x400)
        ]
    );
}

#[test]
fn reader_handles_missing_final_newline() {
    let events: Vec<_> = TraceReader::new("w 10\r\nr 20".as_bytes()).collect();
    assert_eq!(events.len(), 2);
    assert_eq!(events[1].as_ref().unwrap(), &TraceEvent::read(0x20));
}
