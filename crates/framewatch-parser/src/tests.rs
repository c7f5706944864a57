use std::fs;
use std::path::PathBuf;

use chrono::{NaiveDate, Timelike};

use crate::fields::{parse_timestamp, parse_view_id};
use crate::{read_events, ParserError, TimestampPolicy};

fn fixture(path: &str) -> String {
    let base = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    let full_path = base.join("tests/data").join(path);
    fs::read_to_string(&full_path)
        .unwrap_or_else(|err| panic!("failed to read fixture {}: {}", full_path.display(), err))
}

#[test]
fn parses_camera_event_log() {
    let content = fixture("camera_events.csv");
    let outcome = read_events(&content, TimestampPolicy::Abort).expect("camera log parse failed");

    assert_eq!(outcome.events.len(), 11);
    assert!(outcome.skipped.is_empty());

    let first = &outcome.events[0];
    assert_eq!(first.view_id, Some(3001));
    assert_eq!(first.error_type.as_deref(), Some("Error"));
    assert_eq!(first.error_code.as_deref(), Some("E104"));
    assert_eq!(
        first.error_description.as_deref(),
        Some("Video frame missing on stream 1")
    );
    assert_eq!(
        first.datetime,
        NaiveDate::from_ymd_opt(2024, 3, 1)
            .unwrap()
            .and_hms_opt(8, 15, 0)
    );
}

#[test]
fn blank_description_becomes_none() {
    let content = fixture("camera_events.csv");
    let outcome = read_events(&content, TimestampPolicy::Abort).unwrap();

    let blank = &outcome.events[9];
    assert_eq!(blank.view_id, Some(3003));
    assert!(blank.error_description.is_none());
}

#[test]
fn column_order_is_free_and_extra_columns_are_ignored() {
    let content = "\
Site,ErrorDescription,ErrorCode,ViewID,Datetime,ErrorType
North,video frame missing,E104,3002,2024-05-06 17:00:00,Error
";
    let outcome = read_events(content, TimestampPolicy::Abort).unwrap();

    assert_eq!(outcome.events.len(), 1);
    let event = &outcome.events[0];
    assert_eq!(event.view_id, Some(3002));
    assert_eq!(event.error_type.as_deref(), Some("Error"));
    assert_eq!(event.datetime.map(|dt| dt.hour()), Some(17));
}

#[test]
fn missing_columns_are_all_reported() {
    let content = "Datetime,ViewID,ErrorCode\n2024-03-01 08:15:00,3001,E104\n";
    let err = read_events(content, TimestampPolicy::Abort).unwrap_err();

    match err {
        ParserError::MissingColumns { columns } => {
            assert_eq!(columns, vec!["ErrorType", "ErrorDescription"]);
        }
        other => panic!("expected MissingColumns, got {other:?}"),
    }
}

#[test]
fn abort_policy_fails_on_first_bad_timestamp() {
    let content = fixture("bad_timestamp.csv");
    let err = read_events(&content, TimestampPolicy::Abort).unwrap_err();

    match err {
        ParserError::InvalidTimestamp { line, value } => {
            assert_eq!(line, 3);
            assert_eq!(value, "not-a-date");
        }
        other => panic!("expected InvalidTimestamp, got {other:?}"),
    }
}

#[test]
fn skip_policy_drops_and_records_bad_rows() {
    let content = fixture("bad_timestamp.csv");
    let outcome = read_events(&content, TimestampPolicy::Skip).unwrap();

    assert_eq!(outcome.events.len(), 2);
    assert_eq!(outcome.skipped_rows(), 1);
    assert_eq!(outcome.skipped[0].line, 3);
}

#[test]
fn empty_input_is_an_empty_table() {
    let outcome = read_events("", TimestampPolicy::Abort).unwrap();
    assert!(outcome.events.is_empty());

    let header_only = "Datetime,ViewID,ErrorType,ErrorCode,ErrorDescription\n";
    let outcome = read_events(header_only, TimestampPolicy::Abort).unwrap();
    assert!(outcome.events.is_empty());
}

#[test]
fn byte_order_mark_is_stripped_from_header() {
    let content = "\u{feff}Datetime,ViewID,ErrorType,ErrorCode,ErrorDescription\n\
2024-03-01 08:15:00,3001,Error,E104,video frame missing\n";
    let outcome = read_events(content, TimestampPolicy::Abort).unwrap();
    assert_eq!(outcome.events.len(), 1);
}

#[test]
fn non_integer_view_id_is_a_data_row_error() {
    let content = "Datetime,ViewID,ErrorType,ErrorCode,ErrorDescription\n\
2024-03-01 08:15:00,cam-1,Error,E104,video frame missing\n";
    let err = read_events(content, TimestampPolicy::Abort).unwrap_err();
    assert!(matches!(err, ParserError::DataRow { line: 2, .. }));
}

#[test]
fn view_id_accepts_float_exports_and_blanks() {
    assert_eq!(parse_view_id("3001", 2).unwrap(), Some(3001));
    assert_eq!(parse_view_id(" 3004.0 ", 2).unwrap(), Some(3004));
    assert_eq!(parse_view_id("", 2).unwrap(), None);
    assert_eq!(parse_view_id("NaN", 2).unwrap(), None);
    assert!(parse_view_id("3001.5", 2).is_err());
}

#[test]
fn timestamp_formats() {
    let expected = NaiveDate::from_ymd_opt(2024, 3, 1)
        .unwrap()
        .and_hms_opt(8, 15, 0)
        .unwrap();

    assert_eq!(parse_timestamp("2024-03-01 08:15:00"), Some(expected));
    assert_eq!(parse_timestamp("2024-03-01T08:15:00"), Some(expected));
    assert_eq!(parse_timestamp("2024-03-01 08:15"), Some(expected));
    assert_eq!(parse_timestamp("03/01/2024 08:15:00"), Some(expected));
    assert_eq!(parse_timestamp("2024-03-01T08:15:00+05:30"), Some(expected));
    assert_eq!(
        parse_timestamp("2024-03-01 08:15:00.250").map(|dt| dt.hour()),
        Some(8)
    );
    assert_eq!(
        parse_timestamp("2024-03-01"),
        NaiveDate::from_ymd_opt(2024, 3, 1).unwrap().and_hms_opt(0, 0, 0)
    );
    assert_eq!(parse_timestamp("yesterday"), None);
    assert_eq!(parse_timestamp("  "), None);
}

#[test]
fn timestamp_policy_names() {
    assert_eq!(TimestampPolicy::try_from("Skip"), Ok(TimestampPolicy::Skip));
    assert_eq!(TimestampPolicy::try_from("abort"), Ok(TimestampPolicy::Abort));
    assert!(TimestampPolicy::try_from("ignore").is_err());
    assert_eq!(TimestampPolicy::default().to_string(), "abort");
}

#[test]
fn blank_datetime_is_a_missing_timestamp() {
    let content = "Datetime,ViewID,ErrorType,ErrorCode,ErrorDescription\n\
2024-03-01 08:15:00,3001,Error,E104,video frame missing\n\
,3001,Error,E104,video frame missing\n   ,3002,Warning,W201,Bitrate dropped\n";

    let outcome = read_events(content, TimestampPolicy::Abort).unwrap();

    assert_eq!(outcome.events.len(), 3);
    assert!(outcome.skipped.is_empty());
    assert!(outcome.events[0].datetime.is_some());
    assert_eq!(outcome.events[1].datetime, None);
    assert_eq!(outcome.events[1].view_id, Some(3001));
    assert_eq!(outcome.events[2].datetime, None);
}

#[test]
fn cell_text_is_kept_verbatim() {
    let content = " Datetime , ViewID ,ErrorType,ErrorCode,ErrorDescription\n\
2024-03-01 08:15:00, 3001 , Error ,E104, video frame missing \n";

    let outcome = read_events(content, TimestampPolicy::Abort).unwrap();
    let event = &outcome.events[0];

    assert_eq!(event.view_id, Some(3001));
    assert_eq!(event.error_type.as_deref(), Some(" Error "));
    assert_eq!(
        event.error_description.as_deref(),
        Some(" video frame missing ")
    );
}
