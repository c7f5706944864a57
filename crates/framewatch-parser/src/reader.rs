use csv::{ReaderBuilder, Trim};
use tracing::{debug, warn};

use crate::errors::ParserError;
use crate::fields::{clean_optional, parse_timestamp, parse_view_id};
use crate::model::{IngestOutcome, RawEvent, SkippedRow, TimestampPolicy};
use crate::schema::ColumnIndex;

/// Parses a camera event CSV into typed rows.
///
/// The header must name every column in [`crate::REQUIRED_COLUMNS`]; other columns are
/// ignored and column order is free. Input with no content at all is an empty table.
/// Only header names are trimmed. A blank `Datetime` cell is kept as a missing timestamp;
/// text that is present but unrecognized is handled according to `policy`.
pub fn read_events(content: &str, policy: TimestampPolicy) -> Result<IngestOutcome, ParserError> {
    let content = content.strip_prefix('\u{feff}').unwrap_or(content);
    if content.trim().is_empty() {
        return Ok(IngestOutcome::default());
    }

    let mut reader = ReaderBuilder::new()
        .flexible(true)
        .trim(Trim::Headers)
        .from_reader(content.as_bytes());

    let headers = reader.headers()?.clone();
    let index = ColumnIndex::resolve(&headers)?;

    let mut outcome = IngestOutcome::default();

    for record in reader.records() {
        let record = record?;
        let line = record.position().map_or(0, |pos| pos.line());

        let raw_datetime = record.get(index.datetime).unwrap_or_default();
        let datetime = match parse_timestamp(raw_datetime) {
            Some(datetime) => Some(datetime),
            None if raw_datetime.trim().is_empty() => None,
            None => match policy {
                TimestampPolicy::Abort => {
                    return Err(ParserError::InvalidTimestamp {
                        line,
                        value: raw_datetime.to_string(),
                    });
                }
                TimestampPolicy::Skip => {
                    warn!(line, value = raw_datetime, "skipping row with unrecognized Datetime");
                    outcome.skipped.push(SkippedRow {
                        line,
                        value: raw_datetime.to_string(),
                    });
                    continue;
                }
            },
        };

        let view_id = parse_view_id(record.get(index.view_id).unwrap_or_default(), line)?;

        outcome.events.push(RawEvent {
            datetime,
            view_id,
            error_type: clean_optional(record.get(index.error_type)),
            error_code: clean_optional(record.get(index.error_code)),
            error_description: clean_optional(record.get(index.error_description)),
        });
    }

    debug!(
        rows = outcome.events.len(),
        skipped = outcome.skipped.len(),
        %policy,
        "parsed camera event rows"
    );

    Ok(outcome)
}
