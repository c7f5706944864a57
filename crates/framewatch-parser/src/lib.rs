pub mod errors;
mod fields;
pub mod model;
mod reader;
pub mod schema;

pub use errors::ParserError;
pub use model::{IngestOutcome, RawEvent, SkippedRow, TimestampPolicy};
pub use reader::read_events;
pub use schema::REQUIRED_COLUMNS;

#[cfg(test)]
mod tests;
