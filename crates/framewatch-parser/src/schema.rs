use csv::StringRecord;

use crate::errors::ParserError;

pub const DATETIME: &str = "Datetime";
pub const VIEW_ID: &str = "ViewID";
pub const ERROR_TYPE: &str = "ErrorType";
pub const ERROR_CODE: &str = "ErrorCode";
pub const ERROR_DESCRIPTION: &str = "ErrorDescription";

pub const REQUIRED_COLUMNS: [&str; 5] = [DATETIME, VIEW_ID, ERROR_TYPE, ERROR_CODE, ERROR_DESCRIPTION];

/// Positions of the required columns within a header row. Extra columns are ignored.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct ColumnIndex {
    pub datetime: usize,
    pub view_id: usize,
    pub error_type: usize,
    pub error_code: usize,
    pub error_description: usize,
}

impl ColumnIndex {
    pub fn resolve(headers: &StringRecord) -> Result<Self, ParserError> {
        let mut missing = Vec::new();
        let mut locate = |name: &'static str| {
            headers
                .iter()
                .position(|header| header.trim() == name)
                .unwrap_or_else(|| {
                    missing.push(name);
                    usize::MAX
                })
        };

        let index = Self {
            datetime: locate(DATETIME),
            view_id: locate(VIEW_ID),
            error_type: locate(ERROR_TYPE),
            error_code: locate(ERROR_CODE),
            error_description: locate(ERROR_DESCRIPTION),
        };

        if missing.is_empty() {
            Ok(index)
        } else {
            Err(ParserError::MissingColumns { columns: missing })
        }
    }
}
