//! Shared validation helpers for inbound HTTP adapters.

use serde_json::json;
use uuid::Uuid;

use crate::domain::{Error, ParseEnumValueError};

/// Validation error codes for HTTP request failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ErrorCode {
    InvalidUuid,
    InvalidValue,
}

impl ErrorCode {
    fn as_str(self) -> &'static str {
        match self {
            ErrorCode::InvalidUuid => "invalid_uuid",
            ErrorCode::InvalidValue => "invalid_value",
        }
    }
}

/// Newtype wrapper for HTTP field names to provide type safety.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct FieldName(&'static str);

impl FieldName {
    pub(crate) const fn new(name: &'static str) -> Self {
        Self(name)
    }

    fn as_str(&self) -> &str {
        self.0
    }
}

fn invalid_value_error(field: FieldName, message: String, value: &str, code: ErrorCode) -> Error {
    Error::invalid_request(message).with_details(json!({
        "field": field.as_str(),
        "value": value,
        "code": code.as_str(),
    }))
}

pub(crate) fn parse_uuid(value: String, field: FieldName) -> Result<Uuid, Error> {
    Uuid::parse_str(&value).map_err(|_| {
        let name = field.as_str();
        invalid_value_error(
            field,
            format!("{name} must be a valid UUID"),
            &value,
            ErrorCode::InvalidUuid,
        )
    })
}

/// Parse one of the domain's closed string enums, reporting the accepted
/// spellings on failure.
pub(crate) fn parse_enum<T>(value: String, field: FieldName) -> Result<T, Error>
where
    T: std::str::FromStr<Err = ParseEnumValueError>,
{
    value.parse::<T>().map_err(|err| {
        let name = field.as_str();
        invalid_value_error(
            field,
            format!("{name} must be one of: {}", err.expected),
            &value,
            ErrorCode::InvalidValue,
        )
    })
}
