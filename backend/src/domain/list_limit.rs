//! Page size accepted by list endpoints.

use crate::domain::validation::{FieldViolation, ViolationCode};

/// Number of rows returned by a list query, in `1..=200`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ListLimit(u16);

impl ListLimit {
    /// Limit applied when the client sends none.
    pub const DEFAULT: u16 = 50;
    /// Largest accepted limit.
    pub const MAX: u16 = 200;

    /// Validate a raw limit for the named field.
    pub fn parse_field(field: &str, value: i64) -> Result<Self, FieldViolation> {
        u16::try_from(value)
            .ok()
            .filter(|v| (1..=Self::MAX).contains(v))
            .map(Self)
            .ok_or_else(|| {
                FieldViolation::new(
                    field,
                    ViolationCode::OutOfRange,
                    format!("{field} must be between 1 and {}", Self::MAX),
                )
            })
    }

    /// Raw row count.
    pub fn get(self) -> i64 {
        i64::from(self.0)
    }
}

impl Default for ListLimit {
    fn default() -> Self {
        Self(Self::DEFAULT)
    }
}

impl TryFrom<i64> for ListLimit {
    type Error = FieldViolation;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        Self::parse_field("limit", value)
    }
}

impl From<ListLimit> for i64 {
    fn from(value: ListLimit) -> Self {
        value.get()
    }
}
