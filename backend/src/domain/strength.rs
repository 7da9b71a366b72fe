//! Bounded 1–5 strength score shared by contacts and relationships.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::domain::validation::{FieldViolation, ViolationCode};

/// Closeness score in `1..=5`; contacts scoring at least
/// [`Strength::STRONG_THRESHOLD`] count as strong connections.
///
/// OpenAPI schemas describe fields of this type with
/// `#[schema(value_type = i32, minimum = 1, maximum = 5)]`.
///
/// # Examples
/// ```
/// use backend::domain::Strength;
///
/// assert!(Strength::new(5).is_ok());
/// assert!(Strength::new(6).is_err());
/// assert_eq!(Strength::default().get(), 1);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "i64")]
pub struct Strength(u8);

/// Error returned when a score falls outside `1..=5`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("strength must be between 1 and 5, got {0}")]
pub struct StrengthOutOfRange(pub i64);

impl Strength {
    /// Lowest accepted score.
    pub const MIN: u8 = 1;
    /// Highest accepted score.
    pub const MAX: u8 = 5;
    /// Scores at or above this value are strong connections.
    pub const STRONG_THRESHOLD: u8 = 4;

    /// Validate a raw score.
    pub fn new(value: i64) -> Result<Self, StrengthOutOfRange> {
        u8::try_from(value)
            .ok()
            .filter(|v| (Self::MIN..=Self::MAX).contains(v))
            .map(Self)
            .ok_or(StrengthOutOfRange(value))
    }

    /// Validate a request field, producing a field violation on failure.
    pub fn parse_field(field: &str, value: i64) -> Result<Self, FieldViolation> {
        Self::new(value).map_err(|err| {
            FieldViolation::new(field, ViolationCode::OutOfRange, err.to_string())
        })
    }

    /// Raw score.
    pub fn get(self) -> u8 {
        self.0
    }

    /// Whether this score counts as a strong connection.
    pub fn is_strong(self) -> bool {
        self.0 >= Self::STRONG_THRESHOLD
    }
}

impl Default for Strength {
    fn default() -> Self {
        Self(Self::MIN)
    }
}

impl TryFrom<i64> for Strength {
    type Error = StrengthOutOfRange;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl TryFrom<i32> for Strength {
    type Error = StrengthOutOfRange;

    fn try_from(value: i32) -> Result<Self, Self::Error> {
        Self::new(i64::from(value))
    }
}

impl From<Strength> for i64 {
    fn from(value: Strength) -> Self {
        i64::from(value.0)
    }
}

impl From<Strength> for i32 {
    fn from(value: Strength) -> Self {
        i32::from(value.0)
    }
}

impl fmt::Display for Strength {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(1)]
    #[case(3)]
    #[case(5)]
    fn accepts_in_range(#[case] value: i64) {
        assert_eq!(Strength::new(value).map(|s| i64::from(s.get())), Ok(value));
    }

    #[rstest]
    #[case(0)]
    #[case(6)]
    #[case(-1)]
    #[case(i64::MAX)]
    fn rejects_out_of_range(#[case] value: i64) {
        assert_eq!(Strength::new(value), Err(StrengthOutOfRange(value)));
    }

    #[rstest]
    #[case(3, false)]
    #[case(4, true)]
    #[case(5, true)]
    fn strong_threshold(#[case] value: i64, #[case] strong: bool) {
        assert_eq!(Strength::new(value).expect("valid").is_strong(), strong);
    }

    #[rstest]
    fn deserialising_rejects_out_of_range() {
        assert!(serde_json::from_str::<Strength>("7").is_err());
        assert_eq!(
            serde_json::from_str::<Strength>("2").expect("valid").get(),
            2
        );
    }

    #[rstest]
    fn parse_field_reports_out_of_range() {
        let violation = Strength::parse_field("relationshipStrength", 9).expect_err("invalid");
        assert_eq!(violation.field, "relationshipStrength");
        assert_eq!(violation.code, ViolationCode::OutOfRange);
    }
}
