//! Product Records

use std::{
    fmt::{Display, Formatter, Result as FmtResult},
    num::ParseIntError,
    str::FromStr,
};

use thiserror::Error;

/// Store-generated product identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ProductId(i64);

impl ProductId {
    pub const fn from_i64(id: i64) -> Self {
        Self(id)
    }

    #[must_use]
    pub const fn into_i64(self) -> i64 {
        self.0
    }
}

impl Display for ProductId {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        Display::fmt(&self.0, f)
    }
}

/// Errors raised when reading a product id from text.
#[derive(Debug, Error, PartialEq)]
pub enum ParseProductIdError {
    #[error("product id must only contain ascii digits")]
    NotDigits,

    #[error("product id is out of range: {0}")]
    OutOfRange(#[source] ParseIntError),
}

impl FromStr for ProductId {
    type Err = ParseProductIdError;

    /// Accepts a non-empty run of ascii digits that fits in an `i64`.
    fn from_str(value: &str) -> Result<Self, Self::Err> {
        if value.is_empty() || !value.bytes().all(|b| b.is_ascii_digit()) {
            return Err(ParseProductIdError::NotDigits);
        }

        value
            .parse::<i64>()
            .map(Self)
            .map_err(ParseProductIdError::OutOfRange)
    }
}

/// Product Record
#[derive(Debug, Clone, PartialEq)]
pub struct ProductRecord {
    pub id: ProductId,
    pub name: String,
    pub price: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_digit_sequences() {
        assert_eq!("42".parse::<ProductId>(), Ok(ProductId::from_i64(42)));
        assert_eq!("007".parse::<ProductId>(), Ok(ProductId::from_i64(7)));
    }

    #[test]
    fn rejects_non_digits() {
        for raw in ["", "abc", "-1", "+1", "1.5", " 1", "1e3"] {
            assert_eq!(
                raw.parse::<ProductId>(),
                Err(ParseProductIdError::NotDigits),
                "expected {raw:?} to be rejected"
            );
        }
    }

    #[test]
    fn rejects_ids_past_i64_max() {
        let result = "9223372036854775808".parse::<ProductId>();

        assert!(
            matches!(result, Err(ParseProductIdError::OutOfRange(_))),
            "expected OutOfRange, got {result:?}"
        );
    }
}
