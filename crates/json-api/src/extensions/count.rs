//! `count` query parameter parsing.

use salvo::oapi::extract::QueryParam;

const DEFAULT_COUNT: i64 = 10;

pub(crate) trait CountExt {
    fn into_count(self) -> i64;
}

impl CountExt for QueryParam<String, false> {
    /// Missing, unparsable and non-positive values all fall back to
    /// [`DEFAULT_COUNT`].
    fn into_count(self) -> i64 {
        self.into_inner()
            .and_then(|value| value.parse::<i64>().ok())
            .filter(|count| *count >= 1)
            .unwrap_or(DEFAULT_COUNT)
    }
}
