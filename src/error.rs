//! Error types for dataset validation and label parsing.

use thiserror::Error;

/// Authoring-time consistency violations in the built-in tables.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DataError {
    /// A country whose region no filter button can select.
    #[error("country '{country}' has region '{region}', which no filter option selects")]
    UnreachableCountry { country: String, region: String },

    /// A table that must hold rows is empty.
    #[error("table '{0}' is empty")]
    EmptyTable(&'static str),

    /// Country rows must stay ranked by population, largest first.
    #[error("country '{0}' is out of population order")]
    OutOfOrder(String),
}

/// Errors raised when turning user-supplied labels into typed values.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    #[error("unknown region filter '{0}' (expected one of: Todos, Asia, Latam, Europa, África, Norteamérica)")]
    UnknownRegion(String),

    #[error("unknown metric '{0}' (expected 'pop' or 'rate')")]
    UnknownMetric(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        let err = DataError::UnreachableCountry {
            country: "Australia".into(),
            region: "Oceanía".into(),
        };
        assert_eq!(
            err.to_string(),
            "country 'Australia' has region 'Oceanía', which no filter option selects"
        );
        assert_eq!(
            ParseError::UnknownMetric("gdp".into()).to_string(),
            "unknown metric 'gdp' (expected 'pop' or 'rate')"
        );
    }
}
