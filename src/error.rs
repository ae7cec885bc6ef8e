use std::fmt;

/// Which side of a range an error refers to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Endpoint {
    Start,
    End,
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Endpoint::Start => write!(f, "start"),
            Endpoint::End => write!(f, "end"),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum FormatError {
    /// A range endpoint is NaN.
    #[error("invalid number for range formatting: {endpoint} is NaN")]
    InvalidNumericInput { endpoint: Endpoint },

    #[error("no number range data for locale `{locale}`")]
    LocaleDataMissing { locale: String },

    /// Any other failure raised by a number partitioner.
    #[error("number formatting failed: {0}")]
    Collaborator(String),

    #[error("{option} is out of range: {reason}")]
    InvalidOption { option: &'static str, reason: String },

    #[error("invalid locale tag `{0}`")]
    InvalidLocale(String),

    #[error("`{0}` is not a decimal number")]
    InvalidNumber(String),
}

pub type Result<T> = std::result::Result<T, FormatError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages() {
        let err = FormatError::InvalidNumericInput {
            endpoint: Endpoint::End,
        };
        assert_eq!(err.to_string(), "invalid number for range formatting: end is NaN");

        let err = FormatError::InvalidOption {
            option: "maximumFractionDigits",
            reason: "must be between 0 and 100".into(),
        };
        assert_eq!(
            err.to_string(),
            "maximumFractionDigits is out of range: must be between 0 and 100"
        );
    }
}
