use thiserror::Error;

/// Reasons a calculation or table rendering is refused.
///
/// The display text of each variant is shown to users verbatim.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoanError {
    #[error("Invalid amount")]
    InvalidAmount,

    #[error("Invalid rate")]
    InvalidRate,

    #[error("Invalid months")]
    InvalidMonths,

    #[error("Null table")]
    NullTable,

    #[error("Empty table")]
    EmptyTable,

    #[error("Invalid rows")]
    InvalidRows,
}

pub type Result<T> = std::result::Result<T, LoanError>;
