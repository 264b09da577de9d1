use thiserror::Error;

/// Failures of the wire contract layer. Every decode failure is a
/// recoverable value the caller can map to "malformed or incompatible
/// account data"; nothing here panics.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SurveyError {
    #[error("no off-curve bump found for seed '{seed}'")]
    DerivationExhausted { seed: &'static str },

    #[error(
        "{structure}.{field}: needed {needed} bytes, only {available} left"
    )]
    TruncatedInput {
        structure: &'static str,
        field: &'static str,
        needed: usize,
        available: usize,
    },

    #[error("{structure}: {count} unexpected bytes after the last field")]
    TrailingBytes {
        structure: &'static str,
        count: usize,
    },

    #[error("unknown instruction discriminant {found}")]
    InvalidDiscriminant { found: u8 },

    #[error("'{0}' is not a valid base58 address")]
    InvalidAddressFormat(String),

    #[error("{structure}.{field} is not valid utf-8")]
    InvalidUtf8 {
        structure: &'static str,
        field: &'static str,
    },

    #[error(
        "{structure}: field {index} accessed as '{accessed}', schema says '{declared}'"
    )]
    SchemaMismatch {
        structure: &'static str,
        index: usize,
        accessed: &'static str,
        declared: &'static str,
    },

    #[error("survey id is {len} bytes, the on-chain account holds at most {max}")]
    SurveyIdTooLong { len: usize, max: usize },
}
