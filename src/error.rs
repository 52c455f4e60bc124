use crate::field::{Domain, FieldKind};
use thiserror::Error;

/// Crate specific Errors implementation.
#[derive(Debug, Error, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum CronError {
    /// Expression doesn't consist of 5 or 6 fields.
    #[error("expected 5 or 6 fields, found {0}")]
    WrongFieldCount(usize),
    /// Range has unparsable or out of domain bounds, or its start is greater than its end.
    #[error("invalid {field} range: {raw}")]
    InvalidRange {
        /// Field the range belongs to.
        field: FieldKind,
        /// Offending token.
        raw: String,
    },
    /// Step is not a positive integer.
    #[error("invalid {field} step: {raw}")]
    InvalidStep {
        /// Field the step belongs to.
        field: FieldKind,
        /// Offending token.
        raw: String,
    },
    /// Numeric value is outside of the field's domain.
    #[error("{field} value {raw} is out of range {domain}")]
    ValueOutOfRange {
        /// Field the value belongs to.
        field: FieldKind,
        /// Offending value.
        raw: String,
        /// Allowed values of the field.
        domain: Domain,
    },
    /// Token doesn't match any known field syntax.
    #[error("unparsable {field} token: {raw}")]
    UnparsableToken {
        /// Field the token belongs to.
        field: FieldKind,
        /// Offending token.
        raw: String,
    },
}
