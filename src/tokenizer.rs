/// Splits schedule expressions into field tokens.
use crate::{field::FieldKind, CronError, Result};

/// Field tokens of a single expression, paired with their roles.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Tokens<'a> {
    pub(crate) has_seconds: bool,
    pub(crate) fields: Vec<(FieldKind, &'a str)>,
}

pub(crate) fn tokenize(input: &str) -> Result<Tokens<'_>> {
    let elements: Vec<&str> = input.split_whitespace().collect();

    let (has_seconds, roles) = match elements.len() {
        5 => (false, &FieldKind::ALL[1..]),
        6 => (true, &FieldKind::ALL[..]),
        found => return Err(CronError::WrongFieldCount(found)),
    };

    Ok(Tokens {
        has_seconds,
        fields: roles.iter().copied().zip(elements).collect(),
    })
}
