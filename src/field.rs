use crate::{CronError, Result};
use std::{collections::BTreeSet, fmt::Display};

/// Kind of schedule field, defines its position and the domain of allowed values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum FieldKind {
    /// Seconds, `0-59`.
    Second,
    /// Minutes, `0-59`.
    Minute,
    /// Hours, `0-23`.
    Hour,
    /// Day of month, `1-31`.
    DayOfMonth,
    /// Month, `1-12`.
    Month,
    /// Day of week, `0-7`, both `0` and `7` are Sunday.
    DayOfWeek,
}

impl FieldKind {
    /// All kinds in the order of the 6-fields expression.
    pub const ALL: [FieldKind; 6] = [
        Self::Second,
        Self::Minute,
        Self::Hour,
        Self::DayOfMonth,
        Self::Month,
        Self::DayOfWeek,
    ];

    /// Returns allowed values of the field.
    pub const fn domain(&self) -> Domain {
        let (min, max) = match self {
            Self::Second | Self::Minute => (0, 59),
            Self::Hour => (0, 23),
            Self::DayOfMonth => (1, 31),
            Self::Month => (1, 12),
            Self::DayOfWeek => (0, 7),
        };
        Domain { min, max }
    }

    /// Maps the Sunday alias `7` to `0`, other values are returned unchanged.
    #[inline]
    fn normalize(&self, value: u8) -> u8 {
        match self {
            Self::DayOfWeek if value == 7 => 0,
            _ => value,
        }
    }

    fn parse_value(&self, raw: &str) -> Result<u8> {
        let domain = self.domain();
        match parse_number(raw) {
            Some(value) if domain.contains(value) => Ok(self.normalize(value as u8)),
            Some(_) => Err(CronError::ValueOutOfRange {
                field: *self,
                raw: raw.to_owned(),
                domain,
            }),
            None => Err(CronError::UnparsableToken {
                field: *self,
                raw: raw.to_owned(),
            }),
        }
    }

    /// Parses `lo-hi` bounds of the range, without day of week normalization.
    fn parse_bounds(&self, lo: &str, hi: &str, token: &str) -> Result<(u8, u8)> {
        let domain = self.domain();
        match (parse_number(lo), parse_number(hi)) {
            (Some(lo), Some(hi)) if domain.contains(lo) && domain.contains(hi) && lo <= hi => Ok((lo as u8, hi as u8)),
            _ => Err(CronError::InvalidRange {
                field: *self,
                raw: token.to_owned(),
            }),
        }
    }
}

impl Display for FieldKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::Second => "second",
            Self::Minute => "minute",
            Self::Hour => "hour",
            Self::DayOfMonth => "day of month",
            Self::Month => "month",
            Self::DayOfWeek => "day of week",
        };
        write!(f, "{name}")
    }
}

/// Closed range of values allowed in a field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Domain {
    /// Minimal value.
    pub min: u8,
    /// Maximal value.
    pub max: u8,
}

impl Domain {
    #[inline]
    fn contains(&self, value: u32) -> bool {
        value >= self.min as u32 && value <= self.max as u32
    }
}

impl Display for Domain {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}-{}", self.min, self.max)
    }
}

/// Parsed matching rule of a single schedule field.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum FieldSpec {
    /// `*`: each value of the domain.
    Any,
    /// `N`: exactly one value.
    Specific(u8),
    /// `N,M,...`: several values.
    List(BTreeSet<u8>),
    /// `N-M`: values from `N` to `M` inclusively.
    Range(u8, u8),
    /// `*/S`: each `S`-th value starting from the domain minimum.
    Step(u16),
    /// `N-M/S`: each `S`-th value from `N` to `M`.
    StepRange(u8, u8, u16),
}

impl FieldSpec {
    /// Parses a single field token of the specified kind.
    pub fn parse(kind: FieldKind, token: &str) -> Result<Self> {
        if token == "*" {
            return Ok(Self::Any);
        }

        if let Some((base, step)) = token.split_once('/') {
            let step = match parse_number(step) {
                Some(step) if step > 0 && step <= u16::MAX as u32 => step as u16,
                _ => {
                    return Err(CronError::InvalidStep {
                        field: kind,
                        raw: token.to_owned(),
                    })
                }
            };

            return if base == "*" {
                Ok(Self::Step(step))
            } else if let Some((lo, hi)) = base.split_once('-') {
                let (lo, hi) = kind.parse_bounds(lo, hi, token)?;
                Ok(Self::StepRange(lo, hi, step))
            } else {
                Err(CronError::UnparsableToken {
                    field: kind,
                    raw: token.to_owned(),
                })
            };
        }

        if let Some((lo, hi)) = token.split_once('-') {
            let (lo, hi) = kind.parse_bounds(lo, hi, token)?;
            return Ok(match kind {
                // Sunday alias as the upper bound wraps the range around the week.
                FieldKind::DayOfWeek if hi == 7 && lo == 7 => Self::Range(0, 0),
                FieldKind::DayOfWeek if hi == 7 => Self::List((lo..7).chain([0]).collect()),
                _ => Self::Range(lo, hi),
            });
        }

        if token.contains(',') {
            let values = token
                .split(',')
                .map(|value| kind.parse_value(value))
                .collect::<Result<BTreeSet<u8>>>()?;
            return Ok(Self::from_values(values));
        }

        kind.parse_value(token).map(Self::Specific)
    }

    /// Returns `true` if the field isn't restricted.
    #[inline]
    pub fn is_any(&self) -> bool {
        matches!(self, Self::Any)
    }

    /// Materializes all values matched by the field.
    ///
    /// Day of week values are always within `0-6`.
    pub fn values(&self, kind: FieldKind) -> BTreeSet<u8> {
        let Domain { min, max } = kind.domain();
        let values: BTreeSet<u8> = match self {
            Self::Any => (min..=max).collect(),
            Self::Specific(value) => BTreeSet::from([*value]),
            Self::List(values) => values.clone(),
            Self::Range(lo, hi) => (*lo..=*hi).collect(),
            Self::Step(step) => (min..=max).step_by(*step as usize).collect(),
            Self::StepRange(lo, hi, step) => (*lo..=*hi).step_by(*step as usize).collect(),
        };

        values.into_iter().map(|value| kind.normalize(value)).collect()
    }

    /// Single element lists are collapsed into the particular value.
    fn from_values(values: BTreeSet<u8>) -> Self {
        match values.first() {
            Some(value) if values.len() == 1 => Self::Specific(*value),
            _ => Self::List(values),
        }
    }
}

impl Display for FieldSpec {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Any => write!(f, "*"),
            Self::Specific(value) => write!(f, "{value}"),
            Self::List(values) => {
                let values = values.iter().map(|v| v.to_string()).collect::<Vec<_>>().join(",");
                write!(f, "{values}")
            }
            Self::Range(lo, hi) => write!(f, "{lo}-{hi}"),
            Self::Step(step) => write!(f, "*/{step}"),
            Self::StepRange(lo, hi, step) => write!(f, "{lo}-{hi}/{step}"),
        }
    }
}

/// Converts decimal digits into a number, saturating on overflow.
///
/// Returns `None` if the input is empty or contains anything but ASCII digits.
fn parse_number(input: &str) -> Option<u32> {
    if input.is_empty() || !input.bytes().all(|b| b.is_ascii_digit()) {
        None
    } else {
        Some(input.parse::<u32>().unwrap_or(u32::MAX))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use rstest_reuse::{apply, template};

    #[test]
    fn test_parse_number() {
        assert_eq!(parse_number("0"), Some(0));
        assert_eq!(parse_number("007"), Some(7));
        assert_eq!(parse_number("99999999999"), Some(u32::MAX));
        assert_eq!(parse_number(""), None);
        assert_eq!(parse_number("-1"), None);
        assert_eq!(parse_number("+1"), None);
        assert_eq!(parse_number("1.5"), None);
        assert_eq!(parse_number(" 1"), None);
    }

    #[rstest]
    #[case(FieldKind::Second)]
    #[case(FieldKind::Minute)]
    fn test_parse_valid_seconds_and_minutes(#[case] kind: FieldKind) {
        let test_cases = vec![
            ("*", FieldSpec::Any),
            ("5", FieldSpec::Specific(5)),
            ("59", FieldSpec::Specific(59)),
            ("3,1", FieldSpec::List(BTreeSet::from([1, 3]))),
            ("3,3,1,3", FieldSpec::List(BTreeSet::from([1, 3]))),
            ("4,4", FieldSpec::Specific(4)),
            ("2-5", FieldSpec::Range(2, 5)),
            ("5-5", FieldSpec::Range(5, 5)),
            ("*/10", FieldSpec::Step(10)),
            ("*/1", FieldSpec::Step(1)),
            ("*/90", FieldSpec::Step(90)),
            ("0-30/5", FieldSpec::StepRange(0, 30, 5)),
        ];

        for (token, expected) in test_cases {
            let spec = FieldSpec::parse(kind, token);
            assert!(spec.is_ok(), "kind = {kind:?}, token = {token}, error = {}", spec.err().unwrap());
            assert_eq!(spec.unwrap(), expected, "token = {token}");
        }
    }

    #[test]
    fn test_parse_valid_dows() {
        let test_cases = vec![
            ("*", FieldSpec::Any),
            ("0", FieldSpec::Specific(0)),
            ("7", FieldSpec::Specific(0)),
            ("6", FieldSpec::Specific(6)),
            ("1-5", FieldSpec::Range(1, 5)),
            ("0-7", FieldSpec::List(BTreeSet::from([0, 1, 2, 3, 4, 5, 6]))),
            ("5-7", FieldSpec::List(BTreeSet::from([0, 5, 6]))),
            ("7-7", FieldSpec::Range(0, 0)),
            ("0,7", FieldSpec::Specific(0)),
            ("1,3,7", FieldSpec::List(BTreeSet::from([0, 1, 3]))),
            ("*/2", FieldSpec::Step(2)),
            ("1-7/2", FieldSpec::StepRange(1, 7, 2)),
        ];

        for (token, expected) in test_cases {
            let spec = FieldSpec::parse(FieldKind::DayOfWeek, token);
            assert!(spec.is_ok(), "token = {token}, error = {}", spec.err().unwrap());
            assert_eq!(spec.unwrap(), expected, "token = {token}");
        }
    }

    #[rstest]
    #[case(FieldKind::Minute, "*/0")]
    #[case(FieldKind::Minute, "*/")]
    #[case(FieldKind::Minute, "*/-5")]
    #[case(FieldKind::Minute, "*/x")]
    #[case(FieldKind::Minute, "*/70000")]
    #[case(FieldKind::Hour, "1-5/0")]
    #[case(FieldKind::DayOfMonth, "*/1/2")]
    fn test_parse_invalid_step(#[case] kind: FieldKind, #[case] token: &str) {
        assert_eq!(
            FieldSpec::parse(kind, token),
            Err(CronError::InvalidStep {
                field: kind,
                raw: token.to_owned()
            })
        );
    }

    #[rstest]
    #[case(FieldKind::DayOfWeek, "5-1")]
    #[case(FieldKind::DayOfWeek, "0-8")]
    #[case(FieldKind::Hour, "20-24")]
    #[case(FieldKind::DayOfMonth, "0-5")]
    #[case(FieldKind::Month, "a-b")]
    #[case(FieldKind::Minute, "-5")]
    #[case(FieldKind::Minute, "5-")]
    #[case(FieldKind::Minute, "1-2-3")]
    #[case(FieldKind::Minute, "30-10/5")]
    fn test_parse_invalid_range(#[case] kind: FieldKind, #[case] token: &str) {
        assert_eq!(
            FieldSpec::parse(kind, token),
            Err(CronError::InvalidRange {
                field: kind,
                raw: token.to_owned()
            })
        );
    }

    #[rstest]
    #[case(FieldKind::DayOfWeek, "8", "8")]
    #[case(FieldKind::Second, "60", "60")]
    #[case(FieldKind::Hour, "24", "24")]
    #[case(FieldKind::DayOfMonth, "0", "0")]
    #[case(FieldKind::DayOfMonth, "32", "32")]
    #[case(FieldKind::Month, "13", "13")]
    #[case(FieldKind::Month, "1,13", "13")]
    #[case(FieldKind::Minute, "99999999999999", "99999999999999")]
    fn test_parse_out_of_range(#[case] kind: FieldKind, #[case] token: &str, #[case] raw: &str) {
        assert_eq!(
            FieldSpec::parse(kind, token),
            Err(CronError::ValueOutOfRange {
                field: kind,
                raw: raw.to_owned(),
                domain: kind.domain()
            })
        );
    }

    #[rstest]
    #[case(FieldKind::Minute, "", "")]
    #[case(FieldKind::Minute, "x", "x")]
    #[case(FieldKind::Minute, "?", "?")]
    #[case(FieldKind::DayOfMonth, "L", "L")]
    #[case(FieldKind::DayOfMonth, "15W", "15W")]
    #[case(FieldKind::DayOfWeek, "MON", "MON")]
    #[case(FieldKind::DayOfWeek, "5#3", "5#3")]
    #[case(FieldKind::Minute, "1,,2", "")]
    #[case(FieldKind::Minute, "1,x", "x")]
    #[case(FieldKind::Minute, "5/10", "5/10")]
    #[case(FieldKind::Minute, "1,*/5", "1,*/5")]
    fn test_parse_unparsable(#[case] kind: FieldKind, #[case] token: &str, #[case] raw: &str) {
        assert_eq!(
            FieldSpec::parse(kind, token),
            Err(CronError::UnparsableToken {
                field: kind,
                raw: raw.to_owned()
            })
        );
    }

    #[test]
    fn test_list_with_range_item_is_rejected() {
        // The range rule wins over the list rule, so the whole token is a malformed range.
        assert!(matches!(
            FieldSpec::parse(FieldKind::Minute, "1,2-3"),
            Err(CronError::InvalidRange { .. })
        ));
    }

    #[rstest]
    #[case(FieldKind::Minute, "*/15", vec![0, 15, 30, 45])]
    #[case(FieldKind::Minute, "*/25", vec![0, 25, 50])]
    #[case(FieldKind::Hour, "*/7", vec![0, 7, 14, 21])]
    #[case(FieldKind::DayOfMonth, "*/10", vec![1, 11, 21, 31])]
    #[case(FieldKind::Month, "*/4", vec![1, 5, 9])]
    #[case(FieldKind::Month, "*/20", vec![1])]
    #[case(FieldKind::Minute, "10-40/15", vec![10, 25, 40])]
    #[case(FieldKind::Minute, "10-41/15", vec![10, 25, 40])]
    #[case(FieldKind::Hour, "9-17", vec![9, 10, 11, 12, 13, 14, 15, 16, 17])]
    #[case(FieldKind::DayOfWeek, "*/2", vec![0, 2, 4, 6])]
    #[case(FieldKind::DayOfWeek, "*/7", vec![0])]
    #[case(FieldKind::DayOfWeek, "1-7/2", vec![0, 1, 3, 5])]
    #[case(FieldKind::DayOfWeek, "*", vec![0, 1, 2, 3, 4, 5, 6])]
    #[case(FieldKind::DayOfWeek, "5-7", vec![0, 5, 6])]
    fn test_values(#[case] kind: FieldKind, #[case] token: &str, #[case] expected: Vec<u8>) {
        let spec = FieldSpec::parse(kind, token).unwrap();
        assert_eq!(spec.values(kind).into_iter().collect::<Vec<_>>(), expected, "token = {token}");
    }

    #[template]
    #[rstest]
    #[case("*")]
    #[case("*/1")]
    #[case("*/3")]
    #[case("*/7")]
    #[case("*/13")]
    #[case("*/100")]
    #[case("1")]
    #[case("7")]
    #[case("0-7")]
    #[case("1-12")]
    #[case("1-7/2")]
    #[case("1,5,7")]
    #[case("1-23/5")]
    fn tokens_to_check(#[case] token: &str) {}

    #[apply(tokens_to_check)]
    fn test_values_within_domain(#[case] token: &str) {
        for kind in FieldKind::ALL {
            let Ok(spec) = FieldSpec::parse(kind, token) else {
                continue;
            };
            let Domain { min, max } = kind.domain();
            let max = if kind == FieldKind::DayOfWeek { 6 } else { max };
            let values = spec.values(kind);
            assert!(!values.is_empty(), "kind = {kind:?}, token = {token}");
            assert!(
                values.iter().all(|v| (min..=max).contains(v)),
                "kind = {kind:?}, token = {token}, values = {values:?}"
            );
        }
    }

    #[apply(tokens_to_check)]
    fn test_display_reparses_to_same_spec(#[case] token: &str) {
        for kind in FieldKind::ALL {
            let Ok(spec) = FieldSpec::parse(kind, token) else {
                continue;
            };
            assert_eq!(
                FieldSpec::parse(kind, &spec.to_string()),
                Ok(spec.clone()),
                "kind = {kind:?}, token = {token}, display = {spec}"
            );
        }
    }

    #[test]
    fn test_display() {
        assert_eq!(FieldSpec::Any.to_string(), "*");
        assert_eq!(FieldSpec::Specific(5).to_string(), "5");
        assert_eq!(FieldSpec::List(BTreeSet::from([15, 1, 7])).to_string(), "1,7,15");
        assert_eq!(FieldSpec::Range(1, 5).to_string(), "1-5");
        assert_eq!(FieldSpec::Step(15).to_string(), "*/15");
        assert_eq!(FieldSpec::StepRange(10, 40, 5).to_string(), "10-40/5");
    }

    #[test]
    fn test_domains() {
        assert_eq!(FieldKind::Second.domain(), Domain { min: 0, max: 59 });
        assert_eq!(FieldKind::Hour.domain(), Domain { min: 0, max: 23 });
        assert_eq!(FieldKind::DayOfMonth.domain().to_string(), "1-31");
        assert_eq!(FieldKind::Month.domain().to_string(), "1-12");
        assert_eq!(FieldKind::DayOfWeek.domain().to_string(), "0-7");
    }
}
