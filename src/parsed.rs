use crate::{
    describe,
    field::{FieldKind, FieldSpec},
    occurrences::Occurrences,
    tokenizer, CronError, Result,
};
use chrono::{DateTime, TimeZone};
use std::{fmt::Display, str::FromStr};

/// Represents a validated cron expression.
///
/// For expression format and usage examples, please refer to the [crate documentation](crate).
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "String"))]
#[cfg_attr(feature = "serde", serde(into = "String"))]
pub struct ParsedCron {
    has_seconds: bool,
    second: FieldSpec,
    minute: FieldSpec,
    hour: FieldSpec,
    day_of_month: FieldSpec,
    month: FieldSpec,
    day_of_week: FieldSpec,
}

impl ParsedCron {
    /// Parses and validates provided `expression` and constructs [`ParsedCron`] instance.
    ///
    /// Fields are validated from left to right, the first invalid one is reported.
    ///
    /// Returns [`CronError`] in a case provided expression is unparsable or has format errors.
    pub fn new(expression: impl AsRef<str>) -> Result<Self> {
        let tokens = tokenizer::tokenize(expression.as_ref())?;

        let mut parsed = Self {
            has_seconds: tokens.has_seconds,
            second: FieldSpec::Specific(0),
            minute: FieldSpec::Any,
            hour: FieldSpec::Any,
            day_of_month: FieldSpec::Any,
            month: FieldSpec::Any,
            day_of_week: FieldSpec::Any,
        };

        for (kind, token) in tokens.fields {
            let spec = FieldSpec::parse(kind, token)?;
            match kind {
                FieldKind::Second => parsed.second = spec,
                FieldKind::Minute => parsed.minute = spec,
                FieldKind::Hour => parsed.hour = spec,
                FieldKind::DayOfMonth => parsed.day_of_month = spec,
                FieldKind::Month => parsed.month = spec,
                FieldKind::DayOfWeek => parsed.day_of_week = spec,
            }
        }

        Ok(parsed)
    }

    /// Returns `true` if the expression has seconds field.
    #[inline]
    pub fn has_seconds(&self) -> bool {
        self.has_seconds
    }

    /// Returns the rule of specified field.
    ///
    /// Seconds rule is `0` if the expression has no seconds field.
    pub fn field(&self, kind: FieldKind) -> &FieldSpec {
        match kind {
            FieldKind::Second => &self.second,
            FieldKind::Minute => &self.minute,
            FieldKind::Hour => &self.hour,
            FieldKind::DayOfMonth => &self.day_of_month,
            FieldKind::Month => &self.month,
            FieldKind::DayOfWeek => &self.day_of_week,
        }
    }

    /// Seconds rule.
    #[inline]
    pub fn second(&self) -> &FieldSpec {
        &self.second
    }

    /// Minutes rule.
    #[inline]
    pub fn minute(&self) -> &FieldSpec {
        &self.minute
    }

    /// Hours rule.
    #[inline]
    pub fn hour(&self) -> &FieldSpec {
        &self.hour
    }

    /// Day of month rule.
    #[inline]
    pub fn day_of_month(&self) -> &FieldSpec {
        &self.day_of_month
    }

    /// Month rule.
    #[inline]
    pub fn month(&self) -> &FieldSpec {
        &self.month
    }

    /// Day of week rule, values are within `0-6`.
    #[inline]
    pub fn day_of_week(&self) -> &FieldSpec {
        &self.day_of_week
    }

    /// Returns human-readable description of the schedule.
    #[inline]
    pub fn describe(&self) -> String {
        describe::describe(self)
    }

    /// Returns lazy iterator of occurrences strictly after `from`.
    ///
    /// Occurrences are calculated in the wall-clock calendar of the `from` timezone.
    #[inline]
    pub fn occurrences<Tz: TimeZone>(&self, from: &DateTime<Tz>) -> Occurrences<Tz> {
        Occurrences::new(self, from)
    }

    /// Returns time of the first occurrence strictly after `from`.
    ///
    /// Returns `None` if there is no occurrence within the default search horizon.
    #[inline]
    pub fn upcoming<Tz: TimeZone>(&self, from: &DateTime<Tz>) -> Option<DateTime<Tz>> {
        self.occurrences(from).next()
    }
}

impl From<ParsedCron> for String {
    fn from(value: ParsedCron) -> Self {
        value.to_string()
    }
}

impl From<&ParsedCron> for String {
    fn from(value: &ParsedCron) -> Self {
        value.to_string()
    }
}

impl TryFrom<String> for ParsedCron {
    type Error = CronError;

    fn try_from(value: String) -> Result<Self> {
        Self::new(value)
    }
}

impl TryFrom<&String> for ParsedCron {
    type Error = CronError;

    fn try_from(value: &String) -> Result<Self> {
        Self::new(value)
    }
}

impl TryFrom<&str> for ParsedCron {
    type Error = CronError;

    fn try_from(value: &str) -> Result<Self> {
        Self::new(value)
    }
}

impl FromStr for ParsedCron {
    type Err = CronError;

    fn from_str(s: &str) -> Result<Self> {
        Self::new(s)
    }
}

impl Display for ParsedCron {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.has_seconds {
            write!(f, "{} ", self.second)?;
        }
        write!(
            f,
            "{} {} {} {} {}",
            self.minute, self.hour, self.day_of_month, self.month, self.day_of_week
        )
    }
}
