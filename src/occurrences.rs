use crate::{
    calendar::{self, Cursor},
    field::FieldKind,
    ParsedCron,
};
use chrono::{DateTime, LocalResult, NaiveDateTime, TimeZone};
use std::collections::BTreeSet;
use tracing::{debug, trace};

/// Default number of months the search for a single occurrence may go ahead.
pub const DEFAULT_MONTH_HORIZON: u32 = 60;

/// Lazy, strictly increasing series of schedule occurrences.
///
/// Constructed by [`ParsedCron::occurrences`]. The iterator ends when no occurrence is found
/// within the search horizon, which is not an error: the schedule may have no more occurrences,
/// like `0 0 30 2 *`, or the next one may be too far away.
#[derive(Debug, Clone)]
pub struct Occurrences<Tz: TimeZone> {
    fields: FieldSets,
    timezone: Tz,
    horizon: u32,
    origin: (Cursor, DateTime<Tz>),
    cursor: Option<Cursor>,
    floor: DateTime<Tz>,
}

impl<Tz: TimeZone> Occurrences<Tz> {
    pub(crate) fn new(cron: &ParsedCron, from: &DateTime<Tz>) -> Self {
        let fields = FieldSets::new(cron);
        let mut start = Cursor::from_naive(&from.naive_local());
        if fields.has_seconds {
            start.next_second();
        } else {
            start.second = 0;
            start.next_minute();
        }

        Self {
            fields,
            timezone: from.timezone(),
            horizon: DEFAULT_MONTH_HORIZON,
            origin: (start, from.clone()),
            cursor: Some(start),
            floor: from.clone(),
        }
    }

    /// Sets number of months the search for a single occurrence may go ahead.
    pub fn with_month_horizon(mut self, months: u32) -> Self {
        self.horizon = months;
        self
    }

    /// Restarts the series from its very beginning.
    pub fn rewind(&mut self) {
        let (start, from) = &self.origin;
        self.cursor = Some(*start);
        self.floor = from.clone();
    }

    /// Maps wall-clock time to the instant later than previous one.
    ///
    /// Returns `None` for nonexistent local time.
    fn resolve(&self, local: &NaiveDateTime) -> Option<DateTime<Tz>> {
        let (earliest, latest) = match self.timezone.from_local_datetime(local) {
            LocalResult::Single(instant) => (instant.clone(), instant),
            LocalResult::Ambiguous(earliest, latest) => (earliest, latest),
            LocalResult::None => return None,
        };

        if earliest > self.floor {
            Some(earliest)
        } else if latest > self.floor {
            Some(latest)
        } else {
            None
        }
    }
}

impl<Tz: TimeZone> Iterator for Occurrences<Tz> {
    type Item = DateTime<Tz>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let start = self.cursor.take()?;
            let Some(found) = self.fields.search(start, self.horizon) else {
                debug!(horizon = self.horizon, "no occurrence found within the search horizon");
                return None;
            };
            let local = found.to_naive()?;

            let mut next = found;
            if self.fields.has_seconds {
                next.next_second();
            } else {
                next.next_minute();
            }
            self.cursor = Some(next);

            match self.resolve(&local) {
                Some(instant) => {
                    self.floor = instant.clone();
                    return Some(instant);
                }
                None => trace!(?local, "skipping nonexistent or already passed local time"),
            }
        }
    }
}

/// Materialized values of all fields.
#[derive(Debug, Clone, PartialEq, Eq)]
struct FieldSets {
    has_seconds: bool,
    seconds: BTreeSet<u8>,
    minutes: BTreeSet<u8>,
    hours: BTreeSet<u8>,
    days: Option<BTreeSet<u8>>,
    months: BTreeSet<u8>,
    weekdays: Option<BTreeSet<u8>>,
}

impl FieldSets {
    fn new(cron: &ParsedCron) -> Self {
        let values = |kind| cron.field(kind).values(kind);
        // unrestricted day field doesn't take part in matching
        let restricted = |kind| (!cron.field(kind).is_any()).then(|| values(kind));

        Self {
            has_seconds: cron.has_seconds(),
            seconds: values(FieldKind::Second),
            minutes: values(FieldKind::Minute),
            hours: values(FieldKind::Hour),
            days: restricted(FieldKind::DayOfMonth),
            months: values(FieldKind::Month),
            weekdays: restricted(FieldKind::DayOfWeek),
        }
    }

    /// Day matches if it satisfies any of restricted day fields.
    fn day_matches(&self, year: i32, month: u8, day: u8) -> bool {
        let dom = || self.days.as_ref().is_some_and(|days| days.contains(&day));
        let dow = || {
            self.weekdays
                .as_ref()
                .is_some_and(|weekdays| weekdays.contains(&calendar::day_of_week(year, month, day)))
        };

        match (&self.days, &self.weekdays) {
            (None, None) => true,
            (Some(_), None) => dom(),
            (None, Some(_)) => dow(),
            (Some(_), Some(_)) => dom() || dow(),
        }
    }

    /// Finds the first matching wall-clock time starting from `current` (inclusively),
    /// which is no more than `horizon` months ahead of it.
    fn search(&self, mut current: Cursor, horizon: u32) -> Option<Cursor> {
        let origin = current.month_index();

        loop {
            if current.month_index() - origin > horizon as i64 {
                return None;
            }

            if !self.months.contains(&current.month) {
                current.next_month();
                continue;
            }

            let last_day = current.days_in_month();
            match (current.day..=last_day).find(|day| self.day_matches(current.year, current.month, *day)) {
                None => {
                    current.next_month();
                    continue;
                }
                Some(day) if day != current.day => {
                    current.day = day;
                    current.reset_time();
                }
                Some(_) => {}
            }

            match least_from(&self.hours, current.hour) {
                None => {
                    current.next_day();
                    continue;
                }
                Some(hour) if hour != current.hour => {
                    current.hour = hour;
                    current.minute = 0;
                    current.second = 0;
                }
                Some(_) => {}
            }

            match least_from(&self.minutes, current.minute) {
                None => {
                    current.next_hour();
                    continue;
                }
                Some(minute) if minute != current.minute => {
                    current.minute = minute;
                    current.second = 0;
                }
                Some(_) => {}
            }

            match least_from(&self.seconds, current.second) {
                None => {
                    current.next_minute();
                    continue;
                }
                Some(second) => current.second = second,
            }

            return Some(current);
        }
    }
}

/// The smallest value of the set which isn't less than `start`.
#[inline]
fn least_from(values: &BTreeSet<u8>, start: u8) -> Option<u8> {
    values.range(start..).next().copied()
}
