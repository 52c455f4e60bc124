//! Cron expression parser, describer and occurrences calculator.
#![deny(unsafe_code, warnings, missing_docs)]

//! This crate is intended to:
//! - parse and validate standard 5- or 6-fields cron expressions;
//! - describe them in a human-readable way;
//! - calculate future occurrences according to the schedule.
//!
//! _This is not a cron jobs scheduler or runner._ It doesn't persist schedules and doesn't run anything.
//!
//! ## Cron expression format
//!
//! The traditional expression has 5 fields: minutes, hours, days of month, months and days of week.
//! An optional _seconds_ field may be prepended, i.e. 6-fields expression starts with seconds.
//! If _seconds_ is absent, `0` is used.
//!
//! | Field        | Required | Allowed values  | Allowed special characters |
//! |--------------|----------|-----------------|----------------------------|
//! | Seconds      | No       | 0-59            | * , - /                    |
//! | Minutes      | Yes      | 0-59            | * , - /                    |
//! | Hours        | Yes      | 0-23            | * , - /                    |
//! | Day of Month | Yes      | 1-31            | * , - /                    |
//! | Month        | Yes      | 1-12            | * , - /                    |
//! | Day of Week  | Yes      | 0-7             | * , - /                    |
//!
//! Both `0` and `7` mean Sunday in the day of week field.
//!
//! Patterns meanings:
//! - `*` - each possible value, i.e. `0,1,2,...,59` for minutes;
//! - `,` - list of values, i.e. `1,7,12`; list items are plain numbers only;
//! - `-` - range of values, i.e. `0-15`;
//! - `/` - repeating values, i.e. `*/12` or `30-59/2`.
//!
//! If both day of month and day of week are restricted (not `*`),
//! a day matches if it satisfies _any_ of them, like POSIX cron does:
//! `0 0 1 * 1` fires on the 1st of each month and on each Monday.
//!
//! ## How to use
//!
//! The crate root provides three functions:
//! - [parse()]: parses and validates the expression;
//! - [describe()]: returns a human-readable description;
//! - [next_occurrences()]: returns the list of upcoming occurrences.
//!
//! The same functionality is available via [`ParsedCron`] methods,
//! including the lazy [`Occurrences`] iterator.
//!
//! ```rust
//! use chrono::{TimeZone, Utc};
//! use cron_lens::Result;
//!
//! fn every_quarter_of_hour() -> Result<()> {
//!     let cron = cron_lens::parse("*/15 * * * *")?;
//!     assert_eq!(cron_lens::describe(&cron), "Every 15 minutes");
//!
//!     let from = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
//!     let next = cron_lens::next_occurrences(&cron, &from, 2);
//!     assert_eq!(
//!         next,
//!         vec![
//!             Utc.with_ymd_and_hms(2024, 1, 1, 0, 15, 0).unwrap(),
//!             Utc.with_ymd_and_hms(2024, 1, 1, 0, 30, 0).unwrap(),
//!         ]
//!     );
//!
//!     Ok(())
//! }
//! # every_quarter_of_hour().unwrap();
//! ```
//!
//! ### Timezones
//! Occurrences are calculated in the wall-clock calendar of the timezone of the `from` value,
//! and returned in the same timezone. Nonexistent local times (DST gaps) are skipped.
//!
//! ### Search horizon
//! The search of each next occurrence goes no more than [`DEFAULT_MONTH_HORIZON`] months ahead,
//! so a schedule which can't ever fire, like `0 0 30 2 *`, produces an empty series.
//!
//! # Feature flags
//! * `serde`: adds [`Serialize`](https://docs.rs/serde/latest/serde/trait.Serialize.html) and [`Deserialize`](https://docs.rs/serde/latest/serde/trait.Deserialize.html) trait implementation for [`ParsedCron`].

mod calendar;
mod describe;
/// Crate specific Error implementation.
pub mod error;
/// Field kinds and parsed field rules.
pub mod field;
/// Lazy occurrences series.
pub mod occurrences;
/// Validated cron expression.
pub mod parsed;
mod tokenizer;

// Re-export of public entities.
pub use error::CronError;
pub use field::{Domain, FieldKind, FieldSpec};
pub use occurrences::{Occurrences, DEFAULT_MONTH_HORIZON};
pub use parsed::ParsedCron;

use chrono::{DateTime, TimeZone};
use tracing::debug;

/// Convenient alias for `Result`.
pub type Result<T, E = CronError> = std::result::Result<T, E>;

/// Parses and validates cron expression.
pub fn parse(text: &str) -> Result<ParsedCron> {
    ParsedCron::new(text).inspect_err(|error| debug!(text, %error, "unable to parse cron expression"))
}

/// Returns human-readable description of the parsed expression.
pub fn describe(parsed: &ParsedCron) -> String {
    parsed.describe()
}

/// Returns up to `count` occurrences strictly after `from`, in ascending order.
///
/// Shorter result means there are no more occurrences within the search horizon.
pub fn next_occurrences<Tz: TimeZone>(parsed: &ParsedCron, from: &DateTime<Tz>, count: usize) -> Vec<DateTime<Tz>> {
    parsed.occurrences(from).take(count).collect()
}
