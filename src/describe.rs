//! Human-readable description of the parsed expression.
use crate::{
    field::{FieldKind, FieldSpec},
    ParsedCron,
};

const MONTHS: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];
const DAYS_OF_WEEK: [&str; 7] = ["Sunday", "Monday", "Tuesday", "Wednesday", "Thursday", "Friday", "Saturday"];

pub(crate) fn describe(cron: &ParsedCron) -> String {
    let clauses = [Some(time_clause(cron)), month_clause(cron.month()), day_clause(cron)];
    let sentence = clauses.into_iter().flatten().collect::<Vec<_>>().join(" ");
    capitalize(&sentence)
}

fn time_clause(cron: &ParsedCron) -> String {
    let second = cron.second();

    if let (FieldSpec::Specific(hour), FieldSpec::Specific(minute)) = (cron.hour(), cron.minute()) {
        return match (cron.has_seconds(), second) {
            (false, _) => format!("at {hour:02}:{minute:02}"),
            (true, FieldSpec::Specific(second)) => format!("at {hour:02}:{minute:02}:{second:02}"),
            (true, second) => format!("{}, at {hour:02}:{minute:02}", seconds_phrase(second)),
        };
    }

    let mut parts = vec![];
    if cron.has_seconds() && second != &FieldSpec::Specific(0) {
        parts.push(seconds_phrase(second));
    } else if cron.minute().is_any() {
        parts.push("every minute".to_owned());
    }
    parts.extend(unit_phrase(FieldKind::Minute, cron.minute()));
    parts.extend(unit_phrase(FieldKind::Hour, cron.hour()));

    parts.join(", ")
}

fn seconds_phrase(second: &FieldSpec) -> String {
    unit_phrase(FieldKind::Second, second).unwrap_or_else(|| "every second".to_owned())
}

/// Phrase for one of the time of the day fields, `None` if the field isn't restricted.
fn unit_phrase(kind: FieldKind, spec: &FieldSpec) -> Option<String> {
    let unit = kind.to_string();
    let phrase = match spec {
        FieldSpec::Any => return None,
        FieldSpec::Specific(value) => format!("at {unit} {value}"),
        FieldSpec::List(values) => format!("at {unit}s {}", join_words(values.iter().map(u8::to_string))),
        FieldSpec::Range(lo, hi) => format!("every {unit} from {lo} through {hi}"),
        FieldSpec::Step(step) => every(*step, &unit),
        FieldSpec::StepRange(lo, hi, step) => format!("{} from {lo} through {hi}", every(*step, &unit)),
    };
    Some(phrase)
}

fn month_clause(spec: &FieldSpec) -> Option<String> {
    let name = |month: &u8| MONTHS[(*month - 1) as usize];
    let phrase = match spec {
        FieldSpec::Any => return None,
        FieldSpec::Specific(month) => format!("in {}", name(month)),
        FieldSpec::List(months) => format!("in {}", join_words(months.iter().map(name))),
        FieldSpec::Range(lo, hi) => format!("from {} through {}", name(lo), name(hi)),
        FieldSpec::Step(step) => every(*step, "month"),
        FieldSpec::StepRange(lo, hi, step) => {
            format!("{} from {} through {}", every(*step, "month"), name(lo), name(hi))
        }
    };
    Some(phrase)
}

/// Restricted day of month and day of week are independent conditions, any of them matches a day.
fn day_clause(cron: &ParsedCron) -> Option<String> {
    match (dom_phrase(cron.day_of_month()), dow_phrase(cron.day_of_week())) {
        (Some(dom), Some(dow)) => Some(format!("{dom} or {dow}")),
        (dom, dow) => dom.or(dow),
    }
}

fn dom_phrase(spec: &FieldSpec) -> Option<String> {
    let phrase = match spec {
        FieldSpec::Any => return None,
        FieldSpec::Specific(day) => format!("on day {day} of the month"),
        FieldSpec::List(days) => format!(
            "on days {} of the month",
            join_words(days.iter().map(u8::to_string))
        ),
        FieldSpec::Range(lo, hi) => format!("on days {lo} through {hi} of the month"),
        FieldSpec::Step(step) => every(*step, "day"),
        FieldSpec::StepRange(lo, hi, step) => {
            format!("{} from day {lo} through {hi} of the month", every(*step, "day"))
        }
    };
    Some(phrase)
}

fn dow_phrase(spec: &FieldSpec) -> Option<String> {
    let name = |dow: &u8| DAYS_OF_WEEK[(*dow % 7) as usize];
    let phrase = match spec {
        FieldSpec::Any => return None,
        FieldSpec::Specific(dow) => format!("on {}", name(dow)),
        FieldSpec::Range(lo, hi) => format!("on {} through {}", name(lo), name(hi)),
        FieldSpec::List(_) | FieldSpec::Step(_) | FieldSpec::StepRange(..) => format!(
            "on {}",
            join_words(spec.values(FieldKind::DayOfWeek).iter().map(name))
        ),
    };
    Some(phrase)
}

fn every(step: u16, unit: &str) -> String {
    if step == 1 {
        format!("every {unit}")
    } else {
        format!("every {step} {unit}s")
    }
}

/// Joins words as `a, b and c`.
fn join_words<T: AsRef<str>>(words: impl IntoIterator<Item = T>) -> String {
    let words: Vec<T> = words.into_iter().collect();
    match words.split_last() {
        None => String::new(),
        Some((last, [])) => last.as_ref().to_owned(),
        Some((last, rest)) => format!(
            "{} and {}",
            rest.iter().map(|word| word.as_ref()).collect::<Vec<&str>>().join(", "),
            last.as_ref()
        ),
    }
}

fn capitalize(input: &str) -> String {
    let mut chars = input.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
