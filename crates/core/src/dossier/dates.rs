//! Elapsed-time and deadline helpers shown alongside dossier status.
//!
//! Every function takes `now` explicitly; the `*_now` variants read the wall
//! clock. Absent dates yield sentinels instead of errors.

use chrono::Utc;
use serde::Serialize;

use crate::types::Timestamp;

const MS_PER_DAY: i64 = 86_400_000;

/// A deadline is "approaching" when it falls within this many days.
pub const DEADLINE_WARNING_DAYS: i64 = 7;

/// Whole days until a date, or `Never` when there is no date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "days", rename_all = "snake_case")]
pub enum DaysUntil {
    /// Days remaining, rounded up. Negative once the date has passed.
    Days(i64),
    /// No date set; treated as infinitely far away.
    Never,
}

impl DaysUntil {
    pub fn days(self) -> Option<i64> {
        match self {
            DaysUntil::Days(n) => Some(n),
            DaysUntil::Never => None,
        }
    }
}

/// Whole days elapsed since `date` (rounded down). `None` and future dates give 0.
pub fn days_since(date: Option<Timestamp>, now: Timestamp) -> i64 {
    match date {
        Some(d) => ((now - d).num_milliseconds().max(0)) / MS_PER_DAY,
        None => 0,
    }
}

pub fn days_since_now(date: Option<Timestamp>) -> i64 {
    days_since(date, Utc::now())
}

/// Days until `date`, rounded up so that a deadline later today counts as 1.
pub fn days_until(date: Option<Timestamp>, now: Timestamp) -> DaysUntil {
    let Some(d) = date else {
        return DaysUntil::Never;
    };
    let ms = (d - now).num_milliseconds();
    let whole = ms.div_euclid(MS_PER_DAY);
    let days = if ms.rem_euclid(MS_PER_DAY) > 0 {
        whole + 1
    } else {
        whole
    };
    DaysUntil::Days(days)
}

pub fn days_until_now(date: Option<Timestamp>) -> DaysUntil {
    days_until(date, Utc::now())
}

/// `true` iff the deadline is between today and [`DEADLINE_WARNING_DAYS`] days out.
pub fn is_deadline_approaching(days: DaysUntil) -> bool {
    match days {
        DaysUntil::Days(n) => (0..=DEADLINE_WARNING_DAYS).contains(&n),
        DaysUntil::Never => false,
    }
}

/// Short French relative-time string for activity feeds.
pub fn format_relative_time(date: Option<Timestamp>, now: Timestamp) -> String {
    let Some(d) = date else {
        return "jamais".to_string();
    };

    let elapsed = now - d;
    let minutes = elapsed.num_minutes();
    let hours = elapsed.num_hours();
    let days = elapsed.num_days();

    if minutes < 1 {
        "à l'instant".to_string()
    } else if hours < 1 {
        format!("il y a {minutes} min")
    } else if days < 1 {
        format!("il y a {hours} h")
    } else if days < 7 {
        let unit = if days == 1 { "jour" } else { "jours" };
        format!("il y a {days} {unit}")
    } else {
        d.format("%d/%m/%Y").to_string()
    }
}

pub fn format_relative_time_now(date: Option<Timestamp>) -> String {
    format_relative_time(date, Utc::now())
}
