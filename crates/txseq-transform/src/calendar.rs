//! Compact date parsing and calendar field derivation.
//!
//! Transaction dates are six-digit `yyMMdd` values. Two-digit years 69–99
//! map to 1969–1999 and 00–68 to 2000–2068.
//!
//! Derived fields are folded by their period so the maximal value wraps to
//! 0 (December is month 0, day 31 is day 0).

use chrono::{Datelike, Months, NaiveDate};
use polars::prelude::*;

/// Two-digit years at or above this value belong to the 1900s.
pub const CENTURY_PIVOT: u32 = 69;

/// `NaiveDate::num_days_from_ce` of 1970-01-01, the origin of polars dates.
const UNIX_EPOCH_DAYS_FROM_CE: i32 = 719_163;

/// Calendar fields derived from one transaction date.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CalendarFields {
    /// `month mod 12`, in `[0, 11]`.
    pub month: u32,
    /// `day mod 31`, in `[0, 30]`.
    pub day: u32,
    /// Weekday with Monday = 0, in `[0, 6]`.
    pub dow: u32,
    /// `(days_in_month - day) mod 31`, in `[0, 30]`.
    pub dtme: u32,
    pub year: i32,
}

/// Parses a `yyMMdd` date.
///
/// Returns `None` unless the value is exactly six ASCII digits naming a real
/// calendar date.
///
/// # Examples
///
/// ```
/// use chrono::NaiveDate;
/// use txseq_transform::calendar::parse_compact_date;
///
/// assert_eq!(parse_compact_date("930101"), NaiveDate::from_ymd_opt(1993, 1, 1));
/// assert_eq!(parse_compact_date("050228"), NaiveDate::from_ymd_opt(2005, 2, 28));
/// assert_eq!(parse_compact_date("930230"), None);
/// ```
pub fn parse_compact_date(value: &str) -> Option<NaiveDate> {
    let trimmed = value.trim();
    if trimmed.len() != 6 || !trimmed.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    let yy: u32 = trimmed[0..2].parse().ok()?;
    let month: u32 = trimmed[2..4].parse().ok()?;
    let day: u32 = trimmed[4..6].parse().ok()?;
    let century = if yy >= CENTURY_PIVOT { 1900 } else { 2000 };
    NaiveDate::from_ymd_opt(century + yy as i32, month, day)
}

/// Number of days in the month containing `date`.
pub fn days_in_month(date: NaiveDate) -> Option<u32> {
    let first = date.with_day(1)?;
    let next = first.checked_add_months(Months::new(1))?;
    u32::try_from((next - first).num_days()).ok()
}

/// Derives the folded calendar fields for `date`.
pub fn calendar_fields(date: NaiveDate) -> Option<CalendarFields> {
    let day_of_month = date.day();
    Some(CalendarFields {
        month: date.month() % 12,
        day: day_of_month % 31,
        dow: date.weekday().num_days_from_monday() % 7,
        dtme: (days_in_month(date)? - day_of_month) % 31,
        year: date.year(),
    })
}

/// Days since 1970-01-01, the physical value of a polars `Date`.
pub fn epoch_days(date: NaiveDate) -> i32 {
    date.num_days_from_ce() - UNIX_EPOCH_DAYS_FROM_CE
}

pub fn date_from_epoch_days(days: i32) -> Option<NaiveDate> {
    NaiveDate::from_num_days_from_ce_opt(days.checked_add(UNIX_EPOCH_DAYS_FROM_CE)?)
}

/// Builds the `datetime`, `month`, `day`, `dow`, `year` and `dtme` columns.
pub fn calendar_columns(rows: &[(NaiveDate, CalendarFields)]) -> PolarsResult<Vec<Column>> {
    let folded = |name: &str, field: fn(&CalendarFields) -> u32| {
        Series::new(
            name.into(),
            rows.iter().map(|(_, fields)| field(fields)).collect::<Vec<u32>>(),
        )
        .into_column()
    };
    let days: Vec<i32> = rows.iter().map(|(date, _)| epoch_days(*date)).collect();
    let years: Vec<i32> = rows.iter().map(|(_, fields)| fields.year).collect();

    Ok(vec![
        Series::new("datetime".into(), days)
            .cast(&DataType::Date)?
            .into_column(),
        folded("month", |f| f.month),
        folded("day", |f| f.day),
        folded("dow", |f| f.dow),
        Series::new("year".into(), years).into_column(),
        folded("dtme", |f| f.dtme),
    ])
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn century_pivot() {
        assert_eq!(parse_compact_date("690101"), Some(ymd(1969, 1, 1)));
        assert_eq!(parse_compact_date("680101"), Some(ymd(2068, 1, 1)));
        assert_eq!(parse_compact_date("991231"), Some(ymd(1999, 12, 31)));
    }

    #[test]
    fn rejects_malformed_dates() {
        assert_eq!(parse_compact_date(""), None);
        assert_eq!(parse_compact_date("93011"), None);
        assert_eq!(parse_compact_date("1993-01-01"), None);
        assert_eq!(parse_compact_date("931301"), None);
        assert_eq!(parse_compact_date("9301O1"), None);
    }

    #[test]
    fn month_lengths() {
        assert_eq!(days_in_month(ymd(1993, 1, 15)), Some(31));
        assert_eq!(days_in_month(ymd(1993, 2, 1)), Some(28));
        assert_eq!(days_in_month(ymd(1996, 2, 29)), Some(29));
        assert_eq!(days_in_month(ymd(1993, 4, 30)), Some(30));
        assert_eq!(days_in_month(ymd(1993, 12, 31)), Some(31));
    }

    #[test]
    fn new_year_1993() {
        let fields = calendar_fields(ymd(1993, 1, 1)).unwrap();
        assert_eq!(fields.month, 1);
        assert_eq!(fields.day, 1);
        assert_eq!(fields.dow, 4); // Friday
        assert_eq!(fields.dtme, 30);
        assert_eq!(fields.year, 1993);
    }

    #[test]
    fn maximal_values_fold_to_zero() {
        let fields = calendar_fields(ymd(1993, 12, 31)).unwrap();
        assert_eq!(fields.month, 0);
        assert_eq!(fields.day, 0);
        assert_eq!(fields.dtme, 0);
        // Sunday
        assert_eq!(calendar_fields(ymd(1993, 1, 3)).unwrap().dow, 6);
    }

    #[test]
    fn epoch_day_conversion() {
        assert_eq!(epoch_days(ymd(1970, 1, 1)), 0);
        assert_eq!(epoch_days(ymd(1969, 12, 31)), -1);
        assert_eq!(epoch_days(ymd(1993, 1, 1)), 8401);
        assert_eq!(date_from_epoch_days(8401), Some(ymd(1993, 1, 1)));
    }

    #[test]
    fn builds_typed_calendar_columns() {
        let date = ymd(1993, 12, 31);
        let columns = calendar_columns(&[(date, calendar_fields(date).unwrap())]).unwrap();
        let names: Vec<&str> = columns.iter().map(|c| c.name().as_str()).collect();
        assert_eq!(names, ["datetime", "month", "day", "dow", "year", "dtme"]);
        assert_eq!(columns[0].dtype(), &DataType::Date);
        assert_eq!(columns[1].u32().unwrap().get(0), Some(0));
        assert_eq!(columns[4].i32().unwrap().get(0), Some(1993));
    }
}
