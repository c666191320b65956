//! Calendar period arithmetic between two dates.

use chrono::{Datelike, Months, NaiveDate};

/// A signed calendar gap decomposed into years, months and days.
///
/// All three components carry the same sign: a period from a later date to
/// an earlier one is negative throughout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Period {
    pub years: i32,
    pub months: i32,
    pub days: i32,
}

impl Period {
    /// Compute the period from `start` to `end`, largest unit first.
    ///
    /// Months are counted first, then days. When the day difference would
    /// have the opposite sign of the month difference, one month is
    /// borrowed and the days are measured again.
    ///
    /// # Examples
    ///
    /// ```
    /// use chrono::NaiveDate;
    /// use days::Period;
    ///
    /// let start = NaiveDate::from_ymd_opt(2023, 3, 1).unwrap();
    /// let end = NaiveDate::from_ymd_opt(2024, 5, 4).unwrap();
    /// let p = Period::between(start, end);
    /// assert_eq!((p.years, p.months, p.days), (1, 2, 3));
    /// ```
    pub fn between(start: NaiveDate, end: NaiveDate) -> Self {
        let mut total_months = proleptic_month(end) - proleptic_month(start);
        let mut days = i64::from(end.day()) - i64::from(start.day());

        if total_months > 0 && days < 0 {
            total_months -= 1;
            let anchor = u32::try_from(total_months)
                .ok()
                .and_then(|m| start.checked_add_months(Months::new(m)))
                .unwrap_or(start);
            days = (end - anchor).num_days();
        } else if total_months < 0 && days > 0 {
            total_months += 1;
            days -= i64::from(days_in_month(end));
        }

        Period {
            years: (total_months / 12) as i32,
            months: (total_months % 12) as i32,
            days: days as i32,
        }
    }

    /// True when every component is zero.
    pub fn is_zero(&self) -> bool {
        self.years == 0 && self.months == 0 && self.days == 0
    }

    /// True when any component is negative.
    pub fn is_negative(&self) -> bool {
        self.years < 0 || self.months < 0 || self.days < 0
    }
}

fn proleptic_month(date: NaiveDate) -> i64 {
    i64::from(date.year()) * 12 + i64::from(date.month0())
}

fn days_in_month(date: NaiveDate) -> u32 {
    let first = date.with_day(1).unwrap_or(date);
    match first.checked_add_months(Months::new(1)) {
        Some(next) => (next - first).num_days() as u32,
        // December of the last representable year
        None => 31,
    }
}
