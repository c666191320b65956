use crate::period::Period;
use chrono::NaiveDate;
use std::fmt;

/// An immutable dated record: a birthday, anniversary or milestone.
///
/// Events are stored as single rows in `events.csv`. The `date` is a plain
/// calendar date with no time of day or zone. Fields are private; once
/// constructed an event never changes.
///
/// # Examples
///
/// ```
/// use chrono::NaiveDate;
/// use days::Event;
///
/// let date = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap();
/// let event = Event::new(date, "birthday", "Alice");
/// assert_eq!(event.category(), "birthday");
/// assert_eq!(event.to_string(), "2024-03-01: Alice (birthday)");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Event {
    date: NaiveDate,
    category: String,
    description: String,
}

impl Event {
    /// Create a new event.
    ///
    /// The date is already a valid calendar date by construction; textual
    /// dates are checked while loading, never here.
    pub fn new(
        date: NaiveDate,
        category: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Event {
            date,
            category: category.into(),
            description: description.into(),
        }
    }

    /// The calendar date of the event.
    pub fn date(&self) -> NaiveDate {
        self.date
    }

    /// The classification label, e.g. `"birthday"`.
    pub fn category(&self) -> &str {
        &self.category
    }

    /// Free-form text describing the event.
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Describe the gap between `reference` and `event_date` in words.
    ///
    /// Returns `"today"` when the dates match. Otherwise lists the non-zero
    /// years, months and days (absolute values, in that order), followed by
    /// `"ago"` for past dates or preceded by `"in "` for future ones.
    ///
    /// # Examples
    ///
    /// ```
    /// use chrono::NaiveDate;
    /// use days::Event;
    ///
    /// let today = NaiveDate::from_ymd_opt(2024, 5, 4).unwrap();
    /// let past = NaiveDate::from_ymd_opt(2023, 3, 1).unwrap();
    /// let soon = NaiveDate::from_ymd_opt(2024, 5, 14).unwrap();
    ///
    /// assert_eq!(Event::difference_description(today, today), "today");
    /// assert_eq!(
    ///     Event::difference_description(today, past),
    ///     "1 years 2 months 3 days ago"
    /// );
    /// assert_eq!(Event::difference_description(today, soon), "in 10 days ");
    /// ```
    pub fn difference_description(reference: NaiveDate, event_date: NaiveDate) -> String {
        let period = Period::between(event_date, reference);
        if period.is_zero() {
            return "today".to_string();
        }

        let mut parts = String::new();
        for (n, unit) in [
            (period.years, "years"),
            (period.months, "months"),
            (period.days, "days"),
        ] {
            if n != 0 {
                parts.push_str(&format!("{} {unit} ", n.unsigned_abs()));
            }
        }

        if period.is_negative() {
            format!("in {parts}")
        } else {
            format!("{parts}ago")
        }
    }

    /// [`Event::difference_description`] for this event's own date.
    pub fn difference_from(&self, reference: NaiveDate) -> String {
        Self::difference_description(reference, self.date)
    }
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {} ({})", self.date, self.description, self.category)
    }
}
