use std::fmt::{Debug, Formatter};

use chrono::{Days, NaiveDate, NaiveDateTime, NaiveTime};

/// Calendar date range, both ends inclusive.
#[derive(Copy, Clone, Eq, PartialEq)]
#[must_use]
pub struct Period {
    pub start: NaiveDate,

    /// Inclusive, the whole day belongs to the period.
    pub end: NaiveDate,
}

impl Debug for Period {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}..={}", self.start, self.end)
    }
}

impl Period {
    pub const fn new(start: NaiveDate, end: NaiveDate) -> Self {
        Self { start, end }
    }

    /// Start of the period, inclusive.
    #[must_use]
    pub fn start_time(self) -> NaiveDateTime {
        self.start.and_time(NaiveTime::MIN)
    }

    /// Midnight after the last day, exclusive. `None` at the end of the calendar.
    #[must_use]
    pub fn end_time(self) -> Option<NaiveDateTime> {
        self.end.checked_add_days(Days::new(1)).map(|date| date.and_time(NaiveTime::MIN))
    }

    #[must_use]
    pub fn contains(self, timestamp: NaiveDateTime) -> bool {
        (self.start_time() <= timestamp) && self.end_time().is_none_or(|end| timestamp < end)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 1, d).unwrap()
    }

    #[test]
    fn test_contains() {
        let period = Period::new(date(2), date(3));
        assert!(!period.contains(date(1).and_hms_opt(23, 59, 59).unwrap()));
        assert!(period.contains(date(2).and_hms_opt(0, 0, 0).unwrap()));
        assert!(period.contains(date(3).and_hms_opt(23, 0, 0).unwrap()));
        assert!(!period.contains(date(4).and_hms_opt(0, 0, 0).unwrap()));
    }

    #[test]
    fn test_single_day() {
        let period = Period::new(date(5), date(5));
        assert!(period.contains(date(5).and_hms_opt(12, 0, 0).unwrap()));
        assert!(!period.contains(date(6).and_hms_opt(0, 0, 0).unwrap()));
    }

    #[test]
    fn test_end_time() {
        let period = Period::new(date(2), date(31));
        assert_eq!(
            period.end_time(),
            Some(NaiveDate::from_ymd_opt(2025, 2, 1).unwrap().and_hms_opt(0, 0, 0).unwrap()),
        );
    }
}
