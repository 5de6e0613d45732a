use chrono::{NaiveDate, NaiveDateTime, Timelike};

use crate::{core::timestamp, quantity::price::MegawattHourPrice};

/// Price row as provided by a source, the timestamp not yet parsed.
#[derive(Clone, Debug, PartialEq)]
pub struct PriceRow {
    pub timestamp: String,
    pub geography: String,
    pub price: MegawattHourPrice,
}

impl PriceRow {
    pub fn new(
        timestamp: impl Into<String>,
        geography: impl Into<String>,
        price: impl Into<MegawattHourPrice>,
    ) -> Self {
        Self { timestamp: timestamp.into(), geography: geography.into(), price: price.into() }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct HourlyPriceRecord {
    pub timestamp: NaiveDateTime,
    pub geography: String,
    pub price: MegawattHourPrice,
}

impl HourlyPriceRecord {
    /// Parse the row timestamp, `None` if it is not a recognised date-time.
    #[must_use]
    pub fn parse(row: PriceRow) -> Option<Self> {
        let timestamp = timestamp::parse_local(&row.timestamp)?;
        Some(Self { timestamp, geography: row.geography, price: row.price })
    }

    #[must_use]
    pub fn bucket(&self) -> HourBucket {
        HourBucket { day: self.timestamp.date(), hour: self.timestamp.hour() }
    }
}

/// Calendar hour a reading belongs to.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct HourBucket {
    pub day: NaiveDate,
    pub hour: u32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_ok() {
        let record =
            HourlyPriceRecord::parse(PriceRow::new("2025-04-01T07:15:00+02:00", "ES", 55.0)).unwrap();
        assert_eq!(record.geography, "ES");
        assert_eq!(record.price, MegawattHourPrice(55.0));
        let bucket = record.bucket();
        assert_eq!(bucket.day, NaiveDate::from_ymd_opt(2025, 4, 1).unwrap());
        assert_eq!(bucket.hour, 7);
    }

    #[test]
    fn test_parse_invalid() {
        assert!(HourlyPriceRecord::parse(PriceRow::new("n/a", "ES", 55.0)).is_none());
    }
}
