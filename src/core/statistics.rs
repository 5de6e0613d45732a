use std::{
    collections::BTreeMap,
    fmt::{Display, Formatter},
};

use chrono::{Datelike, NaiveDate};
use itertools::Itertools;

use crate::{core::series::Aggregate, quantity::price::MegawattHourPrice};

/// Calendar month, formatted as `YYYY-MM`.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct YearMonth {
    pub year: i32,

    /// `1..=12`.
    pub month: u32,
}

impl From<NaiveDate> for YearMonth {
    fn from(date: NaiveDate) -> Self {
        Self { year: date.year(), month: date.month() }
    }
}

impl Display for YearMonth {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

#[must_use]
#[derive(Clone, Debug, PartialEq)]
pub struct DailyStatistics {
    pub day: NaiveDate,
    pub geography: String,

    /// Mean of the cheapest hourly averages of the day.
    pub cheapest_average: MegawattHourPrice,

    /// Mean of the most expensive hourly averages of the day.
    pub expensive_average: MegawattHourPrice,

    pub spread: MegawattHourPrice,

    /// Mean of all hourly averages of the day.
    pub price_average: MegawattHourPrice,

    /// Sample standard deviation of the hourly averages, `None` with fewer than two hours.
    pub volatility: Option<MegawattHourPrice>,
}

impl DailyStatistics {
    #[must_use]
    pub fn year(&self) -> i32 {
        self.day.year()
    }

    pub fn month(&self) -> YearMonth {
        self.day.into()
    }
}

#[must_use]
#[derive(Clone, Debug, PartialEq)]
pub struct MonthlyStatistics {
    pub month: YearMonth,
    pub geography: String,
    pub spread: MegawattHourPrice,
    pub price_average: MegawattHourPrice,

    /// Mean of the available daily volatilities, not the deviation of the month's hourly series.
    pub volatility: Option<MegawattHourPrice>,
}

impl MonthlyStatistics {
    /// Average the daily statistics of one month and geography.
    ///
    /// Returns `None` for an empty slice.
    pub fn from_days(month: YearMonth, geography: String, days: &[&DailyStatistics]) -> Option<Self> {
        Some(Self {
            month,
            geography,
            spread: days.iter().map(|day| day.spread).mean()?,
            price_average: days.iter().map(|day| day.price_average).mean()?,
            volatility: days.iter().filter_map(|day| day.volatility).mean(),
        })
    }
}

/// Headline figures of one geography over the whole period.
#[must_use]
#[derive(Clone, Debug, PartialEq)]
pub struct GeographySummary {
    pub geography: String,
    pub price_average: MegawattHourPrice,
    pub volatility: Option<MegawattHourPrice>,
}

#[must_use]
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Spreads {
    /// Sorted by day, then geography.
    pub daily: Vec<DailyStatistics>,

    /// Sorted by month, then geography.
    pub monthly: Vec<MonthlyStatistics>,
}

impl Spreads {
    /// Roll the daily statistics up into months.
    pub fn from_daily(daily: Vec<DailyStatistics>) -> Self {
        let monthly = daily
            .iter()
            .into_group_map_by(|day| (day.month(), day.geography.clone()))
            .into_iter()
            .collect::<BTreeMap<_, _>>()
            .into_iter()
            .filter_map(|((month, geography), days)| {
                MonthlyStatistics::from_days(month, geography, &days)
            })
            .collect();
        Self { daily, monthly }
    }

    /// No data fell into the requested period.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.daily.is_empty()
    }

    /// Per-geography means of the monthly price average and volatility.
    #[must_use]
    pub fn summaries(&self) -> Vec<GeographySummary> {
        self.monthly
            .iter()
            .into_group_map_by(|month| month.geography.as_str())
            .into_iter()
            .sorted_unstable_by_key(|(geography, _)| *geography)
            .filter_map(|(geography, months)| {
                Some(GeographySummary {
                    geography: geography.to_owned(),
                    price_average: months.iter().map(|month| month.price_average).mean()?,
                    volatility: months.iter().filter_map(|month| month.volatility).mean(),
                })
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_abs_diff_eq;

    use super::*;

    fn day(
        date: (i32, u32, u32),
        geography: &str,
        spread: f64,
        price_average: f64,
        volatility: Option<f64>,
    ) -> DailyStatistics {
        DailyStatistics {
            day: NaiveDate::from_ymd_opt(date.0, date.1, date.2).unwrap(),
            geography: geography.to_owned(),
            cheapest_average: MegawattHourPrice(price_average - spread / 2.0),
            expensive_average: MegawattHourPrice(price_average + spread / 2.0),
            spread: MegawattHourPrice(spread),
            price_average: MegawattHourPrice(price_average),
            volatility: volatility.map(MegawattHourPrice),
        }
    }

    #[test]
    fn test_year_month_display() {
        assert_eq!(YearMonth { year: 2025, month: 3 }.to_string(), "2025-03");
    }

    #[test]
    fn test_from_daily() {
        let spreads = Spreads::from_daily(vec![
            day((2025, 1, 30), "ES", 10.0, 50.0, Some(4.0)),
            day((2025, 1, 31), "ES", 20.0, 70.0, None),
            day((2025, 2, 1), "ES", 30.0, 90.0, Some(8.0)),
            day((2025, 1, 31), "PT", 5.0, 40.0, Some(2.0)),
        ]);
        assert_eq!(spreads.monthly.len(), 3);

        let january_es = &spreads.monthly[0];
        assert_eq!(january_es.month, YearMonth { year: 2025, month: 1 });
        assert_eq!(january_es.geography, "ES");
        assert_abs_diff_eq!(january_es.spread.0, 15.0);
        assert_abs_diff_eq!(january_es.price_average.0, 60.0);
        assert_abs_diff_eq!(january_es.volatility.unwrap().0, 4.0);

        assert_eq!(spreads.monthly[1].geography, "PT");
        assert_eq!(spreads.monthly[2].month, YearMonth { year: 2025, month: 2 });
    }

    #[test]
    fn test_monthly_volatility_unavailable() {
        let spreads = Spreads::from_daily(vec![day((2025, 1, 1), "ES", 1.0, 2.0, None)]);
        assert_eq!(spreads.monthly[0].volatility, None);
    }

    #[test]
    fn test_summaries() {
        let spreads = Spreads::from_daily(vec![
            day((2025, 1, 1), "PT", 10.0, 40.0, Some(3.0)),
            day((2025, 2, 1), "PT", 10.0, 60.0, Some(5.0)),
            day((2025, 1, 1), "ES", 10.0, 30.0, None),
        ]);
        let summaries = spreads.summaries();
        assert_eq!(summaries.len(), 2);
        assert_eq!(summaries[0].geography, "ES");
        assert_eq!(summaries[0].volatility, None);
        assert_eq!(summaries[1].geography, "PT");
        assert_abs_diff_eq!(summaries[1].price_average.0, 50.0);
        assert_abs_diff_eq!(summaries[1].volatility.unwrap().0, 4.0);
    }

    #[test]
    fn test_empty() {
        let spreads = Spreads::from_daily(Vec::new());
        assert!(spreads.is_empty());
        assert!(spreads.monthly.is_empty());
        assert!(spreads.summaries().is_empty());
    }
}
