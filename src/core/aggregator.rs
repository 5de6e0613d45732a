use std::{collections::BTreeMap, num::NonZeroUsize};

use bon::Builder;
use chrono::NaiveDate;
use itertools::Itertools;

use crate::{
    core::{
        period::Period,
        record::{HourBucket, HourlyPriceRecord, PriceRow},
        series::Aggregate,
        statistics::{DailyStatistics, Spreads},
    },
    prelude::*,
    quantity::price::MegawattHourPrice,
};

/// Cheapest-versus-costliest hours spread over a period.
#[must_use]
#[derive(Copy, Clone, Debug, Builder)]
pub struct SpreadAggregator {
    period: Period,

    /// Number of cheapest and most expensive hours to compare.
    hours: NonZeroUsize,
}

impl SpreadAggregator {
    /// Compute the daily statistics and roll them up into months.
    ///
    /// Rows with an unparseable timestamp are dropped. An empty result means no rows fell
    /// into the period.
    #[instrument(skip_all, fields(period = ?self.period, hours = self.hours.get()))]
    pub fn compute(&self, rows: impl IntoIterator<Item = PriceRow>) -> Spreads {
        let mut n_rows = 0_usize;
        let mut n_dropped = 0_usize;
        let mut buckets: BTreeMap<(NaiveDate, String, u32), Vec<MegawattHourPrice>> =
            BTreeMap::new();

        for row in rows {
            n_rows += 1;
            let Some(record) = HourlyPriceRecord::parse(row) else {
                n_dropped += 1;
                continue;
            };
            if !self.period.contains(record.timestamp) {
                continue;
            }
            let HourBucket { day, hour } = record.bucket();
            buckets.entry((day, record.geography, hour)).or_default().push(record.price);
        }
        debug!(n_rows, n_buckets = buckets.len(), "bucketed");
        if n_dropped != 0 {
            warn!(n_rows, n_dropped, "dropped rows with unrecognised timestamps");
        }

        let daily = buckets
            .into_iter()
            .filter_map(|((day, geography, _), mut prices)| {
                // Sorted for a row-order independent sum.
                prices.sort_unstable();
                Some(((day, geography), prices.into_iter().mean()?))
            })
            .chunk_by(|(key, _)| key.clone())
            .into_iter()
            .map(|((day, geography), hourly)| {
                self.daily_statistics(day, geography, hourly.map(|(_, price)| price).collect())
            })
            .collect_vec();

        Spreads::from_daily(daily)
    }

    fn daily_statistics(
        &self,
        day: NaiveDate,
        geography: String,
        mut hourly_averages: Vec<MegawattHourPrice>,
    ) -> DailyStatistics {
        hourly_averages.sort_unstable();
        let n_hours = self.hours.get().min(hourly_averages.len());
        let cheapest_average =
            hourly_averages[..n_hours].iter().copied().mean().unwrap_or(MegawattHourPrice::ZERO);
        let expensive_average = hourly_averages[hourly_averages.len() - n_hours..]
            .iter()
            .copied()
            .mean()
            .unwrap_or(MegawattHourPrice::ZERO)
            .max(cheapest_average);

        // The three means accumulate rounding differently, flat days must still stay ordered.
        let price_average = hourly_averages
            .iter()
            .copied()
            .mean()
            .unwrap_or(MegawattHourPrice::ZERO)
            .clamp(cheapest_average, expensive_average);

        DailyStatistics {
            day,
            geography,
            cheapest_average,
            expensive_average,
            spread: expensive_average - cheapest_average,
            price_average,
            volatility: hourly_averages.into_iter().sample_std_dev(),
        }
    }
}
