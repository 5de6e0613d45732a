//! CSV exports of the computed statistics and of fetched prices.

use std::{fs::File, io::Write, path::Path};

use chrono::NaiveDate;
use serde::Serialize;
use serde_with::{DisplayFromStr, serde_as};

use crate::{
    core::{
        record::PriceRow,
        statistics::{DailyStatistics, MonthlyStatistics, YearMonth},
    },
    prelude::*,
    source::Columns,
};

#[serde_as]
#[derive(Serialize)]
struct DailyRow<'a> {
    year: i32,
    day: NaiveDate,
    geo_name: &'a str,
    cheapest_avg: f64,
    expensive_avg: f64,
    spread: f64,
    price_avg: f64,
    volatility: Option<f64>,

    #[serde_as(as = "DisplayFromStr")]
    month: YearMonth,
}

impl<'a> From<&'a DailyStatistics> for DailyRow<'a> {
    fn from(statistics: &'a DailyStatistics) -> Self {
        Self {
            year: statistics.year(),
            day: statistics.day,
            geo_name: &statistics.geography,
            cheapest_avg: statistics.cheapest_average.0,
            expensive_avg: statistics.expensive_average.0,
            spread: statistics.spread.0,
            price_avg: statistics.price_average.0,
            volatility: statistics.volatility.map(|volatility| volatility.0),
            month: statistics.month(),
        }
    }
}

#[serde_as]
#[derive(Serialize)]
struct MonthlyRow<'a> {
    #[serde_as(as = "DisplayFromStr")]
    month: YearMonth,

    geo_name: &'a str,
    spread: f64,
    price_avg: f64,
    volatility: Option<f64>,
}

impl<'a> From<&'a MonthlyStatistics> for MonthlyRow<'a> {
    fn from(statistics: &'a MonthlyStatistics) -> Self {
        Self {
            month: statistics.month,
            geo_name: &statistics.geography,
            spread: statistics.spread.0,
            price_avg: statistics.price_average.0,
            volatility: statistics.volatility.map(|volatility| volatility.0),
        }
    }
}

pub fn write_daily<W: Write>(writer: W, daily: &[DailyStatistics]) -> Result {
    write_rows(writer, daily.iter().map(DailyRow::from))
}

pub fn write_monthly<W: Write>(writer: W, monthly: &[MonthlyStatistics]) -> Result {
    write_rows(writer, monthly.iter().map(MonthlyRow::from))
}

/// Write fetched rows in the layout [`crate::source::read_csv`] expects.
pub fn write_prices<W: Write>(writer: W, rows: &[PriceRow], columns: &Columns) -> Result {
    let mut writer = csv::WriterBuilder::new().delimiter(columns.delimiter).from_writer(writer);
    writer.write_record([&columns.timestamp, &columns.geography, &columns.price])?;
    for row in rows {
        writer.write_record([
            row.timestamp.as_str(),
            row.geography.as_str(),
            row.price.0.to_string().as_str(),
        ])?;
    }
    writer.flush()?;
    Ok(())
}

/// Create the file and write into it with the specified function.
#[instrument(skip_all, fields(path = %path.display()))]
pub fn to_file(path: &Path, write: impl FnOnce(File) -> Result) -> Result {
    let file =
        File::create(path).with_context(|| format!("failed to create `{}`", path.display()))?;
    write(file).with_context(|| format!("failed to write `{}`", path.display()))?;
    info!("exported");
    Ok(())
}

fn write_rows<W: Write, S: Serialize>(writer: W, rows: impl IntoIterator<Item = S>) -> Result {
    let mut writer = csv::WriterBuilder::new().delimiter(b';').from_writer(writer);
    for row in rows {
        writer.serialize(row)?;
    }
    writer.flush()?;
    Ok(())
}
