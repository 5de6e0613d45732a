use comfy_table::{Attribute, Cell, CellAlignment, Color, Table, modifiers, presets};

use crate::{
    core::{
        series::Aggregate,
        statistics::{DailyStatistics, GeographySummary, MonthlyStatistics},
    },
    quantity::price::MegawattHourPrice,
};

fn new_table() -> Table {
    let mut table = Table::new();
    table.load_preset(presets::UTF8_FULL_CONDENSED).apply_modifier(modifiers::UTF8_ROUND_CORNERS);
    table.enforce_styling();
    table
}

fn price_cell(price: MegawattHourPrice) -> Cell {
    Cell::new(price).set_alignment(CellAlignment::Right)
}

fn volatility_cell(volatility: Option<MegawattHourPrice>) -> Cell {
    volatility.map_or_else(
        || Cell::new("n/a").set_alignment(CellAlignment::Right).add_attribute(Attribute::Dim),
        price_cell,
    )
}

/// Spreads at or above the average are highlighted as the better storage opportunities.
fn spread_cell(spread: MegawattHourPrice, average: MegawattHourPrice) -> Cell {
    price_cell(spread).fg(if spread >= average { Color::Green } else { Color::Reset })
}

#[must_use]
pub fn build_daily_table(daily: &[DailyStatistics]) -> Table {
    let average_spread = daily.iter().map(|day| day.spread).mean().unwrap_or_default();
    let mut table = new_table();
    table.set_header(vec![
        "Day",
        "Geography",
        "Cheapest",
        "Most expensive",
        "Spread",
        "Average",
        "Volatility",
    ]);
    for day in daily {
        table.add_row(vec![
            Cell::new(day.day),
            Cell::new(&day.geography),
            price_cell(day.cheapest_average).fg(Color::Green),
            price_cell(day.expensive_average).fg(Color::Red),
            spread_cell(day.spread, average_spread),
            price_cell(day.price_average),
            volatility_cell(day.volatility),
        ]);
    }
    table
}

#[must_use]
pub fn build_monthly_table(monthly: &[MonthlyStatistics]) -> Table {
    let average_spread = monthly.iter().map(|month| month.spread).mean().unwrap_or_default();
    let mut table = new_table();
    table.set_header(vec!["Month", "Geography", "Spread", "Average", "Volatility"]);
    for month in monthly {
        table.add_row(vec![
            Cell::new(month.month),
            Cell::new(&month.geography),
            spread_cell(month.spread, average_spread),
            price_cell(month.price_average),
            volatility_cell(month.volatility),
        ]);
    }
    table
}

#[must_use]
pub fn build_summary_table(summaries: &[GeographySummary]) -> Table {
    let mut table = new_table();
    table.set_header(vec!["Geography", "Average price", "Volatility"]);
    for summary in summaries {
        table.add_row(vec![
            Cell::new(&summary.geography),
            price_cell(summary.price_average),
            volatility_cell(summary.volatility),
        ]);
    }
    table
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;
    use crate::core::statistics::YearMonth;

    #[test]
    fn test_build_daily_table() {
        let table = build_daily_table(&[DailyStatistics {
            day: NaiveDate::from_ymd_opt(2025, 3, 7).unwrap(),
            geography: "ES".to_owned(),
            cheapest_average: MegawattHourPrice(10.0),
            expensive_average: MegawattHourPrice(30.5),
            spread: MegawattHourPrice(20.5),
            price_average: MegawattHourPrice(21.25),
            volatility: None,
        }]);
        let rendered = table.to_string();
        assert!(rendered.contains("2025-03-07"));
        assert!(rendered.contains("20.50 €/MWh"));
        assert!(rendered.contains("n/a"));
    }

    #[test]
    fn test_build_monthly_table() {
        let table = build_monthly_table(&[MonthlyStatistics {
            month: YearMonth { year: 2025, month: 3 },
            geography: "PT".to_owned(),
            spread: MegawattHourPrice(12.0),
            price_average: MegawattHourPrice(50.0),
            volatility: Some(MegawattHourPrice(4.5)),
        }]);
        let rendered = table.to_string();
        assert!(rendered.contains("2025-03"));
        assert!(rendered.contains("4.50 €/MWh"));
    }
}
