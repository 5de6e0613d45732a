use std::{num::NonZeroUsize, path::PathBuf};

use clap::Parser;

use crate::{
    cli::{period::PeriodArgs, source::SourceArgs},
    core::aggregator::SpreadAggregator,
    export,
    prelude::*,
    tables::{build_daily_table, build_monthly_table, build_summary_table},
};

#[derive(Parser)]
pub struct SpreadArgs {
    #[clap(flatten)]
    period: PeriodArgs,

    /// Storage hours: number of cheapest and most expensive hours to compare.
    #[clap(
        long,
        env = "HOURS",
        default_value = "6",
        value_parser = clap::value_parser!(u8).range(1..=24),
    )]
    hours: u8,

    #[clap(flatten)]
    source: SourceArgs,

    /// Export the daily statistics to this CSV file.
    #[clap(long = "daily-output", env = "DAILY_OUTPUT_PATH")]
    daily_output: Option<PathBuf>,

    /// Export the monthly statistics to this CSV file.
    #[clap(long = "monthly-output", env = "MONTHLY_OUTPUT_PATH")]
    monthly_output: Option<PathBuf>,

    /// Do not print the daily table, useful for long periods.
    #[clap(long)]
    quiet_daily: bool,
}

impl SpreadArgs {
    #[instrument(skip_all)]
    pub async fn run(self) -> Result {
        let period = self.period.period()?;
        let hours = NonZeroUsize::new(usize::from(self.hours)).context("hours must be positive")?;
        let rows = self.source.load(period).await?;

        let spreads = SpreadAggregator::builder().period(period).hours(hours).build().compute(rows);
        if spreads.is_empty() {
            warn!(?period, "no prices within the period");
            return Ok(());
        }
        info!(n_days = spreads.daily.len(), n_months = spreads.monthly.len(), "computed");

        if !self.quiet_daily {
            println!("{}", build_daily_table(&spreads.daily));
        }
        println!("{}", build_monthly_table(&spreads.monthly));
        println!("{}", build_summary_table(&spreads.summaries()));

        if let Some(path) = &self.daily_output {
            export::to_file(path, |file| export::write_daily(file, &spreads.daily))?;
        }
        if let Some(path) = &self.monthly_output {
            export::to_file(path, |file| export::write_monthly(file, &spreads.monthly))?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hours_default() -> Result {
        let args = SpreadArgs::try_parse_from(["test", "--start-date", "2025-01-01", "--end-date", "2025-01-31"])?;
        assert_eq!(args.hours, 6);
        Ok(())
    }

    #[test]
    fn test_hours_out_of_range() {
        for hours in ["0", "25"] {
            let args = SpreadArgs::try_parse_from([
                "test",
                "--start-date",
                "2025-01-01",
                "--end-date",
                "2025-01-31",
                "--hours",
                hours,
            ]);
            assert!(args.is_err(), "{hours}");
        }
    }
}
