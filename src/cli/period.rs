use chrono::NaiveDate;
use clap::Parser;

use crate::{core::period::Period, prelude::*};

#[derive(Parser)]
pub struct PeriodArgs {
    /// First day of the analysis, `YYYY-MM-DD`.
    #[clap(long = "start-date", env = "START_DATE")]
    start: NaiveDate,

    /// Last day of the analysis, `YYYY-MM-DD`, included.
    #[clap(long = "end-date", env = "END_DATE")]
    end: NaiveDate,
}

impl PeriodArgs {
    pub fn period(&self) -> Result<Period> {
        ensure!(
            self.start <= self.end,
            "the start date ({}) must not be after the end date ({})",
            self.start,
            self.end,
        );
        Ok(Period::new(self.start, self.end))
    }
}
