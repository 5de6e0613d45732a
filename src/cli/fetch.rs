use std::path::PathBuf;

use clap::Parser;

use crate::{
    cli::{esios::EsiosArgs, period::PeriodArgs, source::ColumnsArgs},
    export,
    prelude::*,
};

#[derive(Parser)]
pub struct FetchArgs {
    #[clap(flatten)]
    period: PeriodArgs,

    #[clap(flatten)]
    esios: EsiosArgs,

    /// Column names and delimiter of the produced file.
    #[clap(flatten)]
    columns: ColumnsArgs,

    #[clap(long, env = "PRICES_PATH", default_value = "input.csv")]
    output: PathBuf,
}

impl FetchArgs {
    #[instrument(skip_all, fields(indicator = self.esios.indicator()))]
    pub async fn run(self) -> Result {
        let period = self.period.period()?;
        let columns = self.columns.columns()?;
        let rows = self.esios.fetch(period).await?;
        if rows.is_empty() {
            warn!(?period, "the indicator has no values within the period");
        }
        export::to_file(&self.output, |file| export::write_prices(file, &rows, &columns))
    }
}
