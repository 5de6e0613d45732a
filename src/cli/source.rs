use std::path::PathBuf;

use clap::{Parser, ValueEnum};

use crate::{
    cli::esios::EsiosArgs,
    core::{period::Period, record::PriceRow},
    prelude::*,
    source::{self, Columns},
};

#[derive(Copy, Clone, Debug, ValueEnum)]
pub enum Source {
    /// Local CSV or saved indicator JSON file.
    File,

    /// ESIOS indicator API.
    Esios,
}

#[derive(Parser)]
pub struct ColumnsArgs {
    #[clap(long = "timestamp-column", env = "TIMESTAMP_COLUMN", default_value = source::DEFAULT_TIMESTAMP_COLUMN)]
    timestamp: String,

    #[clap(long = "geo-column", env = "GEO_COLUMN", default_value = source::DEFAULT_GEOGRAPHY_COLUMN)]
    geography: String,

    #[clap(long = "price-column", env = "PRICE_COLUMN", default_value = source::DEFAULT_PRICE_COLUMN)]
    price: String,

    /// CSV field delimiter.
    #[clap(long, env = "CSV_DELIMITER", default_value_t = ';')]
    delimiter: char,
}

impl ColumnsArgs {
    pub fn columns(&self) -> Result<Columns> {
        let delimiter = u8::try_from(self.delimiter)
            .ok()
            .filter(u8::is_ascii)
            .with_context(|| format!("the delimiter must be an ASCII character: `{}`", self.delimiter))?;
        Ok(Columns::builder()
            .timestamp(&self.timestamp)
            .geography(&self.geography)
            .price(&self.price)
            .delimiter(delimiter)
            .build())
    }
}

#[derive(Parser)]
pub struct SourceArgs {
    #[clap(long, env = "PRICE_SOURCE", value_enum, default_value = "file")]
    source: Source,

    /// Price file, `.json` files are read as a saved indicator response.
    #[clap(long = "input", env = "PRICES_PATH", default_value = "input.csv")]
    input: PathBuf,

    #[clap(flatten)]
    columns: ColumnsArgs,

    #[clap(flatten)]
    esios: EsiosArgs,
}

impl SourceArgs {
    #[instrument(skip_all, fields(source = ?self.source))]
    pub async fn load(&self, period: Period) -> Result<Vec<PriceRow>> {
        match self.source {
            Source::File => source::load(&self.input, &self.columns.columns()?),
            Source::Esios => self.esios.fetch(period).await,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_columns_default() -> Result {
        let columns = ColumnsArgs::try_parse_from(["test"])?.columns()?;
        assert_eq!(columns.timestamp, source::DEFAULT_TIMESTAMP_COLUMN);
        assert_eq!(columns.price, source::DEFAULT_PRICE_COLUMN);
        assert_eq!(columns.delimiter, b';');
        Ok(())
    }

    #[test]
    fn test_columns_non_ascii_delimiter() -> Result {
        let args = ColumnsArgs::try_parse_from(["test", "--delimiter", "¦"])?;
        assert!(args.columns().is_err());
        Ok(())
    }
}
