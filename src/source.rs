//! Local price files: a delimited export with a header row, or a saved indicator JSON payload.

use std::{fs::File, io::Read, path::Path};

use bon::Builder;
use itertools::Itertools;

use crate::{
    api::esios::IndicatorResponse,
    core::record::PriceRow,
    prelude::*,
    quantity::price::MegawattHourPrice,
};

pub const DEFAULT_TIMESTAMP_COLUMN: &str = "datetime_600";
pub const DEFAULT_GEOGRAPHY_COLUMN: &str = "geo_name";
pub const DEFAULT_PRICE_COLUMN: &str = "Precio mercado spot [€/MWh]";

/// Column layout of a delimited price file.
#[must_use]
#[derive(Clone, Debug, Builder)]
pub struct Columns {
    #[builder(into, default = DEFAULT_TIMESTAMP_COLUMN.to_owned())]
    pub timestamp: String,

    #[builder(into, default = DEFAULT_GEOGRAPHY_COLUMN.to_owned())]
    pub geography: String,

    #[builder(into, default = DEFAULT_PRICE_COLUMN.to_owned())]
    pub price: String,

    #[builder(default = b';')]
    pub delimiter: u8,
}

/// Load price rows from a file, picking the format by extension.
#[instrument(skip_all, fields(path = %path.display()))]
pub fn load(path: &Path, columns: &Columns) -> Result<Vec<PriceRow>> {
    let file = File::open(path).with_context(|| format!("failed to open `{}`", path.display()))?;
    let is_json = path.extension().is_some_and(|extension| extension.eq_ignore_ascii_case("json"));
    let rows = if is_json { read_json(file)? } else { read_csv(file, columns)? };
    info!(n_rows = rows.len(), "loaded");
    Ok(rows)
}

/// Read a delimited price file.
///
/// Empty price cells are skipped, anything else that is not a number is an error. So is a record
/// whose length differs from the header.
pub fn read_csv<R: Read>(reader: R, columns: &Columns) -> Result<Vec<PriceRow>> {
    let mut reader = csv::ReaderBuilder::new().delimiter(columns.delimiter).from_reader(reader);
    let headers = reader.headers().context("failed to read the header row")?.clone();
    let position = |name: &str| {
        headers.iter().position(|header| header.trim() == name).with_context(|| {
            format!(
                "column `{name}` is missing, available columns: {}",
                headers.iter().map(|header| format!("`{header}`")).join(", "),
            )
        })
    };
    let timestamp_index = position(&columns.timestamp)?;
    let geography_index = position(&columns.geography)?;
    let price_index = position(&columns.price)?;

    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record.context("malformed record")?;
        let line = record.position().map_or(0, csv::Position::line);
        let Some(price) = record.get(price_index).map(str::trim).filter(|cell| !cell.is_empty())
        else {
            continue;
        };
        let price = parse_price(price)
            .with_context(|| format!("invalid price `{price}` on line {line}"))?;
        let field = |index: usize| {
            record.get(index).with_context(|| format!("line {line} has only {} fields", record.len()))
        };
        rows.push(PriceRow::new(field(timestamp_index)?, field(geography_index)?.trim(), price));
    }
    Ok(rows)
}

/// Read a saved indicator response, skipping `null` values.
pub fn read_json<R: Read>(reader: R) -> Result<Vec<PriceRow>> {
    let response: IndicatorResponse =
        serde_json::from_reader(reader).context("failed to parse the indicator payload")?;
    Ok(response.into_rows())
}

/// Accept both decimal points and decimal commas.
fn parse_price(text: &str) -> Result<MegawattHourPrice> {
    let value: f64 = if text.contains(',') && !text.contains('.') {
        text.replace(',', ".").parse()?
    } else {
        text.parse()?
    };
    ensure!(value.is_finite(), "not a finite number");
    Ok(MegawattHourPrice(value))
}
