//! [ESIOS](https://api.esios.ree.es) indicator client.

use std::time::Duration;

use http::{HeaderMap, HeaderValue, header};
use reqwest::{Client, Url};
use serde::{Deserialize, Serialize};

use crate::{
    core::{period::Period, record::PriceRow},
    prelude::*,
    quantity::price::MegawattHourPrice,
};

pub const DEFAULT_BASE_URL: &str = "https://api.esios.ree.es";

/// Day-ahead market spot price.
pub const DEFAULT_INDICATOR: u32 = 600;

pub struct Api {
    client: Client,
    base_url: Url,
}

impl Api {
    pub fn new(token: &str, base_url: Url) -> Result<Self> {
        let mut headers = HeaderMap::new();
        headers.append(
            header::ACCEPT,
            HeaderValue::from_static("application/json; application/vnd.esios-api-v1+json"),
        );
        headers.append(header::CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers.append(
            "x-api-key",
            HeaderValue::from_str(token).context("the API token is not a valid header value")?,
        );
        let client = Client::builder()
            .user_agent("besspread")
            .timeout(Duration::from_secs(60))
            .default_headers(headers)
            .build()?;
        Ok(Self { client, base_url })
    }

    /// Fetch all indicator values within the period, in a single request.
    #[instrument(skip_all, fields(indicator = indicator, period = ?period))]
    pub async fn get_indicator(&self, indicator: u32, period: Period) -> Result<Vec<PriceRow>> {
        let url = self
            .base_url
            .join(&format!("indicators/{indicator}"))
            .context("invalid indicator URL")?;
        info!(%url, "fetching…");
        let rows = self
            .client
            .get(url)
            .query(&Query::new(period))
            .send()
            .await
            .context("failed to call the indicator API")?
            .error_for_status()
            .context("the indicator API request failed")?
            .json::<IndicatorResponse>()
            .await
            .context("failed to deserialize the indicator response")?
            .into_rows();
        info!(n_rows = rows.len(), "fetched");
        Ok(rows)
    }
}

#[derive(Serialize)]
struct Query {
    start_date: String,
    end_date: String,
}

impl Query {
    fn new(period: Period) -> Self {
        Self {
            start_date: format!("{}T00:00:00", period.start),
            end_date: format!("{}T23:59:59", period.end),
        }
    }
}

#[derive(Deserialize)]
pub struct IndicatorResponse {
    indicator: Indicator,
}

impl IndicatorResponse {
    /// Convert into price rows, dropping the values the API reports as `null`.
    pub fn into_rows(self) -> Vec<PriceRow> {
        self.indicator
            .values
            .into_iter()
            .filter_map(|value| {
                Some(PriceRow::new(value.datetime, value.geo_name, MegawattHourPrice(value.value?)))
            })
            .collect()
    }
}

#[derive(Deserialize)]
struct Indicator {
    values: Vec<IndicatorValue>,
}

#[derive(Deserialize)]
struct IndicatorValue {
    datetime: String,
    geo_name: String,
    value: Option<f64>,
}
