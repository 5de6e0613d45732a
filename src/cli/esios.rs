use clap::Parser;
use reqwest::Url;

use crate::{
    api::esios::{self, Api},
    core::{period::Period, record::PriceRow},
    prelude::*,
};

#[derive(Parser)]
pub struct EsiosArgs {
    /// ESIOS API token.
    #[clap(long = "esios-token", env = "ESIOS_API_TOKEN", hide_env_values = true)]
    token: Option<String>,

    /// Indicator to fetch, `600` is the day-ahead spot price.
    #[clap(long = "esios-indicator", env = "ESIOS_INDICATOR", default_value_t = esios::DEFAULT_INDICATOR)]
    indicator: u32,

    #[clap(long = "esios-base-url", env = "ESIOS_BASE_URL", default_value = esios::DEFAULT_BASE_URL)]
    base_url: Url,
}

impl EsiosArgs {
    pub const fn indicator(&self) -> u32 {
        self.indicator
    }

    /// Fetch the indicator for the period. The token is checked before any request is made.
    pub async fn fetch(&self, period: Period) -> Result<Vec<PriceRow>> {
        let token = self
            .token
            .as_deref()
            .context("the ESIOS API token is not set, use `--esios-token` or `ESIOS_API_TOKEN`")?;
        Api::new(token, self.base_url.clone())?.get_indicator(self.indicator, period).await
    }
}
