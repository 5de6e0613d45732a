mod esios;
mod fetch;
mod period;
mod source;
mod spread;

use clap::{Parser, Subcommand};

use crate::{
    cli::{fetch::FetchArgs, spread::SpreadArgs},
    prelude::*,
};

#[derive(Parser)]
#[command(author, version, about, propagate_version = true)]
#[must_use]
pub struct Args {
    #[command(subcommand)]
    command: Command,
}

impl Args {
    pub async fn run(self) -> Result {
        match self.command {
            Command::Spread(args) => args.run().await,
            Command::Fetch(args) => args.run().await,
        }
    }
}

#[derive(Subcommand)]
enum Command {
    /// Main command: compute the daily and monthly spreads and export them.
    #[clap(name = "spread")]
    Spread(Box<SpreadArgs>),

    /// Download the indicator prices into a CSV file suitable for `spread --input`.
    #[clap(name = "fetch")]
    Fetch(Box<FetchArgs>),
}
