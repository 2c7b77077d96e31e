// src/bin/cli.rs
use clap::Parser;

use cal_scrape::cli::{self, Cli};

#[tokio::main]
async fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    cal_scrape::log::init(cli.log_file.as_deref(), cli.verbose)?;

    cli::run(cli).await?;
    Ok(())
}
