//! scrape-mercari - scrape a Mercari item page or the homepage's new listings.

use market_scraper::cli::{self, MercariCli, MercariMode, MERCARI_USAGE};
use market_scraper::commands::{NewListingsCommand, ProductCommand};
use market_scraper::ScrapeError;
use std::process::ExitCode;

#[tokio::main]
async fn main() -> ExitCode {
    let args: MercariCli = match cli::parse_args(MERCARI_USAGE) {
        Ok(args) => args,
        Err(e) => return cli::fail(&e),
    };

    cli::init_logging(args.common.verbose);

    match run(&args).await {
        Ok(output) => {
            println!("{}", output);
            ExitCode::SUCCESS
        }
        Err(e) => cli::fail(&e),
    }
}

async fn run(args: &MercariCli) -> Result<String, ScrapeError> {
    let mode = args.mode()?;
    let config = args.common.load_config()?;
    let formatter = args.common.formatter();

    match mode {
        MercariMode::Product(url) => ProductCommand::new(config, formatter).execute(&url).await,
        MercariMode::NewListings => NewListingsCommand::new(config, formatter).execute().await,
    }
}
