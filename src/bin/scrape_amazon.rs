//! scrape-amazon - search Amazon Japan and print results as JSON.

use market_scraper::cli::{self, AmazonCli, AMAZON_USAGE};
use market_scraper::commands::SearchCommand;
use market_scraper::ScrapeError;
use std::process::ExitCode;

#[tokio::main]
async fn main() -> ExitCode {
    let args: AmazonCli = match cli::parse_args(AMAZON_USAGE) {
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

async fn run(args: &AmazonCli) -> Result<String, ScrapeError> {
    let query = args.query()?;
    let config = args.common.load_config()?;

    SearchCommand::new(config, args.common.formatter()).execute(query).await
}
