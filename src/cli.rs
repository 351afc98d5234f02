//! Command-line surfaces for both executables, plus the shared
//! logging and failure-reporting plumbing.

use crate::config::Config;
use crate::error::ScrapeError;
use crate::format::Formatter;
use clap::error::ErrorKind;
use clap::{ArgGroup, Args, Parser};
use std::ffi::OsString;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::Level;
use tracing_subscriber::EnvFilter;

pub const AMAZON_USAGE: &str = "Usage: scrape-amazon \"<search query>\"";
pub const MERCARI_USAGE: &str = "Usage: scrape-mercari --new | --product <URL>";

/// Flags shared by every executable.
#[derive(Args, Debug, Clone, Default)]
pub struct CommonArgs {
    /// Path to a TOML config file
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Pretty-print JSON output
    #[arg(long)]
    pub pretty: bool,

    /// Enable verbose logging on stderr
    #[arg(short, long)]
    pub verbose: bool,
}

impl CommonArgs {
    pub fn load_config(&self) -> Result<Config, ScrapeError> {
        Ok(Config::load(self.config.as_deref())?)
    }

    pub fn formatter(&self) -> Formatter {
        Formatter::new(self.pretty)
    }
}

#[derive(Parser, Debug)]
#[command(
    name = "scrape-amazon",
    version,
    about = "Search Amazon Japan and print the results as JSON"
)]
pub struct AmazonCli {
    /// Search query
    #[arg(allow_hyphen_values = true)]
    pub query: String,

    /// Extra words after the query are ignored
    #[arg(hide = true)]
    pub extra: Vec<String>,

    #[command(flatten)]
    pub common: CommonArgs,
}

impl AmazonCli {
    /// The trimmed query; a blank query is a usage error.
    pub fn query(&self) -> Result<&str, ScrapeError> {
        let query = self.query.trim();
        if query.is_empty() {
            return Err(usage_error("search query is empty", AMAZON_USAGE));
        }
        Ok(query)
    }
}

#[derive(Parser, Debug)]
#[command(
    name = "scrape-mercari",
    version,
    about = "Scrape Mercari item pages or new listings and print them as JSON"
)]
#[command(group(ArgGroup::new("mode").required(true).args(["product", "new"])))]
pub struct MercariCli {
    /// Scrape a single item page over plain HTTP
    #[arg(long, value_name = "URL")]
    pub product: Option<String>,

    /// Scrape new listings from the homepage
    #[arg(long)]
    pub new: bool,

    #[command(flatten)]
    pub common: CommonArgs,
}

/// What `scrape-mercari` was asked to do.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MercariMode {
    Product(String),
    NewListings,
}

impl MercariCli {
    /// Resolves the selected mode, validating the item URL up front.
    pub fn mode(&self) -> Result<MercariMode, ScrapeError> {
        match (&self.product, self.new) {
            (Some(url), false) => {
                let url = url.trim();
                if !(url.starts_with("http://") || url.starts_with("https://")) {
                    return Err(usage_error("Invalid URL format", MERCARI_USAGE));
                }
                Ok(MercariMode::Product(url.to_string()))
            }
            (None, true) => Ok(MercariMode::NewListings),
            _ => Err(usage_error("Invalid arguments", MERCARI_USAGE)),
        }
    }
}

fn usage_error(summary: &str, usage: &str) -> ScrapeError {
    ScrapeError::Usage(format!("{}. {}", summary, usage))
}

/// Parses `args`, turning every clap failure except help/version into a
/// [`ScrapeError::Usage`].
pub fn parse_args_from<T, I, A>(args: I, usage: &str) -> Result<T, ScrapeError>
where
    T: Parser,
    I: IntoIterator<Item = A>,
    A: Into<OsString> + Clone,
{
    T::try_parse_from(args).map_err(|err| match err.kind() {
        ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => err.exit(),
        _ => {
            let rendered = err.to_string();
            let summary = rendered
                .lines()
                .next()
                .unwrap_or("Invalid arguments")
                .trim_start_matches("error: ")
                .trim_end_matches(':');
            usage_error(summary, usage)
        }
    })
}

/// Parses the process arguments. See [`parse_args_from`].
pub fn parse_args<T: Parser>(usage: &str) -> Result<T, ScrapeError> {
    parse_args_from(std::env::args_os(), usage)
}

/// Initializes logging on stderr.
///
/// Silent unless `RUST_LOG` is set or `verbose` is on, so stderr carries
/// only the error report by default.
pub fn init_logging(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new(Level::DEBUG.to_string())
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("off"))
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

/// Writes the error report to stderr and yields exit status 1.
pub fn fail(err: &ScrapeError) -> ExitCode {
    eprintln!("{}", Formatter::default().format_error(err));
    ExitCode::FAILURE
}
