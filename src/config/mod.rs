pub mod cli;
pub mod toml_config;

use crate::core::{ConfigProvider, FieldFormat, MalformedCardPolicy};
use crate::utils::error::Result;
use crate::utils::validation::{
    validate_non_empty_string, validate_path, validate_positive_number, validate_range,
    validate_url, Validate,
};
use serde::{Deserialize, Serialize};

#[cfg(feature = "cli")]
use clap::Parser;

pub const DEFAULT_URL: &str =
    "https://books.toscrape.com/catalogue/category/books/science_22/index.html";
pub const DEFAULT_OUTPUT_PATH: &str = "products.csv";
pub const MAX_PADDING: usize = 64;

/// Everything a single scrape run needs, resolved from defaults, the TOML
/// file and the command line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunConfig {
    pub url: String,
    pub output_path: String,
    pub on_malformed: MalformedCardPolicy,
    pub format: FieldFormat,
    pub timeout_seconds: Option<u64>,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            url: DEFAULT_URL.to_string(),
            output_path: DEFAULT_OUTPUT_PATH.to_string(),
            on_malformed: MalformedCardPolicy::default(),
            format: FieldFormat::legacy(),
            timeout_seconds: None,
        }
    }
}

#[cfg(feature = "cli")]
impl RunConfig {
    /// Start from the config file when one is given, then let flags win.
    pub fn from_cli(cli: &CliConfig) -> Result<Self> {
        let mut config = match &cli.config {
            Some(path) => toml_config::TomlConfig::from_file(path)?.into_run_config()?,
            None => RunConfig::default(),
        };

        if let Some(url) = &cli.url {
            config.url = url.clone();
        }
        if let Some(output) = &cli.output {
            config.output_path = output.clone();
        }
        if let Some(policy) = cli.on_malformed {
            config.on_malformed = policy;
        }
        if cli.clean {
            config.format = FieldFormat::clean();
        }
        if cli.timeout.is_some() {
            config.timeout_seconds = cli.timeout;
        }

        Ok(config)
    }
}

impl ConfigProvider for RunConfig {
    fn url(&self) -> &str {
        &self.url
    }

    fn output_path(&self) -> &str {
        &self.output_path
    }

    fn on_malformed(&self) -> MalformedCardPolicy {
        self.on_malformed
    }

    fn field_format(&self) -> &FieldFormat {
        &self.format
    }

    fn timeout_seconds(&self) -> Option<u64> {
        self.timeout_seconds
    }
}

impl Validate for RunConfig {
    fn validate(&self) -> Result<()> {
        validate_url("url", &self.url)?;
        validate_path("output_path", &self.output_path)?;

        validate_range("padding", self.format.padding, 0, MAX_PADDING)?;

        if let Some(swap) = &self.format.currency {
            validate_non_empty_string("currency_from", &swap.from)?;
        }

        if let Some(secs) = self.timeout_seconds {
            validate_positive_number("timeout_seconds", secs, 1)?;
        }

        Ok(())
    }
}

#[cfg(feature = "cli")]
#[derive(Debug, Clone, Default, Parser)]
#[command(name = "catalogue-etl")]
#[command(about = "Scrape a product catalogue page into a CSV file")]
pub struct CliConfig {
    /// Catalogue page to fetch
    #[arg(long)]
    pub url: Option<String>,

    /// Destination CSV file (overwritten)
    #[arg(short, long)]
    pub output: Option<String>,

    /// TOML configuration file
    #[arg(short, long)]
    pub config: Option<String>,

    /// What to do with a product card that lacks a name, price or rating
    #[arg(long, value_enum)]
    pub on_malformed: Option<MalformedCardPolicy>,

    /// Write values as scraped: no padding, no currency rewrite
    #[arg(long)]
    pub clean: bool,

    /// HTTP timeout in seconds (library default when omitted)
    #[arg(long)]
    pub timeout: Option<u64>,

    #[arg(short, long, help = "Enable verbose output")]
    pub verbose: bool,

    /// Emit log lines as JSON
    #[arg(long)]
    pub log_json: bool,
}
