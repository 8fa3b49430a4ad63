//! CLI definitions using clap.
//!
//! One invocation scrapes one page: a target URL plus the initial selector
//! triple, which the agent may replace during the run.

use clap::Parser;
use std::path::PathBuf;

/// Scrapr - an adaptive scraper that repairs its own selectors
#[derive(Parser, Debug)]
#[command(name = "scrapr")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Page to scrape
    #[arg(default_value = "https://books.toscrape.com/")]
    pub url: String,

    /// Initial container selector (one element per record)
    #[arg(long, default_value = "article.product_pod")]
    pub container: String,

    /// Initial name selector, relative to the container
    #[arg(long, default_value = "h3 a")]
    pub name: String,

    /// Initial price selector, relative to the container
    #[arg(long, default_value = ".price_color")]
    pub price: String,

    /// Maximum extraction attempts (overrides config)
    #[arg(long, value_parser = clap::value_parser!(u32).range(1..))]
    pub max_attempts: Option<u32>,

    /// Optional config file path
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

impl Cli {
    /// Check if verbose mode is enabled
    pub fn is_verbose(&self) -> bool {
        self.verbose
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_debug_assert() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }

    #[test]
    fn test_defaults_match_books_toscrape() {
        let cli = Cli::parse_from(["scrapr"]);
        assert_eq!(cli.url, "https://books.toscrape.com/");
        assert_eq!(cli.container, "article.product_pod");
        assert_eq!(cli.name, "h3 a");
        assert_eq!(cli.price, ".price_color");
        assert!(cli.max_attempts.is_none());
        assert!(!cli.is_verbose());
    }

    #[test]
    fn test_zero_max_attempts_rejected() {
        // At least one extraction attempt is always required.
        assert!(Cli::try_parse_from(["scrapr", "--max-attempts", "0"]).is_err());
        assert!(Cli::try_parse_from(["scrapr", "--max-attempts", "1"]).is_ok());
    }

    #[test]
    fn test_overrides() {
        let cli = Cli::parse_from([
            "scrapr",
            "https://example.com/shop",
            "--container",
            "li.item",
            "--max-attempts",
            "5",
            "--verbose",
        ]);
        assert_eq!(cli.url, "https://example.com/shop");
        assert_eq!(cli.container, "li.item");
        assert_eq!(cli.max_attempts, Some(5));
        assert!(cli.is_verbose());
    }
}
