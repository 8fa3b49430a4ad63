use std::fs;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use clap::Parser;
use colored::*;
use eyre::{Context, Result};
use log::info;

use scrapr::domain::{Rule, RunOutcome};
use scrapr::fetch::HttpFetcher;
use scrapr::llm::{AnthropicClient, AnthropicConfig, LlmClient};
use scrapr::oracle::RepairOracle;
use scrapr::runner::{AgentConfig, ScrapeAgent};

mod cli;
mod config;

use cli::Cli;
use config::Config;

fn setup_logging() -> Result<()> {
    // Create log directory
    let log_dir = dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("scrapr")
        .join("logs");

    fs::create_dir_all(&log_dir).context("Failed to create log directory")?;

    let log_file = log_dir.join("scrapr.log");

    // Setup env_logger with file output
    let target = Box::new(
        fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&log_file)
            .context("Failed to open log file")?,
    );

    env_logger::Builder::from_default_env()
        .target(env_logger::Target::Pipe(target))
        .init();

    info!("Logging initialized, writing to: {}", log_file.display());
    Ok(())
}

fn print_api_key_help() {
    println!();
    println!("{}", "NO API KEY FOUND!".red().bold());
    println!();
    println!("To use this agent:");
    println!("1. Go to: https://console.anthropic.com/");
    println!("2. Sign up and create an API key");
    println!("3. In your terminal, run:");
    println!();
    println!("   export ANTHROPIC_API_KEY=your-key-here");
    println!();
    println!("4. Then run: scrapr");
    println!();
}

async fn run_application(cli: &Cli, config: &Config, api_key: String) -> Result<()> {
    info!("Starting scrape of {}", cli.url);

    if cli.is_verbose() {
        println!("{}", "Verbose mode enabled".yellow());
        println!("Initial selectors: container='{}' name='{}' price='{}'",
            cli.container, cli.name, cli.price);
    }

    let rule = Rule::new(&cli.container, &cli.name, &cli.price)
        .context("Invalid initial selectors")?;

    let fetcher = Arc::new(
        HttpFetcher::with_options(
            &config.fetch.user_agent,
            Duration::from_millis(config.fetch.timeout_ms),
        )
        .context("Failed to build fetcher")?,
    );

    let llm = Arc::new(
        AnthropicClient::with_api_key(
            api_key,
            AnthropicConfig {
                model: config.llm.model.clone(),
                max_tokens: config.llm.max_tokens,
                timeout: Duration::from_millis(config.llm.timeout_ms),
            },
        )
        .context("Failed to build LLM client")?,
    );

    // The oracle's credentials are an environment precondition - check them
    // before the agent does any work.
    if !llm.is_ready() {
        print_api_key_help();
        return Ok(());
    }

    let oracle = RepairOracle::new(llm).with_sample_cap(config.agent.sample_cap);
    let max_attempts = cli.max_attempts.unwrap_or(config.agent.max_attempts);
    let agent = ScrapeAgent::with_config(fetcher, oracle, AgentConfig { max_attempts })
        .context("Invalid agent configuration")?;

    println!("{} {}", "Scraping:".cyan(), cli.url);

    match agent.run(&cli.url, rule).await? {
        RunOutcome::Success(records) => {
            println!(
                "{} found {} records",
                "Success!".green().bold(),
                records.len()
            );
            println!();
            for (i, record) in records.iter().enumerate().take(10) {
                println!("{}. {}", i + 1, record);
            }
            if records.len() > 10 {
                println!("   ... and {} more", records.len() - 10);
            }
        }
        RunOutcome::GaveUp { attempts, reason } => {
            println!(
                "{} after {} attempts: {}",
                "Gave up".red().bold(),
                attempts,
                reason
            );
        }
    }

    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    // Setup logging first
    setup_logging().context("Failed to setup logging")?;

    // Parse CLI arguments
    let cli = Cli::parse();

    // Load configuration
    let config = Config::load(cli.config.as_ref()).context("Failed to load configuration")?;

    info!("Starting with config from: {:?}", cli.config);

    // An absent key still builds a client; run_application refuses to start
    // the agent when the client reports it is not ready.
    let api_key = std::env::var("ANTHROPIC_API_KEY").unwrap_or_default();

    run_application(&cli, &config, api_key)
        .await
        .context("Application failed")?;

    Ok(())
}
