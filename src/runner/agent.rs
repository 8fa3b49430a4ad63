//! Scrape agent - the extract/repair state machine.
//!
//! One run: fetch the document once, then iterate extract → (on failure)
//! repair → extract with a fresh rule, until success or the attempt budget
//! runs out. The document is cached across attempts, so the oracle always
//! reasons about the same markup the extractor is run against next.

use std::sync::Arc;

use log::{info, warn};

use crate::domain::{RunOutcome, Rule};
use crate::error::{Result, ScraprError};
use crate::extract::extract;
use crate::fetch::Fetcher;
use crate::llm::LlmClient;
use crate::oracle::RepairOracle;

/// Configuration for the scrape agent.
#[derive(Debug, Clone)]
pub struct AgentConfig {
    /// Maximum number of extraction attempts per run
    pub max_attempts: u32,
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self { max_attempts: 3 }
    }
}

impl AgentConfig {
    /// Check that the budget allows at least one extraction attempt.
    ///
    /// A zero budget would still have to answer with a failure reason, but
    /// no extraction ever ran to produce one - so it is rejected up front.
    pub fn validate(&self) -> Result<()> {
        if self.max_attempts == 0 {
            return Err(ScraprError::InvalidConfig(
                "max_attempts must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

/// ScrapeAgent orchestrates the extractor and the repair oracle.
///
/// Each attempt:
/// 1. Runs the extractor against the cached document and current rule
/// 2. On success: returns the records, never re-attempts
/// 3. On failure with budget left: asks the oracle for a replacement rule
/// 4. A valid proposal wholly replaces the rule and the loop continues
/// 5. A failed repair ends the run - there is no new rule to try
pub struct ScrapeAgent<F, L>
where
    F: Fetcher,
    L: LlmClient,
{
    fetcher: Arc<F>,
    oracle: RepairOracle<L>,
    config: AgentConfig,
}

impl<F, L> ScrapeAgent<F, L>
where
    F: Fetcher,
    L: LlmClient,
{
    /// Create an agent with the default attempt budget.
    pub fn new(fetcher: Arc<F>, oracle: RepairOracle<L>) -> Self {
        Self {
            fetcher,
            oracle,
            config: AgentConfig::default(),
        }
    }

    /// Create an agent with custom configuration. Rejects a zero attempt
    /// budget - the run must be allowed at least one extraction.
    pub fn with_config(
        fetcher: Arc<F>,
        oracle: RepairOracle<L>,
        config: AgentConfig,
    ) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            fetcher,
            oracle,
            config,
        })
    }

    /// Run the extract/repair loop against `url` starting from `initial_rule`.
    ///
    /// Returns `Err` only if the fetch fails - that is fatal and happens
    /// before any extraction. Every other ending is a [`RunOutcome`].
    pub async fn run(&self, url: &str, initial_rule: Rule) -> Result<RunOutcome> {
        // Fetched exactly once; attempts only swap the rule.
        let document = self.fetcher.fetch(url).await?;

        let mut rule = initial_rule;
        let mut attempt: u32 = 1;

        loop {
            info!(
                "attempt {} of {} with container '{}'",
                attempt, self.config.max_attempts, rule.container
            );

            let failure = match extract(&document, &rule) {
                Ok(records) => {
                    info!("success: {} records on attempt {}", records.len(), attempt);
                    return Ok(RunOutcome::Success(records));
                }
                Err(failure) => failure,
            };

            warn!("attempt {} failed: {}", attempt, failure);

            if attempt >= self.config.max_attempts {
                info!("attempt budget exhausted, giving up");
                return Ok(RunOutcome::GaveUp {
                    attempts: attempt,
                    reason: failure,
                });
            }

            match self.oracle.propose(&document, &rule, &failure).await {
                Ok(proposal) => {
                    rule = proposal;
                    attempt += 1;
                }
                Err(e) => {
                    // Repair itself failed - no new rule to try, so the run
                    // ends with the extraction failure, not the oracle error.
                    warn!("repair failed, giving up: {}", e);
                    return Ok(RunOutcome::GaveUp {
                        attempts: attempt,
                        reason: failure,
                    });
                }
            }
        }
    }
}
