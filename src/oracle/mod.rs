//! Repair oracle - asks the LLM for a corrected rule after a failed
//! extraction attempt.
//!
//! The oracle sees a bounded prefix of the document, the rule that failed,
//! and the failure reason, and must answer with a single JSON object holding
//! the three replacement locators. Each proposal is computed fresh - the
//! oracle keeps no memory across calls.

pub mod proposal;

use std::sync::Arc;

use log::{debug, info};

use crate::domain::Rule;
use crate::error::Result;
use crate::extract::ExtractFailure;
use crate::llm::{CompletionRequest, LlmClient};

pub use proposal::parse_proposal;

/// Default cap on how much of the document the oracle is shown.
pub const DEFAULT_SAMPLE_CAP: usize = 3000;

/// Repair oracle adapter over an LLM client.
pub struct RepairOracle<L: LlmClient> {
    llm: Arc<L>,
    sample_cap: usize,
}

impl<L: LlmClient> RepairOracle<L> {
    /// Create an oracle with the default document sample cap.
    pub fn new(llm: Arc<L>) -> Self {
        Self {
            llm,
            sample_cap: DEFAULT_SAMPLE_CAP,
        }
    }

    /// Override the document sample cap.
    ///
    /// The cap is a deliberate lossy step: if the relevant markup lies
    /// beyond it, repair will keep failing and the agent exhausts its
    /// budget. That bounds cost per call and is a documented limitation.
    pub fn with_sample_cap(mut self, sample_cap: usize) -> Self {
        self.sample_cap = sample_cap;
        self
    }

    /// Ask for a replacement rule for `failed` given `failure`.
    pub async fn propose(
        &self,
        document: &str,
        failed: &Rule,
        failure: &ExtractFailure,
    ) -> Result<Rule> {
        info!("asking {} to repair selectors: {}", self.llm.model(), failure);

        let prompt = self.build_prompt(document, failed, failure);
        let request = CompletionRequest::default().with_user_message(prompt);

        let response = self.llm.complete(request).await?;
        debug!("oracle answered {} chars", response.content.len());

        let rule = parse_proposal(&response.content)?;
        info!(
            "oracle proposes container='{}' name='{}' price='{}'",
            rule.container, rule.name, rule.price
        );
        Ok(rule)
    }

    fn build_prompt(&self, document: &str, failed: &Rule, failure: &ExtractFailure) -> String {
        let snippet = sample(document, self.sample_cap);
        format!(
            "You are a web scraping expert. My scraper broke.\n\
             \n\
             CURRENT SELECTORS I TRIED:\n\
             - Container: {container}\n\
             - Name: {name}\n\
             - Price: {price}\n\
             \n\
             ERROR: {failure}\n\
             \n\
             HERE'S THE HTML (first {cap} characters):\n\
             ```html\n\
             {snippet}\n\
             ```\n\
             \n\
             Analyze the HTML and tell me the correct CSS selectors.\n\
             \n\
             RESPOND WITH ONLY THIS JSON (no other text):\n\
             {{\n\
             \x20   \"container\": \"selector for each record container\",\n\
             \x20   \"name\": \"selector for the name\",\n\
             \x20   \"price\": \"selector for the price\"\n\
             }}",
            container = failed.container,
            name = failed.name,
            price = failed.price,
            failure = failure,
            cap = self.sample_cap,
            snippet = snippet,
        )
    }
}

/// A prefix of at most `cap` characters - the prompt promises characters,
/// so multibyte text is not shortchanged.
fn sample(document: &str, cap: usize) -> &str {
    match document.char_indices().nth(cap) {
        Some((end, _)) => &document[..end],
        None => document,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm::{CompletionResponse, MockLlmClient};

    fn failed_rule() -> Rule {
        Rule::new("article.product_pod", "h3 a", ".price_color").unwrap()
    }

    fn failure() -> ExtractFailure {
        ExtractFailure::NoContainers {
            container: "article.product_pod".to_string(),
        }
    }

    #[tokio::test]
    async fn test_propose_parses_valid_answer() {
        let mock = Arc::new(MockLlmClient::new(vec![Ok(CompletionResponse::text(
            r#"{"container": "li.book", "name": ".title", "price": ".amount"}"#,
        ))]));
        let oracle = RepairOracle::new(mock.clone());

        let rule = oracle
            .propose("<html></html>", &failed_rule(), &failure())
            .await
            .unwrap();

        assert_eq!(rule.container, "li.book");
        assert_eq!(mock.call_count(), 1);
    }

    #[tokio::test]
    async fn test_propose_strips_code_fences() {
        let mock = Arc::new(MockLlmClient::new(vec![Ok(CompletionResponse::text(
            "```json\n{\"container\": \"li\", \"name\": \".n\", \"price\": \".p\"}\n```",
        ))]));
        let oracle = RepairOracle::new(mock);

        let rule = oracle
            .propose("<html></html>", &failed_rule(), &failure())
            .await
            .unwrap();
        assert_eq!(rule.name, ".n");
    }

    #[tokio::test]
    async fn test_propose_malformed_answer() {
        let mock = Arc::new(MockLlmClient::new(vec![Ok(CompletionResponse::text(
            "sorry, I can't tell from this snippet",
        ))]));
        let oracle = RepairOracle::new(mock);

        let err = oracle
            .propose("<html></html>", &failed_rule(), &failure())
            .await
            .unwrap_err();
        assert!(matches!(err, crate::ScraprError::MalformedProposal(_)));
    }

    #[tokio::test]
    async fn test_propose_surfaces_llm_error() {
        let mock = Arc::new(MockLlmClient::new(vec![Err(
            crate::ScraprError::OracleUnavailable("API error 529".to_string()),
        )]));
        let oracle = RepairOracle::new(mock);

        let err = oracle
            .propose("<html></html>", &failed_rule(), &failure())
            .await
            .unwrap_err();
        assert!(matches!(err, crate::ScraprError::OracleUnavailable(_)));
    }

    #[test]
    fn test_prompt_contains_failed_selectors_and_reason() {
        let mock = Arc::new(MockLlmClient::new(vec![]));
        let oracle = RepairOracle::new(mock);

        let prompt = oracle.build_prompt("<html><body></body></html>", &failed_rule(), &failure());
        assert!(prompt.contains("article.product_pod"));
        assert!(prompt.contains("h3 a"));
        assert!(prompt.contains(".price_color"));
        assert!(prompt.contains("no elements matched container selector"));
        assert!(prompt.contains("RESPOND WITH ONLY THIS JSON"));
    }

    #[test]
    fn test_prompt_truncates_document() {
        let mock = Arc::new(MockLlmClient::new(vec![]));
        let oracle = RepairOracle::new(mock).with_sample_cap(100);

        let document = "x".repeat(10_000);
        let prompt = oracle.build_prompt(&document, &failed_rule(), &failure());
        assert!(prompt.contains(&"x".repeat(100)));
        assert!(!prompt.contains(&"x".repeat(101)));
    }

    #[test]
    fn test_sample_short_document_untouched() {
        assert_eq!(sample("<html>", 3000), "<html>");
        assert_eq!(sample("abc", 3), "abc");
    }

    #[test]
    fn test_sample_counts_characters_not_bytes() {
        // Ten two-byte characters: a cap of 5 keeps 5 characters (10 bytes).
        let doc = "é".repeat(10);
        let cut = sample(&doc, 5);
        assert_eq!(cut.chars().count(), 5);
        assert_eq!(cut, "é".repeat(5));
    }

    #[test]
    fn test_sample_never_splits_a_character() {
        let doc = "aéé";
        let cut = sample(doc, 2);
        assert_eq!(cut, "aé");
        assert!(doc.is_char_boundary(cut.len()));
    }
}
