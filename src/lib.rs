//! Scrapr - an adaptive web scraping agent
//!
//! Scrapr extracts name/price records from an HTML page with a CSS selector
//! rule, and when the rule stops matching it asks an LLM to propose a
//! corrected rule from a sample of the markup, then retries with fresh
//! selectors until it succeeds or its attempt budget runs out.

pub mod domain;
pub mod error;
pub mod extract;
pub mod fetch;
pub mod llm;
pub mod oracle;
pub mod runner;

pub use error::{Result, ScraprError};
