//! Agent runner - drives extract/repair cycles against one document.

pub mod agent;

pub use agent::{AgentConfig, ScrapeAgent};
