//! Extraction rule - the selector triple used for one extraction attempt.

use serde::{Deserialize, Serialize};

use crate::error::{Result, ScraprError};

/// An immutable extraction rule: CSS locators for the repeated container
/// element and, scoped within each container, the name and price fields.
///
/// A rule is created by the caller as the initial rule, or parsed whole from
/// a repair proposal. It is never mutated - each attempt either keeps the
/// current rule or replaces it entirely.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rule {
    /// Locator selecting zero or more repeated container elements
    pub container: String,
    /// Locator for the record name, evaluated relative to a container
    pub name: String,
    /// Locator for the record price, evaluated relative to a container
    pub price: String,
}

impl Rule {
    /// Create a rule, rejecting empty locators.
    pub fn new(
        container: impl Into<String>,
        name: impl Into<String>,
        price: impl Into<String>,
    ) -> Result<Self> {
        let rule = Self {
            container: container.into(),
            name: name.into(),
            price: price.into(),
        };
        rule.validate()?;
        Ok(rule)
    }

    /// Check that all three locators are non-empty.
    pub fn validate(&self) -> Result<()> {
        for (field, value) in [
            ("container", &self.container),
            ("name", &self.name),
            ("price", &self.price),
        ] {
            if value.trim().is_empty() {
                return Err(ScraprError::InvalidRule(format!(
                    "{} locator is empty",
                    field
                )));
            }
        }
        Ok(())
    }
}
