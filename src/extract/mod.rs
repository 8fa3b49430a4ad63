//! Extractor - applies a rule to an HTML document and yields records or a
//! typed failure.
//!
//! Extraction is a pure function of the document and the rule: the document
//! is parsed fresh on each call and no state is kept between calls. Failures
//! carry enough detail (the offending locator, container and match counts)
//! for the repair oracle to reason about what went wrong.

pub mod locator;

use std::fmt;

use log::debug;
use scraper::Html;

use crate::domain::{Record, Rule};
pub use locator::{Locator, Scope};

use locator::element_text;

/// Why one extraction attempt produced no records.
///
/// These are recoverable by design - each variant is the input to a repair
/// proposal, not a fault. Fatal errors live in [`crate::error::ScraprError`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExtractFailure {
    /// A locator in the rule is not valid CSS
    InvalidLocator { locator: String, message: String },
    /// The container locator matched nothing
    NoContainers { container: String },
    /// Containers matched, but no container yielded both fields
    NoFieldsExtracted {
        containers: usize,
        name_matched: usize,
        price_matched: usize,
    },
}

impl fmt::Display for ExtractFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExtractFailure::InvalidLocator { locator, message } => {
                write!(f, "selector '{}' is not valid CSS: {}", locator, message)
            }
            ExtractFailure::NoContainers { container } => {
                write!(f, "no elements matched container selector '{}'", container)
            }
            ExtractFailure::NoFieldsExtracted {
                containers,
                name_matched,
                price_matched,
            } => write!(
                f,
                "found {} containers but couldn't extract name/price \
                 (name selector matched in {}, price selector matched in {})",
                containers, name_matched, price_matched
            ),
        }
    }
}

/// Apply `rule` to `document`.
///
/// Returns the records in document order, or the failure that should drive
/// repair. A container missing either field is skipped silently - that is a
/// per-container filter, not a per-call failure.
pub fn extract(document: &str, rule: &Rule) -> Result<Vec<Record>, ExtractFailure> {
    let container = compile(&rule.container)?;
    let name = compile(&rule.name)?;
    let price = compile(&rule.price)?;

    let html = Html::parse_document(document);
    let containers = container.select(Scope::Document(&html));
    debug!(
        "selector '{}' matched {} containers",
        container.as_str(),
        containers.len()
    );

    if containers.is_empty() {
        return Err(ExtractFailure::NoContainers {
            container: rule.container.clone(),
        });
    }

    let mut records = Vec::new();
    let mut name_matched = 0;
    let mut price_matched = 0;

    for element in &containers {
        let name_text = name
            .select_first(Scope::Element(*element))
            .map(element_text);
        if name_text.is_some() {
            name_matched += 1;
        }

        let price_text = price
            .select_first(Scope::Element(*element))
            .map(element_text);
        if price_text.is_some() {
            price_matched += 1;
        }

        if let Some(record) = Record::from_fields(name_text.as_deref(), price_text.as_deref()) {
            records.push(record);
        }
    }

    if records.is_empty() {
        return Err(ExtractFailure::NoFieldsExtracted {
            containers: containers.len(),
            name_matched,
            price_matched,
        });
    }

    debug!("extracted {} records", records.len());
    Ok(records)
}

fn compile(raw: &str) -> Result<Locator, ExtractFailure> {
    Locator::parse(raw).map_err(|message| ExtractFailure::InvalidLocator {
        locator: raw.to_string(),
        message,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rule() -> Rule {
        Rule::new("li.product", ".name", ".price").unwrap()
    }

    fn product(name: &str, price: &str) -> String {
        format!(
            r#"<li class="product"><span class="name">{}</span><span class="price">{}</span></li>"#,
            name, price
        )
    }

    fn page(items: &[String]) -> String {
        format!("<html><body><ul>{}</ul></body></html>", items.join(""))
    }

    #[test]
    fn test_no_containers() {
        let document = page(&[]);
        let failure = extract(&document, &rule()).unwrap_err();
        assert_eq!(
            failure,
            ExtractFailure::NoContainers {
                container: "li.product".to_string()
            }
        );
    }

    #[test]
    fn test_no_fields_extracted() {
        let document = r#"
            <html><body>
                <li class="product"><span class="title">A</span></li>
                <li class="product"><span class="title">B</span></li>
            </body></html>
        "#;
        let failure = extract(document, &rule()).unwrap_err();
        assert_eq!(
            failure,
            ExtractFailure::NoFieldsExtracted {
                containers: 2,
                name_matched: 0,
                price_matched: 0,
            }
        );
    }

    #[test]
    fn test_no_fields_reports_which_selector_failed() {
        // Names resolve everywhere, prices nowhere.
        let document = r#"
            <html><body>
                <li class="product"><span class="name">A</span></li>
                <li class="product"><span class="name">B</span></li>
            </body></html>
        "#;
        let failure = extract(document, &rule()).unwrap_err();
        assert_eq!(
            failure,
            ExtractFailure::NoFieldsExtracted {
                containers: 2,
                name_matched: 2,
                price_matched: 0,
            }
        );
    }

    #[test]
    fn test_extracts_complete_containers_in_order() {
        let document = page(&[
            product("Alpha", "£1.00"),
            product("Beta", "£2.00"),
            product("Gamma", "£3.00"),
        ]);
        let records = extract(&document, &rule()).unwrap();
        assert_eq!(records.len(), 3);
        assert_eq!(records[0].name, "Alpha");
        assert_eq!(records[1].name, "Beta");
        assert_eq!(records[2].name, "Gamma");
        assert_eq!(records[2].price, "£3.00");
    }

    #[test]
    fn test_incomplete_containers_are_skipped_not_fatal() {
        let document = page(&[
            product("Alpha", "£1.00"),
            r#"<li class="product"><span class="name">no price</span></li>"#.to_string(),
            product("Gamma", "£3.00"),
        ]);
        let records = extract(&document, &rule()).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].name, "Alpha");
        assert_eq!(records[1].name, "Gamma");
    }

    #[test]
    fn test_empty_text_counts_as_absent() {
        // Price element exists but holds only whitespace - no record.
        let document = page(&[
            r#"<li class="product"><span class="name">A</span><span class="price">  </span></li>"#
                .to_string(),
        ]);
        let failure = extract(&document, &rule()).unwrap_err();
        assert!(matches!(
            failure,
            ExtractFailure::NoFieldsExtracted {
                containers: 1,
                name_matched: 1,
                price_matched: 1,
            }
        ));
    }

    #[test]
    fn test_invalid_container_locator() {
        let bad = Rule::new("li..[", ".name", ".price").unwrap();
        let failure = extract("<html></html>", &bad).unwrap_err();
        assert!(matches!(failure, ExtractFailure::InvalidLocator { .. }));
    }

    #[test]
    fn test_extract_is_idempotent() {
        let document = page(&[product("Alpha", "£1.00"), product("Beta", "£2.00")]);
        let first = extract(&document, &rule());
        let second = extract(&document, &rule());
        assert_eq!(first, second);
    }

    #[test]
    fn test_twenty_containers_all_complete() {
        let items: Vec<String> = (0..20)
            .map(|i| product(&format!("Item {}", i), &format!("£{}.00", i)))
            .collect();
        let document = page(&items);
        let records = extract(&document, &rule()).unwrap();
        assert_eq!(records.len(), 20);
        assert_eq!(records[19].name, "Item 19");
    }

    #[test]
    fn test_failure_display() {
        let failure = ExtractFailure::NoContainers {
            container: "div.missing".to_string(),
        };
        assert_eq!(
            failure.to_string(),
            "no elements matched container selector 'div.missing'"
        );

        let failure = ExtractFailure::NoFieldsExtracted {
            containers: 5,
            name_matched: 5,
            price_matched: 0,
        };
        assert!(failure.to_string().contains("found 5 containers"));
        assert!(failure.to_string().contains("price selector matched in 0"));
    }
}
