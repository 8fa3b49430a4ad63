//! Locator - a validated CSS selector with one select operation.
//!
//! The extractor only ever needs "the elements matching this locator within
//! that scope", so the selector engine is confined to this module.

use scraper::{ElementRef, Html, Selector};

/// Where a locator is evaluated: the whole document, or the subtree of one
/// element (a container).
#[derive(Debug, Clone, Copy)]
pub enum Scope<'a> {
    Document(&'a Html),
    Element(ElementRef<'a>),
}

/// A compiled CSS locator. Construction validates the selector string, so a
/// `Locator` can always be evaluated.
#[derive(Debug, Clone)]
pub struct Locator {
    raw: String,
    selector: Selector,
}

impl Locator {
    /// Compile a locator, returning the engine's message on invalid syntax.
    pub fn parse(raw: &str) -> std::result::Result<Self, String> {
        let selector = Selector::parse(raw).map_err(|e| e.to_string())?;
        Ok(Self {
            raw: raw.to_string(),
            selector,
        })
    }

    /// The original locator string.
    pub fn as_str(&self) -> &str {
        &self.raw
    }

    /// All matching descendants of the scope, in document order.
    pub fn select<'a>(&self, scope: Scope<'a>) -> Vec<ElementRef<'a>> {
        match scope {
            Scope::Document(html) => html.select(&self.selector).collect(),
            Scope::Element(element) => element.select(&self.selector).collect(),
        }
    }

    /// The first matching descendant of the scope, if any.
    pub fn select_first<'a>(&self, scope: Scope<'a>) -> Option<ElementRef<'a>> {
        match scope {
            Scope::Document(html) => html.select(&self.selector).next(),
            Scope::Element(element) => element.select(&self.selector).next(),
        }
    }
}

/// Concatenated text content of an element's subtree.
pub fn element_text(element: ElementRef<'_>) -> String {
    element.text().collect::<String>()
}
