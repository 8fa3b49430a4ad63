//! Extracted record - one name/price pair.

use std::fmt;

use serde::{Deserialize, Serialize};

/// One extracted record. Both fields are trimmed and non-empty by
/// construction; an incomplete pair never becomes a `Record`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record {
    pub name: String,
    pub price: String,
}

impl Record {
    /// Build a record from raw field text, trimming whitespace.
    ///
    /// Returns `None` if either field is missing or empty after trimming -
    /// the caller drops the pair instead of constructing a partial record.
    pub fn from_fields(name: Option<&str>, price: Option<&str>) -> Option<Self> {
        let name = name.map(str::trim).filter(|s| !s.is_empty())?;
        let price = price.map(str::trim).filter(|s| !s.is_empty())?;
        Some(Self {
            name: name.to_string(),
            price: price.to_string(),
        })
    }
}

impl fmt::Display for Record {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} - {}", self.name, self.price)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_fields_complete() {
        let record = Record::from_fields(Some("A Light in the Attic"), Some("£51.77")).unwrap();
        assert_eq!(record.name, "A Light in the Attic");
        assert_eq!(record.price, "£51.77");
    }

    #[test]
    fn test_from_fields_trims() {
        let record = Record::from_fields(Some("  Tipping the Velvet \n"), Some(" £53.74 ")).unwrap();
        assert_eq!(record.name, "Tipping the Velvet");
        assert_eq!(record.price, "£53.74");
    }

    #[test]
    fn test_from_fields_missing_name() {
        assert!(Record::from_fields(None, Some("£10.00")).is_none());
    }

    #[test]
    fn test_from_fields_missing_price() {
        assert!(Record::from_fields(Some("Soumission"), None).is_none());
    }

    #[test]
    fn test_from_fields_blank_name() {
        assert!(Record::from_fields(Some("   "), Some("£10.00")).is_none());
    }

    #[test]
    fn test_display() {
        let record = Record::from_fields(Some("Sharp Objects"), Some("£47.82")).unwrap();
        assert_eq!(record.to_string(), "Sharp Objects - £47.82");
    }
}
