//! Domain types for scrapr - rules, records, and run outcomes.

pub mod outcome;
pub mod record;
pub mod rule;

pub use outcome::RunOutcome;
pub use record::Record;
pub use rule::Rule;
