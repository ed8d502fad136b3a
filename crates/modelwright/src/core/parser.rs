//! Core parser trait for diagram text
//!
//! This trait defines the interface for turning diagram text into
//! descriptors stored in a database.

use anyhow::Result;

use super::Database;

/// Core trait for diagram parsers
///
/// # Example
/// ```
/// use modelwright::core::{Database, Parser};
/// use modelwright::plugins::class::{ClassDatabase, ClassParser};
///
/// let parser = ClassParser::new();
/// let mut db = ClassDatabase::new();
/// parser.parse("class Foo {\n  +name: String\n}", &mut db).unwrap();
/// assert_eq!(db.node_count(), 1);
/// ```
pub trait Parser<D: Database>: Send + Sync {
    /// Parse diagram text into the provided database
    fn parse(&self, input: &str, database: &mut D) -> Result<()>;

    /// Get the name of this parser
    fn name(&self) -> &'static str;

    /// Get the version of this parser
    fn version(&self) -> &'static str;

    /// Check if the input contains anything this parser recognizes
    fn can_parse(&self, input: &str) -> bool;
}
