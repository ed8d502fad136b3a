//! Core emitter trait for generated source
//!
//! This trait defines the interface for turning a resolved database into
//! output units for some target language.

use anyhow::Result;

use super::Database;

/// Core trait for source emitters
///
/// # Example
/// ```
/// use modelwright::core::{Emitter, Parser};
/// use modelwright::plugins::class::{ClassDatabase, ClassParser, CSharpEmitter};
///
/// let mut db = ClassDatabase::new();
/// ClassParser::new().parse("class Foo { }", &mut db).unwrap();
/// let files = CSharpEmitter::new().emit(&db).unwrap();
/// assert!(files.get("Foo.cs").is_some());
/// ```
pub trait Emitter<D: Database>: Send + Sync {
    /// The output type of this emitter
    type Output;

    /// Emit the database into the output format
    fn emit(&self, database: &D) -> Result<Self::Output>;

    /// Get the name of this emitter
    fn name(&self) -> &'static str;

    /// Get the version of this emitter
    fn version(&self) -> &'static str;

    /// Get the target language identifier
    fn target(&self) -> &'static str;
}
