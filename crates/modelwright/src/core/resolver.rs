//! Core resolver trait for cross-references between descriptors
//!
//! A resolver runs after parsing, rescans the same text and mutates the
//! descriptors already in the database.

use anyhow::Result;

use super::Database;

/// Core trait for relationship resolvers
pub trait Resolver<D: Database>: Send + Sync {
    /// Resolve references found in `input` against `database`, in place
    fn resolve(&self, input: &str, database: &mut D) -> Result<()>;

    /// Get the name of this resolver
    fn name(&self) -> &'static str;

    /// Get the version of this resolver
    fn version(&self) -> &'static str;
}
