//! Modelwright - Translate class diagrams into C# entity models
//!
//! A library for parsing a constrained class diagram language and emitting a
//! bidirectional, collection-aware object model as C# source files.
//!
//! # Quick Start
//!
//! ```rust
//! use modelwright::translate;
//!
//! let input = "class Customer {\n  +name: String\n}\nclass Tour {\n}\nCustomer -- Tour";
//! let files = translate(input).unwrap();
//! assert_eq!(files.len(), 3);
//! assert!(files.get("Customer.cs").unwrap().contains("public List<Tour> Tours"));
//! ```
//!
//! # Advanced Usage
//!
//! For more control, use the individual components:
//!
//! ```rust
//! use modelwright::prelude::*;
//!
//! let input = "class Customer {\n}\nclass Tour {\n}\nCustomer o-- Tour";
//!
//! // Parse into a database
//! let parser = ClassParser::new();
//! let mut database = ClassDatabase::new();
//! parser.parse(input, &mut database).unwrap();
//! assert_eq!(database.node_count(), 2);
//!
//! // Attach navigation properties
//! AssociationResolver::new().resolve(input, &mut database).unwrap();
//! assert_eq!(database.edge_count(), 2);
//!
//! // Emit C# units
//! let emitter = CSharpEmitter::with_config(EmitConfig::new().with_namespace("Tours"));
//! let files = emitter.emit(&database).unwrap();
//! assert!(files.contains("Tour.cs"));
//! ```

pub mod core;
pub mod plugins;

pub use core::*;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::core::{
        AttributeType, CollectingSink, Database, DiagnosticSink, EmitConfig, Emitter,
        GeneratedFiles, ModelError, Parser, Resolver, SkipReason, SkippedLine,
    };
    pub use crate::plugins::class::{
        AssociationResolver, CSharpEmitter, ClassDatabase, ClassDescriptor, ClassParser,
        RelationshipDescriptor,
    };
    pub use crate::plugins::translator::Translator;
}

/// Translate class diagram text into generated C# files
///
/// Uses the default emit configuration. Keys of the result are file names
/// (`<Class>.cs` plus the context unit), values are full source text.
///
/// # Returns
/// * `Ok(GeneratedFiles)` - One unit per class plus the context, or empty
///   when no class is recognized
/// * `Err` - If the input is empty or whitespace only
///
/// # Example
/// ```rust
/// use modelwright::translate;
///
/// let files = translate("class Foo { }").unwrap();
/// assert!(files.contains("Foo.cs"));
/// assert!(files.get("AppDbContext.cs").unwrap().contains("DbSet<Foo> Foos"));
///
/// assert!(translate("   ").is_err());
/// ```
pub fn translate(input: &str) -> anyhow::Result<GeneratedFiles> {
    use crate::plugins::translator::Translator;

    Translator::new().translate(input)
}

/// Translate class diagram text with a specific emit configuration
///
/// # Example
/// ```rust
/// use modelwright::{translate_with_config, EmitConfig};
///
/// let config = EmitConfig::new()
///     .with_namespace("Tours.Domain")
///     .with_marker("");
/// let files = translate_with_config("class Tour { }", config).unwrap();
/// let tour = files.get("Tour.cs").unwrap();
/// assert!(tour.contains("namespace Tours.Domain"));
/// assert!(!tour.contains("[Serializable]"));
/// ```
pub fn translate_with_config(input: &str, config: EmitConfig) -> anyhow::Result<GeneratedFiles> {
    use crate::plugins::translator::Translator;

    Translator::with_config(config).translate(input)
}

/// Parse and resolve class diagram text without emitting
///
/// Useful when you need to inspect the descriptors before generating code.
///
/// # Example
/// ```rust
/// use modelwright::parse;
/// use modelwright::prelude::Database;
///
/// let db = parse("class A {\n}\nclass B {\n}\nA o-- B").unwrap();
/// assert_eq!(db.node_count(), 2);
/// assert_eq!(db.edge_count(), 2);
/// assert!(db.get_class("A").unwrap().relationship("Bs").unwrap().is_collection);
/// ```
pub fn parse(input: &str) -> anyhow::Result<plugins::class::ClassDatabase> {
    use crate::plugins::translator::Translator;

    Translator::new().build_model(input)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_translate_single_class() {
        let files = translate("class Foo { }").unwrap();
        assert_eq!(files.len(), 2);
        assert!(files.contains("Foo.cs"));
        assert!(files.contains("AppDbContext.cs"));
    }

    #[test]
    fn test_translate_blank_is_error() {
        assert!(translate("").is_err());
        assert!(translate(" \n ").is_err());
    }

    #[test]
    fn test_translate_no_classes_is_empty() {
        let files = translate("classDiagram\n%% nothing here").unwrap();
        assert!(files.is_empty());
    }

    #[test]
    fn test_translate_with_config_base_type() {
        let config = EmitConfig::new().with_base_type("Entity");
        let files = translate_with_config("class Foo { }", config).unwrap();
        assert!(files
            .get("Foo.cs")
            .unwrap()
            .contains("public class Foo : Entity"));
    }

    #[test]
    fn test_parse_class_diagram() {
        let db = parse("class A {\n  +id: int\n}\nclass B {\n}\nA -- B").unwrap();
        assert_eq!(db.node_count(), 2);
        assert_eq!(db.edge_count(), 2);
        let a = db.get_class("A").unwrap();
        assert_eq!(a.attributes.len(), 1);
        assert_eq!(a.relationship("Bs").unwrap().target, "B");
    }

    #[test]
    fn test_parse_does_not_reject_blank() {
        let db = parse("").unwrap();
        assert_eq!(db.node_count(), 0);
    }
}
