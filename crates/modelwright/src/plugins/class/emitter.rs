//! C# source emitter
//!
//! Emits one entity class per distinct class name plus one `DbContext`
//! listing a `DbSet` per class. Output depends only on the database and the
//! config, so identical input always yields identical text.

use std::fmt::Write as _;

use anyhow::Result;
use tracing::{debug, span, trace, Level};

use super::database::{AttributeDescriptor, ClassDatabase, ClassDescriptor, RelationshipDescriptor};
use crate::core::{
    pluralize, property_name, AttributeType, Database, EmitConfig, Emitter, GeneratedFiles,
};

const INDENT: &str = "    ";
const MEMBER_INDENT: &str = "        ";

/// C# emitter with an Entity Framework flavour
pub struct CSharpEmitter {
    config: EmitConfig,
}

impl CSharpEmitter {
    pub fn new() -> Self {
        Self::with_config(EmitConfig::default())
    }

    pub fn with_config(config: EmitConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &EmitConfig {
        &self.config
    }

    /// C# type for an attribute type
    pub fn csharp_type(attribute_type: &AttributeType) -> String {
        match attribute_type {
            AttributeType::String => "string?".to_string(),
            AttributeType::Date => "DateTime?".to_string(),
            AttributeType::Int => "int?".to_string(),
            AttributeType::Float => "float?".to_string(),
            AttributeType::Boolean => "bool?".to_string(),
            AttributeType::List(element) => format!("List<{}>", element),
            AttributeType::Custom(raw) => format!("{}?", raw),
        }
    }

    fn attribute_line(attribute: &AttributeDescriptor) -> String {
        format!(
            "public {} {} {{ get; set; }}",
            Self::csharp_type(&attribute.attribute_type()),
            property_name(&attribute.name)
        )
    }

    fn relationship_line(relationship: &RelationshipDescriptor) -> String {
        if relationship.is_collection {
            format!(
                "public List<{target}> {name} {{ get; set; }} = new List<{target}>();",
                target = relationship.target,
                name = relationship.name
            )
        } else {
            format!(
                "public {}? {} {{ get; set; }}",
                relationship.target, relationship.name
            )
        }
    }

    /// Render one entity class unit
    pub fn emit_class(&self, class: &ClassDescriptor) -> Result<String> {
        let mut out = String::new();
        writeln!(out, "using System;")?;
        writeln!(out, "using System.Collections.Generic;")?;
        writeln!(out)?;
        writeln!(out, "namespace {}", self.config.namespace)?;
        writeln!(out, "{{")?;
        if !self.config.marker.is_empty() {
            writeln!(out, "{}{}", INDENT, self.config.marker)?;
        }
        writeln!(
            out,
            "{}public class {} : {}",
            INDENT, class.name, self.config.base_type
        )?;
        writeln!(out, "{}{{", INDENT)?;

        for attribute in &class.attributes {
            writeln!(out, "{}{}", MEMBER_INDENT, Self::attribute_line(attribute))?;
        }

        if !class.attributes.is_empty() && !class.relationships.is_empty() {
            writeln!(out)?;
        }

        for relationship in &class.relationships {
            writeln!(
                out,
                "{}{}",
                MEMBER_INDENT,
                Self::relationship_line(relationship)
            )?;
        }

        writeln!(out, "{}}}", INDENT)?;
        writeln!(out, "}}")?;
        Ok(out)
    }

    /// Type name of the context, suffixed until it clashes with no class
    pub fn context_name(&self, database: &ClassDatabase) -> String {
        let mut name = self.config.context_name.clone();
        while database.contains(&name) {
            name.push_str("Context");
        }
        name
    }

    /// File name of the context unit for this database
    pub fn context_file_name(&self, database: &ClassDatabase) -> String {
        format!("{}.cs", self.context_name(database))
    }

    /// Render the aggregate persistence context unit
    pub fn emit_context(&self, database: &ClassDatabase) -> Result<String> {
        let context = &self.context_name(database);
        let mut out = String::new();
        writeln!(out, "using Microsoft.EntityFrameworkCore;")?;
        writeln!(out)?;
        writeln!(out, "namespace {}", self.config.namespace)?;
        writeln!(out, "{{")?;
        writeln!(out, "{}public class {} : DbContext", INDENT, context)?;
        writeln!(out, "{}{{", INDENT)?;
        writeln!(
            out,
            "{}public {}(DbContextOptions<{}> options)",
            MEMBER_INDENT, context, context
        )?;
        writeln!(out, "{}{}: base(options)", MEMBER_INDENT, INDENT)?;
        writeln!(out, "{}{{", MEMBER_INDENT)?;
        writeln!(out, "{}}}", MEMBER_INDENT)?;

        let mut sets = database.distinct_nodes().peekable();
        if sets.peek().is_some() {
            writeln!(out)?;
        }
        for class in sets {
            writeln!(
                out,
                "{}public DbSet<{}> {} {{ get; set; }}",
                MEMBER_INDENT,
                class.name,
                pluralize(&class.name)
            )?;
        }

        writeln!(out, "{}}}", INDENT)?;
        writeln!(out, "}}")?;
        Ok(out)
    }
}

impl Default for CSharpEmitter {
    fn default() -> Self {
        Self::new()
    }
}

impl Emitter<ClassDatabase> for CSharpEmitter {
    type Output = GeneratedFiles;

    fn emit(&self, database: &ClassDatabase) -> Result<Self::Output> {
        let emit_span = span!(Level::INFO, "emit_csharp", classes = database.distinct_count());
        let _enter = emit_span.enter();

        let mut files = GeneratedFiles::new();
        if database.distinct_count() == 0 {
            debug!("No classes, nothing to emit");
            return Ok(files);
        }

        for class in database.distinct_nodes() {
            let unit = self.emit_class(class)?;
            trace!(class = %class.name, bytes = unit.len(), "Emitted class");
            files.insert(format!("{}.cs", class.name), unit);
        }

        let context_file = self.context_file_name(database);
        trace!(file = %context_file, configured = %self.config.context_name, "Emitting context");
        files.insert(context_file, self.emit_context(database)?);

        debug!(files = files.len(), "Emission completed");
        Ok(files)
    }

    fn name(&self) -> &'static str {
        "csharp-ef"
    }

    fn version(&self) -> &'static str {
        "0.1.0"
    }

    fn target(&self) -> &'static str {
        "csharp"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::plugins::class::Visibility;

    fn class_with(
        name: &str,
        attributes: &[(&str, &str)],
        relationships: Vec<RelationshipDescriptor>,
    ) -> ClassDescriptor {
        let mut class = ClassDescriptor::new(name);
        for (attr, token) in attributes {
            class.add_attribute(AttributeDescriptor::new(Visibility::Public, *attr, *token));
        }
        for rel in relationships {
            class.add_relationship(rel);
        }
        class
    }

    #[test]
    fn test_type_mapping_table() {
        let cases = [
            ("String", "string?"),
            ("Date", "DateTime?"),
            ("int", "int?"),
            ("float", "float?"),
            ("boolean", "bool?"),
            ("List<Tour>", "List<Tour>"),
            ("Tour", "Tour?"),
            ("int[]", "int[]?"),
            ("Set<Tour>", "Set<Tour>?"),
            ("long", "long?"),
        ];
        for (token, expected) in cases {
            assert_eq!(
                CSharpEmitter::csharp_type(&AttributeType::from_token(token)),
                expected,
                "token {}",
                token
            );
        }
    }

    #[test]
    fn test_empty_class_unit() {
        let emitter = CSharpEmitter::new();
        let unit = emitter.emit_class(&ClassDescriptor::new("Foo")).unwrap();
        let expected = "\
using System;
using System.Collections.Generic;

namespace Generated.Models
{
    [Serializable]
    public class Foo : BaseEntity
    {
    }
}
";
        assert_eq!(unit, expected);
    }

    #[test]
    fn test_full_class_unit() {
        let emitter = CSharpEmitter::new();
        let class = class_with(
            "Customer",
            &[("id", "int"), ("name", "String")],
            vec![
                RelationshipDescriptor::collection("Tours", "Tour"),
                RelationshipDescriptor::single("Company", "Company"),
            ],
        );
        let unit = emitter.emit_class(&class).unwrap();
        let expected = "\
using System;
using System.Collections.Generic;

namespace Generated.Models
{
    [Serializable]
    public class Customer : BaseEntity
    {
        public int? Id { get; set; }
        public string? Name { get; set; }

        public List<Tour> Tours { get; set; } = new List<Tour>();
        public Company? Company { get; set; }
    }
}
";
        assert_eq!(unit, expected);
    }

    #[test]
    fn test_no_separator_with_only_relationships() {
        let emitter = CSharpEmitter::new();
        let class = class_with(
            "Tour",
            &[],
            vec![RelationshipDescriptor::collection("Customers", "Customer")],
        );
        let unit = emitter.emit_class(&class).unwrap();
        assert!(unit.contains(
            "    {\n        public List<Customer> Customers { get; set; } = new List<Customer>();\n    }"
        ));
    }

    #[test]
    fn test_no_separator_with_only_attributes() {
        let emitter = CSharpEmitter::new();
        let class = class_with("Tour", &[("title", "String")], vec![]);
        let unit = emitter.emit_class(&class).unwrap();
        assert!(unit.contains("        public string? Title { get; set; }\n    }"));
    }

    #[test]
    fn test_custom_config() {
        let emitter = CSharpEmitter::with_config(
            EmitConfig::new()
                .with_namespace("Travel.Models")
                .with_base_type("Entity")
                .with_marker(""),
        );
        let unit = emitter.emit_class(&ClassDescriptor::new("Foo")).unwrap();
        assert!(unit.contains("namespace Travel.Models\n"));
        assert!(unit.contains("    public class Foo : Entity\n"));
        assert!(!unit.contains("[Serializable]"));
    }

    #[test]
    fn test_context_lists_distinct_classes() {
        let mut db = ClassDatabase::new();
        db.add_class(ClassDescriptor::new("Company"));
        db.add_class(ClassDescriptor::new("Bus"));
        db.add_class(ClassDescriptor::new("Company"));

        let context = CSharpEmitter::new().emit_context(&db).unwrap();
        let expected = "\
using Microsoft.EntityFrameworkCore;

namespace Generated.Models
{
    public class AppDbContext : DbContext
    {
        public AppDbContext(DbContextOptions<AppDbContext> options)
            : base(options)
        {
        }

        public DbSet<Company> Companies { get; set; }
        public DbSet<Bus> Buses { get; set; }
    }
}
";
        assert_eq!(context, expected);
    }

    #[test]
    fn test_emit_empty_database() {
        let files = CSharpEmitter::new().emit(&ClassDatabase::new()).unwrap();
        assert!(files.is_empty());
    }

    #[test]
    fn test_emit_one_unit_per_distinct_class_plus_context() {
        let mut db = ClassDatabase::new();
        db.add_class(class_with("A", &[("x", "int")], vec![]));
        db.add_class(ClassDescriptor::new("B"));
        db.add_class(class_with("A", &[("y", "int")], vec![]));

        let files = CSharpEmitter::new().emit(&db).unwrap();
        assert_eq!(files.len(), 3);
        assert!(files.contains("A.cs"));
        assert!(files.contains("B.cs"));
        assert!(files.contains("AppDbContext.cs"));
        // First block wins
        assert!(files.get("A.cs").unwrap().contains("public int? X"));
        assert!(!files.get("A.cs").unwrap().contains("public int? Y"));
    }

    #[test]
    fn test_context_renamed_on_collision() {
        let mut db = ClassDatabase::new();
        db.add_class(ClassDescriptor::new("AppDbContext"));

        let emitter = CSharpEmitter::new();
        assert_eq!(emitter.context_name(&db), "AppDbContextContext");
        assert_eq!(emitter.context_file_name(&db), "AppDbContextContext.cs");
        assert_eq!(
            emitter.context_file_name(&ClassDatabase::new()),
            "AppDbContext.cs"
        );

        let files = emitter.emit(&db).unwrap();
        assert_eq!(files.len(), 2);
        assert!(files.contains("AppDbContext.cs"));
        let context = files.get("AppDbContextContext.cs").unwrap();
        assert!(context.contains("public class AppDbContextContext : DbContext"));
        assert!(context.contains("public DbSet<AppDbContext> AppDbContexts { get; set; }"));
    }

    #[test]
    fn test_emitter_metadata() {
        let emitter = CSharpEmitter::new();
        assert_eq!(emitter.name(), "csharp-ef");
        assert_eq!(emitter.target(), "csharp");
        assert_eq!(emitter.version(), "0.1.0");
    }
}
