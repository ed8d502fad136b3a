//! Class diagram parser
//!
//! Fills the database with one descriptor per `class` block, attributes in
//! text order. Relationships are left empty for the resolver.

use std::sync::Arc;

use anyhow::Result;
use tracing::{debug, span, trace, Level};

use super::chumsky_parser::ChumskyClassParser;
use super::database::{AttributeDescriptor, ClassDatabase, ClassDescriptor};
use crate::core::{Database, DiagnosticSink, NullSink, Parser, SkipReason, SkippedLine};

/// Class diagram parser
pub struct ClassParser {
    grammar: ChumskyClassParser,
    sink: Arc<dyn DiagnosticSink>,
}

impl ClassParser {
    pub fn new() -> Self {
        Self::with_sink(Arc::new(NullSink))
    }

    /// Create a parser reporting skipped lines to `sink`
    pub fn with_sink(sink: Arc<dyn DiagnosticSink>) -> Self {
        Self {
            grammar: ChumskyClassParser::new(),
            sink,
        }
    }
}

impl Default for ClassParser {
    fn default() -> Self {
        Self::new()
    }
}

impl Parser<ClassDatabase> for ClassParser {
    fn parse(&self, input: &str, database: &mut ClassDatabase) -> Result<()> {
        let parse_span = span!(Level::INFO, "parse_classes", input_len = input.len());
        let _enter = parse_span.enter();

        let scan = self.grammar.scan(input);

        for skipped in &scan.skipped {
            if matches!(
                skipped.reason,
                SkipReason::MalformedAttribute | SkipReason::UnterminatedClass
            ) {
                self.sink.report(skipped.clone());
            }
        }

        for parsed in scan.classes() {
            let mut class = ClassDescriptor::new(parsed.name.as_str());
            for attribute in &parsed.attributes {
                class.add_attribute(AttributeDescriptor::new(
                    attribute.visibility,
                    attribute.name.as_str(),
                    attribute.type_token.as_str(),
                ));
            }

            trace!(
                class = %class.name,
                attributes = class.attributes.len(),
                "Parsed class"
            );

            if !database.add_class(class) {
                self.sink.report(SkippedLine::new(
                    parsed.line,
                    format!("class {}", parsed.name),
                    SkipReason::DuplicateClass,
                ));
            }
        }

        debug!(
            classes = database.class_count(),
            distinct = database.distinct_count(),
            "Parsing completed"
        );
        Ok(())
    }

    fn name(&self) -> &'static str {
        "class"
    }

    fn version(&self) -> &'static str {
        "0.1.0"
    }

    fn can_parse(&self, input: &str) -> bool {
        let scan = self.grammar.scan(input);
        !scan.statements.is_empty()
    }
}
