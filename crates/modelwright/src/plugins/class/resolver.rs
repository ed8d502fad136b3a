//! Association resolver
//!
//! Rescans the diagram text for association statements and attaches a
//! navigation property to both ends. Every matched line adds exactly one
//! property per end; repeated lines add repeated properties.

use std::sync::Arc;

use anyhow::Result;
use tracing::{debug, span, trace, Level};

use super::chumsky_parser::{Adornment, AssociationForm, ChumskyClassParser, ParsedAssociation};
use super::database::{ClassDatabase, RelationshipDescriptor};
use crate::core::{
    pluralize, Database, DiagnosticSink, NullSink, Resolver, SkipReason, SkippedLine,
};

/// Resolver for labeled and symbol associations
pub struct AssociationResolver {
    grammar: ChumskyClassParser,
    sink: Arc<dyn DiagnosticSink>,
}

impl AssociationResolver {
    pub fn new() -> Self {
        Self::with_sink(Arc::new(NullSink))
    }

    /// Create a resolver reporting skipped lines to `sink`
    pub fn with_sink(sink: Arc<dyn DiagnosticSink>) -> Self {
        Self {
            grammar: ChumskyClassParser::new(),
            sink,
        }
    }

    /// Properties to add to the left and right class, in that order
    ///
    /// Labeled form crosses labels: the left class gets the right label and
    /// the right class gets the left label, each sized by its own marker.
    pub fn derive(form: &AssociationForm) -> (RelationshipDescriptor, RelationshipDescriptor) {
        match form {
            AssociationForm::Labeled {
                left,
                left_label,
                right_label,
                right,
            } => (
                RelationshipDescriptor {
                    name: right_label.text.clone(),
                    target: right.clone(),
                    is_collection: right_label.many,
                },
                RelationshipDescriptor {
                    name: left_label.text.clone(),
                    target: left.clone(),
                    is_collection: left_label.many,
                },
            ),
            AssociationForm::Symbol {
                left,
                adornment,
                right,
            } => {
                let (left_many, right_many) = match adornment {
                    Adornment::None => (true, true),
                    Adornment::Left(_) => (true, false),
                    Adornment::Right(_) => (false, true),
                };
                (
                    Self::navigation(right, left_many),
                    Self::navigation(left, right_many),
                )
            }
        }
    }

    fn navigation(target: &str, many: bool) -> RelationshipDescriptor {
        if many {
            RelationshipDescriptor::collection(pluralize(target), target)
        } else {
            RelationshipDescriptor::single(target, target)
        }
    }

    fn apply(&self, association: &ParsedAssociation, database: &mut ClassDatabase) -> bool {
        let (left, right) = association.endpoints();
        if !database.contains(left) || !database.contains(right) {
            self.sink.report(SkippedLine::new(
                association.line,
                association.text.as_str(),
                SkipReason::UnknownClass,
            ));
            return false;
        }

        let (left, right) = (left.to_string(), right.to_string());
        let (for_left, for_right) = Self::derive(&association.form);
        trace!(
            line = association.line,
            left = %left,
            property = %for_left.name,
            right = %right,
            inverse = %for_right.name,
            "Resolved association"
        );
        database.attach_edge(&left, for_left);
        database.attach_edge(&right, for_right);
        true
    }
}

impl Default for AssociationResolver {
    fn default() -> Self {
        Self::new()
    }
}

impl Resolver<ClassDatabase> for AssociationResolver {
    fn resolve(&self, input: &str, database: &mut ClassDatabase) -> Result<()> {
        let resolve_span = span!(Level::INFO, "resolve_associations", input_len = input.len());
        let _enter = resolve_span.enter();

        let scan = self.grammar.scan(input);

        for skipped in &scan.skipped {
            if skipped.reason == SkipReason::UnrecognizedStatement {
                self.sink.report(skipped.clone());
            }
        }

        let mut resolved = 0;
        let mut dropped = 0;
        for association in scan.associations() {
            if self.apply(association, database) {
                resolved += 1;
            } else {
                dropped += 1;
            }
        }

        debug!(
            resolved,
            dropped,
            edges = database.edge_count(),
            "Resolution completed"
        );
        Ok(())
    }

    fn name(&self) -> &'static str {
        "association"
    }

    fn version(&self) -> &'static str {
        "0.1.0"
    }
}
