//! Translator coordinating the model translation pipeline
//!
//! The translator runs every stage over the same text:
//! Parser → Database → Resolver → Emitter

use std::sync::Arc;

use anyhow::Result;
use tracing::{debug, info, span, Level};

use crate::core::{
    Database, DiagnosticSink, EmitConfig, Emitter, GeneratedFiles, ModelError, Parser, Resolver,
};
use crate::plugins::class::{AssociationResolver, CSharpEmitter, ClassDatabase, ClassParser};

/// Pipeline that turns class diagram text into generated C# sources
///
/// Holds no state between runs; the same translator can be reused for any
/// number of inputs.
pub struct Translator {
    parser: ClassParser,
    resolver: AssociationResolver,
    emitter: CSharpEmitter,
}

impl Translator {
    /// Create a translator with the default emit configuration
    pub fn new() -> Self {
        Self::with_config(EmitConfig::default())
    }

    /// Create a translator with a specific emit configuration
    pub fn with_config(config: EmitConfig) -> Self {
        Self {
            parser: ClassParser::new(),
            resolver: AssociationResolver::new(),
            emitter: CSharpEmitter::with_config(config),
        }
    }

    /// Report skipped lines from every stage to `sink`
    pub fn with_sink(self, sink: Arc<dyn DiagnosticSink>) -> Self {
        Self {
            parser: ClassParser::with_sink(Arc::clone(&sink)),
            resolver: AssociationResolver::with_sink(sink),
            emitter: self.emitter,
        }
    }

    pub fn config(&self) -> &EmitConfig {
        self.emitter.config()
    }

    /// Parse and resolve `input` without emitting
    pub fn build_model(&self, input: &str) -> Result<ClassDatabase> {
        let parse_span = span!(Level::DEBUG, "pipeline_parse");
        let parse_enter = parse_span.enter();
        let mut database = ClassDatabase::new();
        self.parser.parse(input, &mut database)?;
        debug!(
            classes = database.node_count(),
            distinct = database.distinct_count(),
            "Parsing completed"
        );
        drop(parse_enter);

        let resolve_span = span!(Level::DEBUG, "pipeline_resolve");
        let resolve_enter = resolve_span.enter();
        self.resolver.resolve(input, &mut database)?;
        debug!(edges = database.edge_count(), "Resolution completed");
        drop(resolve_enter);

        Ok(database)
    }

    /// Run the full pipeline over `input`
    ///
    /// Blank input is rejected; anything else produces a (possibly empty)
    /// set of generated files.
    pub fn translate(&self, input: &str) -> Result<GeneratedFiles> {
        let translate_span = span!(Level::INFO, "translate", input_len = input.len());
        let _enter = translate_span.enter();

        ModelError::reject_blank(input)?;

        info!("Starting translation pipeline");
        let database = self.build_model(input)?;

        let emit_span = span!(Level::DEBUG, "pipeline_emit");
        let emit_enter = emit_span.enter();
        let files = self.emitter.emit(&database)?;
        debug!(files = files.len(), "Emission completed");
        drop(emit_enter);

        info!(files = files.len(), "Pipeline completed successfully");
        Ok(files)
    }
}

impl Default for Translator {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{CollectingSink, SkipReason};

    const TOURS: &str = "classDiagram\n\
        class Customer {\n\
        \x20 +name: String\n\
        }\n\
        class Tour {\n\
        \x20 +title: String\n\
        }\n\
        Customer \"Customer\" <--> \"*Tours\" Tour\n";

    #[test]
    fn test_translator_rejects_blank_input() {
        let translator = Translator::new();
        for input in ["", "   ", "\n\t\n"] {
            let err = translator.translate(input).unwrap_err();
            assert!(matches!(
                err.downcast_ref::<ModelError>(),
                Some(ModelError::EmptyInput)
            ));
        }
    }

    #[test]
    fn test_translator_unrecognized_text_yields_empty_map() {
        let files = Translator::new().translate("hello world").unwrap();
        assert!(files.is_empty());
    }

    #[test]
    fn test_translator_full_pipeline() {
        let files = Translator::new().translate(TOURS).unwrap();
        assert_eq!(
            files.names().collect::<Vec<_>>(),
            vec!["AppDbContext.cs", "Customer.cs", "Tour.cs"]
        );

        let customer = files.get("Customer.cs").unwrap();
        assert!(customer.contains("public string? Name { get; set; }"));
        assert!(customer.contains("public List<Tour> Tours { get; set; } = new List<Tour>();"));

        let tour = files.get("Tour.cs").unwrap();
        assert!(tour.contains("public Customer? Customer { get; set; }"));
    }

    #[test]
    fn test_translator_uses_config() {
        let config = EmitConfig::new()
            .with_namespace("Tours.Domain")
            .with_context_name("TourContext");
        let translator = Translator::with_config(config);
        assert_eq!(translator.config().namespace, "Tours.Domain");

        let files = translator.translate(TOURS).unwrap();
        assert!(files.contains("TourContext.cs"));
        assert!(!files.contains("AppDbContext.cs"));
        assert!(files
            .get("Customer.cs")
            .unwrap()
            .contains("namespace Tours.Domain"));
    }

    #[test]
    fn test_translator_is_idempotent() {
        let translator = Translator::new();
        let first = translator.translate(TOURS).unwrap();
        let second = translator.translate(TOURS).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_build_model() {
        let db = Translator::new().build_model(TOURS).unwrap();
        assert_eq!(db.class_count(), 2);
        assert_eq!(db.edge_count(), 2);
    }

    #[test]
    fn test_translator_with_sink_collects_skips() {
        let sink = Arc::new(CollectingSink::new());
        let translator = Translator::new().with_sink(sink.clone());
        let input = "class Foo {\n  not an attribute\n}\nFoo -- Ghost\n";

        let files = translator.translate(input).unwrap();
        assert_eq!(files.len(), 2);

        let reasons: Vec<_> = sink.lines().into_iter().map(|s| s.reason).collect();
        assert!(reasons.contains(&SkipReason::MalformedAttribute));
        assert!(reasons.contains(&SkipReason::UnknownClass));
    }
}
