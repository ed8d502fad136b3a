//! Command-line interface for the modelwright utility
//!
//! Provides a CLI to turn class diagram text into C# entity model files.

use anyhow::{anyhow, Result};
use clap::{Parser, Subcommand, ValueEnum};
use std::fs;
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{debug, info};

use modelwright::core::logging::{env_level, init_logging};
use modelwright::plugins::Translator;
use modelwright::{CollectingSink, EmitConfig, GeneratedFiles, ModelError, SkippedLine};

/// Directory created under the output directory for generated units
pub const MODELS_DIR: &str = "Models";

/// Modelwright - Generate C# entity models from class diagrams
#[derive(Parser)]
#[command(name = "modelwright")]
#[command(about = "A Rust utility to generate C# entity models from class diagram text")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(author = env!("CARGO_PKG_AUTHORS"))]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,

    /// Set log level (trace|debug|info|warn|error) [default: warn]
    #[arg(long, value_enum)]
    pub log_level: Option<LogLevel>,

    /// Set log format (compact|pretty|json) [default: compact]
    #[arg(long, value_enum)]
    pub log_format: Option<LogFormat>,
}

/// Log level options
#[derive(Copy, Clone, Debug, ValueEnum, PartialEq, Eq)]
pub enum LogLevel {
    Trace,
    Debug,
    Info,
    Warn,
    Error,
}

impl LogLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            LogLevel::Trace => "trace",
            LogLevel::Debug => "debug",
            LogLevel::Info => "info",
            LogLevel::Warn => "warn",
            LogLevel::Error => "error",
        }
    }
}

/// Log format options
#[derive(Copy, Clone, Debug, ValueEnum, PartialEq, Eq)]
pub enum LogFormat {
    Compact,
    Pretty,
    Json,
}

impl LogFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            LogFormat::Compact => "compact",
            LogFormat::Pretty => "pretty",
            LogFormat::Json => "json",
        }
    }
}

#[derive(Subcommand)]
pub enum Commands {
    /// Generate C# model files from a class diagram
    Generate {
        /// Input file containing the class diagram (use - for stdin)
        #[arg(short, long)]
        input: Option<PathBuf>,

        /// Output directory; units are written under <DIR>/Models
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Namespace wrapping every generated unit
        #[arg(long)]
        namespace: Option<String>,

        /// Base type every generated class extends
        #[arg(long)]
        base_type: Option<String>,

        /// Marker line above each class (pass "" to omit)
        #[arg(long)]
        marker: Option<String>,

        /// Name of the generated DbContext
        #[arg(long)]
        context_name: Option<String>,

        /// Print the file map as JSON instead of source text
        #[arg(long)]
        json: bool,
    },

    /// Print the resolved class descriptors as JSON
    Inspect {
        /// Input file to analyze (use - for stdin)
        #[arg(short, long)]
        input: Option<PathBuf>,
    },

    /// Report lines that were skipped during translation
    Check {
        /// Input file to check (use - for stdin)
        #[arg(short, long)]
        input: Option<PathBuf>,

        /// Show in JSON format
        #[arg(long)]
        json: bool,
    },
}

/// Emit settings collected from `generate` flags
#[derive(Debug, Default, Clone)]
pub struct ConfigOverrides {
    pub namespace: Option<String>,
    pub base_type: Option<String>,
    pub marker: Option<String>,
    pub context_name: Option<String>,
}

impl ConfigOverrides {
    /// Apply the overrides on top of the default emit configuration
    pub fn into_config(self) -> EmitConfig {
        let mut config = EmitConfig::default();
        if let Some(namespace) = self.namespace {
            config = config.with_namespace(namespace);
        }
        if let Some(base_type) = self.base_type {
            config = config.with_base_type(base_type);
        }
        if let Some(marker) = self.marker {
            config = config.with_marker(marker);
        }
        if let Some(context_name) = self.context_name {
            config = config.with_context_name(context_name);
        }
        config
    }
}

/// Main CLI application
pub struct ModelwrightApp {
    translator: Translator,
}

impl ModelwrightApp {
    /// Create a new application instance with default settings
    pub fn new() -> Self {
        Self::with_config(EmitConfig::default())
    }

    /// Create a new application instance with an emit config
    pub fn with_config(config: EmitConfig) -> Self {
        Self {
            translator: Translator::with_config(config),
        }
    }

    /// Run the application with the given CLI arguments
    pub fn run(&mut self, cli: Cli) -> Result<()> {
        let log_level = Self::log_level_directive(cli.log_level, env_level());
        let log_format = cli.log_format.map(|f| f.as_str());

        if let Err(e) = init_logging(Some(&log_level), log_format) {
            eprintln!("Warning: Failed to initialize logging: {}", e);
        }

        if cli.verbose {
            eprintln!("Modelwright v{}", env!("CARGO_PKG_VERSION"));
        }

        match cli.command {
            Commands::Generate {
                input,
                output,
                namespace,
                base_type,
                marker,
                context_name,
                json,
            } => {
                let overrides = ConfigOverrides {
                    namespace,
                    base_type,
                    marker,
                    context_name,
                };
                self.generate_command(input, output, overrides, json, cli.verbose)
            }
            Commands::Inspect { input } => self.inspect_command(input, cli.verbose),
            Commands::Check { input, json } => self.check_command(input, json, cli.verbose),
        }
    }

    /// Level directive: the flag, then the environment, then `warn`
    pub fn log_level_directive(flag: Option<LogLevel>, from_env: Option<String>) -> String {
        match (flag, from_env) {
            (Some(level), _) => level.as_str().to_string(),
            (None, Some(directive)) => directive,
            (None, None) => LogLevel::Warn.as_str().to_string(),
        }
    }

    /// Handle the generate command
    fn generate_command(
        &mut self,
        input: Option<PathBuf>,
        output: Option<PathBuf>,
        overrides: ConfigOverrides,
        json: bool,
        verbose: bool,
    ) -> Result<()> {
        let content = self.read_input(input)?;

        if verbose {
            eprintln!("Read {} bytes of input", content.len());
        }

        self.translator = Translator::with_config(overrides.into_config());
        let files = self.translator.translate(&content)?;

        if verbose {
            eprintln!("Generated {} files", files.len());
        }

        match output {
            Some(dir) if dir.to_string_lossy() != "-" => {
                let written = self.write_models(&dir, &files)?;
                if verbose {
                    for path in &written {
                        eprintln!("Wrote {}", path.display());
                    }
                }
                Ok(())
            }
            _ => {
                let rendered = if json {
                    serde_json::to_string_pretty(&files)?
                } else {
                    Self::render_units(&files)
                };
                self.write_rendered(&mut io::stdout().lock(), &rendered)
            }
        }
    }

    /// Handle the inspect command
    fn inspect_command(&self, input: Option<PathBuf>, verbose: bool) -> Result<()> {
        let content = self.read_input(input)?;

        if verbose {
            eprintln!("Read {} bytes of input", content.len());
        }

        ModelError::reject_blank(&content)?;
        let database = self.translator.build_model(&content)?;
        println!("{}", serde_json::to_string_pretty(&database)?);
        Ok(())
    }

    /// Handle the check command
    fn check_command(&self, input: Option<PathBuf>, json: bool, verbose: bool) -> Result<()> {
        let content = self.read_input(input)?;

        if verbose {
            eprintln!("Read {} bytes of input", content.len());
        }

        let skipped = self.collect_skipped(&content)?;

        if json {
            println!("{}", serde_json::to_string_pretty(&skipped)?);
        } else {
            print!("{}", Self::render_skipped(&skipped));
        }
        Ok(())
    }

    /// Translate `content` and return every line the pipeline skipped
    pub fn collect_skipped(&self, content: &str) -> Result<Vec<SkippedLine>> {
        ModelError::reject_blank(content)?;

        let sink = Arc::new(CollectingSink::new());
        let translator =
            Translator::with_config(self.translator.config().clone()).with_sink(sink.clone());
        translator.translate(content)?;

        let mut skipped = sink.take();
        skipped.sort_by_key(|s| s.line);
        debug!(skipped = skipped.len(), "Check completed");
        Ok(skipped)
    }

    /// Human-readable report of skipped lines
    pub fn render_skipped(skipped: &[SkippedLine]) -> String {
        if skipped.is_empty() {
            return "✓ No skipped lines\n".to_string();
        }

        let mut out = String::new();
        for line in skipped {
            out.push_str(&format!("{}\n", line));
        }
        out.push_str(&format!("\n{} line(s) skipped\n", skipped.len()));
        out
    }

    /// All units as one text stream, each preceded by a file comment
    pub fn render_units(files: &GeneratedFiles) -> String {
        let mut out = String::new();
        for (name, text) in files.iter() {
            if !out.is_empty() {
                out.push('\n');
            }
            out.push_str(&format!("// File: {}\n", name));
            out.push_str(text);
        }
        out
    }

    /// Write every unit to `<dir>/Models/<name>`, replacing existing files
    pub fn write_models(&self, dir: &Path, files: &GeneratedFiles) -> Result<Vec<PathBuf>> {
        if dir.exists() && !dir.is_dir() {
            return Err(ModelError::emit_error(format!(
                "output path '{}' is not a directory",
                dir.display()
            ))
            .into());
        }

        let models = dir.join(MODELS_DIR);
        fs::create_dir_all(&models).map_err(ModelError::from)?;

        let mut written = Vec::with_capacity(files.len());
        for (name, text) in files.iter() {
            let path = models.join(name);
            fs::write(&path, text)
                .map_err(|e| anyhow!("Failed to write model file '{}': {}", path.display(), e))?;
            written.push(path);
        }

        info!(files = written.len(), dir = %models.display(), "Models written");
        Ok(written)
    }

    /// Read input from file or stdin
    pub fn read_input(&self, input: Option<PathBuf>) -> Result<String> {
        match input {
            Some(path) => {
                if path.to_string_lossy() == "-" {
                    let mut content = String::new();
                    io::stdin().read_to_string(&mut content)?;
                    Ok(content)
                } else {
                    fs::read_to_string(&path).map_err(|e| {
                        anyhow!("Failed to read input file '{}': {}", path.display(), e)
                    })
                }
            }
            None => {
                let mut content = String::new();
                io::stdin().read_to_string(&mut content)?;
                Ok(content)
            }
        }
    }

    /// Write rendered output, terminated by a newline
    pub fn write_rendered<W: Write>(&self, writer: &mut W, content: &str) -> Result<()> {
        writer.write_all(content.as_bytes())?;
        if !content.is_empty() && !content.ends_with('\n') {
            writer.write_all(b"\n")?;
        }
        writer.flush()?;
        Ok(())
    }

    /// Get a reference to the translator (for testing)
    #[cfg(test)]
    pub fn translator(&self) -> &Translator {
        &self.translator
    }
}

impl Default for ModelwrightApp {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;
    use modelwright::SkipReason;
    use std::fs;
    use tempfile::tempdir;

    const DIAGRAM: &str = "classDiagram\nclass Customer {\n  +name: String\n}\nclass Tour {\n  +title: String\n}\nCustomer -- Tour : makes reservation >\n";

    #[test]
    fn test_cli_parsing_generate_command() {
        let args = vec![
            "modelwright",
            "generate",
            "--input",
            "tours.mmd",
            "--output",
            "out",
            "--namespace",
            "Tours.Domain",
        ];
        let cli = Cli::try_parse_from(args).unwrap();

        match cli.command {
            Commands::Generate {
                input,
                output,
                namespace,
                base_type,
                marker,
                context_name,
                json,
            } => {
                assert_eq!(input.unwrap().to_string_lossy(), "tours.mmd");
                assert_eq!(output.unwrap().to_string_lossy(), "out");
                assert_eq!(namespace.as_deref(), Some("Tours.Domain"));
                assert!(base_type.is_none());
                assert!(marker.is_none());
                assert!(context_name.is_none());
                assert!(!json);
            }
            _ => panic!("Expected Generate command"),
        }
    }

    #[test]
    fn test_cli_parsing_empty_marker() {
        let args = vec!["modelwright", "generate", "--marker", ""];
        let cli = Cli::try_parse_from(args).unwrap();

        match cli.command {
            Commands::Generate { marker, .. } => assert_eq!(marker.as_deref(), Some("")),
            _ => panic!("Expected Generate command"),
        }
    }

    #[test]
    fn test_cli_parsing_inspect_command() {
        let args = vec!["modelwright", "inspect", "-i", "tours.mmd"];
        let cli = Cli::try_parse_from(args).unwrap();

        match cli.command {
            Commands::Inspect { input } => {
                assert_eq!(input.unwrap().to_string_lossy(), "tours.mmd");
            }
            _ => panic!("Expected Inspect command"),
        }
    }

    #[test]
    fn test_cli_parsing_check_command() {
        let args = vec!["modelwright", "check", "--json"];
        let cli = Cli::try_parse_from(args).unwrap();

        match cli.command {
            Commands::Check { input, json } => {
                assert!(input.is_none());
                assert!(json);
            }
            _ => panic!("Expected Check command"),
        }
    }

    #[test]
    fn test_global_flags() {
        let args = vec![
            "modelwright",
            "--verbose",
            "--log-level",
            "debug",
            "--log-format",
            "json",
            "check",
        ];
        let cli = Cli::try_parse_from(args).unwrap();

        assert!(cli.verbose);
        assert_eq!(cli.log_level, Some(LogLevel::Debug));
        assert_eq!(cli.log_format, Some(LogFormat::Json));
    }

    #[test]
    fn test_default_log_level_is_warn() {
        let cli = Cli::try_parse_from(vec!["modelwright", "check"]).unwrap();
        assert_eq!(cli.log_level, None);
        assert_eq!(cli.log_format, None);
        assert_eq!(ModelwrightApp::log_level_directive(None, None), "warn");
    }

    #[test]
    fn test_log_level_flag_beats_environment() {
        assert_eq!(
            ModelwrightApp::log_level_directive(Some(LogLevel::Error), Some("trace".to_string())),
            "error"
        );
        assert_eq!(
            ModelwrightApp::log_level_directive(None, Some("modelwright=debug".to_string())),
            "modelwright=debug"
        );
    }

    #[test]
    fn test_config_overrides() {
        let config = ConfigOverrides {
            namespace: Some("Tours".to_string()),
            marker: Some(String::new()),
            ..Default::default()
        }
        .into_config();

        assert_eq!(config.namespace, "Tours");
        assert_eq!(config.marker, "");
        assert_eq!(config.base_type, EmitConfig::DEFAULT_BASE_TYPE);
        assert_eq!(config.context_name, EmitConfig::DEFAULT_CONTEXT_NAME);
    }

    #[test]
    fn test_app_default_config() {
        let app = ModelwrightApp::default();
        assert_eq!(app.translator().config(), &EmitConfig::default());
    }

    #[test]
    fn test_read_input_from_file() {
        let app = ModelwrightApp::new();

        let dir = tempdir().unwrap();
        let file_path = dir.path().join("tours.mmd");
        fs::write(&file_path, DIAGRAM).unwrap();

        let content = app.read_input(Some(file_path)).unwrap();
        assert_eq!(content, DIAGRAM);
    }

    #[test]
    fn test_read_input_missing_file() {
        let app = ModelwrightApp::new();
        let dir = tempdir().unwrap();
        let err = app
            .read_input(Some(dir.path().join("missing.mmd")))
            .unwrap_err();
        assert!(err.to_string().contains("Failed to read input file"));
    }

    #[test]
    fn test_write_rendered_terminates_output() {
        let app = ModelwrightApp::new();
        let files = app.translator().translate(DIAGRAM).unwrap();

        let mut out = Vec::new();
        app.write_rendered(&mut out, &serde_json::to_string_pretty(&files).unwrap())
            .unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.starts_with('{'));
        assert!(text.ends_with("}\n"));
        assert!(text.contains("\"Customer.cs\""));

        let mut out = Vec::new();
        app.write_rendered(&mut out, "").unwrap();
        assert!(out.is_empty());
    }

    #[test]
    fn test_write_models_creates_models_dir() {
        let app = ModelwrightApp::new();
        let files = app.translator().translate(DIAGRAM).unwrap();

        let dir = tempdir().unwrap();
        let written = app.write_models(dir.path(), &files).unwrap();
        assert_eq!(written.len(), 3);

        let models = dir.path().join(MODELS_DIR);
        for name in ["AppDbContext.cs", "Customer.cs", "Tour.cs"] {
            let on_disk = fs::read_to_string(models.join(name)).unwrap();
            assert_eq!(on_disk, files.get(name).unwrap());
        }
    }

    #[test]
    fn test_write_models_is_idempotent() {
        let app = ModelwrightApp::new();
        let files = app.translator().translate(DIAGRAM).unwrap();
        let dir = tempdir().unwrap();

        app.write_models(dir.path(), &files).unwrap();
        let first = fs::read_to_string(dir.path().join(MODELS_DIR).join("Tour.cs")).unwrap();
        app.write_models(dir.path(), &files).unwrap();
        let second = fs::read_to_string(dir.path().join(MODELS_DIR).join("Tour.cs")).unwrap();

        assert_eq!(first, second);
        assert_eq!(fs::read_dir(dir.path().join(MODELS_DIR)).unwrap().count(), 3);
    }

    #[test]
    fn test_write_models_rejects_file_path() {
        let app = ModelwrightApp::new();
        let files = app.translator().translate(DIAGRAM).unwrap();

        let dir = tempdir().unwrap();
        let file_path = dir.path().join("not-a-dir");
        fs::write(&file_path, "x").unwrap();

        let err = app.write_models(&file_path, &files).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<ModelError>(),
            Some(ModelError::EmitError { .. })
        ));
    }

    #[test]
    fn test_render_units() {
        let files = ModelwrightApp::new().translator().translate(DIAGRAM).unwrap();
        let rendered = ModelwrightApp::render_units(&files);

        assert!(rendered.starts_with("// File: AppDbContext.cs\n"));
        assert!(rendered.contains("// File: Customer.cs\n"));
        assert!(rendered.contains("// File: Tour.cs\n"));
        assert!(rendered.contains("public List<Customer> Customers"));
    }

    #[test]
    fn test_collect_skipped() {
        let app = ModelwrightApp::new();
        let input = "class Foo {\n  +ok: int\n  broken line\n}\nFoo -- Missing\nwhatever\n";

        let skipped = app.collect_skipped(input).unwrap();
        let reasons: Vec<_> = skipped.iter().map(|s| (s.line, s.reason)).collect();
        assert_eq!(
            reasons,
            vec![
                (3, SkipReason::MalformedAttribute),
                (5, SkipReason::UnknownClass),
                (6, SkipReason::UnrecognizedStatement),
            ]
        );
    }

    #[test]
    fn test_collect_skipped_rejects_blank() {
        let app = ModelwrightApp::new();
        let err = app.collect_skipped("  \n").unwrap_err();
        assert!(matches!(
            err.downcast_ref::<ModelError>(),
            Some(ModelError::EmptyInput)
        ));
    }

    #[test]
    fn test_render_skipped() {
        assert_eq!(
            ModelwrightApp::render_skipped(&[]),
            "✓ No skipped lines\n"
        );

        let lines = vec![SkippedLine::new(
            2,
            "junk",
            SkipReason::UnrecognizedStatement,
        )];
        let report = ModelwrightApp::render_skipped(&lines);
        assert!(report.starts_with("line 2: "));
        assert!(report.ends_with("1 line(s) skipped\n"));
    }
}
