//! Modelwright CLI - Generate C# entity models from class diagrams

mod cli;

use clap::Parser;

fn main() {
    let cli_args = cli::Cli::parse();

    // Logging is initialized inside run() once flags are known
    let mut app = cli::ModelwrightApp::new();

    if let Err(e) = app.run(cli_args) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
