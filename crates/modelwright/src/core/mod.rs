//! Core abstractions for model translation
//!
//! This module defines the pipeline traits (parse, resolve, emit) and the
//! shared infrastructure every stage uses: errors, logging, diagnostics,
//! naming rules and the emit configuration.

pub mod chumsky_utils;
mod config;
mod database;
mod diagnostics;
mod emitter;
mod error;
pub mod logging;
mod naming;
mod parser;
mod resolver;
mod types;

pub use config::*;
pub use database::*;
pub use diagnostics::*;
pub use emitter::*;
pub use error::*;
pub use logging::*;
pub use naming::*;
pub use parser::*;
pub use resolver::*;
pub use types::*;
