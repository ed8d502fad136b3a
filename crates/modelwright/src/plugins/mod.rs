//! Plugin implementations
//!
//! The class diagram plugin implements the core traits; the translator wires
//! its parser, resolver and emitter into one pipeline.

pub mod class;
pub mod translator;

pub use class::*;
pub use translator::*;
