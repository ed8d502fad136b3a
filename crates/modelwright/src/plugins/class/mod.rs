//! Class diagram plugin
//!
//! Implements class diagram parsing, association resolution and C# emission.

mod chumsky_parser;
mod database;
mod emitter;
mod parser;
mod resolver;

pub use chumsky_parser::{
    Adornment, AssociationForm, ChumskyClassParser, Diamond, Label, ParsedAssociation,
    ParsedAttribute, ParsedClass, Scan, Statement,
};
pub use database::{
    AttributeDescriptor, ClassDatabase, ClassDescriptor, RelationshipDescriptor, Visibility,
};
pub use emitter::CSharpEmitter;
pub use parser::ClassParser;
pub use resolver::AssociationResolver;
