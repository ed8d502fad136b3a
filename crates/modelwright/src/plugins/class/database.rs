//! Class model database
//!
//! Keyed registry of class descriptors produced by the parser and completed
//! by the resolver.

use std::collections::HashMap;

use serde::Serialize;

use crate::core::{AttributeType, Database};

/// Visibility marker that opens an attribute line
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Visibility {
    Public,    // +
    Private,   // -
    Protected, // #
}

/// An attribute exactly as written in the diagram
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AttributeDescriptor {
    pub visibility: Visibility,
    pub name: String,
    /// Raw type token, unvalidated
    pub type_token: String,
}

impl AttributeDescriptor {
    pub fn new(
        visibility: Visibility,
        name: impl Into<String>,
        type_token: impl Into<String>,
    ) -> Self {
        Self {
            visibility,
            name: name.into(),
            type_token: type_token.into(),
        }
    }

    /// Classify the raw type token
    pub fn attribute_type(&self) -> AttributeType {
        AttributeType::from_token(&self.type_token)
    }
}

/// A navigation property derived from an association line
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RelationshipDescriptor {
    /// Property name on the owning class
    pub name: String,
    /// Name of the class navigated to
    pub target: String,
    /// Whether the property holds many instances
    pub is_collection: bool,
}

impl RelationshipDescriptor {
    pub fn single(name: impl Into<String>, target: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            target: target.into(),
            is_collection: false,
        }
    }

    pub fn collection(name: impl Into<String>, target: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            target: target.into(),
            is_collection: true,
        }
    }
}

/// A class in the diagram
///
/// Identity is by name only.
#[derive(Debug, Clone, Serialize)]
pub struct ClassDescriptor {
    pub name: String,
    pub attributes: Vec<AttributeDescriptor>,
    pub relationships: Vec<RelationshipDescriptor>,
}

impl ClassDescriptor {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            attributes: Vec::new(),
            relationships: Vec::new(),
        }
    }

    pub fn add_attribute(&mut self, attribute: AttributeDescriptor) {
        self.attributes.push(attribute);
    }

    pub fn add_relationship(&mut self, relationship: RelationshipDescriptor) {
        self.relationships.push(relationship);
    }

    pub fn relationship(&self, name: &str) -> Option<&RelationshipDescriptor> {
        self.relationships.iter().find(|r| r.name == name)
    }
}

impl PartialEq for ClassDescriptor {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
    }
}

impl Eq for ClassDescriptor {}

/// Class model database
///
/// Descriptors are kept in source order. A name index points at the first
/// descriptor of each name; later blocks with the same name are kept but
/// shadowed.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ClassDatabase {
    classes: Vec<ClassDescriptor>,
    #[serde(skip)]
    index: HashMap<String, usize>,
}

impl ClassDatabase {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a descriptor; returns `false` if its name was already taken
    pub fn add_class(&mut self, class: ClassDescriptor) -> bool {
        let position = self.classes.len();
        let is_new = !self.index.contains_key(&class.name);
        if is_new {
            self.index.insert(class.name.clone(), position);
        }
        self.classes.push(class);
        is_new
    }

    /// All descriptors in source order, duplicates included
    pub fn classes(&self) -> &[ClassDescriptor] {
        &self.classes
    }

    pub fn get_class(&self, name: &str) -> Option<&ClassDescriptor> {
        self.index.get(name).map(|&i| &self.classes[i])
    }

    pub fn get_class_mut(&mut self, name: &str) -> Option<&mut ClassDescriptor> {
        match self.index.get(name) {
            Some(&i) => self.classes.get_mut(i),
            None => None,
        }
    }

    pub fn contains(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    pub fn class_count(&self) -> usize {
        self.classes.len()
    }
}

impl Database for ClassDatabase {
    type Node = ClassDescriptor;
    type Edge = RelationshipDescriptor;

    fn attach_edge(&mut self, owner: &str, edge: Self::Edge) -> bool {
        match self.get_class_mut(owner) {
            Some(class) => {
                class.add_relationship(edge);
                true
            }
            None => false,
        }
    }

    fn distinct_nodes(&self) -> impl Iterator<Item = &Self::Node> {
        self.classes
            .iter()
            .enumerate()
            .filter(|(i, class)| self.index.get(&class.name) == Some(i))
            .map(|(_, class)| class)
    }

    fn node_count(&self) -> usize {
        self.classes.len()
    }

    fn distinct_count(&self) -> usize {
        self.index.len()
    }

    fn edge_count(&self) -> usize {
        self.classes.iter().map(|c| c.relationships.len()).sum()
    }
}
