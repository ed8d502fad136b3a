//! Emit configuration
//!
//! Every fixed piece of generated text that is not derived from the diagram
//! (namespace, marker, base type, context name) comes from here.

use serde::Serialize;

/// Configuration for the source emitter
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EmitConfig {
    /// Namespace wrapping every generated unit
    pub namespace: String,
    /// Base type every generated class extends
    pub base_type: String,
    /// Marker line placed above each class declaration; empty to omit
    pub marker: String,
    /// Type name (and file stem) of the aggregate persistence context
    pub context_name: String,
}

impl EmitConfig {
    pub const DEFAULT_NAMESPACE: &'static str = "Generated.Models";
    pub const DEFAULT_BASE_TYPE: &'static str = "BaseEntity";
    pub const DEFAULT_MARKER: &'static str = "[Serializable]";
    pub const DEFAULT_CONTEXT_NAME: &'static str = "AppDbContext";

    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_namespace(mut self, namespace: impl Into<String>) -> Self {
        self.namespace = namespace.into();
        self
    }

    pub fn with_base_type(mut self, base_type: impl Into<String>) -> Self {
        self.base_type = base_type.into();
        self
    }

    pub fn with_marker(mut self, marker: impl Into<String>) -> Self {
        self.marker = marker.into();
        self
    }

    pub fn with_context_name(mut self, context_name: impl Into<String>) -> Self {
        self.context_name = context_name.into();
        self
    }
}

impl Default for EmitConfig {
    fn default() -> Self {
        Self {
            namespace: Self::DEFAULT_NAMESPACE.to_string(),
            base_type: Self::DEFAULT_BASE_TYPE.to_string(),
            marker: Self::DEFAULT_MARKER.to_string(),
            context_name: Self::DEFAULT_CONTEXT_NAME.to_string(),
        }
    }
}
