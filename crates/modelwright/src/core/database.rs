//! Core database trait for class model storage
//!
//! This trait defines the interface for the keyed registry that the parser
//! fills and the resolver mutates. Relationships are owned by the node they
//! navigate from, so edges are attached to a node rather than stored apart.

/// Core trait for model databases
///
/// Nodes are keyed by name. Several nodes may share a name; lookups resolve
/// to the first one added, and the `distinct_*` methods see only those.
pub trait Database: Send + Sync {
    /// The node data type for this database
    type Node: Clone + Send + Sync;

    /// The edge data type attached to nodes
    type Edge: Clone + Send + Sync;

    /// Attach an edge to the node named `owner`
    ///
    /// Returns `false` when no such node exists.
    fn attach_edge(&mut self, owner: &str, edge: Self::Edge) -> bool;

    /// Iterate over the first node of each distinct name
    fn distinct_nodes(&self) -> impl Iterator<Item = &Self::Node>;

    /// Get the number of nodes, duplicates included
    fn node_count(&self) -> usize;

    /// Get the number of distinct node names
    fn distinct_count(&self) -> usize;

    /// Get the number of attached edges
    fn edge_count(&self) -> usize;
}
