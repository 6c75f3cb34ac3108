//! Tree Mutation
//!
//! The error type shared by every fallible DOM call, and the
//! appendChild/insertBefore family of mutations.

use crate::NodeId;

pub type DomResult<T> = Result<T, DomError>;

/// Why a DOM call was rejected
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DomError {
    /// Unknown id, or a node without the required parent
    #[error("Node not found")]
    NotFound,
    /// Insertion would create a cycle or put a node under a leaf
    #[error("Hierarchy request error")]
    HierarchyRequest,
    /// Element-only call on another kind of node
    #[error("Invalid node type")]
    InvalidNodeType,
    /// Reference node does not belong to the given parent
    #[error("Node is not a child")]
    NotAChild,
    #[error("'{0}' is not a valid selector")]
    Syntax(String),
}

/// Structural mutations. Fragments are emptied into the parent; a node
/// that already has a parent is moved.
pub trait NodeOperations {
    fn append_child(&mut self, parent: NodeId, child: NodeId) -> DomResult<NodeId>;

    fn remove_child(&mut self, parent: NodeId, child: NodeId) -> DomResult<NodeId>;

    /// Insert before a reference node (`None` appends)
    fn insert_before(&mut self, parent: NodeId, new_child: NodeId, ref_child: Option<NodeId>) -> DomResult<NodeId>;

    /// Returns the replaced node
    fn replace_child(&mut self, parent: NodeId, new_child: NodeId, old_child: NodeId) -> DomResult<NodeId>;

    /// Clone a node; the clone is detached
    fn clone_node(&mut self, node: NodeId, deep: bool) -> DomResult<NodeId>;

    /// Merge adjacent text nodes and drop empty ones, recursively
    fn normalize(&mut self, node: NodeId) -> DomResult<()>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        assert_eq!(DomError::NotAChild.to_string(), "Node is not a child");
        assert_eq!(
            DomError::Syntax(":bogus".into()).to_string(),
            "':bogus' is not a valid selector"
        );
    }
}
