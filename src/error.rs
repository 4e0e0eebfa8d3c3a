use thiserror::Error;

/// Errors raised when a flat tree representation violates one of its
/// construction-time invariants.
///
/// Dangling parent references are not errors: they are reported as the
/// parent-not-found residual of a conversion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Error)]
pub enum TreeError {
    #[error("A pair selfNodeId and parentNodeId must be unique in a adjacency list.")]
    DuplicateAdjacencyPair,
    #[error("Paths must be unique in a path enumeration list.")]
    DuplicatePath,
    #[error("A path in a path enumeration list item must not be empty.")]
    EmptyPath,
}
