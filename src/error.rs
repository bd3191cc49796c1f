use thiserror::Error;

/// Errors returned by tree lookups and removals.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum Error<T> {
    /// The searched value is not stored in the tree.
    #[error("no such node with value: {0}")]
    NotFound(T),
}
