use thiserror::Error as ThisError;

/// Shorthand for results returned by [`OrderedMap`][crate::OrderedMap].
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Ways an [`OrderedMap`][crate::OrderedMap] operation can be rejected. A rejected
/// operation never changes the tree.
#[derive(Debug, Clone, PartialEq, Eq, ThisError)]
pub enum Error {
    /// `select` was asked for a rank outside `[0, len)`.
    #[error("rank {rank} is out of bounds for a map with {len} entries")]
    InvalidRank {
        /// The requested rank.
        rank: usize,
        /// How many entries the map held.
        len: usize,
    },

    /// An extremal query (`min`, `max`, `delete_min`, `delete_max`) ran on an empty map.
    #[error("the map is empty")]
    EmptyContainer,
}
