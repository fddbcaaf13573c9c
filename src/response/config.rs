//! Shared, externally-owned configuration handed to aggregators at
//! construction time.
//!
//! The global indexer and the linear-object factory are collaborators owned
//! by the surrounding application. This core holds shared handles to them,
//! exposes them to aggregator implementations, and never constructs or
//! destroys them. Their internal structure is irrelevant here beyond the
//! minimal surfaces declared below.

use std::fmt;
use std::sync::Arc;

use crate::response::types::{GlobalIndex, LocalIndex};


/// Mapping from partition-local unknowns to globally unique unknowns.
///
/// Implemented by the application's degree-of-freedom manager; opaque to
/// this core.
pub trait GlobalIndexer: Send + Sync {
    /// Number of unknowns owned by the calling partition.
    fn owned_count(&self) -> usize;

    /// Global index of a partition-local unknown, if it exists.
    fn global_index(&self, local: LocalIndex) -> Option<GlobalIndex>;
}

/// Factory for distributed linear-algebra object shapes.
///
/// Implemented by the application's linear-algebra layer; opaque to this
/// core.
pub trait LinearObjectFactory: Send + Sync {
    /// Length of the distributed vectors this factory builds.
    fn vector_length(&self) -> usize;
}

/// Construction-time configuration carried by every aggregator.
///
/// Cheap to clone: both handles are reference-counted pointers into
/// externally-owned collaborators.

#[derive(Clone)]
pub struct AggregatorConfig {
    global_indexer: Arc<dyn GlobalIndexer>,
    linear_object_factory: Arc<dyn LinearObjectFactory>,
}

impl AggregatorConfig {
    /// Bundles the shared collaborator handles into one configuration.
    pub fn new(
        global_indexer: Arc<dyn GlobalIndexer>,
        linear_object_factory: Arc<dyn LinearObjectFactory>,
    ) -> Self {
        Self {
            global_indexer,
            linear_object_factory,
        }
    }

    /// Returns the shared global indexer handle.
    pub fn global_indexer(&self) -> &Arc<dyn GlobalIndexer> {
        &self.global_indexer
    }

    /// Returns the shared linear-object factory handle.
    pub fn linear_object_factory(&self) -> &Arc<dyn LinearObjectFactory> {
        &self.linear_object_factory
    }
}

impl fmt::Debug for AggregatorConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AggregatorConfig")
            .field("owned_unknowns", &self.global_indexer.owned_count())
            .field("vector_length", &self.linear_object_factory.vector_length())
            .finish()
    }
}
