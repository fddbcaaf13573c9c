//! Reduction-channel interface to the distributed communication substrate.
//!
//! The pipeline uses exactly one collective pattern: an associative,
//! commutative element-wise **sum-all** whose total is delivered to every
//! partition. The transport behind it (message passing, shared memory, a
//! test double) is not this core's concern.
//!
//! ## Synchronization
//! `sum_all` is a blocking collective: every partition must call it with a
//! structurally identical buffer (same length, same field order) and no
//! partition proceeds until all have contributed. The channel decides the
//! summation order, so totals agree across partition counts only up to
//! floating-point non-associativity.

use crate::response::error::ReductionError;
use crate::response::types::RealType;


/// Collective sum-all primitive over one distributed partition group.
pub trait ReductionChannel {
    /// Number of partitions participating in the collective.
    fn partition_count(&self) -> usize;

    /// Sums `local` element-wise across all partitions into `global`.
    ///
    /// Every partition receives the identical total. `local` and `global`
    /// must have the same length on every partition.
    fn sum_all(
        &self,
        local: &[RealType],
        global: &mut [RealType],
    ) -> Result<(), ReductionError>;
}

/// The single-partition reduction channel.
///
/// With one partition the cross-partition total of a value is the value
/// itself, so `sum_all` is a copy. Used for undistributed runs and tests.

#[derive(Clone, Copy, Debug, Default)]
pub struct SerialChannel;

impl ReductionChannel for SerialChannel {
    fn partition_count(&self) -> usize {
        1
    }

    fn sum_all(
        &self,
        local: &[RealType],
        global: &mut [RealType],
    ) -> Result<(), ReductionError> {
        if local.len() != global.len() {
            return Err(ReductionError::new(format!(
                "buffer length mismatch: local holds {} values, global holds {}",
                local.len(),
                global.len()
            )));
        }

        global.copy_from_slice(local);
        Ok(())
    }
}
