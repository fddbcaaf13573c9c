//! Named accumulator storage for one evaluation variant.
//!
//! A [`ResponseData`] owns an ordered field list and a parallel vector of
//! scalar accumulators, one slot per field. It is the only mutable state in
//! an evaluation cycle: the aggregator that built it accumulates into it,
//! reduces it, and afterwards any number of responses may be filled from it.
//!
//! ## Lifecycle
//!
//! ```text
//! Unallocated -> Allocated(zeroed) -> Accumulating -> Reduced
//!                      ^                                 |
//!                      +------- reinitialize ------------+
//! ```
//!
//! * [`ResponseData::allocate`] stores the field list and zeroes one slot
//!   per field.
//! * [`ResponseData::reinitialize`] re-zeroes every slot without touching
//!   the field list, readying the store for another cycle.
//! * [`ResponseData::fill_response`] is legal in any state after allocation;
//!   calling it earlier is a contract violation.
//!
//! ## Ownership
//! The store is the sole owner of its accumulator storage. Responses filled
//! from it receive copies and never alias the slots. During one evaluation
//! cycle the store must be mutated only by the aggregator driving that
//! cycle.

use crate::response::error::FieldLookupError;
use crate::response::response::Response;
use crate::response::types::{FieldName, ResponseScalar};


/// Ordered field names with one scalar accumulator per field.
///
/// ## Invariants
/// * After allocation, `accumulators.len() == fields.len()` at all times.
/// * Field order is the allocation order; slot `i` accumulates field `i`.

#[derive(Clone, Debug)]
pub struct ResponseData<S: ResponseScalar> {
    fields: Vec<FieldName>,
    accumulators: Vec<S>,
    allocated: bool,
}

impl<S: ResponseScalar> ResponseData<S> {
    /// Creates an unallocated store holding no fields and no slots.
    pub fn new() -> Self {
        Self {
            fields: Vec::new(),
            accumulators: Vec::new(),
            allocated: false,
        }
    }

    /// Stores the field list and sizes the accumulators to match, zeroing
    /// every slot.
    ///
    /// Allocating an already-allocated store intentionally replaces the
    /// field list and restarts the lifecycle. An empty field list is legal:
    /// the store allocates no slots and later operations are trivial.
    pub fn allocate(&mut self, fields: &[FieldName]) {
        self.fields = fields.to_vec();
        self.accumulators = vec![S::zero(); fields.len()];
        self.allocated = true;
    }

    /// Resets every accumulator to the additive identity.
    ///
    /// Idempotent; never reallocates and never touches the field list.
    pub fn reinitialize(&mut self) {
        for accumulator in &mut self.accumulators {
            accumulator.set_zero();
        }
    }

    /// Returns `true` once [`allocate`](Self::allocate) has run.
    pub fn is_allocated(&self) -> bool {
        self.allocated
    }

    /// Allocated field names in slot order.
    pub fn fields(&self) -> &[FieldName] {
        &self.fields
    }

    /// Slot index of a field name, if allocated.
    pub fn field_index(&self, field: &str) -> Option<usize> {
        self.fields.iter().position(|name| name == field)
    }

    /// Copies the named accumulator's current value into `dest`.
    ///
    /// Has no side effect on the store. On a lookup failure `dest` is left
    /// untouched.
    ///
    /// ## Panics
    /// Panics if called before allocation; that ordering is a programming
    /// defect, not a recoverable condition.
    pub fn fill_response(
        &self,
        field: &str,
        dest: &mut Response<S>,
    ) -> Result<(), FieldLookupError> {
        if !self.allocated {
            panic!(
                "response data used before allocation: cannot fill \"{}\"",
                field
            );
        }

        let index = self.field_index(field).ok_or_else(|| FieldLookupError {
            field: field.to_owned(),
            known: self.fields.clone(),
        })?;

        dest.set_value(self.accumulators[index].clone());
        Ok(())
    }

    /// Read access to the accumulator slots, in field order.
    pub fn accumulators(&self) -> &[S] {
        &self.accumulators
    }

    /// Write access to the accumulator slots, in field order.
    ///
    /// Returned as a slice, so the slot count cannot change.
    pub fn accumulators_mut(&mut self) -> &mut [S] {
        &mut self.accumulators
    }
}

impl<S: ResponseScalar> Default for ResponseData<S> {
    fn default() -> Self {
        Self::new()
    }
}
