//! Per-pass cell batches and per-cell field views.
//!
//! The evaluation engine drives accumulation one **pass** at a time: a batch
//! of up to "Workset Size" cells, paired with one per-cell value view for
//! each requested field. These types carry exactly the surface the
//! accumulation loop touches; mesh geometry and basis data stay with the
//! engine.

use crate::response::types::{FieldName, ResponseScalar};


/// One evaluation pass over a batch of mesh cells.
#[derive(Clone, Copy, Debug)]
pub struct CellBatch {
    num_cells: usize,
}

impl CellBatch {
    /// Creates a batch covering `num_cells` cells.
    pub fn new(num_cells: usize) -> Self {
        Self { num_cells }
    }

    /// Number of cells evaluated in this pass.
    pub fn num_cells(&self) -> usize {
        self.num_cells
    }
}

/// Per-cell contributions of one field for one pass.
///
/// ## Invariants
/// * `values` holds at least one entry per cell of the batch it is paired
///   with; the aggregator checks this before accumulating.

#[derive(Clone, Debug)]
pub struct CellField<S: ResponseScalar> {
    name: FieldName,
    values: Vec<S>,
}

impl<S: ResponseScalar> CellField<S> {
    /// Creates a field view from per-cell values.
    pub fn new(name: impl Into<FieldName>, values: Vec<S>) -> Self {
        Self {
            name: name.into(),
            values,
        }
    }

    /// Name of the field these values belong to.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Number of per-cell values held.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Returns `true` if the view holds no values.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Contribution of one cell.
    ///
    /// ## Panics
    /// Panics if `cell` is outside the view.
    pub fn value(&self, cell: usize) -> &S {
        &self.values[cell]
    }

    /// All per-cell values in cell order.
    pub fn values(&self) -> &[S] {
        &self.values
    }
}
