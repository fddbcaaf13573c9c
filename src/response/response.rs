//! Externally-facing response objects.
//!
//! A [`Response`] is one named scalar (or expansion-valued) quantity
//! summarizing a simulation quantity of interest. Responses are created by
//! callers, filled from a data store (the value is copied out, never
//! aliased), and optionally merged with other responses through the
//! aggregator. After a fill, the only mutation path is the destination
//! parameter of a merge.

use crate::response::types::{FieldName, ResponseScalar};


/// One named response value.
#[derive(Clone, Debug, PartialEq)]
pub struct Response<S: ResponseScalar> {
    name: FieldName,
    value: S,
}

impl<S: ResponseScalar> Response<S> {
    /// Creates a response holding the additive identity.
    pub fn new(name: impl Into<FieldName>) -> Self {
        Self {
            name: name.into(),
            value: S::zero(),
        }
    }

    /// Creates a response holding an explicit value.
    pub fn with_value(name: impl Into<FieldName>, value: S) -> Self {
        Self {
            name: name.into(),
            value,
        }
    }

    /// Name of the quantity this response summarizes.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Current value.
    pub fn value(&self) -> &S {
        &self.value
    }

    /// Replaces the current value.
    pub fn set_value(&mut self, value: S) {
        self.value = value;
    }

    /// Consumes the response, returning its value.
    pub fn take_value(self) -> S {
        self.value
    }
}
