//! Registration-time parameters for response evaluation requests.
//!
//! The pipeline recognizes one option:
//!
//! * `"Workset Size"` — the per-pass cell batch size, a positive integer,
//!   required when registering an evaluation request.
//!
//! Variant selection is a type-level choice and never appears here.

use crate::response::error::ConfigurationError;


/// Name of the per-pass cell batch size option.
pub const WORKSET_SIZE: &str = "Workset Size";

/// Parameters supplied when registering an evaluation request.
///
/// Validation is deferred to the accessors so that an incomplete parameter
/// set can be constructed, passed around, and only rejected at registration
/// time, where the failure is actionable.
///
/// ## Example
/// ```ignore
/// let params = AggregatorParams::new().with_workset_size(256);
/// aggregator.register_evaluation_request(&mut engine, &data, &params)?;
/// ```

#[derive(Clone, Debug, Default)]
pub struct AggregatorParams {
    workset_size: Option<usize>,
}

impl AggregatorParams {
    /// Creates an empty parameter set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the per-pass cell batch size.
    pub fn with_workset_size(mut self, cells: usize) -> Self {
        self.workset_size = Some(cells);
        self
    }

    /// Returns the validated per-pass cell batch size.
    ///
    /// Fails with [`ConfigurationError::MissingParameter`] when the option
    /// was never supplied and [`ConfigurationError::InvalidParameter`] when
    /// it is zero.
    pub fn workset_size(&self) -> Result<usize, ConfigurationError> {
        match self.workset_size {
            None => Err(ConfigurationError::MissingParameter { name: WORKSET_SIZE }),
            Some(0) => Err(ConfigurationError::InvalidParameter {
                name: WORKSET_SIZE,
                given: "0".to_owned(),
                requirement: "a positive cell count",
            }),
            Some(cells) => Ok(cells),
        }
    }
}
