//! Step sequence generation
//!
//! This module turns an input array into the complete, ordered list of
//! [`Step`]s a sorting algorithm goes through. Generation is synchronous and
//! fully materialized: the whole sequence exists before playback starts, and
//! every step owns an independent copy of the array.
//!
//! # Supported algorithms
//!
//! - **Bubble**: adjacent compare/swap passes with early exit once a pass makes
//!   no swaps
//! - **Selection**: minimum scan per position, one swap at most per position
//! - **Insertion**: key extraction followed by shifts into the sorted prefix
//!
//! All algorithms compare with strict greater-than, so equal values are never
//! exchanged.
//!
//! # Example
//!
//! ```ignore
//! use sortvis_rs::generator::StepGenerator;
//! use sortvis_rs::types::Algorithm;
//!
//! let steps = StepGenerator::new(Algorithm::Bubble).generate(&[3, 1, 2])?;
//! assert_eq!(steps.last().data(), &[1, 2, 3]);
//! ```

mod bubble;
mod builder;
mod insertion;
mod selection;

use serde::{Deserialize, Serialize};
use std::ops::Deref;
use std::sync::Arc;

use crate::error::{Result, SortVisError};
use crate::types::{Algorithm, Palette, Step};
use crate::validator;

use builder::SequenceBuilder;

/// An immutable, non-empty step list with sequence numbers `1..=N`
///
/// Cloning is cheap: clones share the same frozen storage, which is never
/// mutated after construction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<Step>", into = "Vec<Step>")]
pub struct StepSequence {
    steps: Arc<[Step]>,
}

impl TryFrom<Vec<Step>> for StepSequence {
    type Error = SortVisError;

    fn try_from(steps: Vec<Step>) -> Result<Self> {
        if steps.is_empty() {
            return Err(SortVisError::InvalidStep(
                "a step sequence needs at least one step".to_string(),
            ));
        }
        if !validator::validate_sequence(&steps) {
            return Err(SortVisError::InvalidStep(
                "sequence numbers must run 1..=N with unique step ids".to_string(),
            ));
        }
        Ok(Self {
            steps: steps.into(),
        })
    }
}

impl From<StepSequence> for Vec<Step> {
    fn from(sequence: StepSequence) -> Self {
        sequence.steps.to_vec()
    }
}

impl Deref for StepSequence {
    type Target = [Step];

    fn deref(&self) -> &[Step] {
        &self.steps
    }
}

impl StepSequence {
    pub fn as_slice(&self) -> &[Step] {
        &self.steps
    }

    /// Index of the final step
    pub fn last_index(&self) -> usize {
        self.steps.len() - 1
    }

    pub fn first(&self) -> &Step {
        &self.steps[0]
    }

    pub fn last(&self) -> &Step {
        &self.steps[self.last_index()]
    }

    /// Check whether two handles refer to the same frozen storage
    pub fn shares_storage_with(&self, other: &StepSequence) -> bool {
        Arc::ptr_eq(&self.steps, &other.steps)
    }
}

/// Generates step sequences for one algorithm
#[derive(Debug, Clone)]
pub struct StepGenerator {
    algorithm: Algorithm,
    palette: Palette,
}

impl StepGenerator {
    /// Create a generator using the default palette
    pub fn new(algorithm: Algorithm) -> Self {
        Self::with_palette(algorithm, Palette::default())
    }

    /// Create a generator whose visual hints use the given palette
    pub fn with_palette(algorithm: Algorithm, palette: Palette) -> Self {
        Self { algorithm, palette }
    }

    pub fn algorithm(&self) -> Algorithm {
        self.algorithm
    }

    pub fn palette(&self) -> &Palette {
        &self.palette
    }

    /// Generate the full step sequence for `data`
    ///
    /// Deterministic for a given algorithm and input. Fails with
    /// [`SortVisError::InvalidInput`] when `data` is empty.
    pub fn generate(&self, data: &[i64]) -> Result<StepSequence> {
        if data.is_empty() {
            return Err(SortVisError::InvalidInput(
                "cannot generate steps for an empty array".to_string(),
            ));
        }

        let mut out = SequenceBuilder::new(self.algorithm, &self.palette);
        match self.algorithm {
            Algorithm::Bubble => bubble::generate(data, &mut out)?,
            Algorithm::Selection => selection::generate(data, &mut out)?,
            Algorithm::Insertion => insertion::generate(data, &mut out)?,
        }
        let sequence = out.finish()?;

        tracing::debug!(
            algorithm = %self.algorithm,
            input_len = data.len(),
            steps = sequence.len(),
            "Generated step sequence"
        );
        Ok(sequence)
    }
}

/// Generate a step sequence with the default palette
pub fn generate(algorithm: Algorithm, data: &[i64]) -> Result<StepSequence> {
    StepGenerator::new(algorithm).generate(data)
}
