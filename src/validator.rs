//! Structural and correctness checks for step sequences
//!
//! Both checks report a plain `bool`; a malformed sequence is an answer, not
//! an error.

use std::collections::HashSet;

use crate::types::Step;

/// True iff sequence numbers run exactly `1..=N` in order and every step id is unique
pub fn validate_sequence(steps: &[Step]) -> bool {
    let mut seen = HashSet::with_capacity(steps.len());
    for (i, step) in steps.iter().enumerate() {
        if step.sequence_number() as usize != i + 1 {
            tracing::trace!(
                position = i,
                sequence_number = step.sequence_number(),
                "sequence number out of order"
            );
            return false;
        }
        if !seen.insert(step.id()) {
            tracing::trace!(id = %step.id(), "duplicate step id");
            return false;
        }
    }
    true
}

/// True iff the last step's array equals `original` sorted ascending
pub fn validate_result(original: &[i64], steps: &[Step]) -> bool {
    let Some(last) = steps.last() else {
        return false;
    };
    let mut expected = original.to_vec();
    expected.sort();
    last.data() == expected.as_slice()
}
