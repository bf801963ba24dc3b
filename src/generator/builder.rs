//! Incremental assembly of a step sequence
//!
//! Each algorithm walks its own working copy of the array and hands the
//! builder an [`ArrayState`] plus the action that produced it. The builder
//! numbers the steps, attaches complexity labels and visual hints, and
//! finally freezes everything into a [`StepSequence`].

use crate::error::Result;
use crate::types::{
    Algorithm, ArrayState, Operation, Palette, SortedRegion, Step, StepAction, StepId,
    VisualHints,
};

use super::StepSequence;

pub(crate) struct SequenceBuilder<'a> {
    algorithm: Algorithm,
    palette: &'a Palette,
    steps: Vec<Step>,
}

impl<'a> SequenceBuilder<'a> {
    pub(crate) fn new(algorithm: Algorithm, palette: &'a Palette) -> Self {
        Self {
            algorithm,
            palette,
            steps: Vec::new(),
        }
    }

    /// Append a step describing `state` after (or just before) `action`
    pub(crate) fn emit(
        &mut self,
        state: ArrayState,
        action: StepAction,
        description: impl Into<String>,
    ) -> Result<()> {
        let sequence_number = self.steps.len() as u32 + 1;
        let complexity = self.algorithm.complexity(action.kind());
        let hints = VisualHints::for_action(&action, self.palette);
        let operation = Operation::new(action, description, complexity);
        let step = Step::new(
            StepId(sequence_number),
            sequence_number,
            state,
            operation,
            hints,
        )?;
        self.steps.push(step);
        Ok(())
    }

    /// Emit the end-of-pass marker for a grown sorted region
    pub(crate) fn pass_complete(
        &mut self,
        data: &[i64],
        region: SortedRegion,
        description: impl Into<String>,
    ) -> Result<()> {
        let state = ArrayState::builder(data).sorted(Some(region)).build()?;
        self.emit(state, StepAction::PassComplete { region }, description)
    }

    /// Emit the final step marking the whole array as sorted
    pub(crate) fn sort_complete(&mut self, data: &[i64]) -> Result<()> {
        let region = SortedRegion::new(0, data.len().saturating_sub(1));
        let state = ArrayState::builder(data).sorted(Some(region)).build()?;
        self.emit(
            state,
            StepAction::SortComplete,
            format!("{} complete: array is sorted", self.algorithm.display_name()),
        )
    }

    pub(crate) fn finish(self) -> Result<StepSequence> {
        StepSequence::try_from(self.steps)
    }
}

/// Region `[start, len - 1]`, or nothing when `start` is past the end
pub(crate) fn suffix(start: usize, len: usize) -> Option<SortedRegion> {
    (start < len).then(|| SortedRegion::new(start, len - 1))
}

/// Region `[0, end_exclusive - 1]`, or nothing when empty
pub(crate) fn prefix(end_exclusive: usize) -> Option<SortedRegion> {
    (end_exclusive > 0).then(|| SortedRegion::new(0, end_exclusive - 1))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_regions() {
        assert_eq!(suffix(5, 5), None);
        assert_eq!(suffix(3, 5), Some(SortedRegion::new(3, 4)));
        assert_eq!(prefix(0), None);
        assert_eq!(prefix(2), Some(SortedRegion::new(0, 1)));
    }

    #[test]
    fn test_builder_numbers_steps() {
        let palette = Palette::default();
        let mut builder = SequenceBuilder::new(Algorithm::Bubble, &palette);
        let data = [2, 1];
        let state = ArrayState::builder(&data).comparing(0, 1).build().unwrap();
        builder
            .emit(state, StepAction::Compare { left: 0, right: 1 }, "compare")
            .unwrap();
        builder.sort_complete(&[1, 2]).unwrap();

        let sequence = builder.finish().unwrap();
        assert_eq!(sequence.len(), 2);
        assert_eq!(sequence.first().sequence_number(), 1);
        assert_eq!(sequence.last().sequence_number(), 2);
        assert_eq!(sequence.last().operation().action(), &StepAction::SortComplete);
    }

    #[test]
    fn test_empty_builder_does_not_finish() {
        let palette = Palette::default();
        let builder = SequenceBuilder::new(Algorithm::Insertion, &palette);
        assert!(builder.finish().is_err());
    }
}
