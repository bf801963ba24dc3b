//! Selection sort stepping
//!
//! Not stable: the swap that moves the minimum forward can carry an equal
//! key past its twin.

use crate::error::Result;
use crate::types::{ArrayState, SortedRegion, StepAction};

use super::builder::{prefix, SequenceBuilder};

pub(super) fn generate(data: &[i64], out: &mut SequenceBuilder<'_>) -> Result<()> {
    let mut arr = data.to_vec();
    let n = arr.len();

    for i in 0..n.saturating_sub(1) {
        let sorted = prefix(i);
        let mut min = i;

        for j in i + 1..n {
            out.emit(
                ArrayState::builder(&arr)
                    .highlight([min, j])
                    .comparing(min, j)
                    .sorted(sorted)
                    .build()?,
                StepAction::Compare {
                    left: min,
                    right: j,
                },
                format!(
                    "Compare current minimum {} with {} at position {}",
                    arr[min], arr[j], j
                ),
            )?;

            if arr[min] > arr[j] {
                min = j;
                out.emit(
                    ArrayState::builder(&arr)
                        .highlight([min])
                        .sorted(sorted)
                        .build()?,
                    StepAction::NewMinimum { index: min },
                    format!("New minimum {} found at position {}", arr[min], min),
                )?;
            }
        }

        if min != i {
            out.emit(
                ArrayState::builder(&arr)
                    .highlight([i, min])
                    .swapping(i, min)
                    .sorted(sorted)
                    .build()?,
                StepAction::Swap {
                    left: i,
                    right: min,
                },
                format!(
                    "Swap minimum {} into position {} (was {})",
                    arr[min], i, arr[i]
                ),
            )?;
            arr.swap(i, min);
        }

        out.pass_complete(
            &arr,
            SortedRegion::new(0, i),
            format!("Position {} now holds {}", i, arr[i]),
        )?;
    }

    out.sort_complete(&arr)
}

#[cfg(test)]
mod tests {
    use crate::generator::StepGenerator;
    use crate::types::{Algorithm, OperationType, StepAction};

    #[test]
    fn test_no_swap_when_minimum_in_place() {
        let steps = StepGenerator::new(Algorithm::Selection)
            .generate(&[1, 2, 3])
            .unwrap();
        assert!(steps
            .iter()
            .all(|s| s.operation().kind() != OperationType::Swap));
        // (2 + 1) comparisons, 2 position markers, 1 completion
        assert_eq!(steps.len(), 6);
    }

    #[test]
    fn test_new_minimum_only_on_strictly_smaller() {
        let steps = StepGenerator::new(Algorithm::Selection)
            .generate(&[2, 2, 1])
            .unwrap();
        let minima: Vec<_> = steps
            .iter()
            .filter_map(|s| match s.operation().action() {
                StepAction::NewMinimum { index } => Some(*index),
                _ => None,
            })
            .collect();
        // first pass: only 1 at index 2 is strictly smaller than 2
        assert_eq!(minima.first(), Some(&2));
    }

    #[test]
    fn test_sorted_prefix_grows() {
        let steps = StepGenerator::new(Algorithm::Selection)
            .generate(&[3, 1, 2])
            .unwrap();
        let regions: Vec<_> = steps
            .iter()
            .filter_map(|s| match s.operation().action() {
                StepAction::PassComplete { region } => Some((region.start, region.end)),
                _ => None,
            })
            .collect();
        assert_eq!(regions, vec![(0, 0), (0, 1)]);
        assert_eq!(steps.last().data(), &[1, 2, 3]);
    }
}
