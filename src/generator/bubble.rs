//! Bubble sort stepping

use crate::error::Result;
use crate::types::{ArrayState, SortedRegion, StepAction};

use super::builder::{suffix, SequenceBuilder};

pub(super) fn generate(data: &[i64], out: &mut SequenceBuilder<'_>) -> Result<()> {
    let mut arr = data.to_vec();
    let n = arr.len();
    // [sorted_from, n) already holds its final values
    let mut sorted_from = n;

    for pass in 0..n.saturating_sub(1) {
        let mut swapped = false;

        for j in 0..n - 1 - pass {
            let sorted = suffix(sorted_from, n);
            out.emit(
                ArrayState::builder(&arr)
                    .highlight([j, j + 1])
                    .comparing(j, j + 1)
                    .sorted(sorted)
                    .build()?,
                StepAction::Compare {
                    left: j,
                    right: j + 1,
                },
                format!(
                    "Compare {} at position {} with {} at position {}",
                    arr[j],
                    j,
                    arr[j + 1],
                    j + 1
                ),
            )?;

            if arr[j] > arr[j + 1] {
                out.emit(
                    ArrayState::builder(&arr)
                        .highlight([j, j + 1])
                        .swapping(j, j + 1)
                        .sorted(sorted)
                        .build()?,
                    StepAction::Swap {
                        left: j,
                        right: j + 1,
                    },
                    format!("{} > {}, swap them", arr[j], arr[j + 1]),
                )?;
                arr.swap(j, j + 1);
                swapped = true;
            }
        }

        sorted_from = n - 1 - pass;
        out.pass_complete(
            &arr,
            SortedRegion::new(sorted_from, n - 1),
            format!(
                "Pass {} complete: {} is in its final position",
                pass + 1,
                arr[sorted_from]
            ),
        )?;

        if !swapped {
            tracing::trace!(pass = pass + 1, "bubble pass made no swaps, stopping early");
            break;
        }
    }

    out.sort_complete(&arr)
}

#[cfg(test)]
mod tests {
    use crate::generator::StepGenerator;
    use crate::types::{Algorithm, OperationType, StepAction};

    #[test]
    fn test_swap_step_is_pre_swap_snapshot() {
        let steps = StepGenerator::new(Algorithm::Bubble).generate(&[2, 1]).unwrap();
        // compare, swap, pass complete, sort complete
        assert_eq!(steps[1].operation().kind(), OperationType::Swap);
        assert_eq!(steps[1].data(), &[2, 1]);
        assert_eq!(steps[1].array_state().swap_pair(), Some((0, 1)));
        assert_eq!(steps[2].data(), &[1, 2]);
    }

    #[test]
    fn test_equal_values_never_swap() {
        let steps = StepGenerator::new(Algorithm::Bubble).generate(&[5, 5, 5]).unwrap();
        assert!(steps
            .iter()
            .all(|s| s.operation().kind() != OperationType::Swap));
    }

    #[test]
    fn test_sorted_input_exits_after_first_pass() {
        let steps = StepGenerator::new(Algorithm::Bubble)
            .generate(&[1, 2, 3, 4])
            .unwrap();
        let passes = steps
            .iter()
            .filter(|s| matches!(s.operation().action(), StepAction::PassComplete { .. }))
            .count();
        assert_eq!(passes, 1);
        // 3 comparisons, 1 pass marker, 1 completion
        assert_eq!(steps.len(), 5);
    }

    #[test]
    fn test_worst_case_runs_all_passes() {
        let steps = StepGenerator::new(Algorithm::Bubble)
            .generate(&[4, 3, 2, 1])
            .unwrap();
        let swaps = steps
            .iter()
            .filter(|s| s.operation().kind() == OperationType::Swap)
            .count();
        assert_eq!(swaps, 6);
        let compares = steps
            .iter()
            .filter(|s| matches!(s.operation().action(), StepAction::Compare { .. }))
            .count();
        assert_eq!(compares, 6);
    }

    #[test]
    fn test_pass_marks_growing_suffix() {
        let steps = StepGenerator::new(Algorithm::Bubble)
            .generate(&[3, 2, 1])
            .unwrap();
        let regions: Vec<_> = steps
            .iter()
            .filter_map(|s| match s.operation().action() {
                StepAction::PassComplete { region } => Some((region.start, region.end)),
                _ => None,
            })
            .collect();
        assert_eq!(regions, vec![(2, 2), (1, 2)]);
    }
}
