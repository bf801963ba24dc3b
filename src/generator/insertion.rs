//! Insertion sort stepping
//!
//! The key travels left by adjacent exchanges, so every frame shows a
//! permutation of the input rather than a half-shifted array.

use crate::error::Result;
use crate::types::{ArrayState, SortedRegion, StepAction};

use super::builder::{prefix, SequenceBuilder};

pub(super) fn generate(data: &[i64], out: &mut SequenceBuilder<'_>) -> Result<()> {
    let mut arr = data.to_vec();
    let n = arr.len();

    for i in 1..n {
        let key = arr[i];
        let sorted = prefix(i);

        out.emit(
            ArrayState::builder(&arr)
                .highlight([i])
                .sorted(sorted)
                .build()?,
            StepAction::Extract { index: i },
            format!("Take {} from position {} as the key", key, i),
        )?;

        let mut j = i;
        while j > 0 && arr[j - 1] > key {
            out.emit(
                ArrayState::builder(&arr)
                    .highlight([j - 1, j])
                    .comparing(j - 1, j)
                    .sorted(sorted)
                    .build()?,
                StepAction::Compare {
                    left: j - 1,
                    right: j,
                },
                format!("{} is greater than key {}", arr[j - 1], key),
            )?;
            out.emit(
                ArrayState::builder(&arr)
                    .highlight([j - 1, j])
                    .swapping(j - 1, j)
                    .sorted(sorted)
                    .build()?,
                StepAction::Shift { from: j - 1, to: j },
                format!("Shift {} right to position {}", arr[j - 1], j),
            )?;
            arr.swap(j - 1, j);
            j -= 1;
        }

        out.emit(
            ArrayState::builder(&arr)
                .highlight([j])
                .sorted(sorted)
                .build()?,
            StepAction::Place { index: j },
            format!("Insert key {} at position {}", key, j),
        )?;

        out.pass_complete(
            &arr,
            SortedRegion::new(0, i),
            format!("First {} elements are in order", i + 1),
        )?;
    }

    out.sort_complete(&arr)
}
