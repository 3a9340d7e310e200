//! 2-opt refinement of a constructed tour.
//!
//! The tour is open: it starts at the anchor and ends at whichever stop is
//! visited last, so only interior sub-paths are reversed. Position zero is
//! never moved.

use dropoff_core::DistanceMatrix;

/// Summary of a refinement run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub(crate) struct Refinement {
    /// Full passes executed, including the final non-improving one.
    pub(crate) passes: usize,
    /// Improving reversals applied.
    pub(crate) reversals: usize,
    /// Whether the last pass found no improving reversal.
    pub(crate) converged: bool,
}

/// Apply 2-opt reversals to `order` until a full pass finds no improvement,
/// or until `max_passes` passes have run.
///
/// For every `1 <= i < j < order.len() - 1` the edges `(i-1, i)` and
/// `(j, j+1)` are compared with `(i-1, j)` and `(i, j+1)`; the sub-path
/// `i..=j` is reversed when the replacement is strictly shorter. Only strict
/// improvements are applied, so the result is never longer than the input.
pub(crate) fn two_opt(
    order: &mut [usize],
    matrix: &DistanceMatrix,
    max_passes: Option<usize>,
) -> Refinement {
    let mut outcome = Refinement::default();
    let len = order.len();
    if len < 4 {
        outcome.converged = true;
        return outcome;
    }

    loop {
        if max_passes.is_some_and(|cap| outcome.passes >= cap) {
            log::warn!(
                "2-opt stopped after {} passes without reaching a local optimum",
                outcome.passes
            );
            break;
        }
        outcome.passes += 1;

        let applied = improving_pass(order, matrix);
        outcome.reversals += applied;
        if applied == 0 {
            outcome.converged = true;
            break;
        }
    }

    log::debug!(
        "2-opt finished: {} passes, {} reversals",
        outcome.passes,
        outcome.reversals
    );
    outcome
}

/// Run one sweep over all index pairs, returning the number of reversals.
fn improving_pass(order: &mut [usize], matrix: &DistanceMatrix) -> usize {
    let len = order.len();
    let mut applied = 0;
    for i in 1..len - 1 {
        for j in (i + 1)..len - 1 {
            if reversal_gains(order, matrix, i, j)
                && let Some(span) = order.get_mut(i..=j)
            {
                span.reverse();
                applied += 1;
            }
        }
    }
    applied
}

#[expect(
    clippy::float_arithmetic,
    reason = "2-opt compares sums of edge lengths"
)]
fn reversal_gains(order: &[usize], matrix: &DistanceMatrix, i: usize, j: usize) -> bool {
    let (Some(&before), Some(&first), Some(&last), Some(&after)) = (
        order.get(i - 1),
        order.get(i),
        order.get(j),
        order.get(j + 1),
    ) else {
        return false;
    };
    let current = matrix.distance(before, first) + matrix.distance(last, after);
    let candidate = matrix.distance(before, last) + matrix.distance(first, after);
    candidate < current
}
