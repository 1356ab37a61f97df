//! Seed assignment.
//!
//! Seeds go to the strongest (lowest-rated) entrants among the first
//! `min(draw size, entrant count)` in source-page order. The quota is
//! 2^(k-2) for the smallest k with 2^k exceeding that window. Assignment
//! matches by rating value: every entrant in the window whose rating appears
//! in the cutoff set gets one plus the value's first position in the sorted
//! cutoff, so tied ratings share a seed number. Entrants beyond the window
//! are never seeded.

use tracing::debug;

use crate::types::EntrantRecord;

/// Number of seeds for a window of `total_considered` entrants.
///
/// A window of fewer than two entrants gets no seeds.
pub fn seed_quota(total_considered: usize) -> usize {
    let mut k = 0u32;
    while (1usize << k) <= total_considered {
        k += 1;
    }
    if k < 2 {
        0
    } else {
        1 << (k - 2)
    }
}

/// Assign seeds over entrants in source-page order.
///
/// The returned list is index-aligned with the input.
pub fn assign_seeds(entrants: &[EntrantRecord], draw_size: u64) -> Vec<Option<u32>> {
    let total_considered = (draw_size as usize).min(entrants.len());
    let quota = seed_quota(total_considered);
    debug!(total_considered, quota, "computed seeding window");

    let mut cutoff: Vec<f64> =
        entrants[..total_considered].iter().map(|e| e.rating_wtn).collect();
    cutoff.sort_by(f64::total_cmp);
    cutoff.truncate(quota);

    entrants
        .iter()
        .enumerate()
        .map(|(index, entrant)| {
            if index >= total_considered {
                return None;
            }
            cutoff
                .iter()
                .position(|rating| rating.total_cmp(&entrant.rating_wtn).is_eq())
                .map(|position| position as u32 + 1)
        })
        .collect()
}
