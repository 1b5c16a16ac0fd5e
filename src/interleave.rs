//! Fair merge order for a set of buckets.
//!
//! Given the sizes of N buckets, [`Interleaver::compute_order`] returns a
//! sequence of bucket indices in which every bucket `i` appears exactly
//! `sizes[i]` times. When one bucket is strictly the largest, no other bucket
//! ever appears twice in a row.
//!
//! # Algorithm
//!
//! Every bucket gets a row of `M` slots, where `M` is the largest size.
//! Rows of the largest buckets are dense. Smaller buckets mark `s` of the `M`
//! slots with a sequential reservoir draw, spreading the marks across columns.
//! The rows are shuffled as a whole and read column by column, skipping
//! unmarked slots.
//!
//! Ties for the largest size are broken by original index (the earlier bucket
//! sorts first). With a tie, the adjacency guarantee is not promised.

use rand::seq::SliceRandom;
use rand::Rng;

/// Size of one bucket paired with its position in the caller's slice.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct SizedIndex {
    size: usize,
    index: usize,
}

/// Computes interleave orders.
#[derive(Debug, Default, Clone, Copy)]
pub struct Interleaver;

impl Interleaver {
    pub fn new() -> Self {
        Self
    }

    /// Compute a merge order for buckets of the given sizes.
    pub fn compute_order<R: Rng + ?Sized>(&self, sizes: &[usize], rng: &mut R) -> Vec<usize> {
        let mut sized: Vec<SizedIndex> = sizes
            .iter()
            .enumerate()
            .map(|(index, &size)| SizedIndex { size, index })
            .collect();

        // Stable, so equal sizes keep their original order
        sized.sort_by(|a, b| b.size.cmp(&a.size));

        let width = match sized.first() {
            Some(first) if first.size > 0 => first.size,
            _ => return Vec::new(),
        };

        let mut rows: Vec<Vec<Option<usize>>> = sized
            .iter()
            .map(|s| spread_row(width, s.size, s.index, rng))
            .collect();
        rows.shuffle(rng);

        let total: usize = sizes.iter().sum();
        let mut order = Vec::with_capacity(total);
        for column in 0..width {
            order.extend(rows.iter().filter_map(|row| row[column]));
        }
        order
    }
}

/// Place `count` copies of `index` among `width` slots.
///
/// A full row is returned as-is. Otherwise each slot is marked with
/// probability `remaining_to_place / remaining_slots`, which places exactly
/// `count` marks.
fn spread_row<R: Rng + ?Sized>(
    width: usize,
    count: usize,
    index: usize,
    rng: &mut R,
) -> Vec<Option<usize>> {
    if count == width {
        return vec![Some(index); width];
    }

    let mut row = vec![None; width];
    let mut remaining_to_place = count;
    let mut remaining_slots = width;
    for slot in row.iter_mut() {
        if rng.gen_range(0..remaining_slots) < remaining_to_place {
            *slot = Some(index);
            remaining_to_place -= 1;
        }
        remaining_slots -= 1;
    }
    row
}

/// Convenience wrapper around [`Interleaver::compute_order`].
pub fn interleave<R: Rng + ?Sized>(sizes: &[usize], rng: &mut R) -> Vec<usize> {
    Interleaver::new().compute_order(sizes, rng)
}
