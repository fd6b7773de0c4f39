//! Ordering of crossing points along a segment.
//!
//! A single 2-point segment rarely crosses a ring more than a handful of
//! times, so a plain insertion sort beats anything fancier here and keeps
//! ties in discovery order for free.

use crate::geometry::Point;

/// Stable insertion sort by an `f64` key.
///
/// An element only moves left past elements with a strictly larger key,
/// so equal keys keep their original relative order.
pub fn insertion_sort_by<T, F>(items: &mut [T], key: F)
where
    F: Fn(&T) -> f64,
{
    for i in 1..items.len() {
        let mut j = i;
        while j > 0 && key(&items[j - 1]) > key(&items[j]) {
            items.swap(j - 1, j);
            j -= 1;
        }
    }
}

/// Sort `points` by increasing distance from `reference`.
///
/// When `edges` is given it is permuted identically, so position `i` in
/// both slices still describes the same crossing afterwards.
pub fn sort_by_distance(reference: Point, points: &mut [Point], edges: Option<&mut [usize]>) {
    debug_assert!(
        edges.as_deref().is_none_or(|e| e.len() == points.len()),
        "edge index array must match the point array"
    );

    // Sort a permutation, then apply it to both arrays.
    let mut order: Vec<usize> = (0..points.len()).collect();
    insertion_sort_by(&mut order, |&i| reference.distance(points[i]));

    apply_permutation(points, &order);
    if let Some(edges) = edges {
        apply_permutation(edges, &order);
    }
}

fn apply_permutation<T: Copy>(items: &mut [T], order: &[usize]) {
    let original = items.to_vec();
    for (slot, &from) in items.iter_mut().zip(order) {
        *slot = original[from];
    }
}
