//! Greedy nearest-neighbour sequencing.
//!
//! Starting from the driver's position, always extend the tour to the closest
//! unvisited stop. O(n²), deterministic, no backtracking: the tour can be
//! longer than optimal.

use crate::problem::location::Location;

/// Visiting order of `stops` as indices into `stops`.
///
/// Distances are great-circle distances. On ties the stop that comes first in
/// `stops` wins.
pub fn nearest_neighbor_order(start: &Location, stops: &[Location]) -> Vec<usize> {
    let mut unvisited: Vec<usize> = (0..stops.len()).collect();
    let mut order = Vec::with_capacity(stops.len());
    let mut current = start;

    while !unvisited.is_empty() {
        let mut nearest = 0;
        let mut min_distance = f64::INFINITY;

        for (position, &index) in unvisited.iter().enumerate() {
            let distance = current.haversine_distance(&stops[index]).value();

            if distance < min_distance {
                min_distance = distance;
                nearest = position;
            }
        }

        // `remove` keeps the remaining stops in input order for tie breaking
        let index = unvisited.remove(nearest);
        order.push(index);
        current = &stops[index];
    }

    order
}

/// `stops` reordered with [`nearest_neighbor_order`].
pub fn order(start: &Location, stops: &[Location]) -> Vec<Location> {
    nearest_neighbor_order(start, stops)
        .into_iter()
        .map(|index| stops[index].clone())
        .collect()
}
