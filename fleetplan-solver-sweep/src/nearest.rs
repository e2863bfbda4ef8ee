//! Nearest-neighbour route construction within a cluster.

use std::cmp::Ordering;

use fleetplan_core::{Cluster, Depot, RouteBuilder, Stop, StopId};
use geo::Coord;

use crate::geometry::distance_sq;

/// Greedy nearest-neighbour route builder.
///
/// Starting from the depot, repeatedly visits the unvisited stop nearest to
/// the previous one by straight-line distance, ties broken by ascending stop
/// identifier. The tour implicitly returns to the depot; the depot itself
/// never appears in the returned order. Quadratic in the cluster size, which
/// the allocator bounds by the vehicle capacity.
///
/// # Examples
/// ```
/// use geo::Coord;
/// use fleetplan_core::{Cluster, Depot, RouteBuilder, Stop, StopId};
/// use fleetplan_solver_sweep::NearestNeighbourRouter;
///
/// let depot = Depot::new("Depot A", Coord { x: 0.0, y: 0.0 });
/// let cluster = Cluster::new(vec![
///     Stop::new("Customer 5", Coord { x: 2.0, y: 0.0 }),
///     Stop::new("Customer 12", Coord { x: 3.0, y: 0.0 }),
/// ]);
/// let order = NearestNeighbourRouter.build_route(&depot, &cluster);
/// assert_eq!(order, vec![StopId::new("Customer 5"), StopId::new("Customer 12")]);
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct NearestNeighbourRouter;

impl RouteBuilder for NearestNeighbourRouter {
    fn build_route(&self, depot: &Depot, cluster: &Cluster) -> Vec<StopId> {
        let mut remaining: Vec<&Stop> = cluster.stops.iter().collect();
        let mut order = Vec::with_capacity(remaining.len());
        let mut cursor = depot.location;

        while !remaining.is_empty() {
            let next = nearest_index(cursor, &remaining);
            let stop = remaining.swap_remove(next);
            cursor = stop.location;
            order.push(stop.id.clone());
        }
        order
    }
}

/// Index of the stop nearest to `cursor`, ties broken by identifier.
fn nearest_index(cursor: Coord<f64>, remaining: &[&Stop]) -> usize {
    remaining
        .iter()
        .enumerate()
        .min_by(|(_, lhs), (_, rhs)| {
            distance_sq(cursor, lhs.location)
                .partial_cmp(&distance_sq(cursor, rhs.location))
                .unwrap_or(Ordering::Equal)
                .then_with(|| lhs.id.cmp(&rhs.id))
        })
        .map_or(0, |(index, _)| index)
}

#[cfg(test)]
mod tests {
    use super::*;
    use fleetplan_core::test_support::{depot, stop};
    use rstest::rstest;
    use std::collections::HashSet;

    #[rstest]
    fn chains_outward_from_the_depot() {
        let cluster = Cluster::new(vec![
            stop("Customer 3", 3.0, 0.0),
            stop("Customer 1", 1.0, 0.0),
            stop("Customer 2", 2.0, 0.0),
        ]);
        let order = NearestNeighbourRouter.build_route(&depot(), &cluster);
        assert_eq!(
            order,
            vec![
                StopId::new("Customer 1"),
                StopId::new("Customer 2"),
                StopId::new("Customer 3"),
            ],
        );
    }

    #[rstest]
    fn equidistant_stops_fall_back_to_identifier_order() {
        // Both stops sit exactly five units from the depot.
        let cluster = Cluster::new(vec![
            stop("Customer 9", 3.0, 4.0),
            stop("Customer 10", 4.0, 3.0),
        ]);
        let order = NearestNeighbourRouter.build_route(&depot(), &cluster);
        assert_eq!(
            order,
            vec![StopId::new("Customer 10"), StopId::new("Customer 9")],
        );
    }

    #[rstest]
    fn empty_cluster_builds_an_empty_route() {
        let order = NearestNeighbourRouter.build_route(&depot(), &Cluster::new(Vec::new()));
        assert!(order.is_empty());
    }

    #[rstest]
    fn every_stop_is_visited_exactly_once() {
        let cluster = Cluster::new(vec![
            stop("Customer 1", 1.0, 2.0),
            stop("Customer 2", -2.0, 1.0),
            stop("Customer 3", 0.5, -3.0),
            stop("Customer 4", 4.0, 4.0),
        ]);
        let order = NearestNeighbourRouter.build_route(&depot(), &cluster);
        let unique: HashSet<_> = order.iter().collect();
        assert_eq!(order.len(), cluster.stops.len());
        assert_eq!(unique.len(), order.len());
    }
}
