//! Sweep allocation: stops ordered by polar angle, packed greedily.

use std::cmp::Ordering;

use fleetplan_core::{AllocationError, Allocator, Cluster, FleetRequest, Stop};
use geo::Coord;

use crate::geometry::{distance_sq, polar_angle};

/// Deterministic sweep allocator.
///
/// Stops are sorted by polar angle around the depot, ties broken by squared
/// depot distance and finally by stop identifier, then packed into clusters
/// in that order until the next stop would exceed the vehicle capacity. At
/// most `fleet_size` clusters are opened. Validation rules out oversized
/// stops and infeasible totals, but greedy packing of mixed demands can
/// still exhaust the fleet; that surfaces as
/// [`AllocationError::CapacityExceeded`] rather than a cleverer split.
///
/// # Examples
/// ```
/// use geo::Coord;
/// use fleetplan_core::{Allocator, Depot, FleetRequest, Stop, VehicleSpec};
/// use fleetplan_solver_sweep::SweepAllocator;
///
/// let request = FleetRequest::new(
///     2,
///     Depot::new("Depot A", Coord { x: 0.0, y: 0.0 }),
///     VehicleSpec::new(2),
///     vec![
///         Stop::new("Customer 1", Coord { x: 1.0, y: 0.1 }),
///         Stop::new("Customer 2", Coord { x: 1.0, y: 0.2 }),
///         Stop::new("Customer 3", Coord { x: -1.0, y: -0.1 }),
///     ],
/// );
/// let clusters = SweepAllocator::default().allocate(&request)?;
/// assert_eq!(clusters.len(), 2);
/// # Ok::<(), fleetplan_core::AllocationError>(())
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct SweepAllocator;

impl Allocator for SweepAllocator {
    fn allocate(&self, request: &FleetRequest) -> Result<Vec<Cluster>, AllocationError> {
        let fleet = request.fleet_size as usize;
        if fleet == 0 && !request.stops.is_empty() {
            return Err(AllocationError::CapacityExceeded {
                unassigned: request.stops.len(),
            });
        }

        let depot = request.depot.location;
        let mut ordered: Vec<&Stop> = request.stops.iter().collect();
        ordered.sort_unstable_by(|lhs, rhs| sweep_order(depot, lhs, rhs));

        let capacity = u64::from(request.vehicle.capacity);
        let mut clusters: Vec<Cluster> = Vec::new();
        let mut current: Vec<Stop> = Vec::new();
        let mut current_demand = 0_u64;

        for (index, stop) in ordered.iter().enumerate() {
            let demand = u64::from(stop.demand);
            if demand > capacity {
                // Only reachable when validation was skipped.
                return Err(AllocationError::CapacityExceeded {
                    unassigned: ordered.len() - index,
                });
            }
            if !current.is_empty() && current_demand + demand > capacity {
                if clusters.len() + 1 >= fleet {
                    return Err(AllocationError::CapacityExceeded {
                        unassigned: ordered.len() - index,
                    });
                }
                clusters.push(Cluster::new(std::mem::take(&mut current)));
                current_demand = 0;
            }
            current.push((*stop).clone());
            current_demand += demand;
        }
        if !current.is_empty() {
            clusters.push(Cluster::new(current));
        }

        log::debug!(
            "sweep packed {} stop(s) into {} cluster(s)",
            request.stops.len(),
            clusters.len(),
        );
        Ok(clusters)
    }
}

/// Total order for the sweep: angle, then depot distance, then identifier.
fn sweep_order(depot: Coord<f64>, lhs: &Stop, rhs: &Stop) -> Ordering {
    polar_angle(depot, lhs.location)
        .partial_cmp(&polar_angle(depot, rhs.location))
        .unwrap_or(Ordering::Equal)
        .then_with(|| {
            distance_sq(depot, lhs.location)
                .partial_cmp(&distance_sq(depot, rhs.location))
                .unwrap_or(Ordering::Equal)
        })
        .then_with(|| lhs.id.cmp(&rhs.id))
}

#[cfg(test)]
#[expect(
    clippy::expect_used,
    reason = "tests use expect for readable failures"
)]
mod tests {
    use super::*;
    use fleetplan_core::StopId;
    use fleetplan_core::test_support::{request, stop, stop_with_demand};
    use rstest::rstest;

    fn cluster_ids(clusters: &[Cluster]) -> Vec<Vec<StopId>> {
        clusters
            .iter()
            .map(|cluster| cluster.stops.iter().map(|stop| stop.id.clone()).collect())
            .collect()
    }

    #[rstest]
    fn sweeps_counter_clockwise_from_negative_x_axis() {
        // Angles: West-ish (~ -3.04), South (-pi/2), East (0), North (pi/2).
        let request = request(
            4,
            1,
            vec![
                stop("North", 0.0, 5.0),
                stop("East", 5.0, 0.0),
                stop("South", 0.0, -5.0),
                stop("West", -5.0, -0.5),
            ],
        );
        let clusters = SweepAllocator.allocate(&request).expect("feasible");
        assert_eq!(
            cluster_ids(&clusters),
            vec![
                vec![StopId::new("West")],
                vec![StopId::new("South")],
                vec![StopId::new("East")],
                vec![StopId::new("North")],
            ],
        );
    }

    #[rstest]
    fn collinear_stops_order_by_depot_distance() {
        let request = request(
            3,
            1,
            vec![
                stop("Far", 9.0, 0.0),
                stop("Near", 1.0, 0.0),
                stop("Mid", 4.0, 0.0),
            ],
        );
        let clusters = SweepAllocator.allocate(&request).expect("feasible");
        assert_eq!(
            cluster_ids(&clusters),
            vec![
                vec![StopId::new("Near")],
                vec![StopId::new("Mid")],
                vec![StopId::new("Far")],
            ],
        );
    }

    #[rstest]
    fn coincident_stops_order_by_identifier() {
        let request = request(
            2,
            1,
            vec![stop("Customer 2", 3.0, 4.0), stop("Customer 1", 3.0, 4.0)],
        );
        let clusters = SweepAllocator.allocate(&request).expect("feasible");
        assert_eq!(
            cluster_ids(&clusters),
            vec![
                vec![StopId::new("Customer 1")],
                vec![StopId::new("Customer 2")],
            ],
        );
    }

    #[rstest]
    fn fills_clusters_to_capacity_in_sweep_order() {
        let request = request(
            2,
            2,
            vec![
                stop("Customer 1", 1.0, 0.1),
                stop("Customer 2", 1.0, 0.2),
                stop("Customer 3", 1.0, 0.3),
                stop("Customer 4", 1.0, 0.4),
            ],
        );
        let clusters = SweepAllocator.allocate(&request).expect("feasible");
        assert_eq!(
            cluster_ids(&clusters),
            vec![
                vec![StopId::new("Customer 1"), StopId::new("Customer 2")],
                vec![StopId::new("Customer 3"), StopId::new("Customer 4")],
            ],
        );
    }

    #[rstest]
    fn demand_weights_split_clusters_early() {
        let request = request(
            2,
            4,
            vec![
                stop_with_demand("Customer 1", 1.0, 0.1, 3),
                stop_with_demand("Customer 2", 1.0, 0.2, 2),
                stop_with_demand("Customer 3", 1.0, 0.3, 2),
            ],
        );
        let clusters = SweepAllocator.allocate(&request).expect("feasible");
        assert_eq!(
            cluster_ids(&clusters),
            vec![
                vec![StopId::new("Customer 1")],
                vec![StopId::new("Customer 2"), StopId::new("Customer 3")],
            ],
        );
        assert!(clusters.iter().all(|cluster| cluster.total_demand() <= 4));
    }

    #[rstest]
    fn greedy_packing_can_exhaust_a_tight_fleet() {
        // Total demand 8 fits two vehicles of capacity 4 under a 3+3 / 2
        // split, but the sweep packs greedily and runs out of clusters.
        let request = request(
            2,
            4,
            vec![
                stop_with_demand("Customer 1", 1.0, 0.1, 3),
                stop_with_demand("Customer 2", 1.0, 0.2, 2),
                stop_with_demand("Customer 3", 1.0, 0.3, 3),
            ],
        );
        assert_eq!(request.validate(), Ok(()));
        assert_eq!(
            SweepAllocator.allocate(&request),
            Err(AllocationError::CapacityExceeded { unassigned: 1 }),
        );
    }

    #[rstest]
    fn no_stops_yield_no_clusters() {
        let request = request(3, 4, Vec::new());
        let clusters = SweepAllocator.allocate(&request).expect("feasible");
        assert!(clusters.is_empty());
    }

    #[rstest]
    fn unvalidated_overflow_reports_unassigned_stops() {
        // Three unit stops, one vehicle of capacity two; validation would
        // have rejected this request.
        let request = request(
            1,
            2,
            vec![
                stop("Customer 1", 1.0, 0.1),
                stop("Customer 2", 1.0, 0.2),
                stop("Customer 3", 1.0, 0.3),
            ],
        );
        assert_eq!(
            SweepAllocator.allocate(&request),
            Err(AllocationError::CapacityExceeded { unassigned: 1 }),
        );
    }

    #[rstest]
    fn unvalidated_oversized_stop_is_rejected() {
        let request = request(2, 1, vec![stop_with_demand("Pallet 9", 1.0, 0.0, 2)]);
        assert_eq!(
            SweepAllocator.allocate(&request),
            Err(AllocationError::CapacityExceeded { unassigned: 1 }),
        );
    }

    #[rstest]
    fn zero_fleet_with_stops_is_rejected() {
        let request = request(0, 4, vec![stop("Customer 1", 1.0, 0.0)]);
        assert_eq!(
            SweepAllocator.allocate(&request),
            Err(AllocationError::CapacityExceeded { unassigned: 1 }),
        );
    }
}
