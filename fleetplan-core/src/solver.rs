use thiserror::Error;

use crate::{Cluster, Depot, FleetRequest, StopId};

/// Errors returned by [`Allocator::allocate`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AllocationError {
    /// Stops remained after every vehicle's cluster reached capacity.
    ///
    /// [`FleetRequest::validate`] rules out the obvious causes, but greedy
    /// packing can still fail a request whose total demand fits the fleet
    /// only under a cleverer split. The condition is terminal and never
    /// retried.
    #[error("{unassigned} stop(s) could not be assigned within the fleet capacity")]
    CapacityExceeded {
        /// Number of stops left without a vehicle.
        unassigned: usize,
    },
}

/// Partition a request's stops into capacity-respecting clusters.
///
/// Implementations must be deterministic: identical requests yield identical
/// clusters. At most `fleet_size` clusters may be returned, every stop must
/// appear in exactly one cluster, and no cluster may exceed the vehicle
/// capacity. Allocators must be `Send + Sync` to operate safely across
/// threads.
pub trait Allocator: Send + Sync {
    /// Partition the request's stops into per-vehicle clusters.
    fn allocate(&self, request: &FleetRequest) -> Result<Vec<Cluster>, AllocationError>;
}

/// Sequence one cluster into a depot-anchored visit order.
///
/// Implementations must be deterministic and total: every stop in the
/// cluster appears exactly once in the returned order, and an empty cluster
/// yields an empty order. Builders must be `Send + Sync` to operate safely
/// across threads.
pub trait RouteBuilder: Send + Sync {
    /// Order the cluster's stops for a single vehicle tour.
    fn build_route(&self, depot: &Depot, cluster: &Cluster) -> Vec<StopId>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{depot, request, stop};
    use rstest::rstest;

    /// Assigns one stop per vehicle in input order; enough to exercise the
    /// trait contracts without a real heuristic.
    struct OnePerVehicle;

    impl Allocator for OnePerVehicle {
        fn allocate(&self, request: &FleetRequest) -> Result<Vec<Cluster>, AllocationError> {
            let fleet = request.fleet_size as usize;
            if request.stops.len() > fleet {
                return Err(AllocationError::CapacityExceeded {
                    unassigned: request.stops.len() - fleet,
                });
            }
            Ok(request
                .stops
                .iter()
                .map(|stop| Cluster::new(vec![stop.clone()]))
                .collect())
        }
    }

    struct InOrder;

    impl RouteBuilder for InOrder {
        fn build_route(&self, _depot: &Depot, cluster: &Cluster) -> Vec<StopId> {
            cluster.stops.iter().map(|stop| stop.id.clone()).collect()
        }
    }

    #[rstest]
    fn allocator_covers_every_stop() {
        let request = request(
            2,
            1,
            vec![stop("Customer 1", 1.0, 0.0), stop("Customer 2", 0.0, 1.0)],
        );
        let clusters = OnePerVehicle.allocate(&request).expect("feasible");
        assert_eq!(clusters.len(), 2);
        assert!(clusters.iter().all(|cluster| cluster.stops.len() == 1));
    }

    #[rstest]
    fn allocator_reports_unassigned_stops() {
        let request = request(
            1,
            1,
            vec![stop("Customer 1", 1.0, 0.0), stop("Customer 2", 0.0, 1.0)],
        );
        assert_eq!(
            OnePerVehicle.allocate(&request),
            Err(AllocationError::CapacityExceeded { unassigned: 1 }),
        );
    }

    #[rstest]
    fn builder_orders_empty_cluster_as_empty() {
        let order = InOrder.build_route(&depot(), &Cluster::new(Vec::new()));
        assert!(order.is_empty());
    }
}
