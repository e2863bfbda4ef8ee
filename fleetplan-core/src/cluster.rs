use crate::Stop;

/// Stops assigned to a single vehicle.
///
/// Produced by an [`Allocator`](crate::Allocator); total demand never
/// exceeds the vehicle capacity. The internal order is the allocator's
/// sweep order, not yet a route.
///
/// # Examples
/// ```
/// use geo::Coord;
/// use fleetplan_core::{Cluster, Stop};
///
/// let cluster = Cluster::new(vec![
///     Stop::new("Customer 1", Coord { x: 1.0, y: 0.0 }),
///     Stop::with_demand("Customer 2", Coord { x: 0.0, y: 1.0 }, 3),
/// ]);
/// assert_eq!(cluster.total_demand(), 4);
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Cluster {
    /// Stops in allocation order.
    pub stops: Vec<Stop>,
}

impl Cluster {
    /// Wrap the stops assigned to one vehicle.
    pub fn new(stops: Vec<Stop>) -> Self {
        Self { stops }
    }

    /// Total demand carried by the cluster.
    pub fn total_demand(&self) -> u64 {
        self.stops.iter().map(|stop| u64::from(stop.demand)).sum()
    }

    /// Whether the cluster holds no stops.
    pub fn is_empty(&self) -> bool {
        self.stops.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{stop, stop_with_demand};

    #[test]
    fn sums_demand_across_stops() {
        let cluster = Cluster::new(vec![
            stop("Customer 1", 1.0, 0.0),
            stop_with_demand("Customer 2", 0.0, 1.0, 2),
        ]);
        assert_eq!(cluster.total_demand(), 3);
    }

    #[test]
    fn empty_cluster_has_zero_demand() {
        let cluster = Cluster::new(Vec::new());
        assert!(cluster.is_empty());
        assert_eq!(cluster.total_demand(), 0);
    }
}
