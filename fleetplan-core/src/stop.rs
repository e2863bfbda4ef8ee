use std::fmt;

use geo::Coord;

/// Identifier for a stop, supplied by the caller.
///
/// Identifiers are opaque labels such as `"Customer 5"` or `"Bay 12"`; the
/// engine never parses them. Their lexicographic ordering is the final
/// tie-break wherever distances or angles compare equal, which keeps route
/// construction fully deterministic.
///
/// # Examples
/// ```
/// use fleetplan_core::StopId;
///
/// let id = StopId::new("Customer 5");
/// assert_eq!(id.as_str(), "Customer 5");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct StopId(String);

impl StopId {
    /// Construct an identifier from any string-like value.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// View the identifier as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consume the identifier, returning the underlying string.
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for StopId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for StopId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl From<String> for StopId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

/// A stop to be served by exactly one vehicle.
///
/// Coordinates are planar with straight-line distances; `demand` is measured
/// in the same units as the vehicle capacity and defaults to one.
///
/// # Examples
/// ```
/// use geo::Coord;
/// use fleetplan_core::Stop;
///
/// let stop = Stop::new("Customer 1", Coord { x: 2.0, y: 4.0 });
/// assert_eq!(stop.demand, 1);
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Stop {
    /// Caller-supplied identifier, unique within a request.
    pub id: StopId,
    /// Planar position of the stop.
    pub location: Coord<f64>,
    /// Demand in vehicle capacity units.
    pub demand: u32,
}

impl Stop {
    /// Construct a stop with the default demand of one unit.
    pub fn new(id: impl Into<StopId>, location: Coord<f64>) -> Self {
        Self::with_demand(id, location, 1)
    }

    /// Construct a stop with an explicit demand.
    ///
    /// # Examples
    /// ```
    /// use geo::Coord;
    /// use fleetplan_core::Stop;
    ///
    /// let stop = Stop::with_demand("Pallet 9", Coord { x: 1.0, y: 0.0 }, 3);
    /// assert_eq!(stop.demand, 3);
    /// ```
    pub fn with_demand(id: impl Into<StopId>, location: Coord<f64>, demand: u32) -> Self {
        Self {
            id: id.into(),
            location,
            demand,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn new_defaults_to_unit_demand() {
        let stop = Stop::new("Customer 1", Coord { x: 0.0, y: 0.0 });
        assert_eq!(stop.demand, 1);
        assert_eq!(stop.id, StopId::new("Customer 1"));
    }

    #[rstest]
    #[case("Customer 10", "Customer 9")]
    #[case("A", "B")]
    fn identifiers_order_lexicographically(#[case] lhs: &str, #[case] rhs: &str) {
        assert!(StopId::new(lhs) < StopId::new(rhs));
    }

    #[rstest]
    fn identifier_displays_verbatim() {
        assert_eq!(StopId::new("Bay 12").to_string(), "Bay 12");
    }
}
