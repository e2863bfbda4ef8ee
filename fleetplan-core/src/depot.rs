use geo::Coord;

/// The shared origin and terminus of every vehicle route.
///
/// A request carries exactly one depot; its label anchors both ends of each
/// rendered route.
///
/// # Examples
/// ```
/// use geo::Coord;
/// use fleetplan_core::Depot;
///
/// let depot = Depot::new("Depot A", Coord { x: 0.0, y: 0.0 });
/// assert_eq!(depot.label, "Depot A");
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Depot {
    /// Human-readable label used in rendered routes.
    pub label: String,
    /// Planar position of the depot.
    pub location: Coord<f64>,
}

impl Depot {
    /// Construct a depot with the given label and position.
    pub fn new(label: impl Into<String>, location: Coord<f64>) -> Self {
        Self {
            label: label.into(),
            location,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn depot_keeps_label_and_location() {
        let depot = Depot::new("Equipment Yard", Coord { x: 3.0, y: -1.5 });
        assert_eq!(depot.label, "Equipment Yard");
        assert_eq!(depot.location, Coord { x: 3.0, y: -1.5 });
    }
}
