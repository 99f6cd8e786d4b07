use geo::{Area, MultiPolygon, Polygon};

use crate::ValidationError;

use super::Regions;

impl Regions {
    /// Check that the regions form a partition of the territory they cover.
    ///
    /// Compares the sum of the region areas with the area of their union, where
    /// holes enclosed by the union count as part of it. With
    /// `frac = (union_area - area_sum) / union_area`:
    /// - `frac > tolerance`: the regions leave gaps (`NotContiguous`);
    /// - `frac < -tolerance`: the regions overlap (`NotDisjoint`).
    ///
    /// Only enclosed gaps count: regions separated by open space are islands
    /// and pass.
    pub fn validate_partition(&self, tolerance: f64) -> Result<(), ValidationError> {
        if self.is_empty() { return Err(ValidationError::NoRegions) }

        let area_sum = self.total_area();
        let union_area = fill_holes(&self.union()).unsigned_area();
        if union_area <= 0.0 { return Err(ValidationError::NoRegions) }

        let frac = (union_area - area_sum) / union_area;
        if frac > tolerance {
            Err(ValidationError::NotContiguous { frac })
        } else if frac < -tolerance {
            Err(ValidationError::NotDisjoint { frac })
        } else {
            Ok(())
        }
    }
}

/// Check that `regions` is a partition. See [`Regions::validate_partition`].
pub fn validate_partition(regions: &Regions, tolerance: f64) -> Result<(), ValidationError> {
    regions.validate_partition(tolerance)
}

/// Drop interior rings so that enclosed gaps count towards the area.
fn fill_holes(shape: &MultiPolygon<f64>) -> MultiPolygon<f64> {
    MultiPolygon(shape.0.iter()
        .map(|polygon| Polygon::new(polygon.exterior().clone(), Vec::new()))
        .collect())
}

#[cfg(test)]
mod tests {
    use geo::{polygon, Coord, Rect};

    use super::*;

    const EPS: f64 = 1e-4;

    fn rect(x0: f64, y0: f64, x1: f64, y1: f64) -> Polygon<f64> {
        Rect::new(Coord { x: x0, y: y0 }, Coord { x: x1, y: y1 }).to_polygon()
    }

    #[test]
    fn empty_collection() {
        assert_eq!(Regions::new(Vec::new()).validate_partition(EPS), Err(ValidationError::NoRegions));
        assert_eq!(
            Regions::new(vec![MultiPolygon(Vec::new())]).validate_partition(EPS),
            Err(ValidationError::NoRegions),
        );
    }

    #[test]
    fn shared_edge_is_a_partition() {
        let regions = Regions::from_polygons(vec![rect(0.0, 0.0, 1.0, 1.0), rect(1.0, 0.0, 2.0, 1.0)]);
        assert_eq!(validate_partition(&regions, EPS), Ok(()));
    }

    #[test]
    fn enclosed_gap_is_not_contiguous() {
        // A U-shaped region capped by a rectangle leaves a 1x1 pocket uncovered.
        let cup = polygon![
            (x: 0.0, y: 0.0), (x: 3.0, y: 0.0), (x: 3.0, y: 2.0), (x: 2.0, y: 2.0),
            (x: 2.0, y: 1.0), (x: 1.0, y: 1.0), (x: 1.0, y: 2.0), (x: 0.0, y: 2.0),
        ];
        let lid = rect(0.0, 2.0, 3.0, 3.0);
        let regions = Regions::from_polygons(vec![cup, lid]);
        assert!(matches!(regions.validate_partition(EPS), Err(ValidationError::NotContiguous { .. })));
    }

    #[test]
    fn separated_regions_are_islands() {
        let regions = Regions::from_polygons(vec![rect(0.0, 0.0, 1.0, 1.0), rect(1.5, 0.0, 2.5, 1.0)]);
        assert_eq!(regions.validate_partition(EPS), Ok(()));
    }

    #[test]
    fn overlap_is_not_disjoint() {
        let regions = Regions::from_polygons(vec![rect(0.0, 0.0, 2.0, 1.0), rect(1.0, 0.0, 3.0, 1.0)]);
        match regions.validate_partition(EPS) {
            Err(ValidationError::NotDisjoint { frac }) => assert!((frac + 1.0 / 3.0).abs() < 1e-9),
            other => panic!("expected NotDisjoint, got {other:?}"),
        }
    }

    #[test]
    fn tolerance_absorbs_slivers() {
        // A sliver overlap of 1e-6 units against a total area of 2.
        let regions = Regions::from_polygons(vec![rect(0.0, 0.0, 1.0, 1.0), rect(0.999999, 0.0, 2.0, 1.0)]);
        assert_eq!(regions.validate_partition(EPS), Ok(()));
        assert!(regions.validate_partition(0.0).is_err());
    }
}
