use geo::{Area, BooleanOps, BoundingRect, Coord, MultiPolygon, Point, Polygon, Rect};
use rstar::{RTree, AABB};

use super::bbox::{envelope_of, BoundingBox};

/// An ordered, read-only collection of regions (Voronoi cells or administrative
/// boundaries) with an R-tree over their bounding boxes.
///
/// A region's position in the collection is its identity for the whole run:
/// tower index for cells, admin index for boundaries. The R-tree carries that
/// position in each entry, so query results never need to be matched back to
/// geometries by coordinate values.
#[derive(Debug, Clone)]
pub struct Regions {
    shapes: Vec<MultiPolygon<f64>>,
    areas: Vec<f64>,
    rtree: RTree<BoundingBox>,
}

impl Regions {
    /// Build a collection (and its spatial index) from a list of regions.
    /// Empty regions keep their index but are left out of the R-tree.
    pub fn new(shapes: Vec<MultiPolygon<f64>>) -> Self {
        Self {
            rtree: RTree::bulk_load(
                shapes.iter().enumerate()
                    .filter_map(|(i, shape)| shape.bounding_rect().map(|rect| BoundingBox::new(i, rect)))
                    .collect()
            ),
            areas: shapes.iter().map(|shape| shape.unsigned_area()).collect(),
            shapes,
        }
    }

    /// Build a collection of single polygons, each becoming a one-member region.
    pub fn from_polygons(polygons: Vec<Polygon<f64>>) -> Self {
        Self::new(polygons.into_iter().map(|polygon| MultiPolygon(vec![polygon])).collect())
    }

    /// Get the number of regions.
    #[inline] pub fn len(&self) -> usize { self.shapes.len() }

    /// Check if there are no regions.
    #[inline] pub fn is_empty(&self) -> bool { self.shapes.is_empty() }

    /// Get a reference to the list of regions.
    #[inline] pub fn shapes(&self) -> &[MultiPolygon<f64>] { &self.shapes }

    /// Get the region at `idx`.
    #[inline] pub fn shape(&self, idx: usize) -> &MultiPolygon<f64> { &self.shapes[idx] }

    /// Get the area of the region at `idx`.
    #[inline] pub fn area(&self, idx: usize) -> f64 { self.areas[idx] }

    /// Sum of the areas of all regions.
    #[inline] pub fn total_area(&self) -> f64 { self.areas.iter().sum() }

    /// Indices of regions whose bounding box intersects the bounding box of `shape`.
    pub fn candidates<'a>(&'a self, shape: &MultiPolygon<f64>) -> impl Iterator<Item = usize> + 'a {
        let envelope = shape.bounding_rect().map(|rect| envelope_of(&rect));
        envelope.into_iter()
            .flat_map(move |envelope| self.rtree.locate_in_envelope_intersecting(&envelope))
            .map(BoundingBox::idx)
    }

    /// Indices of regions whose bounding box contains `point`.
    pub fn locate(&self, point: Point<f64>) -> impl Iterator<Item = usize> + '_ {
        let envelope = AABB::from_point([point.x(), point.y()]);
        self.rtree.locate_in_envelope_intersecting(&envelope)
            .map(BoundingBox::idx)
    }

    /// Indices of regions with zero area (missing or collapsed geometry).
    pub fn degenerate(&self) -> Vec<usize> {
        self.areas.iter().enumerate()
            .filter(|&(_, &area)| area <= 0.0)
            .map(|(i, _)| i)
            .collect()
    }

    /// Compute the bounding rectangle of all regions.
    pub fn bounds(&self) -> Option<Rect<f64>> {
        self.shapes.iter()
            .filter_map(|shape| shape.bounding_rect())
            .reduce(|a, b| Rect::new(
                Coord { x: a.min().x.min(b.min().x), y: a.min().y.min(b.min().y) },
                Coord { x: a.max().x.max(b.max().x), y: a.max().y.max(b.max().y) },
            ))
    }

    /// Compute the union of all regions into a single MultiPolygon.
    /// This method may be slow for large numbers of complex polygons.
    pub fn union(&self) -> MultiPolygon<f64> {
        self.shapes.iter().cloned()
            .reduce(|a, b| a.union(&b))
            .unwrap_or_else(|| MultiPolygon(Vec::new()))
    }
}

#[cfg(test)]
mod tests {
    use geo::{polygon, Rect};

    use super::*;

    fn square(x: f64, y: f64, size: f64) -> MultiPolygon<f64> {
        MultiPolygon(vec![Rect::new(Coord { x, y }, Coord { x: x + size, y: y + size }).to_polygon()])
    }

    #[test]
    fn areas_and_bounds() {
        let regions = Regions::new(vec![square(0.0, 0.0, 1.0), square(1.0, 0.0, 2.0)]);
        assert_eq!(regions.len(), 2);
        assert_eq!(regions.area(0), 1.0);
        assert_eq!(regions.area(1), 4.0);
        assert_eq!(regions.total_area(), 5.0);

        let bounds = regions.bounds().unwrap();
        assert_eq!(bounds.min(), Coord { x: 0.0, y: 0.0 });
        assert_eq!(bounds.max(), Coord { x: 3.0, y: 2.0 });
    }

    #[test]
    fn candidates_carry_collection_index() {
        // Two regions with identical coordinates must still come back as distinct indices.
        let regions = Regions::new(vec![square(0.0, 0.0, 1.0), square(5.0, 5.0, 1.0), square(0.0, 0.0, 1.0)]);
        let mut found = regions.candidates(&square(0.5, 0.5, 0.1)).collect::<Vec<_>>();
        found.sort();
        assert_eq!(found, vec![0, 2]);
    }

    #[test]
    fn empty_regions_are_degenerate_and_unindexed() {
        let regions = Regions::new(vec![square(0.0, 0.0, 1.0), MultiPolygon(Vec::new())]);
        assert_eq!(regions.degenerate(), vec![1]);
        assert_eq!(regions.candidates(&square(-1.0, -1.0, 3.0)).collect::<Vec<_>>(), vec![0]);
        assert_eq!(regions.candidates(&MultiPolygon(Vec::new())).count(), 0);
    }

    #[test]
    fn locate_point() {
        let regions = Regions::from_polygons(vec![
            polygon![(x: 0.0, y: 0.0), (x: 1.0, y: 0.0), (x: 1.0, y: 1.0), (x: 0.0, y: 1.0)],
            polygon![(x: 2.0, y: 0.0), (x: 3.0, y: 0.0), (x: 3.0, y: 1.0), (x: 2.0, y: 1.0)],
        ]);
        assert_eq!(regions.locate(Point::new(2.5, 0.5)).collect::<Vec<_>>(), vec![1]);
        assert_eq!(regions.locate(Point::new(1.5, 0.5)).count(), 0);
    }
}
