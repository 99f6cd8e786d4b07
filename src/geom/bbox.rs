use geo::Rect;
use rstar::{RTreeObject, AABB};

/// An R-tree entry: the bounding box of one region, tagged with that region's
/// position in its collection.
#[derive(Debug, Clone)]
pub(super) struct BoundingBox {
    idx: usize, // Index of corresponding region in the collection
    envelope: AABB<[f64; 2]>,
}

impl BoundingBox {
    pub(super) fn new(idx: usize, rect: Rect<f64>) -> Self {
        Self { idx, envelope: envelope_of(&rect) }
    }

    /// Position of the region this box was built from.
    #[inline] pub(super) fn idx(&self) -> usize { self.idx }
}

impl RTreeObject for BoundingBox {
    type Envelope = AABB<[f64; 2]>;

    fn envelope(&self) -> Self::Envelope { self.envelope }
}

/// Convert a `geo` rectangle into an `rstar` envelope.
#[inline]
pub(super) fn envelope_of(rect: &Rect<f64>) -> AABB<[f64; 2]> {
    AABB::from_corners(rect.min().into(), rect.max().into())
}
