use geo::{Area, BooleanOps, MultiPolygon};
use ndarray::{parallel::prelude::*, Array2, Axis};
use tracing::{debug, warn};

use crate::common::Deadline;
use crate::Result;

use super::Regions;

/// Fraction of `b`'s area covered by `a`, in `[0, 1]`.
///
/// A zero-area `b` has nothing to cover, so the fraction is defined as 0.
pub fn overlap(a: &MultiPolygon<f64>, b: &MultiPolygon<f64>) -> f64 {
    let area = b.unsigned_area();
    if area <= 0.0 { return 0.0 }
    fraction(a.intersection(b).unsigned_area(), area)
}

#[inline]
fn fraction(shared: f64, area: f64) -> f64 {
    if area <= 0.0 || shared <= 0.0 { 0.0 } else { (shared / area).clamp(0.0, 1.0) }
}

impl Regions {
    /// Compute the overlap matrix of `other` by `self`: a `(other.len(), self.len())`
    /// matrix whose entry `[i, j]` is the fraction of `other[i]`'s area covered by
    /// `self[j]`.
    ///
    /// Only pairs whose bounding boxes intersect are intersected exactly; every
    /// other entry is 0. Rows are computed in parallel. Rows for zero-area
    /// regions of `other` are all 0.
    pub fn overlap_matrix(&self, other: &Regions, deadline: Option<&Deadline>) -> Result<Array2<f64>> {
        let mut matrix = Array2::<f64>::zeros((other.len(), self.len()));

        matrix.axis_iter_mut(Axis(0))
            .into_par_iter()
            .enumerate()
            .try_for_each(|(i, mut row)| -> Result<()> {
                if let Some(deadline) = deadline { deadline.check("overlap matrix")? }

                let area = other.area(i);
                if area <= 0.0 {
                    warn!(region = i, "zero-area region, overlap row left at 0");
                    return Ok(());
                }

                let shape = other.shape(i);
                let mut hits = 0usize;
                for j in self.candidates(shape) {
                    let shared = self.shape(j).intersection(shape).unsigned_area();
                    if shared > 0.0 {
                        row[j] = fraction(shared, area);
                        hits += 1;
                    }
                }
                debug!(region = i, hits, "overlap row computed");
                Ok(())
            })?;

        Ok(matrix)
    }
}

/// Compute the overlap matrix of `b` by `a`, shape `(|B|, |A|)`.
/// See [`Regions::overlap_matrix`].
pub fn overlap_matrix(a: &Regions, b: &Regions, deadline: Option<&Deadline>) -> Result<Array2<f64>> {
    a.overlap_matrix(b, deadline)
}
