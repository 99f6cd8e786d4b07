use geo::{Contains, Point};

use crate::ValidationError;

use super::Regions;

/// A cell tower: its name from the tower file and its (longitude, latitude).
#[derive(Debug, Clone, PartialEq)]
pub struct Tower {
    pub name: String,
    pub location: Point<f64>,
}

/// Summary of how Voronoi cells line up with the tower seeds they were built from.
#[derive(Debug, Clone, PartialEq)]
pub struct SeedReport {
    /// For each cell, the seed it contains (the last one, if several do).
    pub mapping: Vec<Option<usize>>,
    /// Cells that contain no seed.
    pub unmapped: Vec<usize>,
    /// Cells with zero area.
    pub degenerate: Vec<usize>,
    /// Number of distinct seeds that landed in some cell.
    pub distinct_seeds: usize,
}

impl Regions {
    /// For each region, find which of `seeds` it contains.
    pub fn map_seeds(&self, seeds: &[Point<f64>]) -> SeedReport {
        let mut mapping = vec![None; self.len()];
        for (s, &seed) in seeds.iter().enumerate() {
            for cell in self.locate(seed).filter(|&cell| self.shape(cell).contains(&seed)) {
                mapping[cell] = Some(s);
            }
        }

        let mut seen = mapping.iter().flatten().copied().collect::<Vec<_>>();
        seen.sort_unstable();
        seen.dedup();

        SeedReport {
            unmapped: mapping.iter().enumerate()
                .filter_map(|(i, seed)| seed.is_none().then_some(i))
                .collect(),
            degenerate: self.degenerate(),
            distinct_seeds: seen.len(),
            mapping,
        }
    }

    /// Check that seed `i` lies inside region `i` for every `i`.
    pub fn validate_seeds(&self, seeds: &[Point<f64>]) -> Result<(), ValidationError> {
        if seeds.len() != self.len() {
            return Err(ValidationError::TowerCellCount { count: seeds.len(), cells: self.len() });
        }
        seeds.iter().enumerate()
            .find(|&(i, seed)| !self.shape(i).contains(seed))
            .map_or(Ok(()), |(i, seed)| Err(ValidationError::TowerOutsideCell { tower: i, x: seed.x(), y: seed.y() }))
    }
}
