mod bbox;
mod geom;
mod overlap;
mod partition;
mod seeds;

pub use geom::Regions;
pub use overlap::{overlap, overlap_matrix};
pub use partition::validate_partition;
pub use seeds::{SeedReport, Tower};
