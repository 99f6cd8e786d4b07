//! Reading and writing the pipeline's files, organized by format.
//!
//! - `csv` - tower and mobility tables (read), numeric matrix grids (read/write)
//! - `geojson` - region feature collections
//! - `shp` - shapefile to GeoJSON conversion
//! - `atomic` - write-then-rename outputs

mod atomic;
mod csv;
mod geojson;
mod shp;

pub(crate) use atomic::*;
pub(crate) use csv::stage_matrix;
pub use csv::{read_matrix, read_mobility, read_towers, write_matrix};
pub use geojson::{read_regions, read_regions_bytes, write_regions};
pub use shp::convert_shapefile;
