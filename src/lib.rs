#![doc = "Admin-level mobility estimation from cell-tower counts"]
mod common;
mod config;
mod error;
mod geom;
mod io;
mod mobility;
mod pipeline;

#[doc(inline)]
pub use common::Deadline;

#[doc(inline)]
pub use config::DataConfig;

#[doc(inline)]
pub use error::{Error, Result, ValidationError};

#[doc(inline)]
pub use geom::{overlap, overlap_matrix, validate_partition, Regions, SeedReport, Tower};

#[doc(inline)]
pub use mobility::{
    decode_tower_name, parse_records, reconstruct, validate_full, validate_ordering, validate_tower_names,
    MobilityRecord, RawRecord,
};

#[doc(inline)]
pub use io::{
    convert_shapefile, read_matrix, read_mobility, read_regions, read_regions_bytes, read_towers, write_matrix,
    write_regions,
};

#[doc(inline)]
pub use pipeline::{check_data_files, combine, country_matrices, day_matrix, map_cells_to_towers, overlap_matrices};
