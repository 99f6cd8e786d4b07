//! Batch jobs that turn tower-level inputs into admin-level mobility matrices.
//!
//! Country matrices (tower-to-admin and admin-to-tower) are computed once per
//! country and admin level; the admin-to-admin matrix is computed per day from
//! them. Nothing is written until every computation in a job has succeeded.

use std::path::{Path, PathBuf};

use ndarray::Array2;
use tracing::{debug, info, warn};

use crate::common::{ensure_dir_exists, require_file_exists, Deadline};
use crate::geom::{Regions, SeedReport, Tower};
use crate::io::{
    convert_shapefile, finalize_all, read_matrix, read_mobility, read_regions, read_towers, stage_matrix, write_matrix,
};
use crate::mobility::{parse_records, reconstruct, validate_ordering, validate_tower_names};
use crate::{DataConfig, Error, Result, ValidationError};

/// Combine a day's tower-to-tower counts with the country's overlap matrices
/// into admin-to-admin flows: `tower_admin · tower_tower · admin_tower`.
///
/// Shapes: `tower_tower` is (n_tower, n_tower), `tower_admin` is
/// (n_admin, n_tower), and `admin_tower` is (n_tower, n_admin).
pub fn combine(tower_tower: &Array2<f64>, tower_admin: &Array2<f64>, admin_tower: &Array2<f64>) -> Result<Array2<f64>> {
    let (n_tower, n_tower_cols) = tower_tower.dim();
    if n_tower != n_tower_cols {
        return Err(Error::ShapeMismatch(format!("tower-to-tower matrix is {n_tower}x{n_tower_cols}, expected square")));
    }
    if tower_admin.ncols() != n_tower {
        return Err(Error::ShapeMismatch(format!(
            "tower-to-admin matrix has {} columns, expected {n_tower} towers", tower_admin.ncols()
        )));
    }
    if admin_tower.nrows() != n_tower {
        return Err(Error::ShapeMismatch(format!(
            "admin-to-tower matrix has {} rows, expected {n_tower} towers", admin_tower.nrows()
        )));
    }
    if admin_tower.ncols() != tower_admin.nrows() {
        return Err(Error::ShapeMismatch(format!(
            "admin-to-tower matrix has {} admins, tower-to-admin has {}", admin_tower.ncols(), tower_admin.nrows()
        )));
    }

    Ok(tower_admin.dot(tower_tower).dot(admin_tower))
}

/// Tower-to-admin and admin-to-tower overlap matrices for two partitions of
/// the same territory.
///
/// Returns `(tower_admin, admin_tower)`: `tower_admin[a][t]` is the fraction of
/// admin `a` covered by tower cell `t`, and `admin_tower[t][a]` is the fraction
/// of tower cell `t` covered by admin `a`.
pub fn overlap_matrices(towers: &Regions, admins: &Regions, deadline: Option<&Deadline>) -> Result<(Array2<f64>, Array2<f64>)> {
    let (tower_admin, admin_tower) = rayon::join(
        || towers.overlap_matrix(admins, deadline),
        || admins.overlap_matrix(towers, deadline),
    );
    Ok((tower_admin?, admin_tower?))
}

/// Compute and persist the country matrices from the Voronoi cells and the
/// country's administrative regions.
///
/// When `shapefile` is given it is first converted to the country's GeoJSON
/// file; otherwise that file must already exist. Returns the paths of the
/// tower-to-admin and admin-to-tower matrices.
pub fn country_matrices(config: &DataConfig, country: &str, voronoi_path: &Path, shapefile: Option<&Path>) -> Result<(PathBuf, PathBuf)> {
    ensure_dir_exists(&config.data_dir)?;
    let admin_path = config.admin_geojson_path(country);
    if let Some(shapefile) = shapefile {
        convert_shapefile(shapefile, &admin_path)?;
    }
    require_file_exists(&admin_path)?;

    info!(path = %voronoi_path.display(), "loading tower cells");
    let towers = read_regions(voronoi_path)?;
    info!(path = %admin_path.display(), "loading admin regions");
    let admins = read_regions(&admin_path)?;

    if towers.is_empty() || admins.is_empty() {
        return Err(ValidationError::NoRegions.into());
    }
    warn_degenerate("tower cell", &towers);
    warn_degenerate("admin region", &admins);

    info!(towers = towers.len(), admins = admins.len(), "computing overlap matrices");
    let deadline = Deadline::from_timeout(config.timeout());
    let (tower_admin, admin_tower) = overlap_matrices(&towers, &admins, deadline.as_ref())?;

    let tower_admin_path = config.tower_admin_path(country);
    let admin_tower_path = config.admin_tower_path(country);
    finalize_all(vec![
        stage_matrix(&tower_admin, &tower_admin_path)?,
        stage_matrix(&admin_tower, &admin_tower_path)?,
    ])?;
    info!(tower_admin = %tower_admin_path.display(), admin_tower = %admin_tower_path.display(), "wrote country matrices");

    Ok((tower_admin_path, admin_tower_path))
}

/// Compute and persist one day's admin-to-admin matrix from its mobility file
/// and the country matrices written by [`country_matrices`].
pub fn day_matrix(config: &DataConfig, country: &str, day: &str, mobility_path: &Path) -> Result<PathBuf> {
    let tower_admin = read_matrix(&config.tower_admin_path(country))?;
    let admin_tower = read_matrix(&config.admin_tower_path(country))?;
    let n_towers = admin_tower.nrows();

    info!(path = %mobility_path.display(), "loading mobility records");
    let rows = read_mobility(mobility_path)?;
    let records = parse_records(&rows, &config.tower_prefix)?;
    debug!(records = records.len(), n_towers, "reconstructing tower-to-tower matrix");

    let deadline = Deadline::from_timeout(config.timeout());
    if let Some(deadline) = &deadline {
        deadline.check("tower-to-tower reconstruction")?;
    }
    let tower_tower = reconstruct(&records, n_towers)?;

    if let Some(deadline) = &deadline {
        deadline.check("admin-to-admin product")?;
    }
    let admin_admin = combine(&tower_tower, &tower_admin, &admin_tower)?;

    let out = config.admin_admin_path(country, day);
    write_matrix(&admin_admin, &out)?;
    info!(path = %out.display(), admins = admin_admin.nrows(), "wrote admin-to-admin matrix");
    Ok(out)
}

/// Run every data-file check, stopping at the first failure: tower names,
/// the Voronoi partition, towers inside their cells, mobility ordering (when a
/// mobility file is given), and the country's admin partition.
pub fn check_data_files(config: &DataConfig, country: &str, mobility_path: Option<&Path>) -> Result<()> {
    let towers = read_towers(&config.towers_path())?;
    let names = towers.iter().map(|tower| tower.name.as_str()).collect::<Vec<_>>();
    validate_tower_names(&names, &config.tower_prefix)?;
    info!(towers = towers.len(), "tower names are aligned with their indices");

    let cells = read_regions(&config.voronoi_path())?;
    cells.validate_partition(config.tolerance)?;
    info!(cells = cells.len(), "Voronoi cells form a partition");

    let seeds = towers.iter().map(|tower| tower.location).collect::<Vec<_>>();
    cells.validate_seeds(&seeds)?;
    info!("every tower lies inside its cell");

    match mobility_path {
        Some(path) => {
            validate_ordering(&read_mobility(path)?, &config.tower_prefix)?;
            info!(path = %path.display(), "mobility records are ordered");
        }
        None => debug!("no mobility file given, skipping ordering check"),
    }

    let admins = read_regions(&config.admin_geojson_path(country))?;
    admins.validate_partition(config.tolerance)?;
    info!(admins = admins.len(), "admin regions form a partition");

    Ok(())
}

/// Map each Voronoi cell to the tower seed it contains.
pub fn map_cells_to_towers(cells: &Regions, towers: &[Tower]) -> SeedReport {
    let seeds = towers.iter().map(|tower| tower.location).collect::<Vec<_>>();
    let report = cells.map_seeds(&seeds);
    if !report.unmapped.is_empty() {
        warn!(cells = report.unmapped.len(), "cells contain no tower");
    }
    report
}

fn warn_degenerate(kind: &str, regions: &Regions) {
    let degenerate = regions.degenerate();
    if !degenerate.is_empty() {
        warn!(count = degenerate.len(), first = degenerate[0], "{kind}s with zero area");
    }
}
