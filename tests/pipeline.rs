use std::fs;
use std::path::Path;

use approx::assert_abs_diff_eq;
use mobility_pipeline::{
    check_data_files, country_matrices, day_matrix, read_matrix, DataConfig, Error, ValidationError,
};

fn square(x0: f64, x1: f64) -> String {
    format!(r#"{{ "type": "Feature", "properties": {{}}, "geometry": {{ "type": "Polygon",
        "coordinates": [[[{x0}, 0], [{x1}, 0], [{x1}, 1], [{x0}, 1], [{x0}, 0]]] }} }}"#)
}

fn collection(features: &[String]) -> String {
    format!(r#"{{ "type": "FeatureCollection", "features": [{}] }}"#, features.join(","))
}

/// Two unit tower cells side by side; admin 0 covers x in [0, 1.5], admin 1 the rest.
fn dataset(dir: &Path) -> DataConfig {
    fs::write(dir.join("towers.csv"), "tower,lon,lat\nbr0,0.5,0.5\nbr1,1.5,0.5\n").unwrap();
    fs::write(dir.join("voronoi.json"), collection(&[square(0.0, 1.0), square(1.0, 2.0)])).unwrap();
    fs::write(dir.join("BRA_2-shape.json"), collection(&[square(0.0, 1.5), square(1.5, 2.0)])).unwrap();
    fs::write(
        dir.join("mobility.csv"),
        "date,origin,destination,count\n2015-02-01,br0,br0,5\n2015-02-01,br0,br1,3\n2015-02-01,br1,br0,2\n",
    ).unwrap();

    DataConfig {
        data_dir: dir.to_path_buf(),
        towers_file: "towers.csv".into(),
        voronoi_file: "voronoi.json".into(),
        ..DataConfig::default()
    }
}

#[test]
fn country_then_day() {
    let dir = tempfile::tempdir().unwrap();
    let config = dataset(dir.path());

    let (tower_admin_path, admin_tower_path) = country_matrices(&config, "BRA_2", &config.voronoi_path(), None).unwrap();
    assert_eq!(tower_admin_path, dir.path().join("BRA_2-tower-to-admin.csv"));
    assert_eq!(admin_tower_path, dir.path().join("BRA_2-admin-to-tower.csv"));

    let tower_admin = read_matrix(&tower_admin_path).unwrap();
    let expected = [[2.0 / 3.0, 1.0 / 3.0], [0.0, 1.0]];
    for ((i, j), value) in tower_admin.indexed_iter() {
        assert_abs_diff_eq!(*value, expected[i][j], epsilon = 1e-9);
    }
    let admin_tower = read_matrix(&admin_tower_path).unwrap();
    let expected = [[1.0, 0.0], [0.5, 0.5]];
    for ((i, j), value) in admin_tower.indexed_iter() {
        assert_abs_diff_eq!(*value, expected[i][j], epsilon = 1e-9);
    }

    let out = day_matrix(&config, "BRA_2", "20150201", &dir.path().join("mobility.csv")).unwrap();
    assert_eq!(out, dir.path().join("BRA_2-20150201-admin-to-admin.csv"));

    let admin_admin = read_matrix(&out).unwrap();
    assert_eq!(admin_admin.dim(), (2, 2));
    let expected = [[5.0, 1.0], [2.0, 0.0]];
    for ((i, j), value) in admin_admin.indexed_iter() {
        assert_abs_diff_eq!(*value, expected[i][j], epsilon = 1e-9);
    }
}

#[test]
fn malformed_mobility_writes_nothing() {
    let dir = tempfile::tempdir().unwrap();
    let config = dataset(dir.path());
    country_matrices(&config, "BRA_2", &config.voronoi_path(), None).unwrap();

    let mobility = dir.path().join("bad.csv");
    fs::write(&mobility, "date,origin,destination,count\n2015-02-01,br0,br0,-5\n").unwrap();

    let result = day_matrix(&config, "BRA_2", "20150201", &mobility);
    assert!(matches!(result, Err(Error::Invalid(ValidationError::MalformedCount { row: 0, .. }))));
    assert!(!config.admin_admin_path("BRA_2", "20150201").exists());
}

#[test]
fn day_without_country_matrices_fails() {
    let dir = tempfile::tempdir().unwrap();
    let config = dataset(dir.path());
    let result = day_matrix(&config, "BRA_2", "20150201", &dir.path().join("mobility.csv"));
    assert!(matches!(result, Err(Error::Io { .. })));
}

#[test]
fn cancelled_country_matrices_write_nothing() {
    let dir = tempfile::tempdir().unwrap();
    let config = DataConfig { timeout_secs: Some(0), ..dataset(dir.path()) };

    let result = country_matrices(&config, "BRA_2", &config.voronoi_path(), None);
    assert!(matches!(result, Err(Error::Cancelled(_))));
    assert!(!config.tower_admin_path("BRA_2").exists());
    assert!(!config.admin_tower_path("BRA_2").exists());
}

#[test]
fn data_files_check() {
    let dir = tempfile::tempdir().unwrap();
    let config = dataset(dir.path());
    let mobility = dir.path().join("mobility.csv");
    check_data_files(&config, "BRA_2", Some(&mobility)).unwrap();

    fs::write(dir.path().join("towers.csv"), "tower,lon,lat\nbr0,1.5,0.5\nbr1,0.5,0.5\n").unwrap();
    let result = check_data_files(&config, "BRA_2", Some(&mobility));
    assert!(matches!(result, Err(Error::Invalid(ValidationError::TowerOutsideCell { tower: 0, .. }))));

    fs::write(dir.path().join("towers.csv"), "tower,lon,lat\nbr0,0.5,0.5\nbr2,1.5,0.5\n").unwrap();
    let result = check_data_files(&config, "BRA_2", None);
    assert!(matches!(result, Err(Error::Invalid(ValidationError::TowerNameMismatch { row: 1, .. }))));
}

#[test]
fn overlapping_admins_fail_the_check() {
    let dir = tempfile::tempdir().unwrap();
    let config = dataset(dir.path());
    fs::write(dir.path().join("BRA_2-shape.json"), collection(&[square(0.0, 1.5), square(1.0, 2.0)])).unwrap();

    let result = check_data_files(&config, "BRA_2", None);
    assert!(matches!(result, Err(Error::Invalid(ValidationError::NotDisjoint { .. }))));
}

#[test]
fn empty_admin_file_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let config = dataset(dir.path());
    fs::write(dir.path().join("BRA_2-shape.json"), collection(&[])).unwrap();

    let result = country_matrices(&config, "BRA_2", &config.voronoi_path(), None);
    assert!(matches!(result, Err(Error::Invalid(ValidationError::NoRegions))));
    assert!(!config.tower_admin_path("BRA_2").exists());
    assert!(!config.admin_tower_path("BRA_2").exists());
}

#[test]
fn failed_second_write_leaves_neither_matrix() {
    let dir = tempfile::tempdir().unwrap();
    let config = dataset(dir.path());
    fs::create_dir(config.admin_tower_path("BRA_2")).unwrap();

    let result = country_matrices(&config, "BRA_2", &config.voronoi_path(), None);
    assert!(matches!(result, Err(Error::Io { .. })));
    assert!(!config.tower_admin_path("BRA_2").exists());
}
