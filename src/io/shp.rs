use std::ffi::OsString;
use std::path::{Path, PathBuf};

use geo::{Coord, LineString, MultiPolygon, Polygon};
use serde_json::{json, Map, Value};
use shapefile::dbase::{FieldValue, Record};
use shapefile::{PolygonRing, Shape};
use tracing::info;

use crate::common::require_file_exists;
use crate::{Error, Result};

use super::geojson::write_regions;

/// Convert a shapefile of administrative regions into a GeoJSON feature
/// collection at `out`, keeping each shape's dBase attributes as properties.
///
/// `shp_path` may name the `.shp` or `.dbf` file, or omit the extension; both
/// files must sit side by side. Returns the number of regions written.
pub fn convert_shapefile(shp_path: &Path, out: &Path) -> Result<usize> {
    let shp_path = with_shp_extension(shp_path);
    require_file_exists(&shp_path)?;
    require_file_exists(&shp_path.with_extension("dbf"))?;
    let mut reader = shapefile::Reader::from_path(&shp_path)
        .map_err(|e| shapefile_error(&shp_path, e))?;

    let mut shapes = Vec::new();
    let mut properties = Vec::new();
    for (i, item) in reader.iter_shapes_and_records().enumerate() {
        let (shape, record) = item.map_err(|e| shapefile_error(&shp_path, e))?;
        shapes.push(match shape {
            Shape::Polygon(polygon) => shp_to_geo(&polygon),
            Shape::NullShape => MultiPolygon(Vec::new()),
            other => return Err(Error::format(format!(
                "{}: shape {i} is a {}, expected a polygon", shp_path.display(), other.shapetype()
            ))),
        });
        properties.push(record_to_properties(record));
    }

    info!(path = %shp_path.display(), regions = shapes.len(), out = %out.display(), "converted shapefile to GeoJSON");
    write_regions(out, &shapes, Some(&properties))?;
    Ok(shapes.len())
}

/// Point `path` at the `.shp` file, whether it named the `.shp`, the `.dbf`, or neither.
fn with_shp_extension(path: &Path) -> PathBuf {
    match path.extension().and_then(|ext| ext.to_str()).map(str::to_ascii_lowercase).as_deref() {
        Some("shp") | Some("dbf") => path.with_extension("shp"),
        _ => {
            let mut name = OsString::from(path.as_os_str());
            name.push(".shp");
            PathBuf::from(name)
        }
    }
}

fn shapefile_error(path: &Path, error: shapefile::Error) -> Error {
    match error {
        shapefile::Error::IoError(e) => Error::io(path, e),
        other => Error::format(format!("{}: {other}", path.display())),
    }
}

/// Convert a shapefile polygon to a multi-polygon: each outer ring starts a new
/// polygon and the inner rings that follow it become its holes.
fn shp_to_geo(polygon: &shapefile::Polygon) -> MultiPolygon<f64> {
    fn ring(points: &[shapefile::Point]) -> LineString<f64> {
        LineString(points.iter().map(|pt| Coord { x: pt.x, y: pt.y }).collect())
    }

    let mut polygons = Vec::new();
    let mut exterior: Option<LineString<f64>> = None;
    let mut holes = Vec::new();

    for r in polygon.rings() {
        match r {
            PolygonRing::Outer(points) => {
                if let Some(previous) = exterior.replace(ring(points)) {
                    polygons.push(Polygon::new(previous, std::mem::take(&mut holes)));
                }
            }
            PolygonRing::Inner(points) => holes.push(ring(points)),
        }
    }
    if let Some(last) = exterior {
        polygons.push(Polygon::new(last, holes));
    }

    MultiPolygon(polygons)
}

/// Convert a dBase record into GeoJSON properties.
fn record_to_properties(record: Record) -> Map<String, Value> {
    record.into_iter()
        .map(|(field, value)| {
            let value = match value {
                FieldValue::Character(s) => s.map_or(Value::Null, |s| json!(s.trim())),
                FieldValue::Numeric(n) => json!(n),
                FieldValue::Float(f) => json!(f),
                FieldValue::Logical(b) => json!(b),
                FieldValue::Integer(i) => json!(i),
                FieldValue::Double(d) => json!(d),
                FieldValue::Currency(c) => json!(c),
                FieldValue::Memo(s) => json!(s),
                _ => Value::Null,
            };
            (field, value)
        })
        .collect()
}
