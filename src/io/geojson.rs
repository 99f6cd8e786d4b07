use std::io::Write;
use std::path::Path;

use geo::{Coord, LineString, MultiPolygon, Polygon};
use serde::Deserialize;
use serde_json::{json, Map, Value};

use crate::geom::Regions;
use crate::io::PendingWrite;
use crate::{Error, Result};

#[derive(Deserialize)]
struct FeatureCollection {
    features: Vec<Feature>,
}

#[derive(Deserialize)]
struct Feature {
    geometry: Option<Geometry>,
}

/// The geometry types a region may carry. Anything else is a format error.
#[derive(Deserialize)]
#[serde(tag = "type", content = "coordinates")]
enum Geometry {
    Polygon(Vec<Vec<Vec<f64>>>),
    MultiPolygon(Vec<Vec<Vec<Vec<f64>>>>),
}

/// Read a GeoJSON feature collection into a region collection, one region per
/// feature in file order.
pub fn read_regions(path: &Path) -> Result<Regions> {
    let bytes = std::fs::read(path).map_err(|e| Error::io(path, e))?;
    read_regions_bytes(&bytes)
        .map_err(|e| match e {
            Error::Format(msg) => Error::Format(format!("{}: {msg}", path.display())),
            other => other,
        })
}

/// Read regions from GeoJSON bytes.
///
/// Polygons become one-member multi-polygons; a null geometry becomes an empty
/// (zero-area) region so that feature indices stay aligned.
pub fn read_regions_bytes(bytes: &[u8]) -> Result<Regions> {
    let collection: FeatureCollection = serde_json::from_slice(bytes)
        .map_err(|e| Error::format(format!("invalid feature collection: {e}")))?;

    let shapes = collection.features.into_iter().enumerate()
        .map(|(i, feature)| match feature.geometry {
            None => Ok(MultiPolygon(Vec::new())),
            Some(Geometry::Polygon(rings)) => Ok(MultiPolygon(vec![parse_polygon(i, rings)?])),
            Some(Geometry::MultiPolygon(polygons)) => polygons.into_iter()
                .map(|rings| parse_polygon(i, rings))
                .collect::<Result<Vec<_>>>()
                .map(MultiPolygon),
        })
        .collect::<Result<Vec<_>>>()?;

    Ok(Regions::new(shapes))
}

/// Parse polygon rings: the first is the exterior, the rest are holes.
fn parse_polygon(feature: usize, rings: Vec<Vec<Vec<f64>>>) -> Result<Polygon<f64>> {
    let mut rings = rings.into_iter().map(|ring| parse_ring(feature, ring));
    let exterior = rings.next()
        .ok_or_else(|| Error::format(format!("feature {feature}: polygon has no exterior ring")))??;
    Ok(Polygon::new(exterior, rings.collect::<Result<Vec<_>>>()?))
}

/// Parse a ring of `[x, y, ...]` positions; extra ordinates are ignored.
fn parse_ring(feature: usize, positions: Vec<Vec<f64>>) -> Result<LineString<f64>> {
    positions.into_iter()
        .map(|position| match position[..] {
            [x, y, ..] => Ok(Coord { x, y }),
            _ => Err(Error::format(format!("feature {feature}: position with fewer than two coordinates"))),
        })
        .collect::<Result<Vec<_>>>()
        .map(LineString)
}

/// Build GeoJSON coordinates for one multi-polygon.
fn multipolygon_coords(shape: &MultiPolygon<f64>) -> Value {
    let ring = |ls: &LineString<f64>| ls.coords().map(|c| json!([c.x, c.y])).collect::<Vec<_>>();
    shape.0.iter()
        .map(|polygon| std::iter::once(polygon.exterior())
            .chain(polygon.interiors())
            .map(ring)
            .collect::<Vec<_>>())
        .collect()
}

/// Write regions as a GeoJSON feature collection of `MultiPolygon` features.
/// `properties[i]`, when given, becomes the properties of feature `i`.
pub fn write_regions(path: &Path, shapes: &[MultiPolygon<f64>], properties: Option<&[Map<String, Value>]>) -> Result<()> {
    let features = shapes.iter().enumerate()
        .map(|(i, shape)| json!({
            "type": "Feature",
            "geometry": {
                "type": "MultiPolygon",
                "coordinates": multipolygon_coords(shape),
            },
            "properties": properties
                .and_then(|properties| properties.get(i).cloned())
                .unwrap_or_default(),
        }))
        .collect::<Vec<_>>();

    let collection = json!({ "type": "FeatureCollection", "features": features });

    let mut pending = PendingWrite::open(path)?;
    serde_json::to_writer(&mut pending, &collection)
        .map_err(|e| Error::format(format!("failed to serialize GeoJSON: {e}")))?;
    pending.write_all(b"\n").map_err(|e| Error::io(path, e))?;
    pending.finalize()
}
