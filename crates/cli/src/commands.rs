//! Command bodies: parse textual arguments, run the query, return JSON.

use anyhow::{bail, Context, Result};
use planar::prelude::*;
use serde::Serialize;
use serde_json::Value;

#[derive(Serialize)]
struct Encoded {
    polyline: String,
    points: usize,
}

#[derive(Serialize)]
struct Decoded {
    points: Vec<[f64; 2]>,
    length_m: f64,
}

#[derive(Serialize)]
struct PolygonReport {
    vertices: usize,
    area: f64,
    perimeter: f64,
    /// `None` for zero-area rings.
    centroid: Option<[f64; 2]>,
    #[serde(skip_serializing_if = "Option::is_none")]
    contains: Option<bool>,
}

#[derive(Serialize)]
struct Nearest {
    segment: usize,
    point: [f64; 2],
    distance: f64,
    right_side: bool,
}

#[derive(Serialize)]
struct LineReport {
    points: usize,
    length: f64,
    self_intersecting: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    nearest: Option<Vec<Nearest>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    interpolated: Option<Vec<[f64; 2]>>,
}

pub fn encode(points: &str) -> Result<Value> {
    let pts = parse_pairs(points)?
        .into_iter()
        .map(|(lon, lat)| GeoPoint::new(lon, lat))
        .collect::<planar::Result<Vec<_>>>()?;
    let polyline = polyline::encode(&pts)?;
    Ok(serde_json::to_value(Encoded {
        polyline,
        points: pts.len(),
    })?)
}

pub fn decode(text: &str) -> Result<Value> {
    let line = GeoLine::from_polyline(text).context("decoding polyline")?;
    Ok(serde_json::to_value(Decoded {
        points: line.iter().map(|p| [p.longitude(), p.latitude()]).collect(),
        length_m: line.length_m(),
    })?)
}

pub fn polygon(points: &str, srid: u32, contains: Option<&str>) -> Result<Value> {
    let crs = Crs::try_from(srid)?;
    let pts = flat_points(points, crs)?;
    let poly = FlatPolygon::new(pts).context("building polygon")?;
    let contains = contains
        .map(|s| -> Result<bool> {
            let p = FlatPoint::parse(s, crs)?;
            Ok(poly.contains(&p)?)
        })
        .transpose()?;
    Ok(serde_json::to_value(PolygonReport {
        vertices: poly.vertex_count(),
        area: poly.area(),
        perimeter: poly.edge_length(),
        centroid: poly.centroid().ok().map(|c| [c.x(), c.y()]),
        contains,
    })?)
}

pub fn line(
    points: &str,
    srid: u32,
    near: Option<&str>,
    interpolate: Option<f64>,
) -> Result<Value> {
    let crs = Crs::try_from(srid)?;
    let line = FlatLine::new(flat_points(points, crs)?).context("building line")?;
    let nearest = match near {
        None => None,
        Some(s) => {
            let target = FlatPoint::parse(s, crs)?;
            let sides = line.is_point_on_the_right_side(&target)?;
            let hits = line
                .nearest_points(&target)?
                .into_iter()
                .zip(sides)
                .map(|(n, (_, right_side))| Nearest {
                    segment: n.segment,
                    point: [n.point.x(), n.point.y()],
                    distance: n.distance,
                    right_side,
                })
                .collect();
            Some(hits)
        }
    };
    let interpolated = interpolate
        .map(|d| -> Result<Vec<[f64; 2]>> {
            let dense = line.interpolate(d)?;
            Ok(dense.iter().map(|p| [p.x(), p.y()]).collect())
        })
        .transpose()?;
    Ok(serde_json::to_value(LineReport {
        points: line.len(),
        length: line.length(),
        self_intersecting: line.has_self_intersection(),
        nearest,
        interpolated,
    })?)
}

pub fn report() -> Value {
    serde_json::json!({
        "name": "planar",
        "version": planar::VERSION,
        "code_rev": crate::output::current_git_rev(),
    })
}

fn flat_points(text: &str, crs: Crs) -> Result<Vec<FlatPoint>> {
    parse_pairs(text)?
        .into_iter()
        .map(|(x, y)| Ok(FlatPoint::tagged(x, y, crs)?))
        .collect()
}

/// `"x,y;x,y;..."` into coordinate pairs.
fn parse_pairs(text: &str) -> Result<Vec<(f64, f64)>> {
    let pairs = text
        .split(';')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|pair| {
            let (x, y) = pair
                .split_once(',')
                .with_context(|| format!("expected \"x,y\", got {pair:?}"))?;
            let x: f64 = x.trim().parse().with_context(|| format!("bad number in {pair:?}"))?;
            let y: f64 = y.trim().parse().with_context(|| format!("bad number in {pair:?}"))?;
            Ok((x, y))
        })
        .collect::<Result<Vec<_>>>()?;
    if pairs.is_empty() {
        bail!("no points given");
    }
    Ok(pairs)
}
