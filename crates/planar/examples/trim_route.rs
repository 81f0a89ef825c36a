//! Trim a decoded route between two off-route positions.
//!
//! Purpose
//! - Show the full path from polyline text to flat-plane queries: decode,
//!   project onto a flat system, trim between two stops, report side and
//!   length, then re-encode.
//!
//! The projection is a local equirectangular approximation around the
//! route's first point; real callers plug in a proper `Reproject`.

use planar::prelude::*;

/// Equirectangular metres around a reference longitude/latitude.
struct LocalMetres {
    lon0: f64,
    lat0: f64,
}

impl Reproject for LocalMetres {
    fn reproject(
        &self,
        x: f64,
        y: f64,
        from: Crs,
        to: Crs,
    ) -> Result<(f64, f64), ReprojectionError> {
        let k = planar::geo::EARTH_RADIUS_M.to_radians();
        match (from, to) {
            (Crs::Epsg4326, Crs::Epsg5179) => Ok((
                (x - self.lon0) * k * self.lat0.to_radians().cos(),
                (y - self.lat0) * k,
            )),
            (Crs::Epsg5179, Crs::Epsg4326) => Ok((
                self.lon0 + x / (k * self.lat0.to_radians().cos()),
                self.lat0 + y / k,
            )),
            _ => Err(ReprojectionError::Unsupported { from, to }),
        }
    }
}

fn main() {
    let route = GeoLine::from_polyline("_p~iF~ps|U_ulLnnqC_mqNvxq`@").expect("valid polyline");
    println!("route: {route} ({:.0} m great-circle)", route.length_m());

    let first = route[0];
    let proj = LocalMetres {
        lon0: first.longitude(),
        lat0: first.latitude(),
    };
    let flat_pts: Vec<FlatPoint> = route
        .iter()
        .map(|p| p.transform(Crs::Epsg5179, &proj).expect("projectable"))
        .collect();
    let line = FlatLine::new(flat_pts).expect("non-empty");
    println!("projected length: {:.0} m", line.length());

    let stop_a = GeoPoint::new(-120.5, 39.5).expect("in range");
    let stop_b = GeoPoint::new(-124.0, 42.5).expect("in range");
    let a = stop_a.transform(Crs::Epsg5179, &proj).expect("projectable");
    let b = stop_b.transform(Crs::Epsg5179, &proj).expect("projectable");

    for (name, p) in [("A", a), ("B", b)] {
        let sides = line.is_point_on_the_right_side(&p).expect("same system");
        let near = line.nearest_points(&p).expect("same system");
        println!(
            "stop {name}: {:.0} m off route, right side = {:?}",
            near[0].distance,
            sides.iter().map(|s| s.1).collect::<Vec<_>>()
        );
    }

    let trimmed = line.trim(&a, &b, false).expect("same system");
    println!("trimmed: {} points, {:.0} m", trimmed.len(), trimmed.length());

    let back: Vec<GeoPoint> = trimmed
        .iter()
        .map(|p| p.to_geo(&proj).expect("inverse projection"))
        .collect();
    let extent = trimmed.bounding_box().to_geo(&proj).expect("inverse projection");
    println!("trimmed extent: {extent}");
    println!("trimmed polyline: {}", polyline::encode(&back).expect("non-empty"));
}
