use super::*;
use crate::cfg::GeomCfg;
use crate::crs::Crs;
use proptest::prelude::*;
use rand::{rngs::StdRng, Rng, SeedableRng};

fn p(x: f64, y: f64) -> FlatPoint {
    FlatPoint::tagged(x, y, Crs::Epsg5179).unwrap()
}

fn coord() -> impl Strategy<Value = f64> {
    -1.0e4..1.0e4
}

proptest! {
    #[test]
    fn interval_bounds_and_union(a in coord(), b in coord(), c in coord(), d in coord()) {
        let i = Interval::new(a, b);
        let j = Interval::new(c, d);
        prop_assert!(i.contains(i.min()) && i.contains(i.max()));
        prop_assert!(i.min() <= i.max());
        let u = i.union(&j);
        prop_assert!(u.contains(i.min()) && u.contains(i.max()));
        prop_assert!(u.contains(j.min()) && u.contains(j.max()));
        prop_assert_eq!(i.intersects(&j), j.intersects(&i));
        prop_assert_eq!(u, j.union(&i));
    }

    #[test]
    fn normalized_has_unit_size(x in coord(), y in coord()) {
        let v = Vector::new(x, y);
        prop_assume!(v.size() > 1e-6);
        prop_assert!((v.normalized().size() - 1.0).abs() < 1e-12);
        let back = Vector::from_heading(v.heading());
        prop_assert!((back.x() - v.normalized().x()).abs() < 1e-6);
        prop_assert!((back.y() - v.normalized().y()).abs() < 1e-6);
    }

    #[test]
    fn zero_rotation_keeps_heading(x in coord(), y in coord(), turn in -720.0f64..720.0) {
        let v = Vector::new(x, y);
        prop_assume!(v.size() > 1e-6);
        let h = v.rotated(0.0).heading();
        let diff = (h - v.heading()).abs();
        prop_assert!(diff < 1e-4 || (360.0 - diff) < 1e-4);
        let expected = (v.heading() + turn).rem_euclid(360.0);
        let got = v.rotated(turn).heading();
        let diff = (got - expected).abs();
        prop_assert!(diff < 1e-4 || (360.0 - diff) < 1e-4);
    }

    #[test]
    fn crossing_segments_meet_at_shared_center(
        cx in coord(), cy in coord(),
        heading in 0.0f64..360.0, turn in 5.0f64..175.0,
        la in 1.0f64..100.0, lb in 1.0f64..100.0,
    ) {
        let a = Vector::from_heading(heading) * la;
        let b = Vector::from_heading(heading + turn) * lb;
        let c = p(cx, cy);
        let s1 = LineSegment::new(c - a, c + a).unwrap();
        let s2 = LineSegment::new(c - b, c + b).unwrap();
        let x = s1.intersection(&s2).unwrap();
        prop_assert!(x.is_some());
        let x = x.unwrap();
        prop_assert!(x.distance(&c).unwrap() < 1e-6);
    }

    #[test]
    fn translated_copies_never_intersect(
        x0 in coord(), y0 in coord(),
        dx in -100.0f64..100.0, dy in -100.0f64..100.0,
        shift in 1.0f64..50.0,
    ) {
        let d = Vector::new(dx, dy);
        prop_assume!(d.size() > 1e-3);
        let offset = Vector::new(-dy, dx).normalized() * shift;
        let start = p(x0, y0);
        let s1 = LineSegment::new(start, start + d).unwrap();
        let s2 = LineSegment::new(start + offset, start + offset + d).unwrap();
        prop_assert_eq!(s1.intersection(&s2).unwrap(), None);
    }
}

#[test]
fn monotone_walks_do_not_self_intersect() {
    // strictly increasing x: non-adjacent segments have disjoint x ranges
    let mut rng = StdRng::seed_from_u64(2024);
    for _ in 0..50 {
        let n = rng.gen_range(3..20);
        let mut x = 0.0;
        let pts: Vec<FlatPoint> = (0..n)
            .map(|_| {
                x += rng.gen_range(0.5..5.0);
                p(x, rng.gen_range(-10.0..10.0))
            })
            .collect();
        let line = FlatLine::new(pts).unwrap();
        assert!(!line.has_self_intersection_with(GeomCfg::default()));
        assert!((line.length() - line.reversed().length()).abs() < 1e-9);
    }
}

#[test]
fn trimmed_line_is_no_longer_than_source() {
    let mut rng = StdRng::seed_from_u64(99);
    let pts: Vec<FlatPoint> = (0..12)
        .map(|i| p(i as f64 * 10.0, rng.gen_range(-5.0..5.0)))
        .collect();
    let line = FlatLine::new(pts).unwrap();
    for _ in 0..20 {
        let a = p(rng.gen_range(0.0..110.0), rng.gen_range(-20.0..20.0));
        let b = p(rng.gen_range(0.0..110.0), rng.gen_range(-20.0..20.0));
        let t = line.trim(&a, &b, false).unwrap();
        assert!(t.length() <= line.length() + 1e-9);
    }
}

#[test]
fn polygon_box_and_sampling_agree() {
    let pentagon = FlatPolygon::new(vec![
        p(0.0, 0.0),
        p(4.0, 0.0),
        p(5.0, 3.0),
        p(2.0, 5.0),
        p(-1.0, 3.0),
    ])
    .unwrap();
    let bbox = pentagon.bounding_box();
    assert_eq!((bbox.left(), bbox.right(), bbox.bottom(), bbox.top()), (-1.0, 5.0, 0.0, 5.0));
    let mut rng = StdRng::seed_from_u64(3);
    for _ in 0..100 {
        let q = pentagon.pick_random_point(&mut rng).unwrap();
        assert!(bbox.contains(&q).unwrap());
        assert!(pentagon.contains(&q).unwrap());
    }
    let c = pentagon.centroid().unwrap();
    assert!(pentagon.contains(&c).unwrap());
}
