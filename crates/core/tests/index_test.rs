use geoscan::index::Node;
use geoscan::{Point, Rect, SpatialIndex};

/// Deterministic pseudo-random coordinates in `[0, scale)`.
fn scatter(n: usize, scale: f64, seed: u64) -> Vec<Point> {
    let mut state = seed;
    let mut next = move || {
        state = state
            .wrapping_mul(6364136223846793005)
            .wrapping_add(1442695040888963407);
        (state >> 11) as f64 / (1u64 << 53) as f64 * scale
    };
    (0..n).map(|_| Point::new(next(), next())).collect()
}

fn check_sizes(node: &Node) -> usize {
    match node.children() {
        Some((left, right)) => {
            let total = check_sizes(left) + check_sizes(right);
            assert_eq!(node.size(), total);
            total
        }
        None => {
            let total: usize = node.points().iter().map(|p| p.cnt()).sum();
            assert_eq!(node.size(), total);
            total
        }
    }
}

fn check_extents(node: &Node) {
    if let Some(extent) = node.extent() {
        for p in node.iter() {
            assert!(extent.contains_point(p.point()));
        }
    }
    if let Some((left, right)) = node.children() {
        check_extents(left);
        check_extents(right);
    }
}

/// Every `eps` window around a stored point returns exactly what a linear scan does.
fn check_windows(index: &SpatialIndex, points: &[Point], eps: f64) {
    for p in points {
        let window = Rect::around(p, eps);
        let expected = points.iter().filter(|q| window.contains_point(q)).count();
        assert_eq!(index.query(window).count(), expected, "window around {p:?}");
    }
}

/// Distinct points spread over `[-scale, scale)` on both axes.
fn straddling(n: usize, scale: f64, seed: u64) -> Vec<Point> {
    scatter(n, 2.0 * scale, seed)
        .into_iter()
        .map(|p| Point::new(p.x() - scale, p.y() - scale))
        .collect()
}

#[test]
fn test_scattered_points_keep_invariants() {
    let mut points = scatter(2_000, 1.0, 7);
    let duplicates: Vec<Point> = points.iter().step_by(10).copied().collect();
    points.extend(duplicates);

    let index = SpatialIndex::from_points(Rect::padded_bounds(&points, 1.0), &points);
    assert_eq!(index.size(), 2_200);
    assert_eq!(index.distinct_len(), 2_000);
    assert_eq!(check_sizes(index.root()), 2_200);
    assert_eq!(index.iter().map(|p| p.cnt()).sum::<usize>(), 2_200);
    assert_eq!(index.iter().count(), 2_000);
    check_extents(index.root());
}

#[test]
fn test_range_queries_match_linear_scan() {
    let points = scatter(1_000, 10.0, 42);
    let index = SpatialIndex::from_points(Rect::new(0.0, 0.0, 10.0, 10.0), &points);

    for window in [
        Rect::new(0.0, 0.0, 1.0, 1.0),
        Rect::new(2.5, 7.25, 3.0, 0.5),
        Rect::around(&Point::new(5.0, 5.0), 0.3),
        Rect::new(-5.0, -5.0, 30.0, 30.0),
    ] {
        let expected = points.iter().filter(|p| window.contains_point(p)).count();
        assert_eq!(index.query(window).count(), expected, "window {window:?}");
    }
}

#[test]
fn test_points_across_zero_keep_invariants() {
    let points = straddling(1_500, 180.0, 11);
    let index = SpatialIndex::from_points(Rect::padded_bounds(&points, 1.0), &points);

    assert_eq!(check_sizes(index.root()), 1_500);
    check_extents(index.root());
    check_windows(&index, &points, 0.0003);
    check_windows(&index, &points, 5.0);
}

#[test]
fn test_windows_at_exact_epsilon_across_zero() {
    let anchor = Point::new(-110.51437090049232, 0.0);
    let b = Point::new(28.312610239609313, 0.0);
    let c = Point::new(28.312910239609312, 0.0);
    let eps = c.x() - b.x();
    let mid = Point::new((b.x() + c.x()) / 2.0, 0.0);

    let mut points = vec![anchor, b, c];
    // pairs exactly one fl(eps) apart along x, on both sides of zero
    for (i, q) in straddling(200, 150.0, 5).into_iter().enumerate() {
        let x = q.x() + i as f64 * 1e-3;
        points.push(Point::new(x, q.y()));
        points.push(Point::new(x + eps, q.y()));
    }

    let index = SpatialIndex::from_points(Rect::around(&mid, 200.0), &points);
    check_extents(index.root());
    check_windows(&index, &points, eps);

    let window = Rect::around(&c, eps);
    assert!(window.contains_point(&b));
    assert_eq!(index.query(window).filter(|p| p.point() == &b).count(), 1);
}

#[test]
fn test_subtree_queries_stay_inside_subtree() {
    let points = scatter(500, 1.0, 3);
    let index = SpatialIndex::from_points(Rect::new(0.0, 0.0, 1.0, 1.0), &points);
    let (left, right) = index.root().children().unwrap();
    let everything = Rect::new(-1.0, -1.0, 3.0, 3.0);

    assert_eq!(left.query(everything).count(), left.size());
    assert_eq!(right.query(everything).count(), right.size());
    assert_eq!(left.size() + right.size(), 500);
}
