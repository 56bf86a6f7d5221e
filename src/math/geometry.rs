use nalgebra::{Matrix2, Point2};

/// Determinant magnitude at or below which two lines are treated as parallel.
pub const PARALLEL_EPS: f64 = 1e-6;

/// Line segment between two points in the plane.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Segment2 {
    pub from: Point2<f64>,
    pub to: Point2<f64>,
}

impl Segment2 {
    pub fn new(from: Point2<f64>, to: Point2<f64>) -> Self {
        Segment2 { from, to }
    }
}

/// Intersection point of two line segments.
///
/// Solves the infinite-line crossing with 2x2 determinants, then accepts the
/// candidate only if it lies strictly inside the bounding box of all four
/// segment endpoints. Pairs with |det| <= [`PARALLEL_EPS`] are treated as
/// parallel or coincident and yield `None`, as do crossings that fall exactly
/// on a segment endpoint.
pub fn segment_intersection(first: &Segment2, second: &Segment2) -> Option<Point2<f64>> {
    let (p1, p2) = (first.from, first.to);
    let (p3, p4) = (second.from, second.to);

    let det = Matrix2::new(p1.x - p2.x, p1.y - p2.y, p3.x - p4.x, p3.y - p4.y).determinant();
    if det.abs() <= PARALLEL_EPS {
        return None;
    }

    let d12 = Matrix2::new(p1.x, p1.y, p2.x, p2.y).determinant();
    let d34 = Matrix2::new(p3.x, p3.y, p4.x, p4.y).determinant();

    let x = Matrix2::new(d12, p1.x - p2.x, d34, p3.x - p4.x).determinant() / det;
    let y = Matrix2::new(d12, p1.y - p2.y, d34, p3.y - p4.y).determinant() / det;

    let min_x = p1.x.min(p2.x).min(p3.x).min(p4.x);
    let max_x = p1.x.max(p2.x).max(p3.x).max(p4.x);
    let min_y = p1.y.min(p2.y).min(p3.y).min(p4.y);
    let max_y = p1.y.max(p2.y).max(p3.y).max(p4.y);

    if min_x < x && x < max_x && min_y < y && y < max_y {
        Some(Point2::new(x, y))
    } else {
        None
    }
}
