//! Angular ordering and shoelace centroid.
//!
//! Ordering uses the arithmetic mean of the vertices as sort center. The
//! true centroid is only known after ordering, and the mean is inside the
//! hull, which is all an angular sort of a convex point set needs.

use nalgebra::Vector2;

use super::enumerate::enumerate;
use super::polygon::{Centroid, Degenerate, Polygon};
use super::types::{ConstraintSet, GeomCfg};

/// Arithmetic mean of a non-empty point set.
#[inline]
pub fn mean_point(points: &[Vector2<f64>]) -> Option<Vector2<f64>> {
    if points.is_empty() {
        return None;
    }
    let sum = points.iter().fold(Vector2::<f64>::zeros(), |acc, p| acc + p);
    Some(sum / points.len() as f64)
}

/// Stable CCW sort by `atan2` around `mid`; ties keep their input order.
pub fn sort_ccw(points: &mut [Vector2<f64>], mid: Vector2<f64>) {
    points.sort_by(|p, q| {
        let ap = (p.y - mid.y).atan2(p.x - mid.x);
        let aq = (q.y - mid.y).atan2(q.x - mid.x);
        ap.partial_cmp(&aq).unwrap_or(std::cmp::Ordering::Equal)
    });
}

/// Signed area and area centroid of a closed loop (shoelace).
///
/// `closed` must repeat its first point at the end. Returns the raw sums
/// `(area, cx_num, cy_num)` so the caller decides how to treat `area ≈ 0`.
fn shoelace(closed: &[Vector2<f64>]) -> (f64, f64, f64) {
    let mut cross_sum = 0.0;
    let mut cx = 0.0;
    let mut cy = 0.0;
    for w in closed.windows(2) {
        let (p, q) = (w[0], w[1]);
        let cross = p.x * q.y - q.x * p.y;
        cross_sum += cross;
        cx += cross * (p.x + q.x);
        cy += cross * (p.y + q.y);
    }
    (0.5 * cross_sum, cx, cy)
}

/// Order `vertices` CCW, close the loop, and compute area and centroid.
///
/// Returns `Degenerate` for fewer than three vertices or `|area| <= eps_area`.
pub fn assemble(vertices: &[Vector2<f64>], cfg: GeomCfg) -> Result<(Polygon, Centroid), Degenerate> {
    let m = vertices.len();
    if m < 3 {
        return Err(Degenerate::TooFewVertices { found: m });
    }
    let Some(mid) = mean_point(vertices) else {
        return Err(Degenerate::TooFewVertices { found: 0 });
    };
    let mut ordered = vertices.to_vec();
    sort_ccw(&mut ordered, mid);
    let polygon = Polygon::close(ordered);
    let (area, cx, cy) = shoelace(polygon.closed());
    // Also catches NaN from non-finite input.
    if !(area.abs() > cfg.eps_area) {
        return Err(Degenerate::ZeroArea { vertices: m, area });
    }
    let point = Vector2::new(cx / (6.0 * area), cy / (6.0 * area));
    Ok((polygon, Centroid { point, area }))
}

/// `enumerate` followed by `assemble`.
pub fn barycenter(set: &ConstraintSet, cfg: GeomCfg) -> Result<(Polygon, Centroid), Degenerate> {
    let verts = enumerate(set, cfg)?;
    assemble(&verts, cfg)
}
