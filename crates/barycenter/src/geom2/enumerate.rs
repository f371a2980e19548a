//! Brute-force vertex enumeration for a band-constrained polygon.
//!
//! Every pair of constraints `(i, j)`, `i < j`, contributes up to four
//! candidates: the intersections of the boundary lines `h_i·x = u`,
//! `h_j·x = v` for `(u, v) ∈ {a_i, b_i} × {a_j, b_j}`. A candidate is kept
//! iff it lies in every band up to `cfg.eps_feas`.
//!
//! With `N = 8` that is 28 pairs and at most 112 candidates, so no sweep is
//! attempted. Coincident vertices (three boundary lines through one point)
//! are returned as many times as they are found.

use nalgebra::{Matrix2, Vector2};

use super::polygon::Degenerate;
use super::types::{Constraint, ConstraintSet, GeomCfg, MAX_VERTICES, N};

/// Feasible vertices of one constraint set, in discovery order.
pub type VertexSet = Vec<Vector2<f64>>;

/// Intersection of the lines `ci.h·x = u` and `cj.h·x = v`.
///
/// Returns `None` when `|det [h_i; h_j]| <= eps_det` (parallel or zero normals).
#[inline]
pub fn pair_intersection(
    ci: &Constraint,
    cj: &Constraint,
    u: f64,
    v: f64,
    eps_det: f64,
) -> Option<Vector2<f64>> {
    let m = Matrix2::new(ci.h.x, ci.h.y, cj.h.x, cj.h.y);
    let det = m.determinant();
    if !det.is_finite() || det.abs() <= eps_det {
        return None;
    }
    let inv = m.try_inverse()?;
    Some(inv * Vector2::new(u, v))
}

/// All feasible candidates, without the polygon-size check.
pub fn feasible_vertices(set: &ConstraintSet, cfg: GeomCfg) -> VertexSet {
    let mut out: VertexSet = Vec::with_capacity(MAX_VERTICES);
    for i in 0..N - 1 {
        for j in (i + 1)..N {
            let (ci, cj) = (&set[i], &set[j]);
            for u in ci.bounds() {
                for v in cj.bounds() {
                    let Some(x) = pair_intersection(ci, cj, u, v, cfg.eps_det) else {
                        continue;
                    };
                    if set.contains_eps(x, cfg.eps_feas) {
                        out.push(x);
                    }
                }
            }
        }
    }
    out
}

/// Enumerate the feasible vertices of `set`.
///
/// Returns `Degenerate::TooFewVertices` when fewer than three are found.
pub fn enumerate(set: &ConstraintSet, cfg: GeomCfg) -> Result<VertexSet, Degenerate> {
    let verts = feasible_vertices(set, cfg);
    if verts.len() < 3 {
        return Err(Degenerate::TooFewVertices { found: verts.len() });
    }
    Ok(verts)
}
