//! 2D band-constrained polygons: vertices, ordering, barycenter.
//!
//! Purpose
//! - Recover the convex polygon `{ x : a_i <= h_i·x <= b_i, i < N }` from one
//!   snapshot of `N` two-sided constraints and compute its area centroid.
//! - Keep each step a pure function of its input, with tolerances passed in
//!   explicitly through `GeomCfg`.
//!
//! Pipeline
//! - `enumerate`: pairwise boundary intersections, filtered by feasibility.
//! - `assemble`: CCW ordering around the vertex mean, closing, shoelace.
//! - `barycenter`: both in sequence.
//!
//! Code cross-refs: `ConstraintSet`, `Polygon`, `Centroid`, `Degenerate`

mod assemble;
mod enumerate;
mod polygon;
pub mod rand;
mod types;

pub use assemble::{assemble, barycenter, mean_point, sort_ccw};
pub use enumerate::{enumerate, feasible_vertices, pair_intersection, VertexSet};
pub use polygon::{Centroid, Degenerate, Polygon};
pub use types::{Constraint, ConstraintSet, GeomCfg, MAX_VERTICES, N};
