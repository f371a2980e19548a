//! Barycenter of a band-constrained 2D polygon.
//!
//! A snapshot of `N = 8` constraints `a_i <= h_i·x <= b_i` is turned into the
//! feasible polygon's vertices, a CCW ordering, and the area centroid.
//!
//! Layout
//! - `geom2`: the pure geometry (`enumerate`, `assemble`, `barycenter`).
//! - `feed`: 32-value wire format, latest-snapshot slot, consumer/renderer seam.
//! - `tension`: cable tension distribution that produces such snapshots.

pub mod feed;
pub mod geom2;
pub mod tension;

/// Library version string.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub use nalgebra::Vector2 as Vec2;

/// Common exports for quick imports in callers.
pub mod prelude {
    pub use crate::feed::{
        decode, encode, Consumer, Frame, LatestSnapshot, Renderer, SnapshotError, SNAPSHOT_LEN,
    };
    pub use crate::geom2::rand::{draw_constraint_set, BandCfg, ReplayToken};
    pub use crate::geom2::{
        assemble, barycenter, enumerate, Centroid, Constraint, ConstraintSet, Degenerate, GeomCfg,
        Polygon, N,
    };
    pub use crate::tension::{TensionError, TensionProblem};
    pub use nalgebra::Vector2 as Vec2;
}
