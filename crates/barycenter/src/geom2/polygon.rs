//! Output types: closed polygon, centroid, and the degenerate outcome.

use nalgebra::Vector2;
use thiserror::Error;

/// Ordered, closed vertex loop (first vertex repeated at the end).
///
/// Invariants:
/// - `closed.len() == m + 1` with `m >= 3`, and `closed[0] == closed[m]`.
/// - Counter-clockwise around the mean of the vertices.
#[derive(Clone, Debug, PartialEq)]
pub struct Polygon {
    closed: Vec<Vector2<f64>>,
}

impl Polygon {
    /// Close an already ordered loop. Caller guarantees at least one vertex.
    pub(crate) fn close(mut ordered: Vec<Vector2<f64>>) -> Self {
        if let Some(first) = ordered.first().copied() {
            ordered.push(first);
        }
        Self { closed: ordered }
    }
    /// The closed loop, `m + 1` points.
    #[inline]
    pub fn closed(&self) -> &[Vector2<f64>] {
        &self.closed
    }
    /// The `m` ordered vertices without the closing repeat.
    #[inline]
    pub fn vertices(&self) -> &[Vector2<f64>] {
        &self.closed[..self.closed.len().saturating_sub(1)]
    }
    /// Vertex count `m` (duplicates included).
    #[inline]
    pub fn len(&self) -> usize {
        self.closed.len().saturating_sub(1)
    }
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
    /// Edges `(p_{i-1}, p_i)` of the closed loop.
    pub fn edges(&self) -> impl Iterator<Item = (Vector2<f64>, Vector2<f64>)> + '_ {
        self.closed.windows(2).map(|w| (w[0], w[1]))
    }
}

/// Area centroid with the signed area of the polygon it came from.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Centroid {
    pub point: Vector2<f64>,
    pub area: f64,
}

/// A constraint set that does not bound a polygon with positive area.
///
/// This is an expected outcome, not a failure: callers skip the cycle.
#[derive(Clone, Copy, Debug, PartialEq, Error)]
pub enum Degenerate {
    #[error("only {found} vertices compatible with constraints")]
    TooFewVertices { found: usize },
    #[error("{vertices} vertices enclose near-zero area {area:e}")]
    ZeroArea { vertices: usize, area: f64 },
}

impl Degenerate {
    /// Number of feasible vertices that were found.
    #[inline]
    pub fn feasible_vertices(&self) -> usize {
        match *self {
            Degenerate::TooFewVertices { found } => found,
            Degenerate::ZeroArea { vertices, .. } => vertices,
        }
    }
}
