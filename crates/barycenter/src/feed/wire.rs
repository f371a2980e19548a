//! Flat snapshot buffer: `4·N` values, `(h_x, h_y, a, b)` per constraint.

use nalgebra::Vector2;
use thiserror::Error;

use crate::geom2::{Constraint, ConstraintSet, N};

/// Length of one snapshot buffer.
pub const SNAPSHOT_LEN: usize = 4 * N;

/// A buffer that cannot become a `ConstraintSet`.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum SnapshotError {
    #[error("snapshot has {received} components, expected {expected}")]
    WrongLength { expected: usize, received: usize },
    #[error("snapshot component {index} is not finite")]
    NonFinite { index: usize },
}

/// Decode a snapshot buffer. Accepts `f32` (the feed's native width) or `f64`.
pub fn decode<T: Copy + Into<f64>>(buf: &[T]) -> Result<ConstraintSet, SnapshotError> {
    if buf.len() != SNAPSHOT_LEN {
        return Err(SnapshotError::WrongLength {
            expected: SNAPSHOT_LEN,
            received: buf.len(),
        });
    }
    let mut vals = [0.0f64; SNAPSHOT_LEN];
    for (index, (dst, src)) in vals.iter_mut().zip(buf).enumerate() {
        let v: f64 = (*src).into();
        if !v.is_finite() {
            return Err(SnapshotError::NonFinite { index });
        }
        *dst = v;
    }
    let mut cs = [Constraint::new(Vector2::zeros(), 0.0, 0.0); N];
    for (c, q) in cs.iter_mut().zip(vals.chunks_exact(4)) {
        *c = Constraint::new(Vector2::new(q[0], q[1]), q[2], q[3]);
    }
    Ok(ConstraintSet::new(cs))
}

/// Inverse of `decode`.
pub fn encode(set: &ConstraintSet) -> [f64; SNAPSHOT_LEN] {
    let mut out = [0.0; SNAPSHOT_LEN];
    for (q, c) in out.chunks_exact_mut(4).zip(set.iter()) {
        q.copy_from_slice(&[c.h.x, c.h.y, c.a, c.b]);
    }
    out
}

/// `encode` narrowed to the feed's `f32` width.
pub fn encode_f32(set: &ConstraintSet) -> [f32; SNAPSHOT_LEN] {
    encode(set).map(|v| v as f32)
}
