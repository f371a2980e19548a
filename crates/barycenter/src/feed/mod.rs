//! Snapshot boundary between a constraint feed and the geometry.
//!
//! - `wire`: the 32-value buffer format, validated before anything else runs.
//! - `slot`: latest-complete-snapshot handoff between producer and consumer.
//! - `pipeline`: the consumer cycle and the `Renderer` seam.

pub mod pipeline;
pub mod slot;
pub mod wire;

pub use pipeline::{Consumer, Frame, Renderer};
pub use slot::{LatestSnapshot, Snapshot};
pub use wire::{decode, encode, encode_f32, SnapshotError, SNAPSHOT_LEN};

#[cfg(test)]
mod tests;
