//! Single-slot "latest snapshot" handoff.
//!
//! Invariants:
//! - The slot holds a complete `ConstraintSet` or nothing.
//! - Writers replace the whole set under the lock; readers copy it out and
//!   run the geometry after the lock is released.
//! - Sequence numbers start at 1 and increase by one per accepted snapshot.

use parking_lot::Mutex;

use super::wire::{decode, SnapshotError};
use crate::geom2::ConstraintSet;

/// A published snapshot and its sequence number.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Snapshot {
    pub seq: u64,
    pub set: ConstraintSet,
}

#[derive(Debug, Default)]
struct SlotState {
    seq: u64,
    set: Option<ConstraintSet>,
}

/// Latest complete snapshot, shared between one producer and one consumer.
#[derive(Debug, Default)]
pub struct LatestSnapshot {
    state: Mutex<SlotState>,
}

impl LatestSnapshot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the slot contents with `set`. Returns the new sequence number.
    pub fn publish(&self, set: ConstraintSet) -> u64 {
        let mut st = self.state.lock();
        st.seq += 1;
        st.set = Some(set);
        st.seq
    }

    /// Decode and publish a raw buffer; malformed buffers leave the slot untouched.
    pub fn publish_raw<T: Copy + Into<f64>>(&self, buf: &[T]) -> Result<u64, SnapshotError> {
        match decode(buf) {
            Ok(set) => Ok(self.publish(set)),
            Err(err) => {
                tracing::warn!(received = buf.len(), %err, "dropping snapshot");
                Err(err)
            }
        }
    }

    /// Copy of the latest snapshot, if any.
    pub fn latest(&self) -> Option<Snapshot> {
        let st = self.state.lock();
        st.set.map(|set| Snapshot { seq: st.seq, set })
    }

    /// Copy of the latest snapshot if it is newer than `seen`.
    pub fn newer_than(&self, seen: Option<u64>) -> Option<Snapshot> {
        let snap = self.latest()?;
        match seen {
            Some(s) if snap.seq <= s => None,
            _ => Some(snap),
        }
    }
}
