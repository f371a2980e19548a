//! Consumer side: take the latest snapshot, compute the frame, hand it to a renderer.

use crate::geom2::{barycenter, Centroid, ConstraintSet, Degenerate, GeomCfg, Polygon};

use super::slot::LatestSnapshot;

/// Result of one consumer cycle.
#[derive(Clone, Debug, PartialEq)]
pub enum Frame {
    Polygon { polygon: Polygon, centroid: Centroid },
    Degenerate(Degenerate),
}

impl Frame {
    /// Run the geometry on `set`.
    pub fn compute(set: &ConstraintSet, cfg: GeomCfg) -> Frame {
        match barycenter(set, cfg) {
            Ok((polygon, centroid)) => Frame::Polygon { polygon, centroid },
            Err(d) => Frame::Degenerate(d),
        }
    }
    #[inline]
    pub fn is_degenerate(&self) -> bool {
        matches!(self, Frame::Degenerate(_))
    }
    #[inline]
    pub fn centroid(&self) -> Option<&Centroid> {
        match self {
            Frame::Polygon { centroid, .. } => Some(centroid),
            Frame::Degenerate(_) => None,
        }
    }
}

/// Drawing collaborator. Receives every computed frame, never mutates it.
pub trait Renderer {
    fn render(&mut self, seq: u64, frame: &Frame);
}

/// Polls a `LatestSnapshot` and renders each new snapshot exactly once.
#[derive(Clone, Debug)]
pub struct Consumer {
    cfg: GeomCfg,
    seen: Option<u64>,
    cycles: u64,
}

impl Consumer {
    pub fn new(cfg: GeomCfg) -> Self {
        Self {
            cfg,
            seen: None,
            cycles: 0,
        }
    }

    /// Sequence number of the last snapshot that was rendered.
    #[inline]
    pub fn last_seq(&self) -> Option<u64> {
        self.seen
    }

    /// Number of frames handed to the renderer so far.
    #[inline]
    pub fn cycles(&self) -> u64 {
        self.cycles
    }

    /// One cycle. Returns `None` when nothing new was published.
    pub fn poll<R: Renderer + ?Sized>(
        &mut self,
        slot: &LatestSnapshot,
        renderer: &mut R,
    ) -> Option<Frame> {
        let snap = slot.newer_than(self.seen)?;
        self.seen = Some(snap.seq);
        let frame = Frame::compute(&snap.set, self.cfg);
        match &frame {
            Frame::Polygon { polygon, centroid } => tracing::debug!(
                seq = snap.seq,
                vertices = polygon.len(),
                area = centroid.area,
                x = centroid.point.x,
                y = centroid.point.y,
                "barycenter"
            ),
            Frame::Degenerate(d) => tracing::info!(
                seq = snap.seq,
                vertices = d.feasible_vertices(),
                "{d}"
            ),
        }
        renderer.render(snap.seq, &frame);
        self.cycles += 1;
        Some(frame)
    }
}
