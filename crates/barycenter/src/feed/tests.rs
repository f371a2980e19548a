use super::*;
use crate::geom2::rand::{draw_constraint_set, BandCfg, ReplayToken};
use crate::geom2::GeomCfg;
use std::sync::Arc;

/// Unit square followed by six inert zero-normal bands.
fn square_buf() -> Vec<f32> {
    let mut buf = vec![
        1.0, 0.0, 0.0, 1.0, //
        0.0, 1.0, 0.0, 1.0,
    ];
    for _ in 0..6 {
        buf.extend_from_slice(&[0.0, 0.0, -1.0, 1.0]);
    }
    buf
}

#[derive(Default)]
struct Recorder {
    frames: Vec<(u64, Frame)>,
}

impl Renderer for Recorder {
    fn render(&mut self, seq: u64, frame: &Frame) {
        self.frames.push((seq, frame.clone()));
    }
}

#[test]
fn decode_groups_by_constraint() {
    let set = decode(&square_buf()).unwrap();
    assert_eq!(set[0].h.x, 1.0);
    assert_eq!(set[1].h.y, 1.0);
    assert_eq!(set[1].b, 1.0);
    assert_eq!(set[7].a, -1.0);
    assert_eq!(encode_f32(&set).to_vec(), square_buf());
}

#[test]
fn decode_rejects_wrong_length_and_non_finite() {
    let mut short = square_buf();
    short.pop();
    assert_eq!(
        decode(&short),
        Err(SnapshotError::WrongLength {
            expected: 32,
            received: 31
        })
    );
    let mut nan = square_buf();
    nan[6] = f32::NAN;
    assert_eq!(decode(&nan), Err(SnapshotError::NonFinite { index: 6 }));
    assert!(decode::<f64>(&[]).is_err());
}

#[test]
fn malformed_snapshot_keeps_previous_render() {
    let slot = LatestSnapshot::new();
    let mut consumer = Consumer::new(GeomCfg::default());
    let mut rec = Recorder::default();

    let seq = slot.publish_raw(&square_buf()).unwrap();
    let first = consumer.poll(&slot, &mut rec).expect("new snapshot");
    assert!(!first.is_degenerate());

    let mut short = square_buf();
    short.truncate(31);
    assert!(slot.publish_raw(&short).is_err());
    assert_eq!(slot.latest().map(|s| s.seq), Some(seq));

    assert!(consumer.poll(&slot, &mut rec).is_none());
    assert_eq!(rec.frames.len(), 1);
    assert_eq!(rec.frames[0], (seq, first));
    assert_eq!(consumer.last_seq(), Some(seq));
}

#[test]
fn degenerate_snapshot_is_rendered_as_degenerate() {
    let slot = LatestSnapshot::new();
    let mut consumer = Consumer::new(GeomCfg::default());
    let mut rec = Recorder::default();
    let mut buf = square_buf();
    // Collapse the y band to a line.
    buf[7] = 0.0;
    slot.publish_raw(&buf).unwrap();
    let frame = consumer.poll(&slot, &mut rec).unwrap();
    assert!(frame.is_degenerate());
    assert!(frame.centroid().is_none());
    assert_eq!(consumer.cycles(), 1);
}

#[test]
fn consumer_renders_each_snapshot_once() {
    let slot = LatestSnapshot::new();
    let mut consumer = Consumer::new(GeomCfg::default());
    let mut rec = Recorder::default();
    assert!(consumer.poll(&slot, &mut rec).is_none());
    slot.publish_raw(&square_buf()).unwrap();
    slot.publish_raw(&square_buf()).unwrap();
    assert!(consumer.poll(&slot, &mut rec).is_some());
    assert!(consumer.poll(&slot, &mut rec).is_none());
    // Only the latest of the two publishes is observed.
    assert_eq!(rec.frames.len(), 1);
    assert_eq!(rec.frames[0].0, 2);
}

#[test]
fn concurrent_publish_never_tears() {
    let slot = Arc::new(LatestSnapshot::new());
    let sets: Vec<_> = (0..200)
        .map(|index| draw_constraint_set(BandCfg::default(), ReplayToken { seed: 3, index }))
        .collect();
    let producer = {
        let slot = Arc::clone(&slot);
        let sets = sets.clone();
        std::thread::spawn(move || {
            for set in &sets {
                slot.publish_raw(&encode(set)).unwrap();
            }
        })
    };
    let mut consumer = Consumer::new(GeomCfg::default());
    let mut rec = Recorder::default();
    while !producer.is_finished() {
        consumer.poll(&slot, &mut rec);
    }
    producer.join().unwrap();
    consumer.poll(&slot, &mut rec);
    assert_eq!(consumer.last_seq(), Some(200));
    for (seq, frame) in &rec.frames {
        // Every observed snapshot is exactly one of the published sets.
        let expected = Frame::compute(&sets[(*seq - 1) as usize], GeomCfg::default());
        assert_eq!(frame, &expected);
    }
}
