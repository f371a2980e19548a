//! Barycenter of the unit square, fed through the 32-value wire format.
//!
//! Usage:
//!   cargo run -p barycenter --example unit_square

use barycenter::prelude::*;

struct Print;

impl Renderer for Print {
    fn render(&mut self, seq: u64, frame: &Frame) {
        match frame {
            Frame::Polygon { polygon, centroid } => {
                println!("snapshot {seq}: {} vertices", polygon.len());
                for v in polygon.vertices() {
                    println!("  ({:.3}, {:.3})", v.x, v.y);
                }
                println!(
                    "  barycenter ({:.3}, {:.3}), area {:.3}",
                    centroid.point.x, centroid.point.y, centroid.area
                );
            }
            Frame::Degenerate(d) => println!("snapshot {seq}: {d}"),
        }
    }
}

fn main() {
    let mut buf: Vec<f32> = vec![1.0, 0.0, 0.0, 1.0, 0.0, 1.0, 0.0, 1.0];
    for _ in 0..6 {
        buf.extend_from_slice(&[0.0, 0.0, -1.0, 1.0]);
    }
    let slot = LatestSnapshot::new();
    if let Err(err) = slot.publish_raw(&buf) {
        eprintln!("{err}");
        return;
    }
    let mut consumer = Consumer::new(GeomCfg::default());
    consumer.poll(&slot, &mut Print);
}
