use criterion::{Criterion, criterion_group, criterion_main};

use glimpse_core::RectPx;
use glimpse_core::detect::{BlobDetector, DEFAULT_NMS_IOU, FaceBox, FaceDetector as _, nms, prep};
use glimpse_core::source::{FrameSource as _, SyntheticClip};

pub fn criterion_benchmark(c: &mut Criterion) {
    let mut clip = SyntheticClip::new(10);
    let frame = clip.frame_at(0).unwrap();

    c.bench_function("letterbox_640x360_to_320x240", |b| {
        b.iter(|| prep::letterbox(&frame, 320, 240));
    });

    {
        let mut detector = BlobDetector::default();
        c.bench_function("blob_detect_640x360", |b| {
            b.iter(|| detector.detect(&frame).unwrap());
        });
    }

    {
        // Worst case for greedy NMS: a dense grid of half-overlapping boxes.
        let mut candidates = Vec::new();
        for row in 0..20 {
            for col in 0..50 {
                candidates.push(FaceBox {
                    rect: RectPx::new(col as f32 * 8.0, row as f32 * 8.0, 16.0, 16.0),
                    confidence: 0.3 + ((row * 50 + col) % 70) as f32 / 100.0,
                });
            }
        }
        c.bench_function("nms_1000_candidates", |b| {
            b.iter(|| nms(candidates.clone(), DEFAULT_NMS_IOU));
        });
    }
}

criterion_group!(benches, criterion_benchmark);
criterion_main!(benches);
