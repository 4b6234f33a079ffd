//! Criterion benchmarks for performance-critical hot paths
//!
//! Covers: ingest ring push/pop, window feature extraction, classification,
//! and end-to-end interpreter throughput.

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use gesture_interpreter::capture::ingest::SampleRing;
use gesture_interpreter::capture::types::Sample;
use gesture_interpreter::capture::window::SampleWindow;
use gesture_interpreter::classify::GestureClassifier;
use gesture_interpreter::replay::synth;
use gesture_interpreter::GestureInterpreter;

fn make_sample(t: u64) -> Sample {
    Sample::new(100.0, 200.0, t)
}

// ---------------------------------------------------------------------------
// Ingest ring benchmarks
// ---------------------------------------------------------------------------

fn bench_ring_push(c: &mut Criterion) {
    c.bench_function("ring_push", |b| {
        let ring = SampleRing::with_capacity(8192);
        let (mut producer, mut consumer) = ring.split();
        let sample = make_sample(1_000);

        b.iter(|| {
            if !producer.push(black_box(sample)) {
                // Drain when full so pushes keep landing
                consumer.pop_batch(4096);
                producer.push(black_box(sample));
            }
        });
    });
}

fn bench_ring_pop(c: &mut Criterion) {
    c.bench_function("ring_pop", |b| {
        let ring = SampleRing::with_capacity(8192);
        let (mut producer, mut consumer) = ring.split();

        for t in 0..8192 {
            producer.push(make_sample(t));
        }

        b.iter(|| {
            if let Some(sample) = consumer.pop() {
                black_box(sample);
                producer.push(make_sample(0));
            }
        });
    });
}

// ---------------------------------------------------------------------------
// Classification benchmarks
// ---------------------------------------------------------------------------

fn bench_classify_full_window(c: &mut Criterion) {
    let classifier = GestureClassifier::new();
    let mut window = SampleWindow::with_capacity(32);
    for (i, s) in synth::scroll(100.0, 100.0, 60.0, 0, 600, 0.6)
        .into_iter()
        .enumerate()
    {
        if i < 32 {
            window.push(s).unwrap();
        }
    }

    c.bench_function("classify_full_window", |b| {
        b.iter(|| black_box(classifier.classify(black_box(&window))));
    });
}

// ---------------------------------------------------------------------------
// End-to-end interpreter benchmarks
// ---------------------------------------------------------------------------

fn bench_interpreter_demo_trace(c: &mut Criterion) {
    let trace = synth::demo_trace();

    c.bench_function("interpreter_demo_trace", |b| {
        b.iter(|| {
            let mut interpreter = GestureInterpreter::default();
            for sample in &trace.samples {
                let _ = black_box(interpreter.push(*sample));
            }
            black_box(interpreter.flush())
        });
    });
}

criterion_group!(
    benches,
    bench_ring_push,
    bench_ring_pop,
    bench_classify_full_window,
    bench_interpreter_demo_trace
);
criterion_main!(benches);
