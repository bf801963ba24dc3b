//! Benchmarks for step generation, playback and snapshot history
//!
//! Run with: cargo bench

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};

use sortvis_rs::config::PlaybackConfig;
use sortvis_rs::history::{CapturedState, SnapshotStore};
use sortvis_rs::playback::{ManualClock, PlaybackController};
use sortvis_rs::render::NullRenderer;
use sortvis_rs::types::Algorithm;
use sortvis_rs::{generate, PlaybackState};

/// Reversed input, the worst case for every bundled algorithm
fn reversed(len: usize) -> Vec<i64> {
    (0..len as i64).rev().collect()
}

fn bench_generation(c: &mut Criterion) {
    let mut group = c.benchmark_group("generate");

    for size in [5usize, 10, 20].iter() {
        let data = reversed(*size);
        for algorithm in Algorithm::ALL {
            let steps = generate(algorithm, &data).unwrap().len();
            group.throughput(Throughput::Elements(steps as u64));
            group.bench_with_input(
                BenchmarkId::new(algorithm.as_str(), size),
                &data,
                |b, data| b.iter(|| generate(algorithm, black_box(data)).unwrap()),
            );
        }
    }

    group.finish();
}

fn bench_playback(c: &mut Criterion) {
    let mut group = c.benchmark_group("playback");
    let steps = generate(Algorithm::Bubble, &reversed(20)).unwrap();
    group.throughput(Throughput::Elements(steps.len() as u64));

    group.bench_function("timer_to_completion", |b| {
        b.iter(|| {
            let clock = ManualClock::new();
            let mut player = PlaybackController::new(
                &PlaybackConfig::default(),
                Box::new(clock.clone()),
                Box::new(NullRenderer),
            );
            player.load_steps(steps.clone()).unwrap();
            player.play();
            while player.state() != PlaybackState::Completed {
                clock.advance_ms(600);
                player.update();
            }
            black_box(player.current_index())
        })
    });

    group.finish();
}

fn bench_snapshots(c: &mut Criterion) {
    let mut group = c.benchmark_group("snapshots");
    let data = reversed(20);
    let steps = generate(Algorithm::Insertion, &data).unwrap();
    let captured = CapturedState {
        algorithm: Algorithm::Insertion,
        data,
        current_index: 0,
        state: PlaybackState::Idle,
        steps: Some(steps),
    };

    group.bench_function("save_at_capacity", |b| {
        let mut store = SnapshotStore::new(100);
        for _ in 0..100 {
            store.save_snapshot("fill", captured.clone());
        }
        b.iter(|| store.save_snapshot("bench", black_box(captured.clone())))
    });

    group.bench_function("export_to_json", |b| {
        let mut store = SnapshotStore::new(100);
        for _ in 0..100 {
            store.save_snapshot("fill", captured.clone());
        }
        b.iter(|| store.export_history().to_json().unwrap())
    });

    group.finish();
}

criterion_group!(benches, bench_generation, bench_playback, bench_snapshots);
criterion_main!(benches);
