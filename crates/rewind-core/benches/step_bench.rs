use criterion::{black_box, criterion_group, criterion_main, BatchSize, Criterion};
use rewind_core::{Controls, DuelConfig, FrameInput, RoundController, Side};

fn warmed_duel(frames: usize) -> RoundController {
    let mut duel = RoundController::default();
    for _ in 0..frames {
        let _ = duel.step(&FrameInput::idle(), 1.0 / 60.0);
    }
    duel
}

fn bench_idle_step(c: &mut Criterion) {
    // Full history so recording also pays for truncation
    let mut duel = warmed_duel(DuelConfig::default().history_capacity.unwrap_or(4096));

    c.bench_function("idle_step_full_history", |b| {
        b.iter(|| duel.step(black_box(&FrameInput::idle()), black_box(1.0 / 60.0)))
    });
}

fn bench_walking_step(c: &mut Criterion) {
    let mut duel = warmed_duel(256);
    let forward = FrameInput::new(Controls::WALK_RIGHT, Controls::WALK_LEFT);
    let back = FrameInput::new(Controls::WALK_LEFT, Controls::WALK_RIGHT);
    let mut frame = 0u32;

    c.bench_function("walking_step", |b| {
        b.iter(|| {
            frame = frame.wrapping_add(1);
            let input = if frame % 120 < 60 { &forward } else { &back };
            duel.step(black_box(input), 1.0 / 60.0)
        })
    });
}

fn bench_rewind_playback(c: &mut Criterion) {
    let rewind = FrameInput::new(Controls::REWIND, Controls::empty());

    c.bench_function("rewind_playback_until_cap", |b| {
        b.iter_batched(
            || warmed_duel(1024),
            |mut duel| {
                let _ = duel.step(&rewind, 1.0 / 60.0);
                while duel.combatant(Side::Left).is_rewinding() {
                    let _ = duel.step(&rewind, 1.0 / 60.0);
                }
                duel
            },
            BatchSize::SmallInput,
        )
    });
}

fn bench_state_hash(c: &mut Criterion) {
    let duel = warmed_duel(4096);

    c.bench_function("state_hash_full_history", |b| {
        b.iter(|| black_box(duel.state_hash()))
    });
}

criterion_group!(
    benches,
    bench_idle_step,
    bench_walking_step,
    bench_rewind_playback,
    bench_state_hash
);
criterion_main!(benches);
