//! Determinism verification tests.
//!
//! Identical configuration, inputs and elapsed times must produce
//! bit-identical state on every frame. Replays depend on it.

use crate::combatant::Side;
use crate::config::DuelConfig;
use crate::hit::HitRule;
use crate::input::FrameInput;
use crate::replay::{Recorder, Replay};
use crate::round::RoundController;

use super::helpers::{init_tracing, input_stream, run_hashes, FRAME};

// =============================================================================
// Seeded soak runs
// =============================================================================

/// Two controllers fed the same seeded stream agree on every frame.
#[test]
fn same_stream_same_hashes() {
    init_tracing();
    let inputs = input_stream(42, 2_000);

    let mut a = RoundController::default();
    let mut b = RoundController::default();
    let hashes_a = run_hashes(&mut a, &inputs, FRAME);
    let hashes_b = run_hashes(&mut b, &inputs, FRAME);

    assert_eq!(hashes_a, hashes_b);
    assert_eq!(a.score(), b.score());
    assert_eq!(a.round(), b.round());
    assert_eq!(a.left(), b.left());
    assert_eq!(a.right(), b.right());
}

/// Different streams diverge.
#[test]
fn different_seeds_diverge() {
    let mut a = RoundController::default();
    let mut b = RoundController::default();
    let hashes_a = run_hashes(&mut a, &input_stream(1, 500), FRAME);
    let hashes_b = run_hashes(&mut b, &input_stream(2, 500), FRAME);

    assert_ne!(hashes_a.last(), hashes_b.last());
}

/// Varying elapsed times are reproduced exactly too.
#[test]
fn variable_elapsed_is_deterministic() {
    let inputs = input_stream(7, 1_000);
    let elapsed: Vec<f32> = (0..inputs.len())
        .map(|i| {
            #[allow(clippy::cast_precision_loss)]
            let jitter = (i % 7) as f32 * 0.002;
            FRAME + jitter
        })
        .collect();

    let run = || {
        let mut duel = RoundController::default();
        inputs
            .iter()
            .zip(&elapsed)
            .map(|(input, dt)| {
                let _ = duel.step(input, *dt);
                duel.state_hash()
            })
            .collect::<Vec<_>>()
    };

    assert_eq!(run(), run());
}

/// Restarting a match gives the same trajectory as a fresh controller.
#[test]
fn reset_match_replays_identically() {
    let inputs = input_stream(99, 800);

    let mut fresh = RoundController::default();
    let expected = run_hashes(&mut fresh, &inputs, FRAME);

    let mut reused = RoundController::default();
    let _ = run_hashes(&mut reused, &input_stream(5, 300), FRAME);
    reused.reset_match();
    let actual = run_hashes(&mut reused, &inputs, FRAME);

    assert_eq!(actual, expected);
}

// =============================================================================
// Replays
// =============================================================================

/// A replay survives JSON and re-simulates to the same final state.
#[test]
fn replay_json_rerun_matches() {
    init_tracing();
    let config = DuelConfig {
        hit_rule: HitRule::Overlap,
        history_capacity: Some(64),
        ..DuelConfig::default()
    };
    let mut recorder = Recorder::new(config).unwrap();
    for input in input_stream(2024, 1_500) {
        let _ = recorder.step(&input, FRAME);
    }

    let json = recorder.replay().to_json().unwrap();
    let replay = Replay::from_json(&json).unwrap();
    let rerun = replay.run().unwrap();

    assert_eq!(replay.len(), 1_500);
    assert_eq!(rerun.state_hash(), recorder.controller().state_hash());
    assert_eq!(rerun.score(), recorder.controller().score());
    assert_eq!(rerun.frame(), 1_500);
}

/// An idle duel never changes anything but the frame counter and history.
#[test]
fn idle_duel_never_ends_a_round() {
    let mut duel = RoundController::default();
    for _ in 0..1_000 {
        assert!(duel.step(&FrameInput::idle(), FRAME).is_none());
    }
    assert_eq!(duel.round(), 0);
    assert_eq!(duel.left().head(), duel.config().start_position(Side::Left));
    assert_eq!(duel.left().history().len(), 1_000);
}
