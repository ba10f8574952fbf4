//! Test helpers: logging setup, input generators and duel setup.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use crate::combatant::history::Snapshot;
use crate::combatant::Side;
use crate::input::{Controls, FrameInput};
use crate::round::RoundController;

/// Fixed frame time used by scenario tests.
pub const FRAME: f32 = 1.0 / 60.0;

// =============================================================================
// Logging
// =============================================================================

/// Routes `tracing` output through the test harness.
///
/// Safe to call from every test; only the first call installs a subscriber.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_test_writer()
        .with_max_level(tracing::Level::DEBUG)
        .try_init();
}

// =============================================================================
// Input generation
// =============================================================================

/// Random controls for one player.
///
/// Rewind is held less often than the other controls so that rewinds are
/// long enough to reach the cap now and then.
pub fn random_controls(rng: &mut impl Rng) -> Controls {
    Controls::from_bools(
        rng.gen_bool(0.4),
        rng.gen_bool(0.4),
        rng.gen_bool(0.2),
        rng.gen_bool(0.15),
    )
}

/// A seeded stream of `len` frame inputs.
pub fn input_stream(seed: u64, len: usize) -> Vec<FrameInput> {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    (0..len)
        .map(|_| FrameInput::new(random_controls(&mut rng), random_controls(&mut rng)))
        .collect()
}

/// Input where only `side` holds `controls`.
pub fn only(side: Side, controls: Controls) -> FrameInput {
    match side {
        Side::Left => FrameInput::new(controls, Controls::empty()),
        Side::Right => FrameInput::new(Controls::empty(), controls),
    }
}

// =============================================================================
// Duel setup
// =============================================================================

/// Runs `inputs` at `elapsed` per frame and returns the state hash after
/// every frame.
pub fn run_hashes(duel: &mut RoundController, inputs: &[FrameInput], elapsed: f32) -> Vec<u64> {
    inputs
        .iter()
        .map(|input| {
            let _ = duel.step(input, elapsed);
            duel.state_hash()
        })
        .collect()
}

/// Moves both heads to `±x` with swords at strike angle `angle`.
pub fn face_off(duel: &mut RoundController, x: f32, angle: f32, attacking: bool) {
    for side in Side::BOTH {
        duel.combatant_mut(side).restore(Snapshot {
            head: Vec2::new(-side.facing() * x, 0.0),
            sword_angle: side.facing() * angle,
            attacking,
        });
    }
}
