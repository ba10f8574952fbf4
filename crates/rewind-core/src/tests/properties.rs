//! Invariants that must hold for any input stream.

use proptest::prelude::*;

use glam::Vec2;

use crate::combatant::history::{HistoryLog, Snapshot};
use crate::combatant::Side;
use crate::config::DuelConfig;
use crate::input::{Controls, FrameInput};
use crate::movement::back_arm_tip_at;
use crate::round::RoundController;

fn controls_strategy() -> impl Strategy<Value = Controls> {
    (0u8..16).prop_map(Controls::from_bits_truncate)
}

fn input_strategy() -> impl Strategy<Value = FrameInput> {
    (controls_strategy(), controls_strategy()).prop_map(|(l, r)| FrameInput::new(l, r))
}

fn stream_strategy(max_len: usize) -> impl Strategy<Value = Vec<(FrameInput, f32)>> {
    prop::collection::vec((input_strategy(), 0.001f32..0.1), 1..max_len)
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    /// The gate never lets both combatants rewind at once.
    #[test]
    fn prop_rewind_is_mutually_exclusive(stream in stream_strategy(400)) {
        let mut duel = RoundController::default();
        for (input, elapsed) in &stream {
            let _ = duel.step(input, *elapsed);
            prop_assert!(!(duel.left().is_rewinding() && duel.right().is_rewinding()));
        }
    }

    /// Timers stay below their limits, and leaving a rewind always lands in
    /// cooldown.
    #[test]
    fn prop_rewind_timers_bounded(stream in stream_strategy(400)) {
        let mut duel = RoundController::default();
        let config = duel.config().clone();

        for (input, elapsed) in &stream {
            let before = [duel.left().is_rewinding(), duel.right().is_rewinding()];
            let round = duel.round();
            let _ = duel.step(input, *elapsed);

            for side in Side::BOTH {
                let c = duel.combatant(side);
                prop_assert!(c.rewound_secs() < config.max_rewind_secs);
                prop_assert!(c.cooldown_secs() < config.cooldown_secs);
                if before[side.index()] && !c.is_rewinding() && duel.round() == round {
                    prop_assert!(c.is_cooling());
                }
            }
        }
    }

    /// Free arms never leave the court.
    #[test]
    fn prop_back_arm_stays_in_arena(stream in stream_strategy(600)) {
        let mut duel = RoundController::default();
        let config = duel.config().clone();

        for (input, elapsed) in &stream {
            let _ = duel.step(input, *elapsed);
            for side in Side::BOTH {
                let c = duel.combatant(side);
                let tip = back_arm_tip_at(c, c.head(), &config);
                prop_assert!(tip.x.abs() <= config.arena_half_extent.x);
            }
        }
    }

    /// Without rewinds, walking never brings the heads within the minimum
    /// separation.
    #[test]
    fn prop_heads_keep_separation(stream in stream_strategy(600)) {
        let mut duel = RoundController::default();
        let min = duel.config().min_separation;

        for (input, elapsed) in &stream {
            let no_rewind = FrameInput::new(
                input.left - Controls::REWIND,
                input.right - Controls::REWIND,
            );
            let _ = duel.step(&no_rewind, *elapsed);
            let gap = duel.right().head().x - duel.left().head().x;
            prop_assert!(gap > min, "gap {} at frame {}", gap, duel.frame());
        }
    }

    /// Resetting is idempotent and indistinguishable from a fresh duel.
    #[test]
    fn prop_reset_is_idempotent(stream in stream_strategy(200)) {
        let mut duel = RoundController::default();
        for (input, elapsed) in &stream {
            let _ = duel.step(input, *elapsed);
        }

        duel.reset_match();
        let once = duel.state_hash();
        duel.reset_match();
        prop_assert_eq!(duel.state_hash(), once);
        prop_assert_eq!(once, RoundController::default().state_hash());
    }

    /// Snapshots come back out in exact reverse order, minus whatever the
    /// capacity dropped.
    #[test]
    fn prop_history_pops_in_reverse(
        xs in prop::collection::vec(-10.0f32..10.0, 0..200),
        capacity in prop::option::of(1usize..64),
    ) {
        let mut log = HistoryLog::new(capacity);
        for &x in &xs {
            log.record(Snapshot { head: Vec2::new(x, 0.0), sword_angle: 0.0, attacking: false });
        }

        let kept = capacity.map_or(xs.len(), |cap| cap.min(xs.len()));
        let expected: Vec<f32> = xs.iter().rev().take(kept).copied().collect();
        let mut popped = Vec::new();
        while let Some(snapshot) = log.pop_newest() {
            popped.push(snapshot.head.x);
        }
        prop_assert_eq!(popped, expected);
    }

    /// Any valid config survives a JSON round trip unchanged.
    #[test]
    fn prop_config_json_round_trip(
        speedup in 0u32..8,
        cooldown in 0.0f32..20.0,
        capacity in prop::option::of(1usize..10_000),
    ) {
        let config = DuelConfig {
            rewind_speedup: speedup,
            cooldown_secs: cooldown,
            history_capacity: capacity,
            ..DuelConfig::default()
        };
        prop_assert!(config.validate().is_ok());
        let json = serde_json::to_string(&config).unwrap();
        let back: DuelConfig = serde_json::from_str(&json).unwrap();
        prop_assert_eq!(back, config);
    }
}
