#![no_main]

//! Session intent fuzzer.
//!
//! Drives a session with arbitrary intents, including out-of-range targets
//! and confirmations, and checks the level invariants after every one.

use arbitrary::Arbitrary;
use hexzoe::invariants::check_session;
use hexzoe::{ActionKind, Coord, Dimensions, GameSession, MemoryStore, Outcome, SessionPhase};
use libfuzzer_sys::fuzz_target;

/// A fuzzer-generated intent.
#[derive(Arbitrary, Debug, Clone, Copy)]
enum FuzzIntent {
    Select(u8),
    Cancel,
    Target { row: u8, col: u8 },
    EndTurn { confirmed: bool },
    Rest { confirmed: bool },
    Continue,
    Restart,
    Resize { rows: u8, cols: u8 },
}

/// Structured input for session fuzzing.
#[derive(Arbitrary, Debug)]
struct SessionInput {
    rows: u8,
    cols: u8,
    seed: u64,
    intents: Vec<FuzzIntent>,
}

fuzz_target!(|input: SessionInput| {
    let rows = 3 + u32::from(input.rows % 18);
    let cols = 3 + u32::from(input.cols % 18);
    let Ok(dims) = Dimensions::new(rows, cols) else {
        return;
    };

    let mut session = GameSession::new(dims, input.seed, MemoryStore::new());

    for intent in input.intents.iter().take(500) {
        let before = *session.engine().player();
        let outcome = match *intent {
            FuzzIntent::Select(kind) => {
                let kind = match kind % 3 {
                    0 => ActionKind::Move,
                    1 => ActionKind::Sense,
                    _ => ActionKind::Poke,
                };
                session.select_action(kind);
                Outcome::Resolved
            }
            FuzzIntent::Cancel => session.cancel_action(),
            FuzzIntent::Target { row, col } => session.attempt(Coord::new(row % 24, col % 24)),
            FuzzIntent::EndTurn { confirmed } => session.end_turn(confirmed),
            FuzzIntent::Rest { confirmed } => session.rest(confirmed),
            FuzzIntent::Continue => {
                session.continue_level();
                Outcome::Resolved
            }
            FuzzIntent::Restart => {
                session.restart_level();
                Outcome::Resolved
            }
            FuzzIntent::Resize { rows, cols } => {
                let _ = session.resize(u32::from(rows), u32::from(cols));
                Outcome::Resolved
            }
        };

        if let Outcome::Rejected(_) | Outcome::NeedsConfirmation = outcome {
            let mut after = *session.engine().player();
            after.current_action = before.current_action;
            assert_eq!(after, before, "rejected intent {intent:?} changed the player");
        }

        let violations = check_session(&session);
        assert!(
            violations.is_empty(),
            "Invariants violated after {intent:?}: {violations:?}"
        );

        if session.phase() != SessionPhase::Playing {
            assert!(session.last_result().is_some());
        }
    }
});
