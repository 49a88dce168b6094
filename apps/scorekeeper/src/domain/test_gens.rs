// Proptest generators for ledger types.
// Rosters and rounds are generated valid by construction; corrupted rosters
// come from their own generator.

use proptest::prelude::*;

use crate::domain::ledger::apply_round;
use crate::domain::player::{Player, Round};
use crate::domain::rules::{MAX_PLAYERS, MIN_PLAYERS};

/// A single round score in the range a real game produces.
pub fn score() -> impl Strategy<Value = i32> {
    -50i32..=150
}

/// Fresh roster of 2..=10 players.
pub fn roster() -> impl Strategy<Value = Vec<Player>> {
    (MIN_PLAYERS..=MAX_PLAYERS).prop_map(|n| {
        (0..n)
            .map(|i| Player::seated(i, format!("P{}", i + 1)))
            .collect()
    })
}

/// One round for a roster of `n`: scores plus an optional Dutch seat.
pub fn round_for(n: usize) -> impl Strategy<Value = (Vec<i32>, Option<usize>)> {
    (
        prop::collection::vec(score(), n),
        prop::option::of(0..n),
    )
}

/// Ledger operation driven against a roster of `n`.
#[derive(Debug, Clone)]
pub enum LedgerOp {
    Apply(Vec<i32>, Option<usize>),
    Undo,
}

pub fn ledger_ops(n: usize) -> impl Strategy<Value = Vec<LedgerOp>> {
    let op = prop_oneof![
        3 => round_for(n).prop_map(|(s, d)| LedgerOp::Apply(s, d)),
        1 => Just(LedgerOp::Undo),
    ];
    prop::collection::vec(op, 0..24)
}

/// Roster with its operation sequence.
pub fn roster_with_ops() -> impl Strategy<Value = (Vec<Player>, Vec<LedgerOp>)> {
    roster().prop_flat_map(|players| {
        let n = players.len();
        (Just(players), ledger_ops(n))
    })
}

/// Roster that has already played 0..8 valid rounds through the ledger.
pub fn played_roster() -> impl Strategy<Value = Vec<Player>> {
    roster()
        .prop_flat_map(|players| {
            let n = players.len();
            (Just(players), prop::collection::vec(round_for(n), 0..8))
        })
        .prop_map(|(players, rounds)| {
            rounds.into_iter().fold(players, |players, (scores, dutch_seat)| {
                let dutch = dutch_seat.map(|s| players[s].id.clone());
                apply_round(&players, &scores, dutch.as_ref())
                    .expect("generated rounds fit the roster")
            })
        })
}

/// Played roster with one more valid round for it.
pub fn roster_with_round() -> impl Strategy<Value = (Vec<Player>, Vec<i32>, Option<usize>)> {
    played_roster().prop_flat_map(|players| {
        let n = players.len();
        (Just(players), round_for(n)).prop_map(|(p, (s, d))| (p, s, d))
    })
}

/// Arbitrarily damaged roster: random rounds, random totals, uneven lengths.
pub fn corrupted_roster() -> impl Strategy<Value = Vec<Player>> {
    prop::collection::vec(
        (
            prop::collection::vec((any::<i32>(), any::<bool>()), 0..8),
            any::<i32>(),
        ),
        1..=MAX_PLAYERS,
    )
    .prop_map(|entries| {
        entries
            .into_iter()
            .enumerate()
            .map(|(i, (rounds, total))| {
                let mut p = Player::seated(i, format!("P{}", i + 1));
                p.rounds = rounds
                    .into_iter()
                    .map(|(score, is_dutch)| Round { score, is_dutch })
                    .collect();
                p.total_score = total;
                p
            })
            .collect()
    })
}
