use crate::domain::ledger::{
    apply_round, is_game_over, reconcile, replay_history, reverse_last_round,
};
use crate::domain::test_state_helpers::{played_game, roster, totals};
use crate::errors::domain::{StateKind, ValidationKind};

#[test]
fn two_players_with_dutch_round() {
    let players = roster(&["Alice", "Bob"]);
    let alice = players[0].id.clone();

    let players = apply_round(&players, &[5, 10], None).unwrap();
    assert_eq!(totals(&players), vec![5, 10]);
    assert!(!is_game_over(&players, 100));

    let players = apply_round(&players, &[0, 12], Some(&alice)).unwrap();
    assert_eq!(totals(&players), vec![5, 22]);
    assert!(players[0].rounds[1].is_dutch);
    assert!(!players[1].rounds[1].is_dutch);
    assert!(!players[0].rounds[0].is_dutch);
}

#[test]
fn undo_restores_previous_totals() {
    let state = played_game(&["Alice", "Bob"], 100, &[(vec![5, 10], None), (vec![0, 12], Some(0))]);
    let players = reverse_last_round(&state.players).unwrap();
    assert_eq!(totals(&players), vec![5, 10]);
    assert!(players.iter().all(|p| p.rounds.len() == 1));
}

#[test]
fn three_players_cross_the_limit() {
    let state = played_game(&["A", "B", "C"], 100, &[(vec![40, 40, 40], None), (vec![61, 0, 0], None)]);
    assert_eq!(totals(&state.players), vec![101, 40, 40]);
    assert!(is_game_over(&state.players, 100));
}

#[test]
fn limit_is_inclusive() {
    let state = played_game(&["A", "B"], 50, &[(vec![50, 0], None)]);
    assert!(is_game_over(&state.players, 50));
    assert!(!is_game_over(&state.players, 51));
}

#[test]
fn length_mismatch_is_rejected_without_effect() {
    let players = roster(&["A", "B", "C"]);
    let err = apply_round(&players, &[1, 2], None).unwrap_err();
    assert_eq!(err.validation_kind(), Some(&ValidationKind::LengthMismatch));
    assert!(players.iter().all(|p| p.rounds.is_empty()));
}

#[test]
fn nothing_to_undo_on_fresh_roster() {
    let err = reverse_last_round(&roster(&["A", "B"])).unwrap_err();
    assert_eq!(err.state_kind(), Some(&StateKind::NoRoundsToUndo));

    let err = reverse_last_round(&[]).unwrap_err();
    assert_eq!(err.state_kind(), Some(&StateKind::NoRoundsToUndo));
}

#[test]
fn reconcile_repairs_drifted_totals() {
    let mut state = played_game(&["A", "B"], 100, &[(vec![7, 3], None), (vec![2, 2], None)]);
    state.players[0].total_score = 999;

    let fixed = reconcile(&state.players);
    assert!(fixed.changed);
    assert_eq!(totals(&fixed.players), vec![9, 5]);

    let again = reconcile(&fixed.players);
    assert!(!again.changed);
    assert_eq!(again.players, fixed.players);
}

#[test]
fn negative_scores_are_recorded_as_given() {
    let state = played_game(&["A", "B"], 100, &[(vec![-10, 4], Some(0))]);
    assert_eq!(totals(&state.players), vec![-10, 4]);
}

#[test]
fn replay_rebuilds_rounds_and_totals() {
    let state = played_game(
        &["A", "B", "C"],
        100,
        &[(vec![1, 2, 3], None), (vec![0, 9, 4], Some(0)), (vec![5, 0, 5], Some(1))],
    );
    let replayed = replay_history(&state.players, &state.round_history).unwrap();
    assert_eq!(replayed, state.players);
}
