use crate::domain::integrity::{audit_game, audit_integrity, CorrectedField, IntegrityIssue};
use crate::domain::ledger::reconcile;
use crate::domain::test_state_helpers::played_game;
use crate::domain::{PlayerId, RoundHistoryEntry};

#[test]
fn clean_game_is_valid() {
    let state = played_game(&["A", "B"], 100, &[(vec![3, 4], Some(1)), (vec![0, 8], None)]);
    let report = audit_game(&state);
    assert!(report.is_valid, "{:?}", report.errors);
    assert!(report.corrections.is_empty());
    assert!(!report.needs_reconcile());
}

#[test]
fn drifted_total_yields_issue_and_correction() {
    let mut state = played_game(&["A", "B"], 100, &[(vec![3, 4], None)]);
    state.players[1].total_score = 40;

    let report = audit_integrity(&state.players);
    assert!(!report.is_valid);
    assert_eq!(
        report.errors,
        vec![IntegrityIssue::TotalMismatch {
            player_id: PlayerId::new("player-2"),
            expected: 4,
            actual: 40,
        }]
    );
    assert_eq!(report.corrections.len(), 1);
    assert_eq!(report.corrections[0].field, CorrectedField::TotalScore);
    assert_eq!(report.corrections[0].expected, 4);

    let fixed = reconcile(&state.players);
    assert!(audit_integrity(&fixed.players).is_valid);
}

#[test]
fn history_length_mismatch_is_reported() {
    let mut state = played_game(&["A", "B"], 100, &[(vec![3, 4], None)]);
    state.round_history.push(RoundHistoryEntry {
        scores: vec![1],
        dutch_player_id: None,
    });

    let report = audit_game(&state);
    assert!(!report.is_valid);
    assert!(report
        .errors
        .iter()
        .any(|e| matches!(e, IntegrityIssue::RoundCountMismatch { expected: 2, actual: 1, .. })));
    assert!(report
        .errors
        .iter()
        .any(|e| matches!(e, IntegrityIssue::ScoresLengthMismatch { round_index: 1, .. })));
    // Only totals are auto-correctable.
    assert!(report.corrections.is_empty());
}

#[test]
fn dutch_flags_must_match_history() {
    let mut state = played_game(&["A", "B", "C"], 100, &[(vec![3, 4, 5], Some(2))]);
    state.players[0].rounds[0].is_dutch = true;
    state.round_history[0].dutch_player_id = Some(PlayerId::new("ghost"));

    let report = audit_game(&state);
    assert!(report
        .errors
        .iter()
        .any(|e| matches!(e, IntegrityIssue::UnknownDutchPlayer { round_index: 0, .. })));
    // player-1 and player-3 carry flags the entry no longer backs.
    let flag_issues = report
        .errors
        .iter()
        .filter(|e| matches!(e, IntegrityIssue::DutchFlagMismatch { .. }))
        .count();
    assert_eq!(flag_issues, 2);
}

#[test]
fn round_scores_are_cross_checked() {
    let mut state = played_game(&["A", "B"], 100, &[(vec![3, 4], None)]);
    state.round_history[0].scores[0] = 30;
    let report = audit_game(&state);
    assert_eq!(
        report.errors,
        vec![IntegrityIssue::RoundScoreMismatch {
            round_index: 0,
            player_id: PlayerId::new("player-1"),
            history: 30,
            round: 3,
        }]
    );
}

#[test]
fn report_serializes_with_kind_tags() {
    let mut state = played_game(&["A", "B"], 100, &[(vec![3, 4], None)]);
    state.players[0].total_score = 0;
    let json = serde_json::to_value(audit_integrity(&state.players)).unwrap();
    assert_eq!(json["isValid"], false);
    assert_eq!(json["errors"][0]["kind"], "totalMismatch");
    assert_eq!(json["errors"][0]["playerId"], "player-1");
    assert_eq!(json["corrections"][0]["field"], "totalScore");
}
