use std::sync::Arc;

use parking_lot::Mutex;
use scorekeeper::adapters::{FileSlot, MemorySlot};
use scorekeeper::domain::{audit_game, audit_integrity};
use scorekeeper::{ErrorCode, GameState, GameStore};

use crate::support::factory::{names, totals};

fn memory_store() -> (Arc<MemorySlot>, GameStore) {
    let slot = Arc::new(MemorySlot::new());
    (slot.clone(), GameStore::new(slot, 100))
}

/// Two players, a plain round, then a Dutch round for Alice.
#[test]
fn scenario_two_players_with_dutch() {
    let (_, store) = memory_store();
    store.create_game(&names(&["Alice", "Bob"])).unwrap();
    let alice = store.snapshot().players[0].id.clone();

    let state = store.add_round(&[5, 10], None).unwrap().state;
    assert_eq!(totals(&state), vec![5, 10]);
    assert!(!state.is_game_over);

    let state = store.add_round(&[0, 12], Some(&alice)).unwrap().state;
    assert_eq!(totals(&state), vec![5, 22]);
    assert!(state.players[0].rounds[1].is_dutch);
    assert_eq!(state.round_history[1].dutch_player_id.as_ref(), Some(&alice));
    assert!(audit_game(&state).is_valid);
}

/// Undo after the Dutch round goes back to the first round.
#[test]
fn scenario_undo_returns_to_first_round() {
    let (_, store) = memory_store();
    store.create_game(&names(&["Alice", "Bob"])).unwrap();
    let alice = store.snapshot().players[0].id.clone();
    store.add_round(&[5, 10], None).unwrap();
    store.add_round(&[0, 12], Some(&alice)).unwrap();

    let state = store.undo_last_round().unwrap().state;
    assert_eq!(totals(&state), vec![5, 10]);
    assert_eq!(state.round_history.len(), 1);
    assert!(!state.is_game_over);
}

/// Three players; the first crosses the limit.
#[test]
fn scenario_three_players_game_over() {
    let (_, store) = memory_store();
    store.create_game(&names(&["A", "B", "C"])).unwrap();
    store.add_round(&[40, 40, 40], None).unwrap();
    let state = store.add_round(&[61, 0, 0], None).unwrap().state;
    assert_eq!(totals(&state), vec![101, 40, 40]);
    assert!(state.is_game_over);
}

/// Tampered file on disk is corrected on load.
#[test]
fn scenario_tampered_file_is_corrected_on_load() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("game.json");

    {
        let store = GameStore::new(Arc::new(FileSlot::new(&path)), 100);
        store.create_game(&names(&["A", "B"])).unwrap();
        store.add_round(&[5, 10], None).unwrap();
        store.add_round(&[7, 1], None).unwrap();
    }

    let mut record: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
    record["players"][0]["totalScore"] = serde_json::json!(999);
    std::fs::write(&path, record.to_string()).unwrap();

    let store = GameStore::new(Arc::new(FileSlot::new(&path)), 100);
    let first_seen: Arc<Mutex<Option<GameState>>> = Arc::new(Mutex::new(None));
    let seen = Arc::clone(&first_seen);
    store.subscribe(move |state| {
        seen.lock().get_or_insert_with(|| state.clone());
    });

    assert!(store.load_from_storage().unwrap());
    let state = store.snapshot();
    assert!(audit_integrity(&state.players).is_valid);
    assert_eq!(totals(&state), vec![12, 11]);

    let first = first_seen.lock().clone().unwrap();
    assert_eq!(totals(&first), vec![12, 11]);

    let on_disk: GameState = serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
    assert_eq!(totals(&on_disk), vec![12, 11]);
}

#[test]
fn persisted_record_uses_documented_keys() {
    let (slot, store) = memory_store();
    store.create_game(&names(&["A", "B"])).unwrap();
    store.add_round(&[1, 2], None).unwrap();

    let record: serde_json::Value = serde_json::from_str(&slot.raw().unwrap()).unwrap();
    for key in ["players", "roundHistory", "scoreLimit", "gameStartTime", "isGameOver"] {
        assert!(record.get(key).is_some(), "missing {key}");
    }
    assert!(record.get("lastIntegrityCheck").is_none());
    assert_eq!(record["players"][0]["totalScore"], 1);
    assert_eq!(record["players"][0]["rounds"][0]["isDutch"], false);
    assert_eq!(record["roundHistory"][0]["scores"], serde_json::json!([1, 2]));
}

#[test]
fn zero_player_record_means_no_game() {
    let slot = Arc::new(MemorySlot::with_payload(
        r#"{"players":[],"roundHistory":[],"scoreLimit":100,"isGameOver":false}"#,
    ));
    let store = GameStore::new(slot, 100);
    assert!(!store.load_from_storage().unwrap());
    assert!(!store.snapshot().has_game());
}

#[test]
fn errors_leave_state_unchanged() {
    let (_, store) = memory_store();
    assert_eq!(
        store.create_game(&names(&["A"])).unwrap_err().code(),
        ErrorCode::InsufficientPlayers
    );
    store.create_game(&names(&["A", "B"])).unwrap();
    let before = store.snapshot();

    assert_eq!(
        store.add_round(&[1], None).unwrap_err().code(),
        ErrorCode::LengthMismatch
    );
    assert_eq!(
        store
            .add_round(&[1, 2], Some(&scorekeeper::PlayerId::new("nope")))
            .unwrap_err()
            .code(),
        ErrorCode::UnknownPlayer
    );
    assert_eq!(
        store.undo_last_round().unwrap_err().code(),
        ErrorCode::NoRoundsToUndo
    );
    assert_eq!(store.snapshot(), before);
}
