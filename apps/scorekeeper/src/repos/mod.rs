pub mod game_slot;
pub mod remote_games;
