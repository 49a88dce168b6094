//! Fixed game rules shared by every layer.

use std::time::Duration;

/// Smallest roster a game can be started with.
pub const MIN_PLAYERS: usize = 2;

/// Largest roster a game can be started with.
pub const MAX_PLAYERS: usize = 10;

/// Score at which the game ends unless configured otherwise.
pub const DEFAULT_SCORE_LIMIT: i32 = 100;

/// Period of the background integrity sweep.
pub const DEFAULT_INTEGRITY_INTERVAL: Duration = Duration::from_secs(30);

/// Display glyphs handed out by roster position.
pub const PLAYER_EMOJIS: [&str; 10] = [
    "🦊", "🐼", "🦁", "🐸", "🐙", "🦉", "🐢", "🐝", "🦄", "🐳",
];

/// Display colors handed out by roster position.
pub const PLAYER_COLORS: [&str; 10] = [
    "#ef4444", "#3b82f6", "#22c55e", "#eab308", "#a855f7", "#f97316", "#14b8a6", "#ec4899",
    "#64748b", "#84cc16",
];

/// Glyph for the player at `index`; wraps around the palette.
#[inline]
pub fn emoji_for_index(index: usize) -> &'static str {
    PLAYER_EMOJIS[index % PLAYER_EMOJIS.len()]
}

/// Color for the player at `index`; wraps around the palette.
#[inline]
pub fn color_for_index(index: usize) -> &'static str {
    PLAYER_COLORS[index % PLAYER_COLORS.len()]
}
