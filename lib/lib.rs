/// Board domain types and move rules.
pub mod hex;
/// Game sessions.
pub mod game;
/// Records of move attempts.
pub mod trace;
