pub mod cleanup;
pub mod game_state;
pub mod room_code;
pub mod rules;
pub mod scoring;
pub mod word_pool;

// Re-export main components
pub use cleanup::*;
pub use game_state::*;
pub use room_code::*;
pub use rules::*;
pub use scoring::*;
pub use word_pool::*;

/// Wall-clock time in Unix epoch milliseconds, the unit rooms record activity in.
pub fn now_millis() -> i64 {
    chrono::Utc::now().timestamp_millis()
}
