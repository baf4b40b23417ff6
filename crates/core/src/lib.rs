#![forbid(unsafe_code)]

pub mod model;

/// Countdown budget for one quiz attempt, in seconds.
pub const DEFAULT_TIME_BUDGET_SECS: u32 = 15 * 60;

/// How long a revealed answer stays on screen before auto-advancing, in milliseconds.
pub const DEFAULT_REVEAL_DELAY_MS: u64 = 2_000;
