//! Wall-clock source.
//!
//! Feature modules take `now_ms` parameters instead of reading the
//! clock themselves, which keeps every deadline deterministic under
//! test; hosts sample this at the edge.

use chrono::Utc;

/// Current wall-clock time in Unix epoch milliseconds.
pub fn now_ms() -> i64 {
    Utc::now().timestamp_millis()
}
