#![forbid(unsafe_code)]

use std::time::{SystemTime, UNIX_EPOCH};

/// Wall clock in epoch milliseconds. A clock set before 1970 reads as zero.
pub(in crate::store) fn now_ms() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map_or(0, |since| {
            i64::try_from(since.as_millis()).unwrap_or(i64::MAX)
        })
}
