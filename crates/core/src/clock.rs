//! Time source for task timestamps

use chrono::Utc;

/// Source of Unix timestamps in seconds
pub trait Clock: Send + Sync {
    fn now(&self) -> i64;
}

/// Wall clock backed by the system time
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> i64 {
        Utc::now().timestamp()
    }
}
