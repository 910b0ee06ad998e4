//! Time source
//!
//! Every elapsed-time computation reads the clock through [`Clock`] so tests
//! can pin and advance time.

use parking_lot::RwLock;

/// Current time in unix milliseconds
pub trait Clock: Send + Sync {
    fn now_millis(&self) -> i64;
}

/// Wall clock
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_millis(&self) -> i64 {
        shared::util::now_millis()
    }
}

/// Manually driven clock for tests
#[derive(Debug, Default)]
pub struct ManualClock {
    now: RwLock<i64>,
}

impl ManualClock {
    pub fn new(start_millis: i64) -> Self {
        Self {
            now: RwLock::new(start_millis),
        }
    }

    pub fn set(&self, millis: i64) {
        *self.now.write() = millis;
    }

    pub fn advance_millis(&self, millis: i64) {
        *self.now.write() += millis;
    }

    pub fn advance_secs(&self, secs: i64) {
        self.advance_millis(secs * 1000);
    }
}

impl Clock for ManualClock {
    fn now_millis(&self) -> i64 {
        *self.now.read()
    }
}
