//! Bounded-retry element lookup
//!
//! A page may not have rendered the element yet when we ask for it. Each
//! lookup waits a short fixed time; on a wait-timeout with attempts left it
//! forces a full page reload, pauses, and tries again. The reload clears
//! transient rendering glitches but also re-triggers the error-interstitial
//! check on the reloaded page; that is accepted behavior, not hidden.
//! Exhausting the budget yields `None`, never an error. Any non-timeout
//! failure yields `None` immediately without consuming remaining attempts.

use crate::driver::{ElementHandle, LookupError, PageDriver};
use crate::locator::Locator;
use crate::progress::ProgressSink;
use std::time::Duration;

/// Retry budget for element lookups
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Total wait attempts before giving up
    pub max_attempts: u32,
    /// Pause between a reload and the next attempt
    pub delay: Duration,
    /// Fixed wait per attempt
    pub wait_timeout: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            delay: Duration::from_secs(2),
            wait_timeout: Duration::from_secs(1),
        }
    }
}

/// Element lookup with reload-between-attempts retry
pub struct RetryableLookup<'a> {
    policy: RetryPolicy,
    sink: &'a dyn ProgressSink,
}

impl<'a> RetryableLookup<'a> {
    pub fn new(policy: RetryPolicy, sink: &'a dyn ProgressSink) -> Self {
        Self { policy, sink }
    }

    /// Locate a single element, retrying with reloads on wait-timeouts
    pub fn lookup_one(&self, driver: &dyn PageDriver, locator: &Locator) -> Option<ElementHandle> {
        self.run(driver, locator, |timeout| driver.wait_for(locator, timeout))
    }

    /// Locate all matching elements (at least one), retrying with reloads
    pub fn lookup_all(
        &self,
        driver: &dyn PageDriver,
        locator: &Locator,
    ) -> Option<Vec<ElementHandle>> {
        self.run(driver, locator, |timeout| driver.wait_for_all(locator, timeout))
    }

    fn run<T>(
        &self,
        driver: &dyn PageDriver,
        locator: &Locator,
        mut wait: impl FnMut(Duration) -> Result<T, LookupError>,
    ) -> Option<T> {
        let mut attempt = 0;
        loop {
            match wait(self.policy.wait_timeout) {
                Ok(found) => return Some(found),
                Err(LookupError::Timeout) => {
                    attempt += 1;
                    if attempt >= self.policy.max_attempts {
                        self.sink.lookup_exhausted(locator);
                        return None;
                    }
                    self.sink.retrying(locator, attempt + 1);
                    if let Err(err) = driver.reload() {
                        // A failing reload cannot be retried into success
                        self.sink.lookup_failed(locator, &err.to_string());
                        return None;
                    }
                    std::thread::sleep(self.policy.delay);
                }
                Err(LookupError::Other(reason)) => {
                    self.sink.lookup_failed(locator, &reason);
                    return None;
                }
            }
        }
    }
}
