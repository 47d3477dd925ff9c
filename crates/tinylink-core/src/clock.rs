use jiff::{SignedDuration, Timestamp};
use std::sync::{Arc, Mutex, PoisonError};

/// Source of the current time for registration and click stamps.
pub trait Clock: Send + Sync {
    /// Returns the current time of the clock
    fn now(&self) -> Timestamp;
}

/// Wall clock backed by [`Timestamp::now`].
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Timestamp {
        Timestamp::now()
    }
}

/// A clock that only moves when told to.
///
/// Clones share the same underlying time, so a test can keep one handle
/// and hand another to the registry.
#[derive(Debug, Clone)]
pub struct ManualClock {
    inner: Arc<Mutex<Timestamp>>,
}

impl ManualClock {
    pub fn new(now: Timestamp) -> Self {
        Self {
            inner: Arc::new(Mutex::new(now)),
        }
    }

    /// Moves the clock to `target`, forwards or backwards.
    pub fn set(&self, target: Timestamp) {
        *self.inner.lock().unwrap_or_else(PoisonError::into_inner) = target;
    }

    /// Moves the clock forward by `delta`, saturating at the end of the
    /// representable range.
    pub fn advance(&self, delta: SignedDuration) {
        let mut now = self.inner.lock().unwrap_or_else(PoisonError::into_inner);
        *now = now.checked_add(delta).unwrap_or(Timestamp::MAX);
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Timestamp {
        *self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn manual_clock_works() {
        // test that the clock starts at the given time
        let base = Timestamp::from_second(0).unwrap();
        let clock = ManualClock::new(base);
        assert_eq!(clock.now(), base);

        clock.advance(SignedDuration::from_secs(90));
        assert_eq!(clock.now(), Timestamp::from_second(90).unwrap());

        let target = Timestamp::from_second(1000).unwrap();
        clock.set(target);
        assert_eq!(clock.now(), target);
    }

    #[test]
    fn clones_share_time() {
        let clock = ManualClock::new(Timestamp::from_second(0).unwrap());
        let handle = clock.clone();

        handle.advance(SignedDuration::from_mins(5));
        assert_eq!(clock.now(), Timestamp::from_second(300).unwrap());
    }
}
