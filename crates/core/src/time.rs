use chrono::{DateTime, Duration, Utc};

/// Time source for engines and services.
///
/// Engines never read the system time themselves; every transition receives
/// `now` from a `Clock` so countdowns and reveal delays stay deterministic in
/// tests.
#[derive(Debug, Clone, Copy, Default)]
pub enum Clock {
    #[default]
    System,
    Fixed(DateTime<Utc>),
}

impl Clock {
    /// Returns a clock backed by the system time.
    #[must_use]
    pub fn system() -> Self {
        Self::System
    }

    /// Returns a clock frozen at the given instant.
    #[must_use]
    pub fn fixed(at: DateTime<Utc>) -> Self {
        Self::Fixed(at)
    }

    #[must_use]
    pub fn now(&self) -> DateTime<Utc> {
        match self {
            Clock::System => Utc::now(),
            Clock::Fixed(t) => *t,
        }
    }

    /// Moves a fixed clock forward. No effect on `Clock::System`.
    pub fn advance(&mut self, delta: Duration) {
        if let Clock::Fixed(t) = self {
            *t += delta;
        }
    }

    /// Convenience for driving a fixed clock in millisecond steps.
    pub fn advance_millis(&mut self, millis: i64) {
        self.advance(Duration::milliseconds(millis));
    }

    /// Time elapsed since `since`, never negative.
    #[must_use]
    pub fn elapsed_since(&self, since: DateTime<Utc>) -> Duration {
        non_negative(self.now() - since)
    }

    #[must_use]
    pub fn is_fixed(&self) -> bool {
        matches!(self, Clock::Fixed(_))
    }
}

/// Clamps a signed duration at zero.
#[must_use]
pub fn non_negative(delta: Duration) -> Duration {
    if delta < Duration::zero() {
        Duration::zero()
    } else {
        delta
    }
}

/// Deterministic timestamp for tests (2023-11-14T22:13:20Z).
pub const FIXED_TEST_TIMESTAMP: i64 = 1_700_000_000;

/// Returns a deterministic `DateTime<Utc>` for tests.
///
/// # Panics
///
/// Panics if the fixed timestamp cannot be represented.
#[must_use]
pub fn fixed_now() -> DateTime<Utc> {
    DateTime::<Utc>::from_timestamp(FIXED_TEST_TIMESTAMP, 0)
        .expect("fixed timestamp should be valid")
}

#[must_use]
pub fn fixed_clock() -> Clock {
    Clock::fixed(fixed_now())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fixed_clock_advances_in_steps() {
        let mut clock = fixed_clock();
        for _ in 0..200 {
            clock.advance_millis(100);
        }
        assert_eq!(clock.elapsed_since(fixed_now()), Duration::seconds(20));
    }

    #[test]
    fn system_clock_ignores_advance() {
        let mut clock = Clock::system();
        clock.advance(Duration::days(365));
        assert!(clock.now() < fixed_now() + Duration::days(365 * 50));
        assert!(!clock.is_fixed());
    }

    #[test]
    fn elapsed_is_clamped_at_zero() {
        let clock = fixed_clock();
        let future = fixed_now() + Duration::seconds(5);
        assert_eq!(clock.elapsed_since(future), Duration::zero());
    }
}
