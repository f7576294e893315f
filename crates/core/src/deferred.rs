//! Generation tokens and deferred engine events.
//!
//! Reveal and unflip delays are not executed by the engines. A transition that
//! needs a delayed follow-up returns a [`Deferred`] event stamped with the
//! generation of the session that produced it. Whoever owns the timer hands
//! the event back once it is due; engines drop events from older generations.

use chrono::{DateTime, Duration, Utc};
use std::fmt;

use crate::time::non_negative;

/// Identifies one session or deal. Strictly increasing per engine.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Generation(u64);

impl Generation {
    #[must_use]
    pub fn value(&self) -> u64 {
        self.0
    }
}

impl fmt::Debug for Generation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Generation({})", self.0)
    }
}

impl fmt::Display for Generation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Hands out generations. The first call to `advance` yields `Generation(1)`.
#[derive(Debug, Default, Clone)]
pub struct GenerationCounter {
    current: u64,
}

impl GenerationCounter {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Invalidates everything issued so far and returns the new generation.
    pub fn advance(&mut self) -> Generation {
        self.current = self.current.saturating_add(1);
        Generation(self.current)
    }

    #[must_use]
    pub fn current(&self) -> Generation {
        Generation(self.current)
    }
}

/// An engine event that should be applied once `due_at` has passed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Deferred<E> {
    generation: Generation,
    due_at: DateTime<Utc>,
    event: E,
}

impl<E> Deferred<E> {
    #[must_use]
    pub fn new(generation: Generation, due_at: DateTime<Utc>, event: E) -> Self {
        Self {
            generation,
            due_at,
            event,
        }
    }

    #[must_use]
    pub fn generation(&self) -> Generation {
        self.generation
    }

    #[must_use]
    pub fn due_at(&self) -> DateTime<Utc> {
        self.due_at
    }

    #[must_use]
    pub fn event(&self) -> &E {
        &self.event
    }

    #[must_use]
    pub fn is_due(&self, now: DateTime<Utc>) -> bool {
        now >= self.due_at
    }

    /// How long a timer has to wait from `now`; zero once due.
    #[must_use]
    pub fn remaining(&self, now: DateTime<Utc>) -> Duration {
        non_negative(self.due_at - now)
    }

    /// Maps the payload, keeping generation and due instant.
    pub fn map<F, T>(self, f: F) -> Deferred<T>
    where
        F: FnOnce(E) -> T,
    {
        Deferred {
            generation: self.generation,
            due_at: self.due_at,
            event: f(self.event),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::time::fixed_now;

    #[test]
    fn generations_strictly_increase() {
        let mut counter = GenerationCounter::new();
        let first = counter.advance();
        let second = counter.advance();
        assert!(second > first);
        assert_eq!(counter.current(), second);
        assert_eq!(first.value(), 1);
    }

    #[test]
    fn deferred_reports_due_and_remaining() {
        let mut counter = GenerationCounter::new();
        let due = fixed_now() + Duration::milliseconds(1500);
        let deferred = Deferred::new(counter.advance(), due, ());

        assert!(!deferred.is_due(fixed_now()));
        assert_eq!(deferred.remaining(fixed_now()), Duration::milliseconds(1500));
        assert!(deferred.is_due(due));
        assert_eq!(deferred.remaining(due + Duration::seconds(1)), Duration::zero());
    }

    #[test]
    fn map_keeps_generation() {
        let mut counter = GenerationCounter::new();
        let generation = counter.advance();
        let deferred = Deferred::new(generation, fixed_now(), 1_u8).map(u32::from);
        assert_eq!(deferred.generation(), generation);
        assert_eq!(*deferred.event(), 1_u32);
    }
}
