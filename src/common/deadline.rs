use std::time::{Duration, Instant};

use crate::{Error, Result};

/// A wall-clock limit for one matrix computation.
///
/// Checked between units of work (overlap rows, record batches); once it has
/// passed, the computation stops with [`Error::Cancelled`] and returns nothing.
#[derive(Debug, Clone, Copy)]
pub struct Deadline {
    at: Instant,
}

impl Deadline {
    /// A deadline `timeout` from now.
    pub fn after(timeout: Duration) -> Self {
        Self { at: Instant::now() + timeout }
    }

    /// A deadline for an optional timeout.
    pub fn from_timeout(timeout: Option<Duration>) -> Option<Self> {
        timeout.map(Self::after)
    }

    /// Check if the deadline has passed.
    #[inline] pub fn expired(&self) -> bool { Instant::now() >= self.at }

    /// Fail with [`Error::Cancelled`] naming `what` once the deadline has passed.
    #[inline]
    pub fn check(&self, what: &'static str) -> Result<()> {
        if self.expired() { Err(Error::Cancelled(what)) } else { Ok(()) }
    }
}
