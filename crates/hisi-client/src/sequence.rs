//! # Request Sequencing
//!
//! Fencing tickets for session mutations.
//!
//! ```text
//!   login()  ──── ticket 1 ─────────────────────────────► response (stale, dropped)
//!   logout() ──── invalidate → latest = 2
//!   login()  ──── ticket 3 ──────────► response (current, applied)
//! ```
//!
//! A result may only touch session state while its ticket is the latest one
//! issued. `invalidate` bumps the counter without handing out a ticket, so
//! everything already in flight becomes stale.

use std::sync::atomic::{AtomicU64, Ordering};

/// Opaque ticket handed to one in-flight request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Ticket(u64);

impl Ticket {
    pub fn value(&self) -> u64 {
        self.0
    }
}

/// Monotonic ticket issuer.
#[derive(Debug, Default)]
pub struct RequestSequence {
    latest: AtomicU64,
}

impl RequestSequence {
    pub fn new() -> Self {
        Self::default()
    }

    /// Issues a ticket newer than every previous one.
    pub fn issue(&self) -> Ticket {
        Ticket(self.latest.fetch_add(1, Ordering::SeqCst) + 1)
    }

    /// True if no ticket was issued (or invalidation happened) since `ticket`.
    pub fn is_current(&self, ticket: Ticket) -> bool {
        self.latest.load(Ordering::SeqCst) == ticket.0
    }

    /// Makes every outstanding ticket stale.
    pub fn invalidate(&self) {
        self.latest.fetch_add(1, Ordering::SeqCst);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_latest_ticket_is_current() {
        let seq = RequestSequence::new();
        let first = seq.issue();
        assert!(seq.is_current(first));

        let second = seq.issue();
        assert!(second > first);
        assert!(!seq.is_current(first));
        assert!(seq.is_current(second));
    }

    #[test]
    fn test_invalidate_stales_outstanding() {
        let seq = RequestSequence::new();
        let ticket = seq.issue();
        seq.invalidate();
        assert!(!seq.is_current(ticket));

        let next = seq.issue();
        assert!(seq.is_current(next));
    }
}
