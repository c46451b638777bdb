use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

/// Issues generation-stamped request tokens. Bumping the generation with
/// `cancel` invalidates every token handed out before it, so a completion
/// handler that checks its token after cancellation becomes a no-op rather
/// than a late state mutation. The underlying transport is not interrupted.
#[derive(Debug, Clone, Default)]
pub struct RequestGate {
    current: Arc<AtomicU64>,
}

/// A token tied to the generation that was current when it was issued.
#[derive(Debug, Clone)]
pub struct RequestToken {
    generation: u64,
    current: Arc<AtomicU64>,
}

impl RequestGate {
    pub fn issue(&self) -> RequestToken {
        RequestToken {
            generation: self.current.load(Ordering::Acquire),
            current: Arc::clone(&self.current),
        }
    }

    /// Invalidate all previously issued tokens.
    pub fn cancel(&self) {
        self.current.fetch_add(1, Ordering::AcqRel);
    }
}

impl RequestToken {
    pub fn is_current(&self) -> bool {
        self.current.load(Ordering::Acquire) == self.generation
    }

    pub fn is_cancelled(&self) -> bool {
        !self.is_current()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fresh_token_is_current() {
        let gate = RequestGate::default();
        let token = gate.issue();
        assert!(token.is_current());
        assert!(!token.is_cancelled());
    }

    #[test]
    fn test_cancel_invalidates_outstanding_tokens() {
        let gate = RequestGate::default();
        let stale = gate.issue();
        gate.cancel();
        assert!(stale.is_cancelled());

        // A token issued after the bump is current again.
        let fresh = gate.issue();
        assert!(fresh.is_current());
    }

    #[test]
    fn test_cancel_invalidates_every_earlier_generation() {
        let gate = RequestGate::default();
        let first = gate.issue();
        gate.cancel();
        let second = gate.issue();
        gate.cancel();

        assert!(first.is_cancelled());
        assert!(second.is_cancelled());
        assert!(gate.issue().is_current());
    }
}
