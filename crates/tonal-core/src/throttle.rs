//! Coalescing of change notifications into single recompute passes.

use std::cell::Cell;

/// Single-slot "recompute pending" gate.
///
/// Change notifications can arrive many times per second during a drag.
/// The first one arms the gate and schedules a pass; the rest are
/// dropped until the pass runs. Because a pass always reads the current
/// model state rather than a queued snapshot, dropped notifications are
/// still reflected by the next flush.
///
/// All curve editing happens on one event-processing context, so a
/// plain [`Cell`] is enough.
#[derive(Debug, Default)]
pub struct RecomputeGate {
    pending: Cell<bool>,
}

impl RecomputeGate {
    pub fn new() -> Self {
        Self::default()
    }

    /// Arm the gate. Returns true when this call transitioned it to
    /// pending and the caller should schedule a pass; false when a pass
    /// is already pending and the request is dropped.
    pub fn arm(&self) -> bool {
        !self.pending.replace(true)
    }

    /// Clear the gate at the start of a recompute pass, so a request
    /// arriving mid-pass schedules a fresh one.
    pub fn disarm(&self) -> bool {
        self.pending.replace(false)
    }

    pub fn is_pending(&self) -> bool {
        self.pending.get()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_request_arms() {
        let gate = RecomputeGate::new();
        assert!(!gate.is_pending());
        assert!(gate.arm());
        assert!(gate.is_pending());
    }

    #[test]
    fn requests_while_pending_are_dropped() {
        let gate = RecomputeGate::new();
        assert!(gate.arm());
        assert!(!gate.arm());
        assert!(!gate.arm());
        assert!(gate.is_pending());
    }

    #[test]
    fn disarm_allows_the_next_request() {
        let gate = RecomputeGate::new();
        assert!(gate.arm());
        assert!(gate.disarm());
        assert!(!gate.is_pending());
        assert!(gate.arm(), "after a pass starts, a new request schedules");
    }

    #[test]
    fn disarm_when_idle_reports_false() {
        let gate = RecomputeGate::new();
        assert!(!gate.disarm());
    }

    #[test]
    fn burst_collapses_to_one_pass_per_flush() {
        let gate = RecomputeGate::new();
        let mut scheduled = 0;
        for _ in 0..100 {
            if gate.arm() {
                scheduled += 1;
            }
        }
        assert_eq!(scheduled, 1);

        gate.disarm();
        assert!(gate.arm());
    }
}
