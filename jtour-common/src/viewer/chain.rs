//! Fallback chain state machine
//!
//! Pure and clock-free. The session driver in [`super::session`] feeds it
//! frame signals and timer expiries.
//!
//! Each loading attempt is identified by an [`Attempt`] token (reset epoch +
//! approach index). An event only moves the machine if it names the attempt
//! that is currently loading, so once `Loading(i)` has been left every late
//! signal or timer for `i` is a no-op.

use serde::{Deserialize, Serialize};

/// Identifies one loading attempt
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Attempt {
    /// Bumped on every reset, so attempts from before a reset never match
    pub epoch: u64,
    /// Index into the approach list
    pub approach: usize,
}

/// Viewer state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum ViewerState {
    Loading { approach: usize },
    Loaded { approach: usize },
    Exhausted,
}

impl ViewerState {
    pub fn is_terminal(&self) -> bool {
        !matches!(self, ViewerState::Loading { .. })
    }
}

/// Signals that can move the machine
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewerEvent {
    /// The frame reported a successful load
    Loaded(Attempt),
    /// The frame reported an error
    Failed(Attempt),
    /// The load timer expired
    TimedOut(Attempt),
    /// Start over from the first approach
    Reset,
}

/// Outcome of applying an event
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    /// State changed from `from` to `to`
    Moved { from: ViewerState, to: ViewerState },
    /// Event was stale or not applicable; nothing changed
    Ignored,
}

impl Transition {
    pub fn is_moved(&self) -> bool {
        matches!(self, Transition::Moved { .. })
    }
}

#[derive(Debug, Clone)]
pub struct FallbackChain {
    approaches: usize,
    epoch: u64,
    state: ViewerState,
    failures: usize,
}

impl FallbackChain {
    /// Chain over `approaches` candidates, starting at `Loading(0)`
    ///
    /// With zero candidates there is nothing to try and the chain starts exhausted.
    pub fn new(approaches: usize) -> Self {
        Self {
            approaches,
            epoch: 0,
            state: Self::initial_state(approaches),
            failures: 0,
        }
    }

    fn initial_state(approaches: usize) -> ViewerState {
        if approaches == 0 {
            ViewerState::Exhausted
        } else {
            ViewerState::Loading { approach: 0 }
        }
    }

    pub fn state(&self) -> ViewerState {
        self.state
    }

    pub fn approaches(&self) -> usize {
        self.approaches
    }

    pub fn epoch(&self) -> u64 {
        self.epoch
    }

    /// Failed or timed-out attempts since the last reset
    pub fn failures(&self) -> usize {
        self.failures
    }

    /// Token of the attempt in progress, if any
    pub fn current_attempt(&self) -> Option<Attempt> {
        match self.state {
            ViewerState::Loading { approach } => Some(Attempt {
                epoch: self.epoch,
                approach,
            }),
            _ => None,
        }
    }

    pub fn apply(&mut self, event: ViewerEvent) -> Transition {
        let from = self.state;
        let to = match event {
            ViewerEvent::Reset => {
                self.epoch += 1;
                self.failures = 0;
                Self::initial_state(self.approaches)
            }
            ViewerEvent::Loaded(attempt) => {
                if self.current_attempt() != Some(attempt) {
                    return Transition::Ignored;
                }
                ViewerState::Loaded {
                    approach: attempt.approach,
                }
            }
            ViewerEvent::Failed(attempt) | ViewerEvent::TimedOut(attempt) => {
                if self.current_attempt() != Some(attempt) {
                    return Transition::Ignored;
                }
                self.failures += 1;
                let next = attempt.approach + 1;
                if next < self.approaches {
                    ViewerState::Loading { approach: next }
                } else {
                    ViewerState::Exhausted
                }
            }
        };

        self.state = to;
        Transition::Moved { from, to }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fail_current(chain: &mut FallbackChain) -> Transition {
        let attempt = chain.current_attempt().expect("chain should be loading");
        chain.apply(ViewerEvent::Failed(attempt))
    }

    #[test]
    fn test_starts_loading_first_approach() {
        let chain = FallbackChain::new(3);
        assert_eq!(chain.state(), ViewerState::Loading { approach: 0 });
        assert_eq!(chain.current_attempt(), Some(Attempt { epoch: 0, approach: 0 }));
    }

    #[test]
    fn test_load_success_is_terminal() {
        let mut chain = FallbackChain::new(3);
        let attempt = chain.current_attempt().unwrap();
        let t = chain.apply(ViewerEvent::Loaded(attempt));
        assert!(t.is_moved());
        assert_eq!(chain.state(), ViewerState::Loaded { approach: 0 });
        assert!(chain.state().is_terminal());
        assert_eq!(chain.current_attempt(), None);
    }

    #[test]
    fn test_all_failures_exhaust_after_exactly_n() {
        for n in 1..6 {
            let mut chain = FallbackChain::new(n);
            let mut moves = 0;
            while chain.current_attempt().is_some() {
                assert!(fail_current(&mut chain).is_moved());
                moves += 1;
                assert!(moves <= n, "chain of {} looped", n);
            }
            assert_eq!(moves, n);
            assert_eq!(chain.failures(), n);
            assert_eq!(chain.state(), ViewerState::Exhausted);
        }
    }

    #[test]
    fn test_timeout_advances_like_error() {
        let mut chain = FallbackChain::new(2);
        let attempt = chain.current_attempt().unwrap();
        chain.apply(ViewerEvent::TimedOut(attempt));
        assert_eq!(chain.state(), ViewerState::Loading { approach: 1 });
    }

    #[test]
    fn test_late_event_for_left_attempt_is_ignored() {
        let mut chain = FallbackChain::new(3);
        let first = chain.current_attempt().unwrap();
        chain.apply(ViewerEvent::Failed(first));

        // Timer for attempt 0 fires after the error already advanced the chain
        assert_eq!(chain.apply(ViewerEvent::TimedOut(first)), Transition::Ignored);
        assert_eq!(chain.apply(ViewerEvent::Loaded(first)), Transition::Ignored);
        assert_eq!(chain.state(), ViewerState::Loading { approach: 1 });
    }

    #[test]
    fn test_event_after_success_is_ignored() {
        let mut chain = FallbackChain::new(2);
        let attempt = chain.current_attempt().unwrap();
        chain.apply(ViewerEvent::Loaded(attempt));
        assert_eq!(chain.apply(ViewerEvent::TimedOut(attempt)), Transition::Ignored);
        assert_eq!(chain.state(), ViewerState::Loaded { approach: 0 });
    }

    #[test]
    fn test_reset_invalidates_previous_epoch() {
        let mut chain = FallbackChain::new(1);
        let stale = chain.current_attempt().unwrap();
        chain.apply(ViewerEvent::Failed(stale));
        assert_eq!(chain.state(), ViewerState::Exhausted);

        chain.apply(ViewerEvent::Reset);
        assert_eq!(chain.state(), ViewerState::Loading { approach: 0 });
        assert_eq!(chain.failures(), 0);

        // Same approach index, older epoch
        assert_eq!(chain.apply(ViewerEvent::TimedOut(stale)), Transition::Ignored);
        assert_eq!(chain.state(), ViewerState::Loading { approach: 0 });
    }

    #[test]
    fn test_empty_chain_starts_exhausted() {
        let mut chain = FallbackChain::new(0);
        assert_eq!(chain.state(), ViewerState::Exhausted);
        chain.apply(ViewerEvent::Reset);
        assert_eq!(chain.state(), ViewerState::Exhausted);
    }

    #[test]
    fn test_state_serializes_tagged() {
        let json = serde_json::to_value(ViewerState::Loading { approach: 2 }).unwrap();
        assert_eq!(json["state"], "loading");
        assert_eq!(json["approach"], 2);
        let json = serde_json::to_value(ViewerState::Exhausted).unwrap();
        assert_eq!(json["state"], "exhausted");
    }
}
