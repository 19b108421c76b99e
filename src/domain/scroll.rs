//! Infinite-scroll state machine.
//!
//! The controller is platform independent: visibility is reported as plain
//! boundary-crossing events carrying the sentinel's identity, so any host
//! (intersection observers, scroll offsets, a test harness) can drive it.
//!
//! States: `Idle` (no sentinel attached), `Observing` (watching the current
//! sentinel), `FetchingNext` (one fetch in flight). A fetch is authorised
//! only from `Observing`, only for the tracked sentinel, and only while a
//! continuation cursor exists — so two concurrent fetches for the same feed
//! are impossible, and stale observers never fire.

use std::fmt;

/// Identity of one sentinel element attachment.
///
/// Every re-render that moves the sentinel to a new last item allocates a
/// fresh id; events carrying an older id are ignored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SentinelId(u64);

impl SentinelId {
    /// Wrap a host-allocated sentinel identity.
    pub const fn new(raw: u64) -> Self {
        Self(raw)
    }
}

impl fmt::Display for SentinelId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "sentinel#{}", self.0)
    }
}

/// Boundary-crossing event reported by the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VisibilityEdge {
    /// The sentinel entered the viewport.
    Enter,
    /// The sentinel left the viewport.
    Exit,
}

/// Externally observable controller phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScrollPhase {
    /// No sentinel attached; nothing will fire.
    Idle,
    /// Watching the attached sentinel.
    Observing,
    /// A next-page fetch is in flight.
    FetchingNext,
}

/// Verdict for one visibility event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchDecision {
    /// Start the next-page fetch.
    StartFetch,
    /// A fetch is already in flight; the trigger is suppressed.
    AlreadyFetching,
    /// No continuation cursor exists; the controller stops observing.
    Exhausted,
    /// The event came from a torn-down sentinel and is ignored.
    StaleSentinel,
    /// No sentinel is currently observed.
    NotObserving,
    /// The sentinel left the viewport; nothing to do.
    LeftViewport,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    Idle,
    Observing { sentinel: SentinelId },
    FetchingNext { sentinel: SentinelId },
}

/// Drives next-page fetches from sentinel visibility.
///
/// # Examples
/// ```
/// use postboard::domain::{FetchDecision, ScrollController, SentinelId, VisibilityEdge};
///
/// let mut scroll = ScrollController::new();
/// let sentinel = SentinelId::new(1);
/// scroll.observe(sentinel);
/// let decision = scroll.on_visibility(sentinel, VisibilityEdge::Enter, true);
/// assert_eq!(decision, FetchDecision::StartFetch);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScrollController {
    state: State,
    exhausted: bool,
}

impl Default for ScrollController {
    fn default() -> Self {
        Self::new()
    }
}

impl ScrollController {
    /// Start in `Idle` with no sentinel attached.
    pub const fn new() -> Self {
        Self {
            state: State::Idle,
            exhausted: false,
        }
    }

    /// Attach (or re-attach) the sentinel to observe.
    ///
    /// Any previously tracked sentinel is torn down: its later events are
    /// reported as stale. Attaching after exhaustion is a no-op — the
    /// controller stays `Idle` until [`ScrollController::detach`] resets it.
    pub fn observe(&mut self, sentinel: SentinelId) {
        if self.exhausted {
            return;
        }
        self.state = State::Observing { sentinel };
    }

    /// Handle one boundary-crossing event.
    ///
    /// `has_next` tells the controller whether a continuation cursor exists;
    /// the feed owns that fact.
    pub fn on_visibility(
        &mut self,
        sentinel: SentinelId,
        edge: VisibilityEdge,
        has_next: bool,
    ) -> FetchDecision {
        match self.state {
            State::Idle => FetchDecision::NotObserving,
            State::Observing { sentinel: tracked } => {
                if sentinel != tracked {
                    return FetchDecision::StaleSentinel;
                }
                if edge == VisibilityEdge::Exit {
                    return FetchDecision::LeftViewport;
                }
                if !has_next {
                    self.exhausted = true;
                    self.state = State::Idle;
                    return FetchDecision::Exhausted;
                }
                self.state = State::FetchingNext { sentinel: tracked };
                FetchDecision::StartFetch
            }
            State::FetchingNext { sentinel: tracked } => {
                if sentinel != tracked {
                    FetchDecision::StaleSentinel
                } else {
                    FetchDecision::AlreadyFetching
                }
            }
        }
    }

    /// Record that the in-flight fetch settled, successfully or not.
    ///
    /// The old sentinel is torn down unconditionally. Observation resumes
    /// only once the host attaches a new sentinel to the now-last item; when
    /// no continuation cursor remains the controller goes terminal instead.
    pub fn fetch_settled(&mut self, has_next: bool) {
        if !has_next {
            self.exhausted = true;
        }
        self.state = State::Idle;
    }

    /// Reset to pristine `Idle`, e.g. when the list view unmounts.
    pub fn detach(&mut self) {
        self.state = State::Idle;
        self.exhausted = false;
    }

    /// Externally observable phase.
    pub fn phase(&self) -> ScrollPhase {
        match self.state {
            State::Idle => ScrollPhase::Idle,
            State::Observing { .. } => ScrollPhase::Observing,
            State::FetchingNext { .. } => ScrollPhase::FetchingNext,
        }
    }

    /// Whether the feed reported no further pages.
    pub fn is_exhausted(&self) -> bool {
        self.exhausted
    }
}
