//! One-shot readiness latch.
//!
//! The page can report readiness through two lifecycle events
//! (`DOMContentLoaded` and `load`) which may both fire, in either order. The
//! backend must hear about it exactly once.

use std::cell::Cell;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReadyState {
    NotReady,
    ReadySignaled,
}

/// Which lifecycle event reported readiness.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LifecycleSignal {
    DomContentLoaded,
    WindowLoad,
}

impl LifecycleSignal {
    /// Message sent to the backend with the ready call.
    pub fn ready_message(self) -> &'static str {
        match self {
            LifecycleSignal::DomContentLoaded => "JavaScript and DOM are ready.",
            LifecycleSignal::WindowLoad => "JavaScript and DOM are ready (onload).",
        }
    }
}

/// First caller of `try_fire` wins; later calls are no-ops.
#[derive(Debug)]
pub struct ReadyLatch {
    state: Cell<ReadyState>,
}

impl ReadyLatch {
    pub fn new() -> Self {
        Self {
            state: Cell::new(ReadyState::NotReady),
        }
    }

    #[cfg(test)]
    pub fn state(&self) -> ReadyState {
        self.state.get()
    }

    /// Returns true only for the call that flips the latch.
    pub fn try_fire(&self) -> bool {
        match self.state.replace(ReadyState::ReadySignaled) {
            ReadyState::NotReady => true,
            ReadyState::ReadySignaled => false,
        }
    }
}

impl Default for ReadyLatch {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_fire_wins() {
        let latch = ReadyLatch::new();
        assert_eq!(latch.state(), ReadyState::NotReady);
        assert!(latch.try_fire());
        assert_eq!(latch.state(), ReadyState::ReadySignaled);
        assert!(!latch.try_fire());
        assert!(!latch.try_fire());
        assert_eq!(latch.state(), ReadyState::ReadySignaled);
    }

    #[test]
    fn messages_name_the_signal() {
        assert!(!LifecycleSignal::DomContentLoaded
            .ready_message()
            .contains("onload"));
        assert!(LifecycleSignal::WindowLoad.ready_message().contains("onload"));
    }
}
