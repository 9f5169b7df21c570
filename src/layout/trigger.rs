// src/layout/trigger.rs

//! When does the canvas re-run the auto-layout on its own?
//!
//! ```text
//! InitialLayoutPending --(nodes > 0 && edges > 0)--> Settling{token}
//! Settling{token} --(SettleElapsed(token))--> LayoutApplied
//! LayoutApplied --(dependency count changed)--> fire immediately
//! ```
//!
//! The dependency *count* is the change signal. A same-count content swap
//! goes unnoticed and an add plus a remove landing on the same count does
//! too; that imprecision is accepted.

use std::time::Duration;

use tracing::debug;

/// Where the trigger is in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LayoutPhase {
    /// No automatic layout has run yet.
    InitialLayoutPending,
    /// The initial layout is scheduled and waits for the graph to settle.
    Settling { token: u64 },
    /// The initial layout ran; dependency count changes re-fire it.
    LayoutApplied,
}

/// Sizes observed by one render pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RenderCounts {
    pub nodes: usize,
    pub edges: usize,
    pub dependencies: usize,
}

/// What the trigger wants after a render pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TriggerDecision {
    Idle,
    /// Run the initial layout once `delay` has passed, unless a later
    /// decision supersedes `token`.
    ScheduleSettle { token: u64, delay: Duration },
    /// Run the auto-layout right away.
    LayoutNow,
}

#[derive(Debug, Clone)]
pub struct LayoutTrigger {
    enabled: bool,
    phase: LayoutPhase,
    previous_dependency_count: usize,
    next_token: u64,
    settle_delay: Duration,
}

impl LayoutTrigger {
    pub fn new(enabled: bool, settle_delay: Duration) -> Self {
        Self {
            enabled,
            phase: LayoutPhase::InitialLayoutPending,
            previous_dependency_count: 0,
            next_token: 0,
            settle_delay,
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn phase(&self) -> LayoutPhase {
        self.phase
    }

    /// Turn automatic firing on or off.
    ///
    /// Turning it off drops a pending initial layout; positions already
    /// applied are left alone.
    pub fn set_enabled(&mut self, enabled: bool) {
        if self.enabled == enabled {
            return;
        }
        self.enabled = enabled;

        if !enabled {
            if let LayoutPhase::Settling { token } = self.phase {
                debug!(token, "auto-layout disabled; dropping pending initial layout");
                self.phase = LayoutPhase::InitialLayoutPending;
            }
        }
    }

    /// Evaluate a render pass over a fresh snapshot.
    pub fn on_render(&mut self, counts: RenderCounts) -> TriggerDecision {
        let previous = self.previous_dependency_count;
        self.previous_dependency_count = counts.dependencies;

        let has_graph = counts.nodes > 0 && counts.edges > 0;
        let phase = self.phase;

        match phase {
            LayoutPhase::InitialLayoutPending | LayoutPhase::Settling { .. }
                if self.enabled && has_graph =>
            {
                let token = self.arm();
                debug!(token, ?counts, "initial layout scheduled");
                TriggerDecision::ScheduleSettle {
                    token,
                    delay: self.settle_delay,
                }
            }
            LayoutPhase::Settling { token } => {
                debug!(token, ?counts, "graph emptied while settling; initial layout pending again");
                self.phase = LayoutPhase::InitialLayoutPending;
                TriggerDecision::Idle
            }
            LayoutPhase::InitialLayoutPending => TriggerDecision::Idle,
            LayoutPhase::LayoutApplied => {
                if self.enabled && counts.dependencies != previous {
                    debug!(
                        previous,
                        current = counts.dependencies,
                        "dependency count changed; re-running auto-layout"
                    );
                    TriggerDecision::LayoutNow
                } else {
                    TriggerDecision::Idle
                }
            }
        }
    }

    /// The settle delay for `token` has passed.
    ///
    /// Returns `true` when the initial layout should run now.
    pub fn on_settle_elapsed(&mut self, token: u64) -> bool {
        let phase = self.phase;
        match phase {
            LayoutPhase::Settling { token: current } if current == token && self.enabled => {
                self.phase = LayoutPhase::LayoutApplied;
                true
            }
            _ => {
                debug!(token, ?phase, "ignoring stale settle timer");
                false
            }
        }
    }

    fn arm(&mut self) -> u64 {
        self.next_token += 1;
        let token = self.next_token;
        self.phase = LayoutPhase::Settling { token };
        token
    }
}
