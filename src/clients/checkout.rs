use std::fmt;

use tracing::{debug, warn};

/// Stages of one checkout run.
///
/// `Idle → Aggregating → Pricing → Committing → Committed`, with `Aborted`
/// reachable from every working stage.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CheckoutPhase {
    Idle,
    Aggregating,
    Pricing,
    Committing,
    Committed,
    Aborted,
}

impl CheckoutPhase {
    pub fn can_advance_to(self, next: Self) -> bool {
        use CheckoutPhase::*;
        matches!(
            (self, next),
            (Idle, Aggregating)
                | (Aggregating, Pricing)
                | (Pricing, Committing)
                | (Committing, Committed)
                | (Aggregating | Pricing | Committing, Aborted)
        )
    }

    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Committed | Self::Aborted)
    }
}

impl fmt::Display for CheckoutPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Idle => "idle",
            Self::Aggregating => "aggregating",
            Self::Pricing => "pricing",
            Self::Committing => "committing",
            Self::Committed => "committed",
            Self::Aborted => "aborted",
        };
        f.write_str(name)
    }
}

/// Tracks the phase of a running checkout and logs each transition.
#[derive(Debug)]
pub(crate) struct CheckoutProgress {
    phase: CheckoutPhase,
}

impl CheckoutProgress {
    pub fn start() -> Self {
        Self {
            phase: CheckoutPhase::Idle,
        }
    }

    pub fn phase(&self) -> CheckoutPhase {
        self.phase
    }

    pub fn advance(&mut self, next: CheckoutPhase) {
        if !self.phase.can_advance_to(next) {
            warn!(from = %self.phase, to = %next, "Unexpected checkout transition");
        }
        debug!(from = %self.phase, to = %next, "Checkout phase");
        self.phase = next;
    }
}
