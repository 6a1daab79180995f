//! Simulation statistics collection trait

/// Trait for collecting simulation statistics
///
/// Rules report through this trait so callers can choose between counting
/// and doing nothing at all.
pub trait SimStats {
    /// Record that a particle relocated (fall, rise, swap or spread)
    fn record_pixel_moved(&mut self);

    /// Record that a static material transformed itself or a neighbour
    fn record_state_change(&mut self);

    /// Record that a mobile reaction rewrote a cell
    fn record_reaction(&mut self);

    /// Record a rest particle that the movement gate held back
    fn record_gate_skip(&mut self) {}
}

/// A no-op implementation for when stats collection is not needed
#[derive(Default)]
pub struct NoopStats;

impl SimStats for NoopStats {
    fn record_pixel_moved(&mut self) {}
    fn record_state_change(&mut self) {}
    fn record_reaction(&mut self) {}
}

/// Per-frame counters kept by the sandbox
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct FrameCounters {
    pub pixels_moved: u32,
    pub state_changes: u32,
    pub reactions: u32,
    pub gate_skips: u32,
}

impl FrameCounters {
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

impl SimStats for FrameCounters {
    fn record_pixel_moved(&mut self) {
        self.pixels_moved += 1;
    }

    fn record_state_change(&mut self) {
        self.state_changes += 1;
    }

    fn record_reaction(&mut self) {
        self.reactions += 1;
    }

    fn record_gate_skip(&mut self) {
        self.gate_skips += 1;
    }
}
