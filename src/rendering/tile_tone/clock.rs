use bevy::prelude::*;

/// Frames per ripple pulse.
pub const RIPPLE_PERIOD: u64 = 90;

/// Shared tick counter driving every ripple layer in lock-step.
///
/// Only the reconciler advances it (once per pass); it restarts at zero with each map
/// session.
#[derive(Resource, Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct AnimationClock(u64);

impl AnimationClock {
    pub fn at(count: u64) -> Self {
        Self(count)
    }

    #[inline]
    pub fn count(&self) -> u64 {
        self.0
    }

    pub(crate) fn tick(&mut self) {
        self.0 = self.0.wrapping_add(1);
    }

    pub(crate) fn reset(&mut self) {
        self.0 = 0;
    }

    /// Position inside the current pulse, `0.0..1.0`.
    #[inline]
    pub fn phase(&self) -> f32 {
        (self.0 % RIPPLE_PERIOD) as f32 / RIPPLE_PERIOD as f32
    }
}
