use bevy::prelude::*;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum FadePhase {
    #[default]
    FadingIn,
    FadedIn,
    FadingOut,
    FadedOut,
}

/// Frame-counted visibility transition owned by one overlay visual.
///
/// `elapsed` always stays within `0..=duration`. Reversing direction keeps the
/// current `elapsed`, so a half faded-out overlay fades back in from where it is.
#[derive(Component, Debug, Clone, PartialEq)]
pub struct FadeState {
    phase: FadePhase,
    elapsed: u32,
    duration: u32,
}

impl FadeState {
    /// Starts fading in from fully transparent. A zero duration is treated as 1.
    pub fn new(duration: u32) -> Self {
        Self {
            phase: FadePhase::FadingIn,
            elapsed: 0,
            duration: duration.max(1),
        }
    }

    #[inline]
    pub fn phase(&self) -> FadePhase {
        self.phase
    }
    #[inline]
    pub fn elapsed(&self) -> u32 {
        self.elapsed
    }
    #[inline]
    pub fn duration(&self) -> u32 {
        self.duration
    }

    /// One tick of the transition. Settled phases do nothing.
    pub fn advance(&mut self) {
        match self.phase {
            FadePhase::FadingIn => {
                self.elapsed = (self.elapsed + 1).min(self.duration);
                if self.elapsed == self.duration {
                    self.phase = FadePhase::FadedIn;
                }
            }
            FadePhase::FadingOut => {
                self.elapsed = self.elapsed.saturating_sub(1);
                if self.elapsed == 0 {
                    self.phase = FadePhase::FadedOut;
                }
            }
            FadePhase::FadedIn | FadePhase::FadedOut => {}
        }
    }

    pub fn fade_in(&mut self) {
        if matches!(self.phase, FadePhase::FadingOut | FadePhase::FadedOut) {
            self.phase = FadePhase::FadingIn;
        }
    }

    pub fn fade_out(&mut self) {
        if matches!(self.phase, FadePhase::FadingIn | FadePhase::FadedIn) {
            self.phase = FadePhase::FadingOut;
        }
    }

    /// `elapsed / duration`, 0 when invisible and 1 when fully faded in.
    #[inline]
    pub fn rate(&self) -> f32 {
        self.elapsed as f32 / self.duration as f32
    }

    #[inline]
    pub fn is_fading_out(&self) -> bool {
        self.phase == FadePhase::FadingOut
    }

    #[inline]
    pub fn is_faded_out(&self) -> bool {
        self.phase == FadePhase::FadedOut
    }
}
