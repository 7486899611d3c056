#![no_std]

extern crate alloc;

use serde::{Deserialize, Serialize};

pub use engine::*;
pub use error::*;
pub use generator::*;
pub use input::*;
pub use types::*;
pub use view::*;

mod engine;
mod error;
mod generator;
mod input;
mod types;
mod view;

/// Longest sequence a game may start with.
pub const MAX_INITIAL_LENGTH: u8 = 32;

#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GameConfig {
    pub initial_length: u8,
    pub timing: PresentationTiming,
}

impl GameConfig {
    pub const fn new_unchecked(initial_length: u8, timing: PresentationTiming) -> Self {
        Self {
            initial_length,
            timing,
        }
    }

    pub fn new(initial_length: u8, timing: PresentationTiming) -> Self {
        let initial_length = initial_length.clamp(1, MAX_INITIAL_LENGTH);
        Self::new_unchecked(initial_length, timing)
    }

    pub const fn classic() -> Self {
        Self::new_unchecked(1, PresentationTiming::classic())
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self::classic()
    }
}

/// How the sequence is flashed during the presentation phase, all values in milliseconds.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PresentationTiming {
    /// Pause before the first flash.
    pub lead_in_ms: u32,
    /// How long a single block stays lit.
    pub flash_ms: u32,
    /// Dark pause after each flash.
    pub gap_ms: u32,
}

impl PresentationTiming {
    pub const fn classic() -> Self {
        Self {
            lead_in_ms: 600,
            flash_ms: 450,
            gap_ms: 150,
        }
    }

    pub const fn step_ms(&self) -> u32 {
        self.flash_ms.saturating_add(self.gap_ms)
    }

    /// Delay between a round start and the end of its presentation phase.
    pub fn delay_ms(&self, length: usize) -> u32 {
        let length = u32::try_from(length).unwrap_or(u32::MAX);
        self.lead_in_ms
            .saturating_add(self.step_ms().saturating_mul(length))
    }

    /// Block lit `elapsed_ms` after the presentation of `sequence` started, if any.
    pub fn lit_at(&self, sequence: &[ColorId], elapsed_ms: u32) -> Option<ColorId> {
        let step = self.step_ms();
        if step == 0 {
            return None;
        }
        let offset = elapsed_ms.checked_sub(self.lead_in_ms)?;
        let index = usize::try_from(offset / step).ok()?;
        let color = *sequence.get(index)?;
        (offset % step < self.flash_ms).then_some(color)
    }
}

impl Default for PresentationTiming {
    fn default() -> Self {
        Self::classic()
    }
}

#[derive(Copy, Clone, Debug, PartialEq)]
pub enum PhaseOutcome {
    NoChange,
    Revealed,
}

impl PhaseOutcome {
    pub const fn has_update(self) -> bool {
        match self {
            Self::NoChange => false,
            Self::Revealed => true,
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq)]
pub enum GuessOutcome {
    /// Matched the next color, round continues.
    Correct,
    /// Completed the sequence, the next round started with the given tag.
    RoundWon(RoundTag),
    /// Did not match, the game is over.
    Wrong,
}

impl GuessOutcome {
    pub const fn has_update(self) -> bool {
        true
    }

    pub const fn succeeded(self) -> bool {
        matches!(self, Self::Correct | Self::RoundWon(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ColorId::*;

    #[test]
    fn config_clamps_initial_length() {
        let timing = PresentationTiming::classic();
        assert_eq!(GameConfig::new(0, timing).initial_length, 1);
        assert_eq!(
            GameConfig::new(200, timing).initial_length,
            MAX_INITIAL_LENGTH
        );
    }

    #[test]
    fn delay_covers_every_flash() {
        let timing = PresentationTiming {
            lead_in_ms: 100,
            flash_ms: 40,
            gap_ms: 10,
        };
        assert_eq!(timing.delay_ms(0), 100);
        assert_eq!(timing.delay_ms(3), 250);
    }

    #[test]
    fn lit_at_walks_the_sequence() {
        let timing = PresentationTiming {
            lead_in_ms: 100,
            flash_ms: 40,
            gap_ms: 10,
        };
        let sequence = [Red, Green, Red];

        assert_eq!(timing.lit_at(&sequence, 0), None);
        assert_eq!(timing.lit_at(&sequence, 99), None);
        assert_eq!(timing.lit_at(&sequence, 100), Some(Red));
        assert_eq!(timing.lit_at(&sequence, 139), Some(Red));
        assert_eq!(timing.lit_at(&sequence, 145), None);
        assert_eq!(timing.lit_at(&sequence, 150), Some(Green));
        assert_eq!(timing.lit_at(&sequence, 210), Some(Red));
        assert_eq!(timing.lit_at(&sequence, timing.delay_ms(3)), None);
    }

    #[test]
    fn config_round_trips_through_json() {
        let config = GameConfig::new(4, PresentationTiming::classic());
        let json = serde_json::to_string(&config).unwrap();
        assert_eq!(serde_json::from_str::<GameConfig>(&json).unwrap(), config);
    }
}
