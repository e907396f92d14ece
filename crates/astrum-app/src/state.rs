//! Messages and settings shared between the caller and the loop thread.

use std::time::Duration;

use astrum_core::commands::SimInput;
use astrum_core::constants::TICK_RATE;

/// Commands sent to the game loop thread.
#[derive(Debug)]
pub enum LoopCommand {
    /// Forward an input to the engine at the next tick boundary.
    Input(SimInput),
    /// Stop before the next tick. Inputs drained alongside it stay queued
    /// in the returned engine.
    Shutdown,
}

#[derive(Debug, Clone, Copy)]
pub struct LoopSettings {
    /// Stop after this many ticks. `None` runs until shutdown.
    pub max_ticks: Option<u64>,
    /// Pace ticks at `TICK_RATE` instead of running flat out.
    pub realtime: bool,
}

impl Default for LoopSettings {
    fn default() -> Self {
        Self {
            max_ticks: Some(u64::from(TICK_RATE) * 60),
            realtime: false,
        }
    }
}

impl LoopSettings {
    pub fn tick_duration(&self) -> Duration {
        Duration::from_nanos(1_000_000_000 / u64::from(TICK_RATE))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_settings_are_bounded() {
        let settings = LoopSettings::default();
        assert_eq!(settings.max_ticks, Some(600));
        assert!(!settings.realtime);
        assert_eq!(settings.tick_duration(), Duration::from_millis(100));
    }
}
