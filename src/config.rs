//! Compile-time configuration and its validation.

use crate::color::{Color, DARK_PURPLE};
use crate::output::Polarity;

/// Button is read as pressed when the line is low (pulled-up idle-high).
pub const BUTTON_ACTIVE_LEVEL: bool = false;
pub const DEBOUNCE_MS: u32 = 100;
pub const LONG_PRESS_MS: u32 = 500;

pub const STROBE_INTERVAL_MS: u32 = 200;
pub const FLASH_BASE_MS: u32 = 400;
pub const FLASH_SPAN_MS: u32 = 600;
pub const FADE_BASE_MS: u32 = 5;
pub const FADE_SPAN_MS: u32 = 200;
/// Upper bound of the animation speed value.
pub const SPEED_MAX: u16 = 1024;

/// Quantized dial movement needed to wake the strip from all-off.
pub const WAKE_THRESHOLD: u8 = 100;
pub const POLL_INTERVAL_MS: u32 = 50;
pub const DEFAULT_COLOR: Color = DARK_PURPLE;

/// Button thresholds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ButtonConfig {
    /// Raw level that counts as pressed.
    pub active_level: bool,
    /// Releases after no more than this are treated as contact noise.
    pub debounce_ms: u32,
    pub long_press_ms: u32,
}

impl Default for ButtonConfig {
    fn default() -> Self {
        Self {
            active_level: BUTTON_ACTIVE_LEVEL,
            debounce_ms: DEBOUNCE_MS,
            long_press_ms: LONG_PRESS_MS,
        }
    }
}

/// Per-mode animation intervals.
///
/// Flash and fade intervals grow with the speed value:
/// `base + span * speed / SPEED_MAX`. A higher speed value is a slower
/// animation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct AnimationTimings {
    pub strobe_ms: u32,
    pub flash_base_ms: u32,
    pub flash_span_ms: u32,
    pub fade_base_ms: u32,
    pub fade_span_ms: u32,
}

impl AnimationTimings {
    /// Interval between flash colors at the given speed.
    pub fn flash_interval(&self, speed: u16) -> u32 {
        self.flash_base_ms + scale(self.flash_span_ms, speed)
    }

    /// Interval between fade ticks at the given speed.
    pub fn fade_interval(&self, speed: u16) -> u32 {
        self.fade_base_ms + scale(self.fade_span_ms, speed)
    }
}

impl Default for AnimationTimings {
    fn default() -> Self {
        Self {
            strobe_ms: STROBE_INTERVAL_MS,
            flash_base_ms: FLASH_BASE_MS,
            flash_span_ms: FLASH_SPAN_MS,
            fade_base_ms: FADE_BASE_MS,
            fade_span_ms: FADE_SPAN_MS,
        }
    }
}

fn scale(span_ms: u32, speed: u16) -> u32 {
    let speed = u64::from(speed.min(SPEED_MAX));
    (u64::from(span_ms) * speed / u64::from(SPEED_MAX)) as u32
}

/// Everything fixed at build time for one strip.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ControllerConfig {
    pub polarity: Polarity,
    pub default_color: Color,
    pub button: ButtonConfig,
    pub timings: AnimationTimings,
    pub wake_threshold: u8,
    pub poll_interval_ms: u32,
}

impl ControllerConfig {
    /// Checks that the poll cadence can resolve the button thresholds.
    ///
    /// # Errors
    /// * `PollIntervalTooLong` - The poll interval is not below the debounce threshold
    /// * `LongPressWithinDebounce` - The long-press threshold is not above the debounce threshold
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.poll_interval_ms >= self.button.debounce_ms {
            return Err(ConfigError::PollIntervalTooLong {
                poll_interval_ms: self.poll_interval_ms,
                debounce_ms: self.button.debounce_ms,
            });
        }
        if self.button.long_press_ms <= self.button.debounce_ms {
            return Err(ConfigError::LongPressWithinDebounce {
                long_press_ms: self.button.long_press_ms,
                debounce_ms: self.button.debounce_ms,
            });
        }
        Ok(())
    }
}

impl Default for ControllerConfig {
    fn default() -> Self {
        Self {
            polarity: Polarity::default(),
            default_color: DEFAULT_COLOR,
            button: ButtonConfig::default(),
            timings: AnimationTimings::default(),
            wake_threshold: WAKE_THRESHOLD,
            poll_interval_ms: POLL_INTERVAL_MS,
        }
    }
}

/// Configuration validation errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigError {
    /// Polls are too far apart to observe a debounced press.
    PollIntervalTooLong {
        poll_interval_ms: u32,
        debounce_ms: u32,
    },
    /// A long press would fire before a short press could be accepted.
    LongPressWithinDebounce { long_press_ms: u32, debounce_ms: u32 },
}

impl core::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            ConfigError::PollIntervalTooLong {
                poll_interval_ms,
                debounce_ms,
            } => {
                write!(
                    f,
                    "poll interval of {}ms must be shorter than the {}ms debounce threshold",
                    poll_interval_ms, debounce_ms
                )
            }
            ConfigError::LongPressWithinDebounce {
                long_press_ms,
                debounce_ms,
            } => {
                write!(
                    f,
                    "long press threshold of {}ms must exceed the {}ms debounce threshold",
                    long_press_ms, debounce_ms
                )
            }
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for ConfigError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        assert_eq!(ControllerConfig::default().validate(), Ok(()));
    }

    #[test]
    fn slow_polling_is_rejected() {
        let config = ControllerConfig {
            poll_interval_ms: 100,
            ..ControllerConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::PollIntervalTooLong { .. })
        ));
    }

    #[test]
    fn long_press_must_exceed_debounce() {
        let config = ControllerConfig {
            button: ButtonConfig {
                long_press_ms: 100,
                ..ButtonConfig::default()
            },
            ..ControllerConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::LongPressWithinDebounce { .. })
        ));
    }

    #[test]
    fn intervals_scale_with_speed_and_saturate() {
        let timings = AnimationTimings::default();
        assert_eq!(timings.flash_interval(0), 400);
        assert_eq!(timings.flash_interval(512), 700);
        assert_eq!(timings.flash_interval(SPEED_MAX), 1000);
        assert_eq!(timings.flash_interval(u16::MAX), 1000);
        assert_eq!(timings.fade_interval(0), 5);
        assert_eq!(timings.fade_interval(SPEED_MAX), 205);
    }
}
