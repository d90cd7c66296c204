//! Polled push-button monitor with time-based debouncing.
//!
//! [`ButtonMonitor`] turns a raw, possibly bouncing digital level into
//! [`ButtonEvent`]s. It never looks at hardware edges: every threshold is
//! measured between poll-observed transitions, so poll it at least every
//! ~20 ms.

use crate::config::ButtonConfig;
use crate::time::{TimeInstant, elapsed_exceeds};

/// Semantic button events.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ButtonEvent {
    /// Released after more than the debounce threshold and before a long press fired.
    ShortPress,
    /// Held for more than the long-press threshold. Fires while still held.
    LongPress,
    /// Released after a long press already fired.
    Release,
}

/// Capability interface for reacting to button events.
///
/// All methods default to doing nothing.
pub trait ButtonHandler {
    fn on_short_press(&mut self) {}
    fn on_long_press(&mut self) {}
    fn on_release(&mut self) {}
}

/// Per-press tracking state.
#[derive(Debug, Clone, Copy)]
enum Press<I> {
    Idle,
    Held { since: I, long_fired: bool },
}

/// Debounced short/long press detector.
pub struct ButtonMonitor<I: TimeInstant> {
    config: ButtonConfig,
    press: Press<I>,
}

impl<I: TimeInstant> ButtonMonitor<I> {
    /// Creates an idle monitor.
    pub fn new(config: ButtonConfig) -> Self {
        Self {
            config,
            press: Press::Idle,
        }
    }

    /// Feeds one raw sample (`true` = logic high) taken at `now`.
    ///
    /// Returns at most one event per call.
    pub fn poll(&mut self, raw_level: bool, now: I) -> Option<ButtonEvent> {
        let pressed = raw_level == self.config.active_level;

        match (self.press, pressed) {
            (Press::Idle, false) => None,
            (Press::Idle, true) => {
                self.press = Press::Held {
                    since: now,
                    long_fired: false,
                };
                self.check_long_press(now)
            }
            (Press::Held { .. }, true) => self.check_long_press(now),
            (Press::Held { since, long_fired }, false) => {
                self.press = Press::Idle;

                if long_fired {
                    Some(ButtonEvent::Release)
                } else if elapsed_exceeds(now, since, self.config.debounce_ms) {
                    Some(ButtonEvent::ShortPress)
                } else {
                    // Contact bounce.
                    None
                }
            }
        }
    }

    /// Polls and dispatches the resulting event to `handler`.
    pub fn poll_with<H: ButtonHandler>(
        &mut self,
        raw_level: bool,
        now: I,
        handler: &mut H,
    ) -> Option<ButtonEvent> {
        let event = self.poll(raw_level, now);
        match event {
            Some(ButtonEvent::ShortPress) => handler.on_short_press(),
            Some(ButtonEvent::LongPress) => handler.on_long_press(),
            Some(ButtonEvent::Release) => handler.on_release(),
            None => {}
        }
        event
    }

    /// Returns true while a press is being tracked.
    pub fn is_pressed(&self) -> bool {
        matches!(self.press, Press::Held { .. })
    }

    /// Returns true once a long press fired for the ongoing press.
    pub fn long_press_fired(&self) -> bool {
        matches!(
            self.press,
            Press::Held {
                long_fired: true,
                ..
            }
        )
    }

    pub fn config(&self) -> &ButtonConfig {
        &self.config
    }

    fn check_long_press(&mut self, now: I) -> Option<ButtonEvent> {
        if let Press::Held { since, long_fired } = &mut self.press {
            if !*long_fired && elapsed_exceeds(now, *since, self.config.long_press_ms) {
                *long_fired = true;
                return Some(ButtonEvent::LongPress);
            }
        }
        None
    }
}
