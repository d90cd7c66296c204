//! Multi-channel animated light (the RGB LEDs of the strip).
//!
//! Provides [`RgbLight`], which owns the three color channels and advances
//! one of four animations on every call to [`RgbLight::advance`]. Each
//! animation is gated by its own interval against the last time it
//! stepped, so it progresses at the same rate whatever the poll cadence.

use crate::color::{BLACK, BLUE, CYAN, Color, GREEN, MAGENTA, RED, YELLOW};
use crate::config::{AnimationTimings, SPEED_MAX};
use crate::light::LightState;
use crate::output::{OutputChannel, Polarity};
use crate::time::{TimeInstant, elapsed_exceeds};

/// Colors cycled by [`Mode::Flash`].
pub const FLASH_SEQUENCE: [Color; 6] = [RED, GREEN, BLUE, YELLOW, CYAN, MAGENTA];

/// Number of ramps in one full fade cycle.
pub const FADE_PHASES: u8 = 6;

/// RGB animation mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Mode {
    /// Steady color.
    Normal,
    /// Alternates between black and the color, starting dark.
    Strobe,
    /// Steps through [`FLASH_SEQUENCE`].
    Flash,
    /// Continuous hue rotation.
    Fade,
}

impl Mode {
    /// Get the next mode in the cycle.
    pub fn next(self) -> Self {
        match self {
            Mode::Normal => Mode::Strobe,
            Mode::Strobe => Mode::Flash,
            Mode::Flash => Mode::Fade,
            Mode::Fade => Mode::Normal,
        }
    }
}

/// Which channel a fade phase ramps, and in which direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Channel {
    Red,
    Green,
    Blue,
}

/// Red up, blue down, green up, red down, blue up, green down.
const FADE_RAMPS: [(Channel, bool); FADE_PHASES as usize] = [
    (Channel::Red, true),
    (Channel::Blue, false),
    (Channel::Green, true),
    (Channel::Red, false),
    (Channel::Blue, true),
    (Channel::Green, false),
];

/// Scratch state of the active animation. A fresh value is the start of
/// the animation; `last_step: None` means the next advance steps at once.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Animation<I> {
    Normal,
    Strobe { last_step: Option<I>, lit: bool },
    Flash { last_step: Option<I>, index: u8 },
    Fade { last_step: Option<I>, phase: u8, level: u8 },
}

impl<I> Animation<I> {
    fn start(mode: Mode) -> Self {
        match mode {
            Mode::Normal => Animation::Normal,
            Mode::Strobe => Animation::Strobe {
                last_step: None,
                lit: true,
            },
            Mode::Flash => Animation::Flash {
                last_step: None,
                index: 0,
            },
            Mode::Fade => Animation::Fade {
                last_step: None,
                phase: 0,
                level: 0,
            },
        }
    }

    fn mode(&self) -> Mode {
        match self {
            Animation::Normal => Mode::Normal,
            Animation::Strobe { .. } => Mode::Strobe,
            Animation::Flash { .. } => Mode::Flash,
            Animation::Fade { .. } => Mode::Fade,
        }
    }
}

/// Returns true and records `now` when the interval has elapsed.
fn due<I: TimeInstant>(last_step: &mut Option<I>, now: I, interval_ms: u32) -> bool {
    let is_due = match *last_step {
        None => true,
        Some(last) => elapsed_exceeds(now, last, interval_ms),
    };
    if is_due {
        *last_step = Some(now);
    }
    is_due
}

/// Three-channel light with on/off, a color, an animation mode and a speed.
///
/// On/off only gates [`advance`](Self::advance): turning on renders nothing
/// by itself, the next advance does.
pub struct RgbLight<R, G, B, I>
where
    R: OutputChannel,
    G: OutputChannel,
    B: OutputChannel,
    I: TimeInstant,
{
    red: R,
    green: G,
    blue: B,
    polarity: Polarity,
    timings: AnimationTimings,
    on: bool,
    color: Color,
    speed: u16,
    animation: Animation<I>,
}

impl<R, G, B, I> RgbLight<R, G, B, I>
where
    R: OutputChannel,
    G: OutputChannel,
    B: OutputChannel,
    I: TimeInstant,
{
    /// Creates a light that is off, black, in [`Mode::Normal`] at speed 0.
    pub fn new(red: R, green: G, blue: B, polarity: Polarity, timings: AnimationTimings) -> Self {
        Self {
            red,
            green,
            blue,
            polarity,
            timings,
            on: false,
            color: BLACK,
            speed: 0,
            animation: Animation::start(Mode::Normal),
        }
    }

    pub fn turn_on(&mut self) {
        self.on = true;
    }

    /// Drives all three channels to the hard-off level. No-op when already off.
    pub fn turn_off(&mut self) {
        if !self.on {
            return;
        }
        let level = self.polarity.off_level();
        self.red.set_level(level);
        self.green.set_level(level);
        self.blue.set_level(level);
        self.on = false;
    }

    /// Inverts the on/off state and returns the new state.
    pub fn toggle(&mut self) -> LightState {
        if self.on {
            self.turn_off();
        } else {
            self.turn_on();
        }
        self.state()
    }

    pub fn set_state(&mut self, state: LightState) {
        match state {
            LightState::On => self.turn_on(),
            LightState::Off => self.turn_off(),
        }
    }

    pub fn state(&self) -> LightState {
        LightState::from(self.on)
    }

    pub fn is_on(&self) -> bool {
        self.on
    }

    /// Sets the color used by [`Mode::Normal`] and [`Mode::Strobe`].
    pub fn set_color(&mut self, color: Color) {
        self.color = color;
    }

    pub fn color(&self) -> Color {
        self.color
    }

    /// Switches mode and restarts its animation from the first phase.
    pub fn set_mode(&mut self, mode: Mode) {
        self.animation = Animation::start(mode);
    }

    pub fn mode(&self) -> Mode {
        self.animation.mode()
    }

    /// Cycles Normal → Strobe → Flash → Fade → Normal and returns the new mode.
    pub fn advance_mode(&mut self) -> Mode {
        let next = self.mode().next();
        self.set_mode(next);
        next
    }

    /// Sets the animation speed, clamped to `0..=1024`.
    pub fn set_speed(&mut self, speed: u16) {
        self.speed = speed.min(SPEED_MAX);
    }

    pub fn speed(&self) -> u16 {
        self.speed
    }

    /// Returns references to the red, green and blue channels.
    pub fn channels(&self) -> (&R, &G, &B) {
        (&self.red, &self.green, &self.blue)
    }

    /// Runs one animation step. Does nothing while off.
    pub fn advance(&mut self, now: I) {
        if !self.on {
            return;
        }

        let timings = self.timings;
        let speed = self.speed;
        match &mut self.animation {
            Animation::Normal => {
                let color = self.color;
                self.show_color(color);
            }
            Animation::Strobe { last_step, lit } => {
                if due(last_step, now, timings.strobe_ms) {
                    *lit = !*lit;
                    let color = if *lit { self.color } else { BLACK };
                    self.show_color(color);
                }
            }
            Animation::Flash { last_step, index } => {
                if due(last_step, now, timings.flash_interval(speed)) {
                    let color = FLASH_SEQUENCE[usize::from(*index)];
                    *index = (*index + 1) % FLASH_SEQUENCE.len() as u8;
                    self.show_color(color);
                }
            }
            Animation::Fade {
                last_step,
                phase,
                level,
            } => {
                if due(last_step, now, timings.fade_interval(speed)) {
                    let (channel, rising) = FADE_RAMPS[usize::from(*phase)];
                    let step = if rising {
                        level.checked_add(1)
                    } else {
                        level.checked_sub(1)
                    };
                    match step {
                        Some(next) => {
                            *level = next;
                            let duty = self.polarity.duty(next);
                            match channel {
                                Channel::Red => self.red.write_duty(duty),
                                Channel::Green => self.green.write_duty(duty),
                                Channel::Blue => self.blue.write_duty(duty),
                            }
                        }
                        // End of the ramp: the level carries over as the
                        // start of the next, opposite-direction ramp.
                        None => *phase = (*phase + 1) % FADE_PHASES,
                    }
                }
            }
        }
    }

    /// Writes a color through the polarity rule. Black still goes through PWM.
    fn show_color(&mut self, color: Color) {
        self.red.write_duty(self.polarity.duty(color.red));
        self.green.write_duty(self.polarity.duty(color.green));
        self.blue.write_duty(self.polarity.duty(color.blue));
    }
}
