//! Mode orchestration and the poll loop.
//!
//! [`Controller`] owns the white light, the RGB light and the button
//! monitor, and maps button events and dial movement onto them. The
//! composite state it switches over is never stored; it is read back from
//! the two lights on every decision.
//!
//! Short presses walk a single ring of five user-visible states:
//!
//! ```text
//! White -> Color(Normal) -> Color(Strobe) -> Color(Flash) -> Color(Fade) -> White
//! ```
//!
//! A long press turns everything off from anywhere. From off, a short press
//! or a large enough dial movement lights the white LEDs again.

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::InputPin;

use crate::button::{ButtonEvent, ButtonMonitor};
use crate::color::{self, BLUE, GREEN, RED};
use crate::config::{ConfigError, ControllerConfig};
use crate::light::DimmableLight;
use crate::output::{ANALOG_MAX, AnalogInput, OutputChannel};
use crate::rgb::{Mode, RgbLight};
use crate::time::{TimeInstant, TimeSource};

/// How long each self-test stage is held.
const SELF_TEST_STAGE_MS: u32 = 500;

/// Composite state derived from the two lights.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SystemState {
    /// Both lights off.
    Off,
    /// White on, RGB off.
    White,
    /// RGB on in the given mode.
    Color(Mode),
}

/// Reduces a 10-bit dial reading to 8 bits.
#[inline]
pub fn quantize(raw: u16) -> u8 {
    (raw.min(ANALOG_MAX) >> 2) as u8
}

/// Orchestrates one RGBW strip from one button and one dial.
pub struct Controller<W, R, G, B, I>
where
    W: OutputChannel,
    R: OutputChannel,
    G: OutputChannel,
    B: OutputChannel,
    I: TimeInstant,
{
    config: ControllerConfig,
    white: DimmableLight<W>,
    rgb: RgbLight<R, G, B, I>,
    button: ButtonMonitor<I>,
    /// Last quantized dial value acted upon.
    dial: Option<u8>,
}

impl<W, R, G, B, I> Controller<W, R, G, B, I>
where
    W: OutputChannel,
    R: OutputChannel,
    G: OutputChannel,
    B: OutputChannel,
    I: TimeInstant,
{
    /// Creates a controller with both lights off.
    ///
    /// # Errors
    /// Returns the [`ConfigError`] from [`ControllerConfig::validate`].
    pub fn new(
        config: ControllerConfig,
        white: W,
        red: R,
        green: G,
        blue: B,
    ) -> Result<Self, ConfigError> {
        config.validate()?;

        let mut rgb = RgbLight::new(red, green, blue, config.polarity, config.timings);
        rgb.set_color(config.default_color);

        Ok(Self {
            config,
            white: DimmableLight::new(white, config.polarity),
            rgb,
            button: ButtonMonitor::new(config.button),
            dial: None,
        })
    }

    /// Enters the power-on state: white on, RGB off with the default color.
    pub fn start(&mut self) {
        self.white.turn_on();
        self.rgb.turn_off();
        self.rgb.set_color(self.config.default_color);

        #[cfg(feature = "defmt")]
        defmt::info!("controller started: {}", self.state());
    }

    /// Lights each LED group in turn so wiring faults are visible.
    ///
    /// Blocks for 2.5 s. Leaves the RGB light on in [`Mode::Normal`] showing
    /// blue; call [`start`](Self::start) afterwards.
    pub fn self_test<D: DelayNs>(&mut self, delay: &mut D, now: I) {
        self.white.turn_on();
        self.rgb.turn_off();
        self.rgb.set_mode(Mode::Normal);
        delay.delay_ms(SELF_TEST_STAGE_MS);

        self.white.turn_off();
        self.rgb.turn_on();
        delay.delay_ms(SELF_TEST_STAGE_MS);

        for color in [RED, GREEN, BLUE] {
            self.rgb.set_color(color);
            self.rgb.advance(now);
            delay.delay_ms(SELF_TEST_STAGE_MS);
        }
    }

    /// Reads the composite state back from the lights.
    pub fn state(&self) -> SystemState {
        if self.rgb.is_on() {
            SystemState::Color(self.rgb.mode())
        } else if self.white.is_on() {
            SystemState::White
        } else {
            SystemState::Off
        }
    }

    /// Applies one button event.
    pub fn handle_button(&mut self, event: ButtonEvent) {
        match event {
            ButtonEvent::ShortPress => self.short_press(),
            ButtonEvent::LongPress => {
                self.white.turn_off();
                self.rgb.turn_off();
            }
            ButtonEvent::Release => {}
        }

        #[cfg(feature = "defmt")]
        defmt::debug!("button {} -> {}", event, self.state());
    }

    fn short_press(&mut self) {
        if !self.white.is_on() && !self.rgb.is_on() {
            self.white.turn_on();
        } else if !self.rgb.is_on() {
            self.white.turn_off();
            self.rgb.turn_on();
        } else if self.rgb.mode() == Mode::Fade {
            self.white.turn_on();
            self.rgb.advance_mode();
            self.rgb.turn_off();
        } else {
            self.rgb.advance_mode();
        }
    }

    /// Applies one raw 10-bit dial reading.
    ///
    /// Readings are quantized to 8 bits and ignored until the quantized value
    /// changes. While everything is off, the last acted-upon value is kept as
    /// an anchor and the white light only wakes once the dial has moved more
    /// than the wake threshold away from it.
    pub fn handle_dial(&mut self, raw: u16) {
        let raw = raw.min(ANALOG_MAX);
        let level = quantize(raw);
        if self.dial == Some(level) {
            return;
        }

        if self.rgb.is_on() {
            match self.rgb.mode() {
                Mode::Normal | Mode::Strobe => self.rgb.set_color(color::from_dial(raw)),
                Mode::Flash | Mode::Fade => self.rgb.set_speed(raw),
            }
        } else if self.white.is_on() {
            self.white.set_intensity(level);
        } else {
            let Some(anchor) = self.dial else {
                self.dial = Some(level);
                return;
            };
            if level.abs_diff(anchor) <= self.config.wake_threshold {
                return;
            }
            self.white.set_intensity(level);

            #[cfg(feature = "defmt")]
            defmt::debug!("dial wake at {}", level);
        }
        self.dial = Some(level);
    }

    /// One poll cycle with already-sampled inputs.
    ///
    /// Order: dial, button, animation step.
    pub fn step(&mut self, button_level: bool, dial_raw: u16, now: I) -> Option<ButtonEvent> {
        self.handle_dial(dial_raw);

        let event = self.button.poll(button_level, now);
        if let Some(event) = event {
            self.handle_button(event);
        }

        self.rgb.advance(now);
        event
    }

    /// Samples the hardware and runs one poll cycle.
    ///
    /// A failed button read counts as the idle level.
    pub fn service<P, A, T>(&mut self, button: &mut P, dial: &mut A, time: &T) -> Option<ButtonEvent>
    where
        P: InputPin,
        A: AnalogInput,
        T: TimeSource<I>,
    {
        let idle = !self.config.button.active_level;
        let level = button.is_high().unwrap_or(idle);
        let raw = dial.read();
        self.step(level, raw, time.now())
    }

    /// Polls forever at the configured interval.
    pub fn run<P, A, T, D>(&mut self, button: &mut P, dial: &mut A, time: &T, delay: &mut D) -> !
    where
        P: InputPin,
        A: AnalogInput,
        T: TimeSource<I>,
        D: DelayNs,
    {
        loop {
            self.service(button, dial, time);
            delay.delay_ms(self.config.poll_interval_ms);
        }
    }

    pub fn config(&self) -> &ControllerConfig {
        &self.config
    }

    pub fn white(&self) -> &DimmableLight<W> {
        &self.white
    }

    pub fn white_mut(&mut self) -> &mut DimmableLight<W> {
        &mut self.white
    }

    pub fn rgb(&self) -> &RgbLight<R, G, B, I> {
        &self.rgb
    }

    pub fn rgb_mut(&mut self) -> &mut RgbLight<R, G, B, I> {
        &mut self.rgb
    }

    pub fn button(&self) -> &ButtonMonitor<I> {
        &self.button
    }
}
