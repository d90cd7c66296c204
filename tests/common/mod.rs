//! Shared test infrastructure for rgbw-dimmer integration tests

#![allow(dead_code)] // Items used across multiple test files; Rust analyzes per-file

use core::cell::Cell;
use core::convert::Infallible;

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::{ErrorType, InputPin};
use rgbw_dimmer::{
    AnalogInput, Color, Controller, ControllerConfig, Level, Millis, OutputChannel, RgbLight,
    TimeSource,
};

// ============================================================================
// Mock Output Channel
// ============================================================================

/// What was last driven onto a channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Output {
    Duty(u8),
    Level(Level),
}

/// Mock channel that records every write
pub struct MockChannel {
    last: Option<Output>,
    history: heapless::Vec<Output, 64>,
    writes: usize,
}

impl MockChannel {
    pub fn new() -> Self {
        Self {
            last: None,
            history: heapless::Vec::new(),
            writes: 0,
        }
    }

    pub fn last(&self) -> Option<Output> {
        self.last
    }

    /// Last duty cycle, or `None` if the last write was a discrete level.
    pub fn duty(&self) -> Option<u8> {
        match self.last {
            Some(Output::Duty(duty)) => Some(duty),
            _ => None,
        }
    }

    /// First 64 writes.
    pub fn history(&self) -> &[Output] {
        &self.history
    }

    pub fn writes(&self) -> usize {
        self.writes
    }

    fn record(&mut self, output: Output) {
        self.last = Some(output);
        self.writes += 1;
        let _ = self.history.push(output);
    }
}

impl OutputChannel for MockChannel {
    fn write_duty(&mut self, duty: u8) {
        self.record(Output::Duty(duty));
    }

    fn set_level(&mut self, level: Level) {
        self.record(Output::Level(level));
    }
}

// ============================================================================
// Mock Inputs
// ============================================================================

/// Button pin whose level is set by the test
pub struct MockPin {
    pub high: bool,
}

impl ErrorType for MockPin {
    type Error = Infallible;
}

impl InputPin for MockPin {
    fn is_high(&mut self) -> Result<bool, Self::Error> {
        Ok(self.high)
    }

    fn is_low(&mut self) -> Result<bool, Self::Error> {
        Ok(!self.high)
    }
}

/// Potentiometer whose reading is set by the test
pub struct MockDial {
    pub raw: u16,
}

impl AnalogInput for MockDial {
    fn read(&mut self) -> u16 {
        self.raw
    }
}

/// Delay that only sums what was requested
#[derive(Default)]
pub struct MockDelay {
    pub total_ms: u64,
}

impl DelayNs for MockDelay {
    fn delay_ns(&mut self, ns: u32) {
        self.total_ms += u64::from(ns) / 1_000_000;
    }

    fn delay_ms(&mut self, ms: u32) {
        self.total_ms += u64::from(ms);
    }
}

// ============================================================================
// Mock Time Source
// ============================================================================

/// Mock time source with controllable time advancement
pub struct MockTimeSource {
    current_time: Cell<Millis>,
}

impl MockTimeSource {
    pub fn new() -> Self {
        Self {
            current_time: Cell::new(Millis(0)),
        }
    }

    /// Advance time by the given number of milliseconds (wrapping)
    pub fn advance(&self, millis: u32) {
        let current = self.current_time.get();
        self.current_time.set(Millis(current.0.wrapping_add(millis)));
    }

    pub fn set_time(&self, time: Millis) {
        self.current_time.set(time);
    }
}

impl TimeSource<Millis> for MockTimeSource {
    fn now(&self) -> Millis {
        self.current_time.get()
    }
}

// ============================================================================
// Constructors
// ============================================================================

/// Raw button levels for the default pulled-up, active-low wiring.
pub const PRESSED: bool = false;
pub const IDLE: bool = true;

pub type TestRgb = RgbLight<MockChannel, MockChannel, MockChannel, Millis>;
pub type TestController = Controller<MockChannel, MockChannel, MockChannel, MockChannel, Millis>;

pub fn rgb_light(config: &ControllerConfig) -> TestRgb {
    RgbLight::new(
        MockChannel::new(),
        MockChannel::new(),
        MockChannel::new(),
        config.polarity,
        config.timings,
    )
}

pub fn controller() -> TestController {
    controller_with(ControllerConfig::default())
}

pub fn controller_with(config: ControllerConfig) -> TestController {
    Controller::new(
        config,
        MockChannel::new(),
        MockChannel::new(),
        MockChannel::new(),
        MockChannel::new(),
    )
    .unwrap()
}

/// Duty cycles currently on the red, green and blue channels.
pub fn rendered(rgb: &TestRgb) -> (Option<u8>, Option<u8>, Option<u8>) {
    let (red, green, blue) = rgb.channels();
    (red.duty(), green.duty(), blue.duty())
}

pub fn rendered_color(rgb: &TestRgb) -> Option<Color> {
    match rendered(rgb) {
        (Some(red), Some(green), Some(blue)) => Some(Color::new(red, green, blue)),
        _ => None,
    }
}
