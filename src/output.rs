//! Hardware seams: output channels, polarity and analog input.

use embedded_hal::pwm::SetDutyCycle;

/// Discrete output level.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Level {
    Low,
    High,
}

/// LED wiring polarity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Polarity {
    /// Common cathode: a higher duty cycle is brighter.
    #[default]
    CommonCathode,
    /// Common anode: the output sinks current, so the duty cycle is inverted.
    CommonAnode,
}

impl Polarity {
    /// Converts a brightness into the duty cycle to write.
    #[inline]
    pub fn duty(self, brightness: u8) -> u8 {
        match self {
            Polarity::CommonCathode => brightness,
            Polarity::CommonAnode => u8::MAX - brightness,
        }
    }

    /// The discrete level that fully extinguishes the LED.
    #[inline]
    pub fn off_level(self) -> Level {
        match self {
            Polarity::CommonCathode => Level::Low,
            Polarity::CommonAnode => Level::High,
        }
    }
}

/// Trait for abstracting one physical LED output.
///
/// Implement this for your PWM hardware. Neither method can fail; handle any
/// hardware errors internally.
pub trait OutputChannel {
    /// Writes an 8-bit duty cycle.
    fn write_duty(&mut self, duty: u8);

    /// Drives the output to a discrete level, bypassing the PWM.
    fn set_level(&mut self, level: Level);
}

/// [`OutputChannel`] for any `embedded-hal` PWM channel.
///
/// Duty cycles are scaled from `0..=255` onto the channel's own range and
/// discrete levels map to fully on / fully off.
pub struct PwmChannel<P> {
    pwm: P,
}

impl<P: SetDutyCycle> PwmChannel<P> {
    pub fn new(pwm: P) -> Self {
        Self { pwm }
    }

    /// Releases the wrapped PWM channel.
    pub fn free(self) -> P {
        self.pwm
    }
}

impl<P: SetDutyCycle> OutputChannel for PwmChannel<P> {
    fn write_duty(&mut self, duty: u8) {
        self.pwm
            .set_duty_cycle_fraction(u16::from(duty), u16::from(u8::MAX))
            .ok();
    }

    fn set_level(&mut self, level: Level) {
        match level {
            Level::High => self.pwm.set_duty_cycle_fully_on(),
            Level::Low => self.pwm.set_duty_cycle_fully_off(),
        }
        .ok();
    }
}

/// Trait for abstracting the potentiometer ADC.
pub trait AnalogInput {
    /// Returns a 10-bit sample in `0..=1023`.
    fn read(&mut self) -> u16;
}

/// Highest value an [`AnalogInput`] is expected to return.
pub const ANALOG_MAX: u16 = 1023;
