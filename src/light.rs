//! Single-channel dimmable light (the white LEDs of the strip).

use crate::output::{OutputChannel, Polarity};

/// Whether a light is lit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum LightState {
    On,
    Off,
}

impl From<bool> for LightState {
    fn from(on: bool) -> Self {
        if on { LightState::On } else { LightState::Off }
    }
}

/// On/off plus intensity for one output channel.
///
/// The on flag and the intensity are tracked separately: turning on after
/// the intensity was set to zero restores full brightness instead of
/// staying lit but invisible.
pub struct DimmableLight<C: OutputChannel> {
    channel: C,
    polarity: Polarity,
    on: bool,
    intensity: u8,
}

impl<C: OutputChannel> DimmableLight<C> {
    /// Creates a light that is off, at full stored intensity.
    ///
    /// Nothing is written to the channel until the first state change.
    pub fn new(channel: C, polarity: Polarity) -> Self {
        Self {
            channel,
            polarity,
            on: false,
            intensity: u8::MAX,
        }
    }

    /// Lights at the stored intensity. No-op when already on.
    pub fn turn_on(&mut self) {
        if self.on {
            return;
        }
        if self.intensity == 0 {
            self.intensity = u8::MAX;
        }
        self.render();
        self.on = true;
    }

    /// Drives the hard-off level. No-op when already off.
    pub fn turn_off(&mut self) {
        if !self.on {
            return;
        }
        self.channel.set_level(self.polarity.off_level());
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

    /// Sets the brightness.
    ///
    /// Zero while on turns the light off. Any value while off turns the
    /// light on, so a single dial can both power on and dim.
    pub fn set_intensity(&mut self, intensity: u8) {
        self.intensity = intensity;
        if self.on {
            if intensity == 0 {
                self.turn_off();
            } else {
                self.render();
            }
        } else {
            self.turn_on();
        }
    }

    pub fn intensity(&self) -> u8 {
        self.intensity
    }

    pub fn state(&self) -> LightState {
        LightState::from(self.on)
    }

    pub fn is_on(&self) -> bool {
        self.on
    }

    pub fn polarity(&self) -> Polarity {
        self.polarity
    }

    /// Returns a reference to the output channel.
    pub fn channel(&self) -> &C {
        &self.channel
    }

    /// Releases the output channel.
    pub fn free(self) -> C {
        self.channel
    }

    fn render(&mut self) {
        self.channel.write_duty(self.polarity.duty(self.intensity));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::output::Level;

    #[derive(Debug, Default)]
    struct FakeChannel {
        duty: Option<u8>,
        level: Option<Level>,
    }

    impl OutputChannel for FakeChannel {
        fn write_duty(&mut self, duty: u8) {
            self.duty = Some(duty);
            self.level = None;
        }

        fn set_level(&mut self, level: Level) {
            self.level = Some(level);
            self.duty = None;
        }
    }

    fn light(polarity: Polarity) -> DimmableLight<FakeChannel> {
        DimmableLight::new(FakeChannel::default(), polarity)
    }

    #[test]
    fn new_light_is_off_and_untouched() {
        let light = light(Polarity::CommonCathode);
        assert_eq!(light.state(), LightState::Off);
        assert_eq!(light.intensity(), 255);
        assert_eq!(light.channel().duty, None);
        assert_eq!(light.channel().level, None);
    }

    #[test]
    fn rendered_duty_follows_polarity_for_every_intensity() {
        let mut cathode = light(Polarity::CommonCathode);
        let mut anode = light(Polarity::CommonAnode);
        cathode.turn_on();
        anode.turn_on();

        for intensity in 1..=u8::MAX {
            cathode.set_intensity(intensity);
            anode.set_intensity(intensity);
            assert_eq!(cathode.channel().duty, Some(intensity));
            assert_eq!(anode.channel().duty, Some(255 - intensity));
        }
    }

    #[test]
    fn turn_off_uses_hard_level() {
        let mut cathode = light(Polarity::CommonCathode);
        cathode.turn_on();
        cathode.turn_off();
        assert_eq!(cathode.channel().level, Some(Level::Low));

        let mut anode = light(Polarity::CommonAnode);
        anode.turn_on();
        anode.turn_off();
        assert_eq!(anode.channel().level, Some(Level::High));
    }

    #[test]
    fn zero_intensity_while_on_turns_off() {
        let mut light = light(Polarity::CommonCathode);
        light.turn_on();
        light.set_intensity(0);
        assert_eq!(light.state(), LightState::Off);
        assert_eq!(light.channel().level, Some(Level::Low));
    }

    #[test]
    fn nonzero_intensity_while_off_turns_on() {
        let mut light = light(Polarity::CommonCathode);
        light.set_intensity(40);
        assert!(light.is_on());
        assert_eq!(light.channel().duty, Some(40));
    }

    #[test]
    fn turning_on_after_zero_restores_full_brightness() {
        let mut light = light(Polarity::CommonCathode);
        light.turn_on();
        light.set_intensity(0);
        light.turn_on();
        assert_eq!(light.intensity(), 255);
        assert_eq!(light.channel().duty, Some(255));
    }

    #[test]
    fn toggle_and_set_state() {
        let mut light = light(Polarity::CommonCathode);
        assert_eq!(light.toggle(), LightState::On);
        assert_eq!(light.toggle(), LightState::Off);
        light.set_state(LightState::On);
        assert!(light.is_on());
        light.set_state(LightState::Off);
        assert!(!light.is_on());
    }

    #[test]
    fn turn_off_is_idempotent() {
        let mut light = light(Polarity::CommonCathode);
        light.turn_off();
        assert_eq!(light.channel().level, None);
    }
}
