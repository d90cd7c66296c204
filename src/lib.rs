#![cfg_attr(not(feature = "std"), no_std)]
#![doc = include_str!("../README.md")]

//! # Core Concepts
//!
//! - **`ButtonMonitor`**: Turns a raw, bouncing button level into `ShortPress`, `LongPress` and `Release`
//! - **`DimmableLight`**: On/off plus intensity for the single white channel
//! - **`RgbLight`**: On/off, color, speed and one of four animations (`Mode`) for the RGB channels
//! - **`Controller`**: Maps button events and dial movement onto the two lights and runs the poll loop
//! - **`OutputChannel`**: Trait to implement for one PWM output (or wrap an `embedded-hal` channel in `PwmChannel`)
//! - **`AnalogInput`**: Trait to implement for the potentiometer ADC
//! - **`TimeSource`**: Trait to implement for your millisecond clock (`Millis` covers wrapping `u32` ticks)
//! - **`ControllerConfig`**: Build-time thresholds, intervals, polarity and default color
//!
//! Everything is driven by polling from a single execution context. Colors
//! are `Srgb<u8>`, so each channel value is the duty cycle written to the
//! hardware after the polarity rule.

// Re-export Srgb from palette for user convenience
pub use palette::Srgb;

pub mod button;
pub mod color;
pub mod config;
pub mod controller;
pub mod light;
pub mod output;
pub mod rgb;
pub mod time;

pub use button::{ButtonEvent, ButtonHandler, ButtonMonitor};
pub use color::Color;
pub use config::{AnimationTimings, ButtonConfig, ConfigError, ControllerConfig};
pub use controller::{Controller, SystemState};
pub use light::{DimmableLight, LightState};
pub use output::{AnalogInput, Level, OutputChannel, Polarity, PwmChannel};
pub use rgb::{Mode, RgbLight};
pub use time::{Millis, MillisDuration, TimeDuration, TimeInstant, TimeSource};
