//! 8-bit RGB colors and the potentiometer color mixer.
//!
//! Colors are `palette::Srgb<u8>` so every channel is a PWM duty cycle in
//! `0..=255`. Packed colors use the `0xRRGGBB` layout.

use palette::Srgb;

/// An RGB color with one duty cycle per channel.
pub type Color = Srgb<u8>;

pub const BLACK: Color = Color::new(0x00, 0x00, 0x00);
pub const WHITE: Color = Color::new(0xFF, 0xFF, 0xFF);
pub const RED: Color = Color::new(0xFF, 0x00, 0x00);
pub const GREEN: Color = Color::new(0x00, 0xFF, 0x00);
pub const BLUE: Color = Color::new(0x00, 0x00, 0xFF);
pub const YELLOW: Color = Color::new(0xFF, 0xFF, 0x00);
pub const CYAN: Color = Color::new(0x00, 0xFF, 0xFF);
pub const MAGENTA: Color = Color::new(0xFF, 0x00, 0xFF);
pub const DARK_PURPLE: Color = Color::new(0x30, 0x00, 0x30);

/// Width of one band of the dial hue ramp.
const BAND_WIDTH: u16 = 341;

/// Unpacks a `0xRRGGBB` value. Bits above 23 are ignored.
#[inline]
pub const fn from_hex(hex: u32) -> Color {
    Color::new(
        ((hex >> 16) & 0xFF) as u8,
        ((hex >> 8) & 0xFF) as u8,
        (hex & 0xFF) as u8,
    )
}

/// Packs a color into `0xRRGGBB`.
#[inline]
pub const fn to_hex(color: Color) -> u32 {
    ((color.red as u32) << 16) | ((color.green as u32) << 8) | color.blue as u32
}

/// Maps a raw 10-bit dial reading onto a three-band hue ramp.
///
/// Each band is 341 readings wide and cross-fades two channels while the
/// third is pinned at 1, so the ramp never reaches true black:
///
/// | reading      | red        | green      | blue       |
/// |--------------|------------|------------|------------|
/// | `0..341`     | falling    | rising     | 1          |
/// | `341..682`   | 1          | falling    | rising     |
/// | `682..=1023` | rising     | 1          | falling    |
///
/// The falling channel starts at 256 and saturates to 255. Readings above
/// 1023 are treated as 1023.
pub fn from_dial(raw: u16) -> Color {
    let raw = raw.min(1023);
    let (band, offset) = if raw < BAND_WIDTH {
        (0, raw)
    } else if raw < 2 * BAND_WIDTH {
        (1, raw - BAND_WIDTH)
    } else {
        (2, raw - 2 * BAND_WIDTH)
    };

    let rising = offset * 3 / 4;
    let falling = (256 - rising).min(255) as u8;
    let rising = rising.min(255) as u8;

    match band {
        0 => Color::new(falling, rising, 1),
        1 => Color::new(1, falling, rising),
        _ => Color::new(rising, 1, falling),
    }
}
