//! Accent shade derivation.
//!
//! Both shades are per-channel linear blends with fixed weights. The weights
//! were solved from the shipped brand pair: `x * 118 + (1 - x) * 255 = 234`
//! gives `x = (255 - 234) / (255 - 118) ≈ 0.16` for the secondary shade.
//! They must stay exactly as they are; every asset was authored against them.
//!
//! Blended channels are truncated toward zero, never rounded.

use crate::rgb::Rgb;

/// Weight of the primary color when blending toward white.
pub const SECONDARY_WEIGHT: f64 = 0.16;

/// Weight of the primary color when blending toward the secondary shade.
pub const TERTIARY_WEIGHT: f64 = 0.19;

/// Blend `a` toward `b`: `weight * a + (1 - weight) * b` per channel,
/// truncated.
#[must_use]
pub fn mix(a: Rgb, b: Rgb, weight: f64) -> Rgb {
    let channel = |x: u8, y: u8| (weight * f64::from(x) + (1.0 - weight) * f64::from(y)) as u8;
    Rgb::new(channel(a.r, b.r), channel(a.g, b.g), channel(a.b, b.b))
}

/// Secondary accent: the primary blended toward white.
#[must_use]
pub fn derive_secondary(primary: Rgb) -> Rgb {
    mix(primary, Rgb::WHITE, SECONDARY_WEIGHT)
}

/// Tertiary accent: the primary blended toward the secondary.
#[must_use]
pub fn derive_tertiary(primary: Rgb, secondary: Rgb) -> Rgb {
    mix(primary, secondary, TERTIARY_WEIGHT)
}
