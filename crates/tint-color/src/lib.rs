#![forbid(unsafe_code)]

//! Color primitives for the accent tint engine.
//!
//! # Role in the workspace
//! `tint-color` is the shared vocabulary for colors. `tint-engine` uses it to
//! parse caller-supplied accent colors, to format the values it writes into
//! style declarations and graphic attributes, and to derive the secondary and
//! tertiary accent shades from a single primary color.
//!
//! # This crate provides
//! - [`Rgb`], an opaque 24-bit color with `#rrggbb` and `rgb(r, g, b)` forms.
//! - [`parse_hex`], [`parse_css_rgb`] and [`parse_color`], all failing with
//!   [`ColorParseError`] instead of producing garbage channels.
//! - [`derive_secondary`] and [`derive_tertiary`], the fixed linear blends.

/// Accent shade derivation.
pub mod blend;
/// Hex and `rgb()` parsing.
pub mod parse;
/// The [`Rgb`] color type.
pub mod rgb;

pub use blend::{SECONDARY_WEIGHT, TERTIARY_WEIGHT, derive_secondary, derive_tertiary, mix};
pub use parse::{ColorParseError, parse_color, parse_css_rgb, parse_hex};
pub use rgb::Rgb;
