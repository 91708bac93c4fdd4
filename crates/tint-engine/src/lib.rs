#![forbid(unsafe_code)]

//! Runtime accent tinting for stylesheets and embedded vector graphics.
//!
//! Themes and graphics are authored with a handful of fixed placeholder
//! colors ("keys"). At runtime the engine finds every place a key appears and
//! rewrites it to the user's accent color, or to a shade derived from it.
//!
//! # Key Components
//!
//! - [`Tinter`] - The engine handle: resolved colors, theme switching, the
//!   per-theme stylesheet fixup cache and change listeners
//! - [`StyleSource`], [`GraphicHandle`] - The host document seams
//! - [`CssFixup`], [`GraphicFixup`] - Attributes that must track a color slot
//! - [`TintConfig`] - Keys and theme naming conventions, loadable from TOML
//!   or JSON with the `config` feature
//! - [`memory`] - In-memory document implementations for hosts and tests
//!
//! # How it fits together
//! The host implements the document traits over its style engine. On startup
//! it builds one [`Tinter`], activates a theme and calls [`Tinter::tint`].
//! Stylesheet declarations are rewritten by the engine itself; graphics are
//! rewritten by the caller, which computes [`GraphicFixup`]s for the
//! documents it renders and re-applies them from a change listener.
//!
//! # Tracing
//!
//! | Target        | Events |
//! |---------------|--------|
//! | `tint.css`    | stylesheet scans (span `tint.css.scan`), skipped sheets, failed writes |
//! | `tint.graphic`| graphic scans, inaccessible documents |
//! | `tint.engine` | tints, highlight changes, theme activation |

pub mod attr;
pub mod config;
pub mod css;
pub mod document;
pub mod error;
pub mod graphic;
pub mod listeners;
pub mod memory;
pub mod palette;
pub mod theme;
pub mod tinter;

pub use attr::{CssAttribute, GraphicAttribute};
pub use config::{ConfigError, ConventionsConfig, KeyConfig, TintConfig};
pub use css::{CssApplySummary, CssFixup, CssFixupCache};
pub use document::{
    CssRule, GraphicDocument, GraphicElement, GraphicHandle, StyleDeclaration, StyleSheet,
    StyleSource,
};
pub use error::{DocumentError, Result, TintError};
pub use graphic::GraphicFixup;
pub use listeners::{ListenerSet, Subscription};
pub use palette::{KeyColors, ResolvedColors, Slot};
pub use theme::{ThemeConventions, ThemeId};
pub use tinter::Tinter;

pub use tint_color::{ColorParseError, Rgb};
