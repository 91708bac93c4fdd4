//! The tint service.
//!
//! # Design
//!
//! [`Tinter`] is a cheap, clonable handle to one engine instance. The
//! application's composition root constructs it once over its
//! [`StyleSource`] and hands clones to every consumer; all clones share the
//! resolved colors, the per-theme stylesheet fixup cache, and the listener
//! list.
//!
//! # Invariants
//!
//! 1. Resolved colors change only through [`Tinter::tint`] and
//!    [`Tinter::set_graphic_highlight_color`].
//! 2. A tint whose resolved accents are unchanged is a no-op unless a theme
//!    switch (or cache invalidation) forced the next one.
//! 3. Listeners run after every state write of the operation has finished,
//!    with no internal borrow held, so they may call back into read-only
//!    operations such as [`Tinter::apply_graphic_fixups`].
//!
//! # Failure Modes
//!
//! - **Malformed color**: rejected with [`TintError::InvalidColorFormat`]
//!   before any state is touched.
//! - **Panicking listener**: unwinds out of the operation; later listeners
//!   are skipped. State writes have already completed.
//! - **Re-entrant host**: a [`StyleSource`] that calls back into the engine
//!   while the engine is scanning it panics on the `RefCell` borrow.
//!
//! The handle is `!Send`: the engine lives on the thread that owns the
//! document, which is what serializes every mutation.

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use tint_color::{Rgb, derive_secondary, derive_tertiary, parse_color};

use crate::config::{ConfigError, TintConfig};
use crate::css::{CssApplySummary, CssFixupCache, apply_css_fixups, discover_css_fixups};
use crate::document::{GraphicHandle, StyleSource};
use crate::error::{Result, TintError};
use crate::graphic::{GraphicFixup, apply_graphic_fixups, discover_graphic_fixups};
use crate::listeners::{ListenerSet, Subscription};
use crate::palette::{KeyColors, ResolvedColors, Slot};
use crate::theme::{ThemeConventions, ThemeId};

struct TinterState {
    source: Rc<dyn StyleSource>,
    conventions: ThemeConventions,
    keys: KeyColors,
    colors: ResolvedColors,
    theme: Option<ThemeId>,
    force_tint: bool,
    css_cache: CssFixupCache,
}

impl TinterState {
    fn ensure_css_fixups(&mut self) -> usize {
        let Self {
            source,
            conventions,
            keys,
            theme,
            css_cache,
            ..
        } = self;
        css_cache
            .get_or_scan(theme.as_ref(), || {
                discover_css_fixups(source.as_ref(), theme.as_ref(), keys, conventions)
            })
            .len()
    }

    fn apply_cached_css(&self) -> CssApplySummary {
        let fixups = self.css_cache.get(self.theme.as_ref()).unwrap_or_default();
        apply_css_fixups(fixups, &self.colors)
    }

    fn read_theme_markers(&mut self) {
        let markers = [
            (Slot::Primary, &self.conventions.accent_marker_id),
            (Slot::Secondary, &self.conventions.secondary_accent_marker_id),
        ];
        for (slot, marker_id) in markers {
            let Some(value) = self.source.computed_color(marker_id) else {
                continue;
            };
            match parse_color(&value) {
                Ok(color) => self.keys.set_css(slot, &value, color),
                Err(err) => tracing::warn!(
                    target: "tint.engine",
                    marker = %marker_id,
                    value = %value,
                    error = %err,
                    "ignoring unparseable theme marker color"
                ),
            }
        }
    }
}

/// Handle to the accent tint engine.
#[derive(Clone)]
pub struct Tinter {
    state: Rc<RefCell<TinterState>>,
    listeners: ListenerSet,
}

impl fmt::Debug for Tinter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = self.state.borrow();
        f.debug_struct("Tinter")
            .field("theme", &state.theme)
            .field("colors", &state.colors)
            .field("force_tint", &state.force_tint)
            .field("css_cache", &state.css_cache)
            .field("listeners", &self.listeners)
            .finish()
    }
}

impl Tinter {
    /// Create an engine with the built-in keys and conventions and no active
    /// theme.
    #[must_use]
    pub fn new(source: Rc<dyn StyleSource>) -> Self {
        Self::from_parts(source, KeyColors::default(), ThemeConventions::default())
    }

    /// Create an engine from a validated configuration. Activates the
    /// configured theme, if any.
    pub fn with_config(
        source: Rc<dyn StyleSource>,
        config: &TintConfig,
    ) -> std::result::Result<Self, ConfigError> {
        let errors = config.validate();
        if !errors.is_empty() {
            return Err(ConfigError::Validation(errors));
        }
        let tinter = Self::from_parts(source, config.to_key_colors()?, config.to_conventions());
        if let Some(theme) = config.initial_theme() {
            tinter.set_theme(theme);
        }
        Ok(tinter)
    }

    /// Create an engine from explicit keys and conventions.
    #[must_use]
    pub fn from_parts(
        source: Rc<dyn StyleSource>,
        keys: KeyColors,
        conventions: ThemeConventions,
    ) -> Self {
        let colors = ResolvedColors::from_keys(&keys);
        Self {
            state: Rc::new(RefCell::new(TinterState {
                source,
                conventions,
                keys,
                colors,
                theme: None,
                force_tint: false,
                css_cache: CssFixupCache::new(),
            })),
            listeners: ListenerSet::new(),
        }
    }

    // -----------------------------------------------------------------------
    // Listeners
    // -----------------------------------------------------------------------

    /// Register a callback to run whenever the resolved colors change.
    ///
    /// There is no way to unregister it. Use this for static renderers; for
    /// a changing set of graphics register one callback for the whole set,
    /// or use [`Tinter::subscribe`].
    pub fn register_listener(&self, listener: impl Fn() + 'static) {
        self.listeners.register(listener);
    }

    /// Like [`Tinter::register_listener`], but the callback is removed when
    /// the returned guard is dropped.
    pub fn subscribe(&self, listener: impl Fn() + 'static) -> Subscription {
        self.listeners.subscribe(listener)
    }

    // -----------------------------------------------------------------------
    // Accessors
    // -----------------------------------------------------------------------

    /// The placeholder keys currently searched for.
    #[must_use]
    pub fn key_colors(&self) -> KeyColors {
        self.state.borrow().keys.clone()
    }

    /// The colors currently substituted for the placeholders.
    #[must_use]
    pub fn current_colors(&self) -> ResolvedColors {
        self.state.borrow().colors
    }

    #[must_use]
    pub fn theme(&self) -> Option<ThemeId> {
        self.state.borrow().theme.clone()
    }

    /// Number of cached stylesheet fixups for the active theme, or `None`
    /// if it has not been scanned.
    #[must_use]
    pub fn css_fixup_count(&self) -> Option<usize> {
        let state = self.state.borrow();
        state.css_cache.get(state.theme.as_ref()).map(<[_]>::len)
    }

    /// Number of stylesheet scans performed so far.
    #[must_use]
    pub fn css_scan_count(&self) -> u64 {
        self.state.borrow().css_cache.scan_count()
    }

    // -----------------------------------------------------------------------
    // Tinting
    // -----------------------------------------------------------------------

    /// Tint with up to three accent colors, given as hex or `rgb()` strings.
    ///
    /// - No primary: the theme's primary and secondary keys are used as-is
    ///   (any given secondary is ignored).
    /// - No secondary: derived from the primary.
    /// - No tertiary: derived from the primary and the secondary.
    ///
    /// Returns `Ok(false)` when nothing changed and no retint was forced.
    pub fn tint(
        &self,
        primary: Option<&str>,
        secondary: Option<&str>,
        tertiary: Option<&str>,
    ) -> Result<bool> {
        let primary = parse_optional(primary)?;
        let secondary = parse_optional(secondary)?;
        let tertiary = parse_optional(tertiary)?;
        Ok(self.tint_rgb(primary, secondary, tertiary))
    }

    /// [`Tinter::tint`] with already-parsed colors.
    pub fn tint_rgb(
        &self,
        primary: Option<Rgb>,
        secondary: Option<Rgb>,
        tertiary: Option<Rgb>,
    ) -> bool {
        {
            let mut state = self.state.borrow_mut();
            state.ensure_css_fixups();

            let (primary, secondary) = match primary {
                None => {
                    let [primary_key, secondary_key, _] = state.keys.css_keys();
                    (primary_key, secondary_key)
                }
                Some(primary) => (
                    primary,
                    secondary.unwrap_or_else(|| derive_secondary(primary)),
                ),
            };
            let tertiary = tertiary.unwrap_or_else(|| derive_tertiary(primary, secondary));
            let accents = [primary, secondary, tertiary];

            if !state.force_tint && state.colors.accents() == accents {
                return false;
            }

            state.force_tint = false;
            for (slot, color) in Slot::CSS.into_iter().zip(accents) {
                state.colors.set(slot, color);
            }
            let summary = state.apply_cached_css();
            tracing::debug!(
                target: "tint.engine",
                primary = %primary,
                secondary = %secondary,
                tertiary = %tertiary,
                applied = summary.applied,
                failed = summary.failed,
                "tint applied"
            );
        }

        self.listeners.notify();
        true
    }

    /// Replace the color substituted for white highlights in graphics.
    ///
    /// `None` or the current value is a no-op. Stylesheets are untouched.
    pub fn set_graphic_highlight_color(&self, color: Option<&str>) -> Result<bool> {
        match parse_optional(color)? {
            Some(color) => Ok(self.set_graphic_highlight_rgb(color)),
            None => Ok(false),
        }
    }

    /// [`Tinter::set_graphic_highlight_color`] with an already-parsed color.
    pub fn set_graphic_highlight_rgb(&self, color: Rgb) -> bool {
        {
            let mut state = self.state.borrow_mut();
            if state.colors.get(Slot::Highlight) == color {
                return false;
            }
            state.colors.set(Slot::Highlight, color);
        }
        tracing::debug!(target: "tint.engine", highlight = %color, "graphic highlight changed");
        self.listeners.notify();
        true
    }

    // -----------------------------------------------------------------------
    // Themes and stylesheet fixups
    // -----------------------------------------------------------------------

    /// Activate `theme`.
    ///
    /// Re-reads the primary and secondary stylesheet keys from the theme's
    /// marker elements when they exist, computes (or reuses) the theme's
    /// stylesheet fixups, and forces the next [`Tinter::tint`] to apply even
    /// if the colors are unchanged.
    pub fn set_theme(&self, theme: impl Into<ThemeId>) {
        let theme = theme.into();
        let mut state = self.state.borrow_mut();
        state.theme = Some(theme.clone());
        state.read_theme_markers();
        let fixups = state.ensure_css_fixups();
        state.force_tint = true;
        tracing::info!(target: "tint.engine", theme = %theme, fixups, "theme activated");
    }

    /// Scan the active theme's stylesheets unless already cached. Returns the
    /// number of fixups for the theme.
    pub fn compute_css_fixups(&self) -> usize {
        self.state.borrow_mut().ensure_css_fixups()
    }

    /// Write the current colors through the active theme's cached fixups.
    pub fn apply_css_fixups(&self) -> CssApplySummary {
        self.state.borrow().apply_cached_css()
    }

    /// Drop every theme's cached fixups and force the next tint.
    ///
    /// For hosts that replace or edit stylesheets at runtime.
    pub fn invalidate_css_fixups(&self) {
        let mut state = self.state.borrow_mut();
        state.css_cache.clear();
        state.force_tint = true;
        tracing::debug!(target: "tint.engine", "css fixup cache invalidated");
    }

    // -----------------------------------------------------------------------
    // Graphic fixups
    // -----------------------------------------------------------------------

    /// Find the placeholder attributes in a snapshot of graphic documents.
    ///
    /// The result is not cached; recompute it when the set of documents
    /// changes.
    pub fn compute_graphic_fixups(&self, handles: &[Rc<dyn GraphicHandle>]) -> Vec<GraphicFixup> {
        let keys = self.key_colors();
        discover_graphic_fixups(handles, &keys)
    }

    /// Write the current colors through `fixups`.
    pub fn apply_graphic_fixups(&self, fixups: &[GraphicFixup]) {
        let colors = self.current_colors();
        apply_graphic_fixups(fixups, &colors);
    }
}

fn parse_optional(input: Option<&str>) -> Result<Option<Rgb>> {
    input
        .map(|s| parse_color(s).map_err(|err| TintError::invalid_color(s, err)))
        .transpose()
}
