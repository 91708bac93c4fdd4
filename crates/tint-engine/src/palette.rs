//! Placeholder keys and the resolved color set.
//!
//! Shipped assets contain literal placeholder colors. The engine finds them
//! by comparing against [`KeyColors`] and replaces them with the matching slot
//! of [`ResolvedColors`]. Stylesheet keys are matched as the exact text the
//! style engine reports (or the configuration states), so each one keeps that
//! text next to its parsed color. Graphic keys are typed colors matched as
//! hex.

use std::ops::Index;

use tint_color::Rgb;

/// A position in the key and resolved color lists.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Slot {
    /// The accent color.
    Primary,
    /// Light accent, derived by blending the primary toward white.
    Secondary,
    /// Accent overlaid on the light accent.
    Tertiary,
    /// White highlights inside graphics. Never tracked in stylesheets.
    Highlight,
}

impl Slot {
    /// Slots tracked in stylesheets.
    pub const CSS: [Self; 3] = [Self::Primary, Self::Secondary, Self::Tertiary];

    /// Slots tracked in graphics.
    pub const ALL: [Self; 4] = [Self::Primary, Self::Secondary, Self::Tertiary, Self::Highlight];

    #[must_use]
    pub const fn index(self) -> usize {
        match self {
            Self::Primary => 0,
            Self::Secondary => 1,
            Self::Tertiary => 2,
            Self::Highlight => 3,
        }
    }
}

/// Default stylesheet keys: brand green, light green, and green over light green.
pub const DEFAULT_CSS_KEYS: [Rgb; 3] = [
    Rgb::new(118, 207, 166),
    Rgb::new(234, 245, 240),
    Rgb::new(211, 239, 225),
];

/// Default graphic keys: the stylesheet keys plus white highlights.
pub const DEFAULT_GRAPHIC_KEYS: [Rgb; 4] = [
    Rgb::new(0x76, 0xcf, 0xa6),
    Rgb::new(0xea, 0xf5, 0xf0),
    Rgb::new(0xd3, 0xef, 0xe1),
    Rgb::WHITE,
];

/// Placeholder colors the engine searches for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyColors {
    css: [Rgb; 3],
    css_text: [String; 3],
    graphic: [Rgb; 4],
}

impl Default for KeyColors {
    fn default() -> Self {
        Self::new(DEFAULT_CSS_KEYS, DEFAULT_GRAPHIC_KEYS)
    }
}

impl KeyColors {
    /// Keys whose stylesheet text is the `rgb(r, g, b)` form of each color.
    #[must_use]
    pub fn new(css: [Rgb; 3], graphic: [Rgb; 4]) -> Self {
        Self {
            css,
            css_text: css.map(Rgb::to_css_rgb),
            graphic,
        }
    }

    /// Keys with explicit stylesheet text. `css_text[i]` is matched verbatim
    /// and must describe `css[i]`.
    #[must_use]
    pub fn with_css_text(css: [Rgb; 3], css_text: [String; 3], graphic: [Rgb; 4]) -> Self {
        Self {
            css,
            css_text,
            graphic,
        }
    }

    /// Stylesheet key for `slot`; `None` for [`Slot::Highlight`].
    #[must_use]
    pub fn css(&self, slot: Slot) -> Option<Rgb> {
        self.css.get(slot.index()).copied()
    }

    /// Text a declaration must hold to match the stylesheet key for `slot`.
    #[must_use]
    pub fn css_text(&self, slot: Slot) -> Option<&str> {
        self.css_text.get(slot.index()).map(String::as_str)
    }

    #[must_use]
    pub fn graphic(&self, slot: Slot) -> Rgb {
        self.graphic[slot.index()]
    }

    #[must_use]
    pub const fn css_keys(&self) -> [Rgb; 3] {
        self.css
    }

    #[must_use]
    pub const fn graphic_keys(&self) -> [Rgb; 4] {
        self.graphic
    }

    /// Stylesheet key texts paired with their slot.
    #[must_use]
    pub fn css_patterns(&self) -> Vec<(Slot, String)> {
        Slot::CSS.into_iter().zip(self.css_text.clone()).collect()
    }

    /// Graphic keys as hex literals, paired with their slot.
    #[must_use]
    pub fn graphic_patterns(&self) -> Vec<(Slot, String)> {
        Slot::ALL
            .into_iter()
            .zip(self.graphic)
            .map(|(slot, key)| (slot, key.to_hex()))
            .collect()
    }

    /// Replace a stylesheet key with a color reported as `text`. Ignored for
    /// [`Slot::Highlight`].
    pub(crate) fn set_css(&mut self, slot: Slot, text: &str, color: Rgb) {
        let index = slot.index();
        if index < self.css.len() {
            self.css[index] = color;
            self.css_text[index] = text.to_owned();
        }
    }
}

/// The four colors currently substituted for the placeholders.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResolvedColors([Rgb; 4]);

impl ResolvedColors {
    /// Resolved colors that leave every placeholder untouched.
    #[must_use]
    pub const fn from_keys(keys: &KeyColors) -> Self {
        Self(keys.graphic)
    }

    #[must_use]
    pub fn get(&self, slot: Slot) -> Rgb {
        self.0[slot.index()]
    }

    /// Primary, secondary and tertiary.
    #[must_use]
    pub fn accents(&self) -> [Rgb; 3] {
        [self.0[0], self.0[1], self.0[2]]
    }

    /// Every slot as `#rrggbb`.
    #[must_use]
    pub fn to_hex(&self) -> [String; 4] {
        self.0.map(Rgb::to_hex)
    }

    pub(crate) fn set(&mut self, slot: Slot, color: Rgb) {
        self.0[slot.index()] = color;
    }
}

impl Index<Slot> for ResolvedColors {
    type Output = Rgb;

    fn index(&self, slot: Slot) -> &Rgb {
        &self.0[slot.index()]
    }
}
