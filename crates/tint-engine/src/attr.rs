//! Tracked attribute tables.
//!
//! The engine only ever reads and writes a fixed set of properties: six color
//! properties on style declarations and two paint attributes on graphic
//! elements. Hosts map these enums onto their own property access.

use std::fmt;

/// A color-valued CSS property that may carry a placeholder key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CssAttribute {
    /// `color`
    Color,
    /// `background-color`
    BackgroundColor,
    /// `border-color`
    BorderColor,
    /// `border-top-color`
    BorderTopColor,
    /// `border-bottom-color`
    BorderBottomColor,
    /// `border-left-color`
    BorderLeftColor,
}

impl CssAttribute {
    /// Every tracked CSS property, in scan order.
    pub const ALL: [Self; 6] = [
        Self::Color,
        Self::BackgroundColor,
        Self::BorderColor,
        Self::BorderTopColor,
        Self::BorderBottomColor,
        Self::BorderLeftColor,
    ];

    /// The hyphenated CSS property name.
    #[must_use]
    pub const fn css_name(self) -> &'static str {
        match self {
            Self::Color => "color",
            Self::BackgroundColor => "background-color",
            Self::BorderColor => "border-color",
            Self::BorderTopColor => "border-top-color",
            Self::BorderBottomColor => "border-bottom-color",
            Self::BorderLeftColor => "border-left-color",
        }
    }

    /// Look a property up by its CSS name.
    #[must_use]
    pub fn from_css_name(name: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|attr| attr.css_name().eq_ignore_ascii_case(name.trim()))
    }
}

impl fmt::Display for CssAttribute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.css_name())
    }
}

/// A paint attribute on a vector-graphic element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GraphicAttribute {
    /// `fill`
    Fill,
    /// `stroke`
    Stroke,
}

impl GraphicAttribute {
    /// Every tracked graphic attribute, in scan order.
    pub const ALL: [Self; 2] = [Self::Fill, Self::Stroke];

    /// The attribute name as written in markup.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Fill => "fill",
            Self::Stroke => "stroke",
        }
    }

    /// Look an attribute up by name.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|attr| attr.name().eq_ignore_ascii_case(name.trim()))
    }
}

impl fmt::Display for GraphicAttribute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
