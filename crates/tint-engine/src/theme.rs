//! Theme identity and the naming conventions tied to it.

use std::borrow::Borrow;
use std::fmt;

/// Identifier of a theme, e.g. `"light"` or `"dark"`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ThemeId(String);

impl ThemeId {
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ThemeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ThemeId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl From<String> for ThemeId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl Borrow<str> for ThemeId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

/// How a theme's stylesheet and its brand-color markers are recognised.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ThemeConventions {
    /// Text preceding the theme id in a theme stylesheet's href.
    pub stylesheet_prefix: String,
    /// Text following the theme id in a theme stylesheet's href.
    pub stylesheet_suffix: String,
    /// Rules whose selector contains this text define the theme and are
    /// never rewritten.
    pub definition_selector: String,
    /// Element whose computed color overrides the primary key.
    pub accent_marker_id: String,
    /// Element whose computed color overrides the secondary key.
    pub secondary_accent_marker_id: String,
}

impl Default for ThemeConventions {
    fn default() -> Self {
        Self {
            stylesheet_prefix: "/theme-".into(),
            stylesheet_suffix: ".css".into(),
            definition_selector: "#theme-".into(),
            accent_marker_id: "theme-accent-color-marker".into(),
            secondary_accent_marker_id: "theme-secondary-accent-color-marker".into(),
        }
    }
}

impl ThemeConventions {
    /// Whether a sheet loaded from `href` belongs to `theme`.
    ///
    /// Inline sheets (no href) always belong to the active theme. With no
    /// active theme, no external sheet does.
    #[must_use]
    pub fn stylesheet_matches(&self, href: Option<&str>, theme: Option<&ThemeId>) -> bool {
        let Some(href) = href else {
            return true;
        };
        let Some(theme) = theme else {
            return false;
        };
        href.strip_suffix(self.stylesheet_suffix.as_str())
            .and_then(|rest| rest.strip_suffix(theme.as_str()))
            .is_some_and(|rest| rest.ends_with(self.stylesheet_prefix.as_str()))
    }

    /// Whether a rule with this selector defines the theme itself.
    #[must_use]
    pub fn is_definition_rule(&self, selector: Option<&str>) -> bool {
        selector.is_some_and(|s| s.contains(self.definition_selector.as_str()))
    }
}
