//! Stylesheet fixups: discovery, per-theme cache, and application.
//!
//! Discovery is a one-time linear scan over sheets × rules × tracked
//! attributes × keys. Its result is cached per theme and reused verbatim on
//! every later tint until the cache is explicitly invalidated; stylesheet
//! content is never re-checked.

use std::collections::HashMap;
use std::fmt;
use std::rc::Rc;

use crate::attr::CssAttribute;
use crate::document::{StyleDeclaration, StyleSource};
use crate::palette::{KeyColors, ResolvedColors, Slot};
use crate::theme::{ThemeConventions, ThemeId};

/// One style property that must track a resolved color slot.
#[derive(Clone)]
pub struct CssFixup {
    pub style: Rc<dyn StyleDeclaration>,
    pub attr: CssAttribute,
    pub slot: Slot,
}

impl fmt::Debug for CssFixup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CssFixup")
            .field("attr", &self.attr)
            .field("slot", &self.slot)
            .finish_non_exhaustive()
    }
}

/// Outcome of writing a fixup list.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CssApplySummary {
    pub applied: usize,
    pub failed: usize,
}

/// Scan every stylesheet belonging to `theme` for declarations whose value is
/// one of the stylesheet keys.
///
/// Sheets the host cannot expose, sheets of other themes, disabled sheets and
/// sheets whose rules cannot be read are skipped. Rules that define the theme
/// itself are never targets.
pub fn discover_css_fixups(
    source: &dyn StyleSource,
    theme: Option<&ThemeId>,
    keys: &KeyColors,
    conventions: &ThemeConventions,
) -> Vec<CssFixup> {
    let sheets = source.style_sheets();
    let _span = tracing::debug_span!(
        "tint.css.scan",
        theme = theme.map(ThemeId::as_str),
        sheets = sheets.len(),
    )
    .entered();
    tracing::debug!(target: "tint.css", sheets = sheets.len(), "css fixup scan started");

    let patterns = keys.css_patterns();
    let mut fixups = Vec::new();

    for (sheet_index, sheet) in sheets.into_iter().enumerate() {
        let Some(sheet) = sheet else {
            tracing::debug!(target: "tint.css", sheet_index, "skipping unavailable stylesheet");
            continue;
        };
        let href = sheet.href();
        if !conventions.stylesheet_matches(href.as_deref(), theme) {
            continue;
        }
        if sheet.is_disabled() {
            continue;
        }
        let rules = match sheet.rules() {
            Ok(rules) => rules,
            Err(err) => {
                tracing::warn!(
                    target: "tint.css",
                    sheet_index,
                    href = href.as_deref().unwrap_or("<inline>"),
                    error = %err,
                    "skipping stylesheet with inaccessible rules"
                );
                continue;
            }
        };

        for rule in rules {
            let Some(style) = rule.style() else {
                continue;
            };
            if conventions.is_definition_rule(rule.selector_text().as_deref()) {
                continue;
            }
            for attr in CssAttribute::ALL {
                let Some(value) = style.property(attr) else {
                    continue;
                };
                for (slot, pattern) in &patterns {
                    if value == *pattern {
                        fixups.push(CssFixup {
                            style: Rc::clone(&style),
                            attr,
                            slot: *slot,
                        });
                    }
                }
            }
        }
    }

    tracing::debug!(target: "tint.css", fixups = fixups.len(), "css fixup scan finished");
    fixups
}

/// Write the resolved color of each fixup's slot into its declaration.
///
/// Writes are isolated: a stale declaration is logged and the remaining
/// fixups are still applied.
pub fn apply_css_fixups(fixups: &[CssFixup], colors: &ResolvedColors) -> CssApplySummary {
    tracing::debug!(target: "tint.css", fixups = fixups.len(), "applying css fixups");
    let mut summary = CssApplySummary::default();
    for fixup in fixups {
        let value = colors[fixup.slot].to_hex();
        match fixup.style.set_property(fixup.attr, &value) {
            Ok(()) => summary.applied += 1,
            Err(err) => {
                summary.failed += 1;
                tracing::error!(
                    target: "tint.css",
                    attr = %fixup.attr,
                    error = %err,
                    "failed to apply css fixup"
                );
            }
        }
    }
    summary
}

/// Per-theme memo of discovered fixups.
///
/// Lookups borrow the theme id; it is cloned only when a scan stores a new
/// entry.
#[derive(Default)]
pub struct CssFixupCache {
    themed: HashMap<ThemeId, Vec<CssFixup>>,
    unthemed: Option<Vec<CssFixup>>,
    scans: u64,
}

impl fmt::Debug for CssFixupCache {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CssFixupCache")
            .field("themes", &self.themed.len())
            .field("unthemed", &self.unthemed.is_some())
            .field("scans", &self.scans)
            .finish()
    }
}

impl CssFixupCache {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Cached fixups for `theme`, if it has been scanned.
    #[must_use]
    pub fn get(&self, theme: Option<&ThemeId>) -> Option<&[CssFixup]> {
        match theme {
            Some(id) => self.themed.get(id),
            None => self.unthemed.as_ref(),
        }
        .map(Vec::as_slice)
    }

    #[must_use]
    pub fn contains(&self, theme: Option<&ThemeId>) -> bool {
        match theme {
            Some(id) => self.themed.contains_key(id),
            None => self.unthemed.is_some(),
        }
    }

    /// Return the cached fixups for `theme`, running `scan` only on a miss.
    pub fn get_or_scan(
        &mut self,
        theme: Option<&ThemeId>,
        scan: impl FnOnce() -> Vec<CssFixup>,
    ) -> &[CssFixup] {
        if !self.contains(theme) {
            self.scans += 1;
            let fixups = scan();
            match theme {
                Some(id) => {
                    self.themed.insert(id.clone(), fixups);
                }
                None => self.unthemed = Some(fixups),
            }
        }
        self.get(theme).unwrap_or_default()
    }

    /// Number of real scans performed since creation.
    #[must_use]
    pub fn scan_count(&self) -> u64 {
        self.scans
    }

    /// Drop every cached theme. The scan counter is kept.
    pub fn clear(&mut self) {
        self.themed.clear();
        self.unthemed = None;
    }
}
