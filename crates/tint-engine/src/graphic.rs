//! Graphic fixups: discovery and application.
//!
//! Unlike stylesheet fixups these are never cached by the engine. Graphic
//! documents are recreated whenever their host renders, so the caller owns
//! the fixup list and recomputes it when its set of documents changes.

use std::fmt;
use std::rc::Rc;

use crate::attr::GraphicAttribute;
use crate::document::{GraphicElement, GraphicHandle};
use crate::palette::{KeyColors, ResolvedColors, Slot};

/// One element attribute that must track a resolved color slot.
#[derive(Clone)]
pub struct GraphicFixup {
    pub node: Rc<dyn GraphicElement>,
    pub attr: GraphicAttribute,
    pub slot: Slot,
}

impl fmt::Debug for GraphicFixup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GraphicFixup")
            .field("node", &self.node.describe())
            .field("attr", &self.attr)
            .field("slot", &self.slot)
            .finish_non_exhaustive()
    }
}

/// Find every `fill`/`stroke` attribute holding one of the graphic keys.
///
/// Matching is ASCII case-insensitive. A handle whose document cannot be
/// obtained is logged and skipped; the rest of the batch is still scanned.
pub fn discover_graphic_fixups(
    handles: &[Rc<dyn GraphicHandle>],
    keys: &KeyColors,
) -> Vec<GraphicFixup> {
    tracing::debug!(target: "tint.graphic", handles = handles.len(), "graphic fixup scan started");
    let patterns = keys.graphic_patterns();
    let mut fixups = Vec::new();

    for handle in handles {
        let document = match handle.content_document() {
            Ok(Some(document)) => document,
            Ok(None) => continue,
            Err(err) => {
                tracing::error!(
                    target: "tint.graphic",
                    handle = %handle.describe(),
                    error = %err,
                    "failed to get graphic content document"
                );
                continue;
            }
        };

        for node in document.elements() {
            for attr in GraphicAttribute::ALL {
                let Some(value) = node.attribute(attr) else {
                    continue;
                };
                for (slot, pattern) in &patterns {
                    if value.eq_ignore_ascii_case(pattern) {
                        fixups.push(GraphicFixup {
                            node: Rc::clone(&node),
                            attr,
                            slot: *slot,
                        });
                    }
                }
            }
        }
    }

    tracing::debug!(target: "tint.graphic", fixups = fixups.len(), "graphic fixup scan finished");
    fixups
}

/// Write the resolved color of each fixup's slot, in list order.
pub fn apply_graphic_fixups(fixups: &[GraphicFixup], colors: &ResolvedColors) {
    tracing::debug!(target: "tint.graphic", fixups = fixups.len(), "applying graphic fixups");
    for fixup in fixups {
        fixup.node.set_attribute(fixup.attr, &colors[fixup.slot].to_hex());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::{MemoryElement, MemoryGraphic, MemoryGraphicHandle};
    use tint_color::Rgb;

    fn handle_with(elements: Vec<Rc<MemoryElement>>) -> Rc<dyn GraphicHandle> {
        MemoryGraphicHandle::loaded(MemoryGraphic::new(elements))
    }

    #[test]
    fn matching_is_case_insensitive() {
        let upper = MemoryElement::new("path").with(GraphicAttribute::Fill, "#EAF5F0");
        let lower = MemoryElement::new("path").with(GraphicAttribute::Fill, "#eaf5f0");
        let handles = vec![handle_with(vec![upper, lower])];

        let fixups = discover_graphic_fixups(&handles, &KeyColors::default());
        assert_eq!(fixups.len(), 2);
        assert!(fixups.iter().all(|f| f.slot == Slot::Secondary));
    }

    #[test]
    fn tracks_fill_and_stroke_with_highlight() {
        let node = MemoryElement::new("circle")
            .with(GraphicAttribute::Fill, "#FFFFFF")
            .with(GraphicAttribute::Stroke, "#76cfa6");
        let handles = vec![handle_with(vec![node])];

        let fixups = discover_graphic_fixups(&handles, &KeyColors::default());
        let found: Vec<_> = fixups.iter().map(|f| (f.attr, f.slot)).collect();
        assert_eq!(
            found,
            vec![
                (GraphicAttribute::Fill, Slot::Highlight),
                (GraphicAttribute::Stroke, Slot::Primary),
            ]
        );
    }

    #[test]
    fn failing_handle_does_not_abort_batch() {
        let blocked: Rc<dyn GraphicHandle> = MemoryGraphicHandle::blocked("cross-origin");
        let pending: Rc<dyn GraphicHandle> = MemoryGraphicHandle::pending();
        let ok = handle_with(vec![
            MemoryElement::new("rect").with(GraphicAttribute::Fill, "#D3EFE1"),
        ]);
        let handles: Vec<Rc<dyn GraphicHandle>> = vec![blocked, pending, ok];

        let fixups = discover_graphic_fixups(&handles, &KeyColors::default());
        assert_eq!(fixups.len(), 1);
        assert_eq!(fixups[0].slot, Slot::Tertiary);
    }

    #[test]
    fn unrelated_values_are_ignored() {
        let node = MemoryElement::new("path")
            .with(GraphicAttribute::Fill, "none")
            .with(GraphicAttribute::Stroke, "#fff");
        let fixups = discover_graphic_fixups(&[handle_with(vec![node])], &KeyColors::default());
        assert!(fixups.is_empty());
    }

    #[test]
    fn apply_writes_in_order() {
        let node = MemoryElement::new("path").with(GraphicAttribute::Fill, "#76CFA6");
        let handles = [handle_with(vec![node.clone()])];
        let fixups = discover_graphic_fixups(&handles, &KeyColors::default());
        let mut colors = ResolvedColors::from_keys(&KeyColors::default());
        colors.set(Slot::Primary, Rgb::new(0xab, 0xcd, 0xef));

        apply_graphic_fixups(&fixups, &colors);
        assert_eq!(node.attribute(GraphicAttribute::Fill).as_deref(), Some("#abcdef"));
    }

    #[test]
    fn debug_names_the_element() {
        let node = MemoryElement::new("circle").with(GraphicAttribute::Stroke, "#d3efe1");
        let fixups = discover_graphic_fixups(&[handle_with(vec![node])], &KeyColors::default());
        assert_eq!(fixups.len(), 1);

        let debug = format!("{:?}", fixups[0]);
        assert!(debug.contains(r#"node: "circle""#), "{debug}");
        assert!(debug.contains("Stroke"), "{debug}");
    }
}
