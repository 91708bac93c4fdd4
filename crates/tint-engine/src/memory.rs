//! In-memory document model.
//!
//! Implements every collaborator trait in [`crate::document`] over plain
//! `RefCell` storage. Headless hosts can use it directly; tests use it to
//! simulate the failure cases a live document produces (unavailable sheets,
//! unreadable rule lists, stale declarations, blocked graphic documents).
//!
//! Constructors return `Rc<Self>` so the same handle can be shared between
//! the document tree and the test or host that mutates it.

use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::rc::Rc;

use crate::attr::{CssAttribute, GraphicAttribute};
use crate::document::{
    CssRule, GraphicDocument, GraphicElement, GraphicHandle, StyleDeclaration, StyleSheet,
    StyleSource,
};
use crate::error::DocumentError;

/// A declaration block.
#[derive(Debug, Default)]
pub struct MemoryStyle {
    properties: RefCell<HashMap<CssAttribute, String>>,
    stale: Cell<bool>,
}

impl MemoryStyle {
    #[must_use]
    pub fn new() -> Rc<Self> {
        Rc::new(Self::default())
    }

    /// Builder-style property setter.
    #[must_use]
    pub fn with(self: Rc<Self>, attr: CssAttribute, value: &str) -> Rc<Self> {
        self.properties.borrow_mut().insert(attr, value.to_owned());
        self
    }

    /// Make every later write fail, as if the backing rule had been removed.
    pub fn mark_stale(&self) {
        self.stale.set(true);
    }
}

impl StyleDeclaration for MemoryStyle {
    fn property(&self, attr: CssAttribute) -> Option<String> {
        self.properties.borrow().get(&attr).cloned()
    }

    fn set_property(&self, attr: CssAttribute, value: &str) -> Result<(), DocumentError> {
        if self.stale.get() {
            return Err(DocumentError::StaleStyle);
        }
        self.properties.borrow_mut().insert(attr, value.to_owned());
        Ok(())
    }
}

/// A style rule.
#[derive(Debug)]
pub struct MemoryRule {
    selector: Option<String>,
    style: Option<Rc<MemoryStyle>>,
}

impl MemoryRule {
    #[must_use]
    pub fn new(selector: &str, style: Rc<MemoryStyle>) -> Rc<Self> {
        Rc::new(Self {
            selector: Some(selector.to_owned()),
            style: Some(style),
        })
    }

    /// A rule with no declaration block, such as an at-rule.
    #[must_use]
    pub fn without_style(selector: &str) -> Rc<Self> {
        Rc::new(Self {
            selector: Some(selector.to_owned()),
            style: None,
        })
    }
}

impl CssRule for MemoryRule {
    fn selector_text(&self) -> Option<String> {
        self.selector.clone()
    }

    fn style(&self) -> Option<Rc<dyn StyleDeclaration>> {
        self.style
            .as_ref()
            .map(|style| Rc::clone(style) as Rc<dyn StyleDeclaration>)
    }
}

/// A stylesheet.
#[derive(Debug, Default)]
pub struct MemoryStyleSheet {
    href: Option<String>,
    disabled: Cell<bool>,
    inaccessible: Cell<bool>,
    rules: RefCell<Vec<Rc<MemoryRule>>>,
}

impl MemoryStyleSheet {
    /// A sheet embedded in the document (no href).
    #[must_use]
    pub fn inline() -> Rc<Self> {
        Rc::new(Self::default())
    }

    /// A sheet loaded from `href`.
    #[must_use]
    pub fn external(href: &str) -> Rc<Self> {
        Rc::new(Self {
            href: Some(href.to_owned()),
            ..Self::default()
        })
    }

    pub fn push_rule(&self, rule: Rc<MemoryRule>) {
        self.rules.borrow_mut().push(rule);
    }

    /// Remove and return the rule at `index`, if any.
    pub fn remove_rule(&self, index: usize) -> Option<Rc<MemoryRule>> {
        let mut rules = self.rules.borrow_mut();
        (index < rules.len()).then(|| rules.remove(index))
    }

    pub fn set_disabled(&self, disabled: bool) {
        self.disabled.set(disabled);
    }

    /// Make the rule list unreadable, as for a cross-origin sheet.
    pub fn set_inaccessible(&self, inaccessible: bool) {
        self.inaccessible.set(inaccessible);
    }
}

impl StyleSheet for MemoryStyleSheet {
    fn href(&self) -> Option<String> {
        self.href.clone()
    }

    fn is_disabled(&self) -> bool {
        self.disabled.get()
    }

    fn rules(&self) -> Result<Vec<Rc<dyn CssRule>>, DocumentError> {
        if self.inaccessible.get() {
            return Err(DocumentError::inaccessible(format!(
                "rules of {} are not readable",
                self.href.as_deref().unwrap_or("inline sheet")
            )));
        }
        Ok(self
            .rules
            .borrow()
            .iter()
            .map(|rule| Rc::clone(rule) as Rc<dyn CssRule>)
            .collect())
    }
}

/// A document: its stylesheets and the computed colors of marker elements.
#[derive(Debug, Default)]
pub struct MemoryDocument {
    sheets: RefCell<Vec<Option<Rc<MemoryStyleSheet>>>>,
    computed_colors: RefCell<HashMap<String, String>>,
}

impl MemoryDocument {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push_sheet(&self, sheet: Rc<MemoryStyleSheet>) {
        self.sheets.borrow_mut().push(Some(sheet));
    }

    /// Append an entry the host cannot expose.
    pub fn push_unavailable_sheet(&self) {
        self.sheets.borrow_mut().push(None);
    }

    /// Set the computed `color` of the element with `element_id`.
    pub fn set_computed_color(&self, element_id: &str, color: &str) {
        self.computed_colors
            .borrow_mut()
            .insert(element_id.to_owned(), color.to_owned());
    }

    pub fn remove_element(&self, element_id: &str) {
        self.computed_colors.borrow_mut().remove(element_id);
    }
}

impl StyleSource for MemoryDocument {
    fn style_sheets(&self) -> Vec<Option<Rc<dyn StyleSheet>>> {
        self.sheets
            .borrow()
            .iter()
            .map(|sheet| {
                sheet
                    .as_ref()
                    .map(|sheet| Rc::clone(sheet) as Rc<dyn StyleSheet>)
            })
            .collect()
    }

    fn computed_color(&self, element_id: &str) -> Option<String> {
        self.computed_colors.borrow().get(element_id).cloned()
    }
}

/// An element of a vector-graphic document.
#[derive(Debug)]
pub struct MemoryElement {
    tag: String,
    attributes: RefCell<HashMap<GraphicAttribute, String>>,
}

impl MemoryElement {
    #[must_use]
    pub fn new(tag: &str) -> Rc<Self> {
        Rc::new(Self {
            tag: tag.to_owned(),
            attributes: RefCell::new(HashMap::new()),
        })
    }

    /// Builder-style attribute setter.
    #[must_use]
    pub fn with(self: Rc<Self>, attr: GraphicAttribute, value: &str) -> Rc<Self> {
        self.attributes.borrow_mut().insert(attr, value.to_owned());
        self
    }
}

impl GraphicElement for MemoryElement {
    fn attribute(&self, attr: GraphicAttribute) -> Option<String> {
        self.attributes.borrow().get(&attr).cloned()
    }

    fn set_attribute(&self, attr: GraphicAttribute, value: &str) {
        self.attributes.borrow_mut().insert(attr, value.to_owned());
    }

    fn describe(&self) -> String {
        self.tag.clone()
    }
}

/// A vector-graphic document.
#[derive(Debug, Default)]
pub struct MemoryGraphic {
    elements: RefCell<Vec<Rc<MemoryElement>>>,
}

impl MemoryGraphic {
    #[must_use]
    pub fn new(elements: Vec<Rc<MemoryElement>>) -> Rc<Self> {
        Rc::new(Self {
            elements: RefCell::new(elements),
        })
    }

    pub fn push(&self, element: Rc<MemoryElement>) {
        self.elements.borrow_mut().push(element);
    }
}

impl GraphicDocument for MemoryGraphic {
    fn elements(&self) -> Vec<Rc<dyn GraphicElement>> {
        self.elements
            .borrow()
            .iter()
            .map(|element| Rc::clone(element) as Rc<dyn GraphicElement>)
            .collect()
    }
}

#[derive(Debug)]
enum HandleState {
    Loaded(Rc<MemoryGraphic>),
    Pending,
    Blocked(String),
}

/// An embedding element wrapping a [`MemoryGraphic`].
#[derive(Debug)]
pub struct MemoryGraphicHandle {
    state: HandleState,
}

impl MemoryGraphicHandle {
    #[must_use]
    pub fn loaded(document: Rc<MemoryGraphic>) -> Rc<Self> {
        Rc::new(Self {
            state: HandleState::Loaded(document),
        })
    }

    /// A handle whose document has not loaded yet.
    #[must_use]
    pub fn pending() -> Rc<Self> {
        Rc::new(Self {
            state: HandleState::Pending,
        })
    }

    /// A handle whose document the host refuses to expose.
    #[must_use]
    pub fn blocked(reason: &str) -> Rc<Self> {
        Rc::new(Self {
            state: HandleState::Blocked(reason.to_owned()),
        })
    }
}

impl GraphicHandle for MemoryGraphicHandle {
    fn content_document(&self) -> Result<Option<Rc<dyn GraphicDocument>>, DocumentError> {
        match &self.state {
            HandleState::Loaded(document) => {
                Ok(Some(Rc::clone(document) as Rc<dyn GraphicDocument>))
            }
            HandleState::Pending => Ok(None),
            HandleState::Blocked(reason) => Err(DocumentError::inaccessible(reason.clone())),
        }
    }

    fn describe(&self) -> String {
        match &self.state {
            HandleState::Loaded(_) => "memory graphic".into(),
            HandleState::Pending => "memory graphic (pending)".into(),
            HandleState::Blocked(_) => "memory graphic (blocked)".into(),
        }
    }
}
