//! Collaborator traits for the host document.
//!
//! The engine does not own a DOM. A host (a browser binding, a desktop
//! renderer, the in-memory model in [`crate::memory`]) implements these traits
//! over its own style and graphic trees and hands the engine shared handles.
//!
//! Handles are `Rc<dyn ..>`: the engine caches style declarations across
//! calls and graphic fixups hold element handles, so both sides keep the
//! referent alive. Everything here is single-threaded by construction.

use std::rc::Rc;

use crate::attr::{CssAttribute, GraphicAttribute};
use crate::error::DocumentError;

/// The set of loaded stylesheets plus computed-style lookups.
pub trait StyleSource {
    /// Every loaded stylesheet in document order.
    ///
    /// `None` stands for an entry the host could not expose (for example a
    /// sheet injected by a third-party extension under a foreign origin).
    fn style_sheets(&self) -> Vec<Option<Rc<dyn StyleSheet>>>;

    /// Computed `color` of the element with the given id, if it exists.
    ///
    /// Hosts report the value the way a style engine does, typically
    /// `rgb(r, g, b)`.
    fn computed_color(&self, element_id: &str) -> Option<String>;
}

/// One loaded stylesheet.
pub trait StyleSheet {
    /// External source location, or `None` for inline sheets.
    fn href(&self) -> Option<String>;

    fn is_disabled(&self) -> bool;

    /// The sheet's rules. Fails when the rule list cannot be introspected.
    fn rules(&self) -> Result<Vec<Rc<dyn CssRule>>, DocumentError>;
}

/// One rule of a stylesheet.
pub trait CssRule {
    fn selector_text(&self) -> Option<String>;

    /// The rule's declaration block. At-rules without one return `None`.
    fn style(&self) -> Option<Rc<dyn StyleDeclaration>>;
}

/// A live declaration block.
pub trait StyleDeclaration {
    /// Current value of `attr`, as the style engine reports it.
    fn property(&self, attr: CssAttribute) -> Option<String>;

    /// Overwrite `attr`. Fails when the declaration went stale, e.g. its rule
    /// was removed or edited out from under the engine.
    fn set_property(&self, attr: CssAttribute, value: &str) -> Result<(), DocumentError>;
}

/// An embedding element (an `<object>` or `<iframe>` style host) that wraps
/// a vector-graphic document.
pub trait GraphicHandle {
    /// The inner document. `Ok(None)` means not loaded yet; `Err` means the
    /// host refused access.
    fn content_document(&self) -> Result<Option<Rc<dyn GraphicDocument>>, DocumentError>;

    /// Short label used in log output.
    fn describe(&self) -> String {
        String::from("graphic")
    }
}

/// A vector-graphic document.
pub trait GraphicDocument {
    /// Every element in document order.
    fn elements(&self) -> Vec<Rc<dyn GraphicElement>>;
}

/// One element of a vector-graphic document.
pub trait GraphicElement {
    fn attribute(&self, attr: GraphicAttribute) -> Option<String>;

    fn set_attribute(&self, attr: GraphicAttribute, value: &str);

    /// Short label for logs and `Debug` output, such as the element's tag.
    fn describe(&self) -> String {
        "element".to_owned()
    }
}
