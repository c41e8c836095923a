//! The page, as seen by the presenter and dispatcher.
//!
//! `Document` is the seam between the pure rendering logic and `web_sys`.
//! `DomDocument` is the browser implementation; `MemoryDocument` records
//! element state for unit tests.

use std::fmt;

/// Element ids the page markup provides.
pub mod ids {
    pub const NARRATIVE: &str = "narrativeArea";
    pub const PLAYER_NAME: &str = "playerName";
    pub const PLAYER_HP: &str = "playerHP";
    pub const PLAYER_MAX_HP: &str = "playerMaxHP";
    pub const PLAYER_MP: &str = "playerMP";
    pub const PLAYER_MAX_MP: &str = "playerMaxMP";
    pub const PLAYER_LOCATION: &str = "playerLocation";
    pub const HP_BAR: &str = "hpBar";
    pub const MP_BAR: &str = "mpBar";
    pub const INVENTORY: &str = "playerInventory";
    pub const SKILLS: &str = "playerSkills";
    pub const COMMAND_INPUT: &str = "commandInput";
    pub const SEND_BUTTON: &str = "sendButton";
    pub const MAP_IMAGE: &str = "gameMap";
}

#[derive(Debug, Clone, PartialEq)]
pub enum DomError {
    /// No element with this id in the page.
    MissingElement(String),
    /// The element exists but is not of the expected kind.
    WrongElementKind { id: String, expected: &'static str },
    /// The browser refused a style change.
    StyleRejected { id: String, property: &'static str },
}

impl fmt::Display for DomError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DomError::MissingElement(id) => write!(f, "element #{id} not found"),
            DomError::WrongElementKind { id, expected } => {
                write!(f, "element #{id} is not {expected}")
            }
            DomError::StyleRejected { id, property } => {
                write!(f, "element #{id} rejected style {property}")
            }
        }
    }
}

impl std::error::Error for DomError {}

/// Operations the client performs on the page. All take `&self`: the DOM is
/// mutated through handles, never through Rust ownership.
pub trait Document {
    /// Append an HTML fragment (already escaped) to the end of an element.
    fn append_html(&self, id: &str, html: &str) -> Result<(), DomError>;
    /// Replace the element's children with an HTML fragment (already escaped).
    fn replace_html(&self, id: &str, html: &str) -> Result<(), DomError>;
    /// Set the element's text content.
    fn set_text(&self, id: &str, text: &str) -> Result<(), DomError>;
    /// Set a progress bar's fill width (percent) and its full class list.
    fn set_bar(&self, id: &str, percent: f64, class: &str) -> Result<(), DomError>;
    /// Current value of a text input.
    fn input_value(&self, id: &str) -> Result<String, DomError>;
    fn set_input_value(&self, id: &str, value: &str) -> Result<(), DomError>;
    /// Scroll the element to its bottom once layout has settled.
    fn scroll_to_bottom_after_layout(&self, id: &str) -> Result<(), DomError>;
}

#[cfg(target_arch = "wasm32")]
pub use dom::DomDocument;

#[cfg(target_arch = "wasm32")]
mod dom {
    use wasm_bindgen::closure::Closure;
    use wasm_bindgen::JsCast;
    use web_sys::{Element, HtmlElement, HtmlInputElement};

    use super::{Document, DomError};
    use crate::console;

    /// `web_sys` view of the current page.
    pub struct DomDocument {
        document: web_sys::Document,
    }

    impl DomDocument {
        pub fn current() -> Option<Self> {
            let document = web_sys::window()?.document()?;
            Some(Self { document })
        }

        fn element(&self, id: &str) -> Result<Element, DomError> {
            self.document
                .get_element_by_id(id)
                .ok_or_else(|| DomError::MissingElement(id.to_string()))
        }

        fn html_element(&self, id: &str) -> Result<HtmlElement, DomError> {
            self.element(id)?
                .dyn_into::<HtmlElement>()
                .map_err(|_| DomError::WrongElementKind {
                    id: id.to_string(),
                    expected: "an HTML element",
                })
        }

        fn input(&self, id: &str) -> Result<HtmlInputElement, DomError> {
            self.element(id)?
                .dyn_into::<HtmlInputElement>()
                .map_err(|_| DomError::WrongElementKind {
                    id: id.to_string(),
                    expected: "an <input>",
                })
        }
    }

    /// Run `f` two animation frames from now. The first frame runs before the
    /// browser's next reflow; the second runs after it.
    fn after_two_frames(f: impl FnOnce() + 'static) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let outer = Closure::once_into_js({
            let window = window.clone();
            move || {
                let inner = Closure::once_into_js(f);
                if window
                    .request_animation_frame(inner.unchecked_ref())
                    .is_err()
                {
                    console::warn("requestAnimationFrame failed (inner)");
                }
            }
        });
        if window
            .request_animation_frame(outer.unchecked_ref())
            .is_err()
        {
            console::warn("requestAnimationFrame failed (outer)");
        }
    }

    impl Document for DomDocument {
        fn append_html(&self, id: &str, html: &str) -> Result<(), DomError> {
            self.element(id)?
                .insert_adjacent_html("beforeend", html)
                .map_err(|_| DomError::WrongElementKind {
                    id: id.to_string(),
                    expected: "a container",
                })
        }

        fn replace_html(&self, id: &str, html: &str) -> Result<(), DomError> {
            self.element(id)?.set_inner_html(html);
            Ok(())
        }

        fn set_text(&self, id: &str, text: &str) -> Result<(), DomError> {
            self.element(id)?.set_text_content(Some(text));
            Ok(())
        }

        fn set_bar(&self, id: &str, percent: f64, class: &str) -> Result<(), DomError> {
            let bar = self.html_element(id)?;
            bar.set_class_name(class);
            bar.style()
                .set_property("width", &format!("{percent:.1}%"))
                .map_err(|_| DomError::StyleRejected {
                    id: id.to_string(),
                    property: "width",
                })
        }

        fn input_value(&self, id: &str) -> Result<String, DomError> {
            Ok(self.input(id)?.value())
        }

        fn set_input_value(&self, id: &str, value: &str) -> Result<(), DomError> {
            self.input(id)?.set_value(value);
            Ok(())
        }

        fn scroll_to_bottom_after_layout(&self, id: &str) -> Result<(), DomError> {
            let element = self.element(id)?;
            after_two_frames(move || {
                element.set_scroll_top(element.scroll_height());
            });
            Ok(())
        }
    }
}

#[cfg(test)]
pub use memory::MemoryDocument;


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_element_error() {
        let doc = MemoryDocument::with_elements(&[]);
        assert_eq!(
            doc.set_text("nowhere", "x"),
            Err(DomError::MissingElement("nowhere".into()))
        );
        assert_eq!(
            DomError::MissingElement("nowhere".into()).to_string(),
            "element #nowhere not found"
        );
    }

    #[test]
    fn style_rejection_names_element_and_property() {
        let err = DomError::StyleRejected {
            id: "hpBar".into(),
            property: "width",
        };
        assert_eq!(err.to_string(), "element #hpBar rejected style width");
    }

    #[test]
    fn append_accumulates_replace_overwrites() {
        let doc = MemoryDocument::with_elements(&["box"]);
        doc.append_html("box", "<p>a</p>").unwrap();
        doc.append_html("box", "<p>b</p>").unwrap();
        assert_eq!(doc.html("box"), "<p>a</p><p>b</p>");
        doc.replace_html("box", "<p>c</p>").unwrap();
        assert_eq!(doc.html("box"), "<p>c</p>");
    }
}
