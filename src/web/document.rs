use crate::error::DomError;
use crate::ui::dom::{Locator, Node, PanelDom, Part, HIDDEN_CLASS};
use wasm_bindgen::JsValue;
use web_sys::{Document, Element};

/// One panel of the live document, resolved lazily on every access
pub struct WebPanel {
    key: String,
    document: Document,
}

pub(crate) fn js_error(err: JsValue) -> DomError {
    DomError::Host(err.as_string().unwrap_or_else(|| format!("{:?}", err)))
}

impl WebPanel {
    pub fn new(document: &Document, key: &str) -> Self {
        Self {
            key: key.to_string(),
            document: document.clone(),
        }
    }

    fn resolve(&self, part: Part) -> Result<Element, DomError> {
        let found = match part.locator(&self.key) {
            Locator::Id(id) => self.document.get_element_by_id(&id),
            Locator::Class { within, class } => match self.document.get_element_by_id(&within) {
                Some(root) => root
                    .query_selector(&format!(".{}", class))
                    .map_err(js_error)?,
                None => None,
            },
        };
        found.ok_or_else(|| self.missing(part))
    }

    /// Build a DOM subtree; text goes through text nodes only
    fn build(&self, node: &Node) -> Result<web_sys::Node, DomError> {
        match node {
            Node::Text(text) => Ok(self.document.create_text_node(text).into()),
            Node::Element { tag, children } => {
                let element = self.document.create_element(tag).map_err(js_error)?;
                for child in children {
                    element
                        .append_child(&self.build(child)?)
                        .map_err(js_error)?;
                }
                Ok(element.into())
            }
        }
    }
}

impl PanelDom for WebPanel {
    fn key(&self) -> &str {
        &self.key
    }

    fn set_hidden(&mut self, part: Part, hidden: bool) -> Result<(), DomError> {
        self.resolve(part)?
            .class_list()
            .toggle_with_force(HIDDEN_CLASS, hidden)
            .map_err(js_error)?;
        Ok(())
    }

    fn is_hidden(&self, part: Part) -> Result<bool, DomError> {
        Ok(self.resolve(part)?.class_list().contains(HIDDEN_CLASS))
    }

    fn set_text(&mut self, part: Part, text: &str) -> Result<(), DomError> {
        self.resolve(part)?.set_text_content(Some(text));
        Ok(())
    }

    fn text(&self, part: Part) -> Result<String, DomError> {
        Ok(self.resolve(part)?.text_content().unwrap_or_default())
    }

    fn replace_children(&mut self, part: Part, nodes: &[Node]) -> Result<(), DomError> {
        let element = self.resolve(part)?;
        element.set_text_content(None);
        for node in nodes {
            element.append_child(&self.build(node)?).map_err(js_error)?;
        }
        Ok(())
    }
}
