//! In-memory panel markup used by the command-line runner and the tests.

use crate::error::DomError;
use crate::ui::dom::{Node, PanelDom, Part};
use std::collections::BTreeMap;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct MemoryElement {
    pub hidden: bool,
    pub children: Vec<Node>,
}

/// A panel whose elements live in a map instead of a document
#[derive(Debug, Clone)]
pub struct MemoryPanel {
    key: String,
    elements: BTreeMap<Part, MemoryElement>,
}

impl MemoryPanel {
    /// Panel in the state the host markup starts in: code preview shown,
    /// editor box hidden, run control and placeholder visible.
    pub fn new(key: &str) -> Self {
        let elements = Part::ALL
            .iter()
            .map(|&part| {
                let hidden = matches!(
                    part,
                    Part::EditorBox | Part::StopIndicator | Part::Progress | Part::ResultWrapper
                );
                (
                    part,
                    MemoryElement {
                        hidden,
                        children: Vec::new(),
                    },
                )
            })
            .collect();

        Self {
            key: key.to_string(),
            elements,
        }
    }

    /// Panel whose code preview shows `sql`
    pub fn with_code(key: &str, sql: &str) -> Self {
        let mut panel = Self::new(key);
        if let Some(code) = panel.elements.get_mut(&Part::SqlCode) {
            code.children = vec![Node::text(sql)];
        }
        panel
    }

    /// Drop `part` from the markup
    pub fn without(mut self, part: Part) -> Self {
        self.elements.remove(&part);
        self
    }

    pub fn element(&self, part: Part) -> Option<&MemoryElement> {
        self.elements.get(&part)
    }

    pub fn children(&self, part: Part) -> Result<&[Node], DomError> {
        self.elements
            .get(&part)
            .map(|e| e.children.as_slice())
            .ok_or_else(|| self.missing(part))
    }

    /// Escaped HTML of the children of `part`
    pub fn inner_html(&self, part: Part) -> Result<String, DomError> {
        Ok(self
            .children(part)?
            .iter()
            .map(Node::to_html)
            .collect::<String>())
    }

    /// Text of every cell of the result table, header row first
    pub fn table_rows(&self) -> Result<Vec<Vec<String>>, DomError> {
        Ok(self
            .children(Part::ResultTable)?
            .iter()
            .filter(|node| node.tag() == Some("tr"))
            .map(|row| row.children().iter().map(Node::text_content).collect())
            .collect())
    }

    fn get_mut(&mut self, part: Part) -> Result<&mut MemoryElement, DomError> {
        if !self.elements.contains_key(&part) {
            return Err(self.missing(part));
        }
        Ok(self.elements.entry(part).or_default())
    }
}

impl PanelDom for MemoryPanel {
    fn key(&self) -> &str {
        &self.key
    }

    fn set_hidden(&mut self, part: Part, hidden: bool) -> Result<(), DomError> {
        self.get_mut(part)?.hidden = hidden;
        Ok(())
    }

    fn is_hidden(&self, part: Part) -> Result<bool, DomError> {
        self.elements
            .get(&part)
            .map(|e| e.hidden)
            .ok_or_else(|| self.missing(part))
    }

    fn set_text(&mut self, part: Part, text: &str) -> Result<(), DomError> {
        self.get_mut(part)?.children = vec![Node::text(text)];
        Ok(())
    }

    fn text(&self, part: Part) -> Result<String, DomError> {
        Ok(self
            .children(part)?
            .iter()
            .map(Node::text_content)
            .collect::<String>())
    }

    fn replace_children(&mut self, part: Part, nodes: &[Node]) -> Result<(), DomError> {
        self.get_mut(part)?.children = nodes.to_vec();
        Ok(())
    }
}
