//! Panel markup contract and the node model rendered into it.
//!
//! Every element a panel touches is named by a [`Part`]. Hosts resolve parts
//! to real elements (browser) or in-memory stand-ins (CLI, tests) through
//! the [`PanelDom`] trait.

use crate::error::DomError;
use std::fmt;

/// Class that hides an element on the host page
pub const HIDDEN_CLASS: &str = "hidden";

/// Elements of one panel
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Part {
    /// `#editorbox-k`, wraps the live editor and the result area
    EditorBox,
    /// `#codebox-k`, the static code preview
    CodeBox,
    /// Run control
    RunButton,
    StopIndicator,
    Placeholder,
    Progress,
    ResultWrapper,
    ResultTable,
    /// Code preview text inside `#codebox-k`
    SqlCode,
    RowCount,
    CompileTime,
    ExecutionTime,
}

impl Part {
    pub const ALL: [Part; 12] = [
        Part::EditorBox,
        Part::CodeBox,
        Part::RunButton,
        Part::StopIndicator,
        Part::Placeholder,
        Part::Progress,
        Part::ResultWrapper,
        Part::ResultTable,
        Part::SqlCode,
        Part::RowCount,
        Part::CompileTime,
        Part::ExecutionTime,
    ];

    pub fn locator(self, key: &str) -> Locator {
        match self {
            Part::EditorBox => Locator::Id(format!("editorbox-{}", key)),
            Part::CodeBox => Locator::Id(format!("codebox-{}", key)),
            Part::SqlCode => Locator::Class {
                within: format!("codebox-{}", key),
                class: "sql-code-code",
            },
            _ => Locator::Class {
                within: format!("editorbox-{}", key),
                class: self.class_name().unwrap_or_default(),
            },
        }
    }

    /// Class carried by the parts that are looked up by class
    pub fn class_name(self) -> Option<&'static str> {
        match self {
            Part::EditorBox | Part::CodeBox => None,
            Part::RunButton => Some("query-start"),
            Part::StopIndicator => Some("query-stop"),
            Part::Placeholder => Some("result-placeholder"),
            Part::Progress => Some("progress"),
            Part::ResultWrapper => Some("result-wrapper"),
            Part::ResultTable => Some("result-table"),
            Part::SqlCode => Some("sql-code-code"),
            Part::RowCount => Some("rowcount"),
            Part::CompileTime => Some("compiletime"),
            Part::ExecutionTime => Some("executiontime"),
        }
    }
}

/// DOM id of the element the editor widget attaches to
pub fn editor_element_id(key: &str) -> String {
    format!("editor-{}", key)
}

/// How a part is found on the page
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Locator {
    Id(String),
    /// First descendant of element `#within` carrying `class`
    Class { within: String, class: &'static str },
}

impl fmt::Display for Locator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Locator::Id(id) => write!(f, "#{}", id),
            Locator::Class { within, class } => write!(f, "#{} .{}", within, class),
        }
    }
}

/// Content rendered into a panel. Text is always text, never markup.
#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    Element {
        tag: &'static str,
        children: Vec<Node>,
    },
    Text(String),
}

impl Node {
    pub fn element(tag: &'static str, children: Vec<Node>) -> Self {
        Node::Element { tag, children }
    }

    pub fn text(text: impl Into<String>) -> Self {
        Node::Text(text.into())
    }

    /// Element holding a single text child
    pub fn with_text(tag: &'static str, text: impl Into<String>) -> Self {
        Node::element(tag, vec![Node::text(text)])
    }

    pub fn tag(&self) -> Option<&'static str> {
        match self {
            Node::Element { tag, .. } => Some(*tag),
            Node::Text(_) => None,
        }
    }

    pub fn children(&self) -> &[Node] {
        match self {
            Node::Element { children, .. } => children,
            Node::Text(_) => &[],
        }
    }

    /// Concatenated text of this node and its descendants
    pub fn text_content(&self) -> String {
        match self {
            Node::Text(text) => text.clone(),
            Node::Element { children, .. } => {
                children.iter().map(Node::text_content).collect::<String>()
            }
        }
    }

    /// Serialize as HTML with all text escaped
    pub fn to_html(&self) -> String {
        let mut out = String::new();
        self.write_html(&mut out);
        out
    }

    fn write_html(&self, out: &mut String) {
        match self {
            Node::Text(text) => out.push_str(&htmlescape::encode_minimal(text)),
            Node::Element { tag, children } if children.is_empty() && *tag == "br" => {
                out.push_str("<br>");
            }
            Node::Element { tag, children } => {
                out.push('<');
                out.push_str(tag);
                out.push('>');
                for child in children {
                    child.write_html(out);
                }
                out.push_str("</");
                out.push_str(tag);
                out.push('>');
            }
        }
    }
}

/// Access to the elements of one panel.
///
/// Every method fails with [`DomError::MissingElement`] when the part is not
/// present in the host markup.
pub trait PanelDom {
    /// Key shared by the panel's elements (`data-target`)
    fn key(&self) -> &str;

    fn set_hidden(&mut self, part: Part, hidden: bool) -> Result<(), DomError>;

    fn is_hidden(&self, part: Part) -> Result<bool, DomError>;

    /// Replace the content of `part` with a single text node
    fn set_text(&mut self, part: Part, text: &str) -> Result<(), DomError>;

    fn text(&self, part: Part) -> Result<String, DomError>;

    /// Remove all children of `part` and append `nodes` in order
    fn replace_children(&mut self, part: Part, nodes: &[Node]) -> Result<(), DomError>;

    fn missing(&self, part: Part) -> DomError {
        DomError::MissingElement {
            panel: self.key().to_string(),
            locator: part.locator(self.key()).to_string(),
        }
    }
}
