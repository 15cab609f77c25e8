//! Browser binding
//!
//! Implements the panel and editor traits against the live document and the
//! Ace editor, and wires the page's toggle and run triggers on startup.

mod ace;
mod app;
mod document;

pub use ace::{AceEditor, AceEditors};
pub use app::{start, EditorApp};
pub use document::WebPanel;
