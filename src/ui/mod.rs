//! User interface layer
//!
//! Panel state, the markup and editor abstractions, and the controllers
//! driving a panel through toggle and run.

pub mod dom;
pub mod editor;
pub mod memory_dom;
pub mod panel_controller;
pub mod panel_state;
pub mod query_controller;
pub mod table_renderer;

pub use dom::{Node, PanelDom, Part};
pub use editor::{CodeEditor, ColorScheme, EditorHost, MemoryEditor, MemoryEditors};
pub use memory_dom::MemoryPanel;
pub use panel_controller::toggle_panel;
pub use panel_state::{Outcome, PanelSession, PanelState, PanelView, RunState};
pub use query_controller::{begin_run, complete_run, run_to_completion, RunTicket};
