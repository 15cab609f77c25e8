//! Code editor widget abstraction.
//!
//! The browser binds these traits to Ace; [`MemoryEditors`] backs the CLI
//! and the tests.

use crate::error::DomError;
use std::collections::HashMap;

/// Document-level theme flag
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ColorScheme {
    #[default]
    Light,
    Dark,
}

impl ColorScheme {
    pub fn from_dark_flag(dark: bool) -> Self {
        if dark {
            ColorScheme::Dark
        } else {
            ColorScheme::Light
        }
    }
}

/// Operations used on an embedded code editor
pub trait CodeEditor {
    fn set_theme(&mut self, theme: &str);
    fn theme(&self) -> String;
    fn set_mode(&mut self, mode: &str);
    fn value(&self) -> String;
    fn set_value(&mut self, text: &str);
    fn set_line_bounds(&mut self, min_lines: u32, max_lines: u32);
    /// `(min, max)` visible lines
    fn line_bounds(&self) -> (u32, u32);
    fn clear_selection(&mut self);
}

/// Creates editors on first use and hands back the same one afterwards
pub trait EditorHost {
    type Editor: CodeEditor;

    fn attach(&mut self, element_id: &str) -> Result<&mut Self::Editor, DomError>;
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct MemoryEditor {
    pub theme: String,
    pub mode: String,
    pub value: String,
    pub min_lines: u32,
    pub max_lines: u32,
    /// Selected range as byte offsets into `value`
    pub selection: Option<(usize, usize)>,
}

impl MemoryEditor {
    /// Select the whole text, as Ace does after `setValue`
    pub fn select_all(&mut self) {
        self.selection = Some((0, self.value.len()));
    }
}

impl CodeEditor for MemoryEditor {
    fn set_theme(&mut self, theme: &str) {
        self.theme = theme.to_string();
    }

    fn theme(&self) -> String {
        self.theme.clone()
    }

    fn set_mode(&mut self, mode: &str) {
        self.mode = mode.to_string();
    }

    fn value(&self) -> String {
        self.value.clone()
    }

    fn set_value(&mut self, text: &str) {
        self.value = text.to_string();
        self.select_all();
    }

    fn set_line_bounds(&mut self, min_lines: u32, max_lines: u32) {
        self.min_lines = min_lines;
        self.max_lines = max_lines;
    }

    fn line_bounds(&self) -> (u32, u32) {
        (self.min_lines, self.max_lines)
    }

    fn clear_selection(&mut self) {
        self.selection = None;
    }
}

#[derive(Debug, Default)]
pub struct MemoryEditors {
    editors: HashMap<String, MemoryEditor>,
}

impl MemoryEditors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, element_id: &str) -> Option<&MemoryEditor> {
        self.editors.get(element_id)
    }

    pub fn get_mut(&mut self, element_id: &str) -> Option<&mut MemoryEditor> {
        self.editors.get_mut(element_id)
    }

    pub fn len(&self) -> usize {
        self.editors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.editors.is_empty()
    }
}

impl EditorHost for MemoryEditors {
    type Editor = MemoryEditor;

    fn attach(&mut self, element_id: &str) -> Result<&mut MemoryEditor, DomError> {
        Ok(self.editors.entry(element_id.to_string()).or_default())
    }
}
