use crate::error::DomError;
use crate::ui::editor::{CodeEditor, EditorHost};
use std::collections::hash_map::Entry;
use std::collections::HashMap;
use wasm_bindgen::prelude::*;

#[wasm_bindgen]
extern "C" {
    /// Editor instance returned by `ace.edit`
    pub type AceEditor;

    type AceSession;

    #[wasm_bindgen(catch, js_namespace = ace, js_name = edit)]
    fn ace_edit(element_id: &str) -> Result<AceEditor, JsValue>;

    #[wasm_bindgen(method, js_name = setTheme)]
    fn js_set_theme(this: &AceEditor, theme: &str);

    #[wasm_bindgen(method, js_name = getTheme)]
    fn js_get_theme(this: &AceEditor) -> String;

    #[wasm_bindgen(method, getter)]
    fn session(this: &AceEditor) -> AceSession;

    #[wasm_bindgen(method, js_name = setMode)]
    fn js_set_mode(this: &AceSession, mode: &str);

    #[wasm_bindgen(method, js_name = getValue)]
    fn js_get_value(this: &AceEditor) -> String;

    #[wasm_bindgen(method, js_name = setValue)]
    fn js_set_value(this: &AceEditor, value: &str);

    #[wasm_bindgen(method, js_name = setOption)]
    fn js_set_option(this: &AceEditor, name: &str, value: JsValue);

    #[wasm_bindgen(method, js_name = getOption)]
    fn js_get_option(this: &AceEditor, name: &str) -> JsValue;

    #[wasm_bindgen(method, js_name = clearSelection)]
    fn js_clear_selection(this: &AceEditor);
}

impl CodeEditor for AceEditor {
    fn set_theme(&mut self, theme: &str) {
        self.js_set_theme(theme);
    }

    fn theme(&self) -> String {
        self.js_get_theme()
    }

    fn set_mode(&mut self, mode: &str) {
        self.session().js_set_mode(mode);
    }

    fn value(&self) -> String {
        self.js_get_value()
    }

    fn set_value(&mut self, text: &str) {
        self.js_set_value(text);
    }

    fn set_line_bounds(&mut self, min_lines: u32, max_lines: u32) {
        self.js_set_option("maxLines", JsValue::from(max_lines));
        self.js_set_option("minLines", JsValue::from(min_lines));
    }

    fn line_bounds(&self) -> (u32, u32) {
        let read = |name: &str| self.js_get_option(name).as_f64().unwrap_or(0.0) as u32;
        (read("minLines"), read("maxLines"))
    }

    fn clear_selection(&mut self) {
        self.js_clear_selection();
    }
}

/// Ace editors by element id; `ace.edit` is called once per element
#[derive(Default)]
pub struct AceEditors {
    editors: HashMap<String, AceEditor>,
}

impl EditorHost for AceEditors {
    type Editor = AceEditor;

    fn attach(&mut self, element_id: &str) -> Result<&mut AceEditor, DomError> {
        match self.editors.entry(element_id.to_string()) {
            Entry::Occupied(entry) => Ok(entry.into_mut()),
            Entry::Vacant(entry) => {
                let editor = ace_edit(element_id).map_err(|err| {
                    DomError::EditorUnavailable(format!(
                        "{}: {}",
                        element_id,
                        err.as_string().unwrap_or_else(|| format!("{:?}", err))
                    ))
                })?;
                Ok(entry.insert(editor))
            }
        }
    }
}
