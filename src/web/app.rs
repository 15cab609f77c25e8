use super::ace::AceEditors;
use super::document::WebPanel;
use crate::api::client::{ApiClient, QueryBackend};
use crate::api::models::StatementResult;
use crate::config::Config;
use crate::error::{DomError, QueryError};
use crate::ui::dom::PanelDom;
use crate::ui::editor::ColorScheme;
use crate::ui::panel_controller::toggle_panel;
use crate::ui::panel_state::PanelSession;
use crate::ui::query_controller::{begin_run, complete_run, RunTicket};
use std::cell::RefCell;
use std::collections::hash_map::Entry;
use std::collections::HashMap;
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::spawn_local;
use web_sys::{Document, Element};

const TOGGLE_SELECTOR: &str = ".editor-toggle";
const RUN_SELECTOR: &str = ".query-start";
const TARGET_ATTRIBUTE: &str = "data-target";

/// All panels of one page plus the shared client and editors.
///
/// Borrows of the inner cells never outlive a single event callback.
pub struct EditorApp {
    document: Document,
    config: Config,
    client: ApiClient,
    sessions: RefCell<HashMap<String, PanelSession>>,
    editors: RefCell<AceEditors>,
}

fn to_js(err: DomError) -> JsValue {
    js_sys::Error::new(&err.to_string()).into()
}

/// Session of the panel, seeded from the page on first use
fn session_for<'a>(
    sessions: &'a mut HashMap<String, PanelSession>,
    dom: &WebPanel,
) -> Result<&'a mut PanelSession, DomError> {
    match sessions.entry(dom.key().to_string()) {
        Entry::Occupied(entry) => Ok(entry.into_mut()),
        Entry::Vacant(entry) => Ok(entry.insert(PanelSession::observe(dom)?)),
    }
}

impl EditorApp {
    pub fn new(document: Document, config: Config) -> Rc<Self> {
        let client = ApiClient::from_config(&config.api);
        Rc::new(Self {
            document,
            config,
            client,
            sessions: RefCell::new(HashMap::new()),
            editors: RefCell::new(AceEditors::default()),
        })
    }

    /// Register click handlers on every toggle and run trigger
    pub fn attach(self: &Rc<Self>) -> Result<(), JsValue> {
        for (trigger, key) in self.triggers(TOGGLE_SELECTOR)? {
            let app = Rc::clone(self);
            let handler = Closure::<dyn FnMut() -> Result<(), JsValue>>::new(move || {
                app.on_toggle(&key).map_err(to_js)
            });
            trigger.add_event_listener_with_callback("click", handler.as_ref().unchecked_ref())?;
            handler.forget();
        }

        for (trigger, key) in self.triggers(RUN_SELECTOR)? {
            let app = Rc::clone(self);
            let handler = Closure::<dyn FnMut() -> Result<(), JsValue>>::new(move || {
                app.on_run(&key).map_err(to_js)
            });
            trigger.add_event_listener_with_callback("click", handler.as_ref().unchecked_ref())?;
            handler.forget();
        }

        Ok(())
    }

    fn triggers(&self, selector: &str) -> Result<Vec<(Element, String)>, JsValue> {
        let nodes = self.document.query_selector_all(selector)?;
        let mut found = Vec::with_capacity(nodes.length() as usize);
        for index in 0..nodes.length() {
            let Some(element) = nodes.item(index).and_then(|n| n.dyn_into::<Element>().ok()) else {
                continue;
            };
            let key = element.get_attribute(TARGET_ATTRIBUTE).ok_or_else(|| {
                to_js(DomError::Host(format!(
                    "{} without {} attribute",
                    selector, TARGET_ATTRIBUTE
                )))
            })?;
            found.push((element, key));
        }
        Ok(found)
    }

    fn scheme(&self) -> ColorScheme {
        let dark = self
            .document
            .document_element()
            .map(|root| root.class_list().contains("dark"))
            .unwrap_or(false);
        ColorScheme::from_dark_flag(dark)
    }

    fn on_toggle(&self, key: &str) -> Result<(), DomError> {
        let mut sessions = self.sessions.borrow_mut();
        let mut dom = WebPanel::new(&self.document, key);
        let session = session_for(&mut sessions, &dom)?;
        let mut editors = self.editors.borrow_mut();

        toggle_panel(
            session,
            &mut dom,
            &mut *editors,
            &self.config.editor,
            self.scheme(),
        )?;
        Ok(())
    }

    fn on_run(self: &Rc<Self>, key: &str) -> Result<(), DomError> {
        let ticket = {
            let mut sessions = self.sessions.borrow_mut();
            let mut dom = WebPanel::new(&self.document, key);
            let session = session_for(&mut sessions, &dom)?;
            let mut editors = self.editors.borrow_mut();
            begin_run(session, &mut dom, &mut *editors)?
        };

        let Some(ticket) = ticket else {
            return Ok(());
        };

        let app = Rc::clone(self);
        spawn_local(async move {
            let result = app.client.execute(&ticket.sql).await;
            if let Err(err) = app.finish_run(&ticket, result) {
                web_sys::console::error_1(&to_js(err));
            }
        });
        Ok(())
    }

    fn finish_run(
        &self,
        ticket: &RunTicket,
        result: Result<StatementResult, QueryError>,
    ) -> Result<bool, DomError> {
        let mut sessions = self.sessions.borrow_mut();
        let session = sessions
            .get_mut(&ticket.panel)
            .ok_or_else(|| DomError::Host(format!("unknown panel '{}'", ticket.panel)))?;
        let mut dom = WebPanel::new(&self.document, &ticket.panel);
        complete_run(session, &mut dom, ticket, result)
    }
}

/// Wire every panel on the page once the document is parsed
#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;
    let document = window
        .document()
        .ok_or_else(|| JsValue::from_str("no document"))?;
    let app = EditorApp::new(document.clone(), Config::default());

    if document.ready_state() == "loading" {
        let listener =
            Closure::<dyn FnMut() -> Result<(), JsValue>>::new(move || app.attach());
        document.add_event_listener_with_callback(
            "DOMContentLoaded",
            listener.as_ref().unchecked_ref(),
        )?;
        listener.forget();
        Ok(())
    } else {
        app.attach()
    }
}

/// Duration formatter for host pages that render timings themselves
#[wasm_bindgen(js_name = formatDuration)]
pub fn format_duration(seconds: f64) -> String {
    crate::utils::format::format_duration(seconds)
}
