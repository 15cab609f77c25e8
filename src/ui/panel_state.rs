//! Panel state machine
//!
//! Visibility of every managed element is derived from a [`PanelView`] by a
//! single render function, so the DOM classes cannot drift from the state.

use crate::error::DomError;
use crate::trace_transition;
use crate::ui::dom::{PanelDom, Part};

/// Which of the two sibling boxes is shown
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PanelState {
    /// Code preview visible
    #[default]
    Collapsed,
    /// Live editor visible
    Expanded,
}

impl PanelState {
    pub fn toggled(self) -> Self {
        match self {
            PanelState::Collapsed => PanelState::Expanded,
            PanelState::Expanded => PanelState::Collapsed,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RunState {
    #[default]
    Idle,
    /// A query is in flight
    Running,
}

/// What the result area currently holds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Outcome {
    /// Nothing yet, placeholder shown
    #[default]
    Empty,
    Rows,
    Failed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PanelView {
    pub panel: PanelState,
    pub run: RunState,
    pub outcome: Outcome,
}

impl PanelView {
    /// `(part, visible)` for every element whose visibility the view owns
    pub fn visibility(&self) -> [(Part, bool); 7] {
        let expanded = self.panel == PanelState::Expanded;
        let running = self.run == RunState::Running;
        let has_result = self.outcome != Outcome::Empty;

        [
            (Part::CodeBox, !expanded),
            (Part::EditorBox, expanded),
            (Part::RunButton, !running),
            (Part::StopIndicator, running),
            (Part::Progress, running),
            (Part::Placeholder, !running && !has_result),
            (Part::ResultWrapper, !running && has_result),
        ]
    }

    /// Push the view onto the panel's `hidden` classes
    pub fn render<D: PanelDom + ?Sized>(&self, dom: &mut D) -> Result<(), DomError> {
        for (part, visible) in self.visibility() {
            dom.set_hidden(part, !visible)?;
        }
        Ok(())
    }
}

/// Per-panel state kept between events
#[derive(Debug, Clone)]
pub struct PanelSession {
    key: String,
    view: PanelView,
    generation: u64,
}

impl PanelSession {
    pub fn new(key: &str) -> Self {
        Self {
            key: key.to_string(),
            view: PanelView::default(),
            generation: 0,
        }
    }

    /// Session matching the page as it currently stands: expanded when the
    /// editor box is already visible.
    pub fn observe<D: PanelDom + ?Sized>(dom: &D) -> Result<Self, DomError> {
        let mut session = Self::new(dom.key());
        if !dom.is_hidden(Part::EditorBox)? {
            session.view.panel = PanelState::Expanded;
        }
        Ok(session)
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn view(&self) -> PanelView {
        self.view
    }

    /// Identifies the current result area; runs started under an older
    /// generation are discarded on completion.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn is_busy(&self) -> bool {
        self.view.run == RunState::Running
    }

    pub fn is_expanded(&self) -> bool {
        self.view.panel == PanelState::Expanded
    }

    pub(crate) fn transition(&mut self, next: PanelView) {
        if next != self.view {
            trace_transition!(self.key, self.view, next);
        }
        self.view = next;
    }

    /// Forget the current result and any run in flight
    pub(crate) fn reset_results(&mut self) {
        self.generation += 1;
        let next = PanelView {
            run: RunState::Idle,
            outcome: Outcome::Empty,
            ..self.view
        };
        self.transition(next);
    }
}
