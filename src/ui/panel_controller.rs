use crate::config::config::EditorConfig;
use crate::error::DomError;
use crate::ui::dom::{editor_element_id, PanelDom, Part};
use crate::ui::editor::{CodeEditor, ColorScheme, EditorHost};
use crate::ui::panel_state::{PanelSession, PanelState, PanelView};
use tracing::debug;

/// Toggle a panel between its code preview and its live editor.
///
/// Opening a collapsed panel first resets its result area, so a previous
/// run never shows up again. On every toggle the editor bound to
/// `editor-<key>` is (re)configured and reseeded from the code preview.
pub fn toggle_panel<D, H>(
    session: &mut PanelSession,
    dom: &mut D,
    editors: &mut H,
    settings: &EditorConfig,
    scheme: ColorScheme,
) -> Result<PanelState, DomError>
where
    D: PanelDom + ?Sized,
    H: EditorHost + ?Sized,
{
    if session.view().panel == PanelState::Collapsed {
        session.reset_results();
        dom.replace_children(Part::ResultTable, &[])?;
    }

    let current = session.view();
    let next = PanelView {
        panel: current.panel.toggled(),
        ..current
    };
    next.render(dom)?;
    session.transition(next);

    let sql = dom.text(Part::SqlCode)?;
    let editor = editors.attach(&editor_element_id(session.key()))?;
    editor.set_theme(settings.theme_for(scheme));
    editor.set_mode(&settings.mode);
    editor.set_value(&format!("{}\n", sql.trim()));
    editor.set_line_bounds(settings.min_lines, settings.max_lines);
    editor.clear_selection();

    debug!(
        target: "panel",
        "Panel {} now {:?} ({:?} theme)",
        session.key(),
        session.view().panel,
        scheme
    );
    Ok(session.view().panel)
}
