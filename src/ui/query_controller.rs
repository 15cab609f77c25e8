use crate::api::client::QueryBackend;
use crate::api::models::StatementResult;
use crate::error::{DomError, QueryError};
use crate::trace_query;
use crate::ui::dom::{editor_element_id, PanelDom, Part};
use crate::ui::editor::{CodeEditor, EditorHost};
use crate::ui::panel_state::{Outcome, PanelSession, PanelView, RunState};
use crate::ui::table_renderer::{build_error_block, build_table};
use crate::utils::format::format_duration;
use tracing::{error, info, warn};

/// A run that has been started and awaits its result
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunTicket {
    pub panel: String,
    pub generation: u64,
    /// Editor content, verbatim
    pub sql: String,
}

/// Start a run: read the editor and switch the panel to `Running`.
///
/// Returns `None` while a run for this panel is still in flight.
pub fn begin_run<D, H>(
    session: &mut PanelSession,
    dom: &mut D,
    editors: &mut H,
) -> Result<Option<RunTicket>, DomError>
where
    D: PanelDom + ?Sized,
    H: EditorHost + ?Sized,
{
    if session.is_busy() {
        warn!(target: "query", "Panel {}: run ignored, previous run still in flight", session.key());
        return Ok(None);
    }

    let sql = editors.attach(&editor_element_id(session.key()))?.value();

    let next = PanelView {
        run: RunState::Running,
        ..session.view()
    };
    next.render(dom)?;
    session.transition(next);

    trace_query!(session.key(), sql.trim());
    Ok(Some(RunTicket {
        panel: session.key().to_string(),
        generation: session.generation(),
        sql,
    }))
}

/// Render the result of a run and return the panel to `Idle`.
///
/// Returns `false` when the ticket belongs to a result area that has been
/// reset since the run started; nothing is rendered then.
pub fn complete_run<D>(
    session: &mut PanelSession,
    dom: &mut D,
    ticket: &RunTicket,
    result: Result<StatementResult, QueryError>,
) -> Result<bool, DomError>
where
    D: PanelDom + ?Sized,
{
    if ticket.generation != session.generation() {
        warn!(
            target: "query",
            "Panel {}: dropping stale result (generation {} != {})",
            session.key(),
            ticket.generation,
            session.generation()
        );
        return Ok(false);
    }

    let written = write_outcome(session.key(), dom, result);

    // The run is over either way; a failed write must not leave the panel busy.
    let outcome = written.as_ref().copied().unwrap_or(Outcome::Failed);
    let next = PanelView {
        run: RunState::Idle,
        outcome,
        ..session.view()
    };
    session.transition(next);
    let rendered = next.render(dom);

    written?;
    rendered?;
    Ok(true)
}

/// Write the statement result or the error block into the result area
fn write_outcome<D>(
    key: &str,
    dom: &mut D,
    result: Result<StatementResult, QueryError>,
) -> Result<Outcome, DomError>
where
    D: PanelDom + ?Sized,
{
    match result {
        Ok(statement) => {
            dom.replace_children(
                Part::ResultTable,
                &build_table(&statement.columns, &statement.result, statement.result_count),
            )?;
            dom.set_text(Part::RowCount, &statement.result_count.to_string())?;
            dom.set_text(Part::CompileTime, &format_duration(statement.compilation_time))?;
            dom.set_text(Part::ExecutionTime, &format_duration(statement.execution_time))?;
            info!(
                target: "query",
                "Panel {}: {} rows (compile {}, execute {})",
                key,
                statement.result_count,
                format_duration(statement.compilation_time),
                format_duration(statement.execution_time)
            );
            Ok(Outcome::Rows)
        }
        Err(err) => {
            error!(target: "query", "Panel {}: {}", key, err);
            dom.replace_children(Part::ResultTable, &build_error_block(&err))?;
            Ok(Outcome::Failed)
        }
    }
}

/// Run the panel's query against `backend` and render the outcome.
///
/// For hosts that can keep the panel borrowed across the await. Returns
/// `false` when no run was started or its result was stale.
pub async fn run_to_completion<D, H, B>(
    session: &mut PanelSession,
    dom: &mut D,
    editors: &mut H,
    backend: &B,
) -> Result<bool, DomError>
where
    D: PanelDom + ?Sized,
    H: EditorHost + ?Sized,
    B: QueryBackend + ?Sized,
{
    let Some(ticket) = begin_run(session, dom, editors)? else {
        return Ok(false);
    };

    let result = backend.execute(&ticket.sql).await;
    complete_run(session, dom, &ticket, result)
}
