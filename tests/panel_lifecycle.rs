use async_trait::async_trait;
use serde_json::json;
use sql_editor::api::client::{build_request_body, QueryBackend, DEFAULT_SESSION_PREAMBLE};
use sql_editor::api::models::{ColumnInfo, StatementResult};
use sql_editor::config::config::EditorConfig;
use sql_editor::ui::{
    begin_run, complete_run, run_to_completion, toggle_panel, ColorScheme, MemoryEditors,
    MemoryPanel, Outcome, PanelDom, PanelSession, PanelState, Part,
};
use sql_editor::{DomError, QueryError};
use std::cell::RefCell;

/// Backend answering every query with a fixed result
struct FakeBackend {
    response: Result<StatementResult, QueryError>,
    queries: RefCell<Vec<String>>,
}

impl FakeBackend {
    fn answering(response: Result<StatementResult, QueryError>) -> Self {
        Self {
            response,
            queries: RefCell::new(Vec::new()),
        }
    }
}

#[async_trait(?Send)]
impl QueryBackend for FakeBackend {
    async fn execute(&self, sql: &str) -> Result<StatementResult, QueryError> {
        self.queries.borrow_mut().push(sql.to_string());
        self.response.clone()
    }
}

fn three_nations() -> StatementResult {
    StatementResult {
        columns: vec![ColumnInfo::new("n_nationkey"), ColumnInfo::new("n_name")],
        result: vec![
            vec![json!(0), json!(1), json!(2)],
            vec![json!("ALGERIA"), json!("ARGENTINA"), json!("BRAZIL")],
        ],
        result_count: 3,
        compilation_time: 0.0025,
        execution_time: 0.0000005,
    }
}

fn syntax_error() -> QueryError {
    QueryError::Server {
        exception: "SyntaxError".to_string(),
        details: "near SELECT".to_string(),
    }
}

struct Fixture {
    session: PanelSession,
    dom: MemoryPanel,
    editors: MemoryEditors,
    settings: EditorConfig,
}

impl Fixture {
    fn new(sql: &str) -> Self {
        Self {
            session: PanelSession::new("q1"),
            dom: MemoryPanel::with_code("q1", sql),
            editors: MemoryEditors::new(),
            settings: EditorConfig::default(),
        }
    }

    fn toggle(&mut self) -> PanelState {
        toggle_panel(
            &mut self.session,
            &mut self.dom,
            &mut self.editors,
            &self.settings,
            ColorScheme::Light,
        )
        .unwrap()
    }

    async fn run(&mut self, backend: &FakeBackend) -> bool {
        run_to_completion(&mut self.session, &mut self.dom, &mut self.editors, backend)
            .await
            .unwrap()
    }

    fn visible(&self, part: Part) -> bool {
        !self.dom.is_hidden(part).unwrap()
    }
}

#[tokio::test]
async fn test_successful_run_renders_rows_and_timings() {
    let mut fx = Fixture::new("SELECT n_nationkey, n_name FROM nation LIMIT 3;");
    fx.toggle();

    let backend = FakeBackend::answering(Ok(three_nations()));
    assert!(fx.run(&backend).await);

    assert_eq!(fx.dom.text(Part::RowCount).unwrap(), "3");
    assert_eq!(fx.dom.text(Part::CompileTime).unwrap(), "2.50ms");
    assert_eq!(fx.dom.text(Part::ExecutionTime).unwrap(), "0.50µs");
    assert_eq!(
        fx.dom.table_rows().unwrap(),
        vec![
            vec!["n_nationkey", "n_name"],
            vec!["0", "ALGERIA"],
            vec!["1", "ARGENTINA"],
            vec!["2", "BRAZIL"],
        ]
    );

    assert!(fx.visible(Part::RunButton));
    assert!(!fx.visible(Part::StopIndicator));
    assert!(!fx.visible(Part::Progress));
    assert!(!fx.visible(Part::Placeholder));
    assert!(fx.visible(Part::ResultWrapper));
    assert_eq!(fx.session.view().outcome, Outcome::Rows);
}

#[tokio::test]
async fn test_failed_run_renders_error_block() {
    let mut fx = Fixture::new("SELEC 1");
    fx.toggle();

    let backend = FakeBackend::answering(Err(syntax_error()));
    assert!(fx.run(&backend).await);

    assert_eq!(
        fx.dom.inner_html(Part::ResultTable).unwrap(),
        "<b>Error: SyntaxError</b><br><span>near SELECT</span>"
    );
    assert!(fx.visible(Part::RunButton));
    assert!(!fx.visible(Part::StopIndicator));
    assert!(!fx.visible(Part::Progress));
    assert!(fx.visible(Part::ResultWrapper));
    assert_eq!(fx.session.view().outcome, Outcome::Failed);
}

#[tokio::test]
async fn test_error_replaces_previous_rows() {
    let mut fx = Fixture::new("select 1");
    fx.toggle();

    fx.run(&FakeBackend::answering(Ok(three_nations()))).await;
    fx.run(&FakeBackend::answering(Err(syntax_error()))).await;

    assert!(fx.dom.table_rows().unwrap().is_empty());
    assert_eq!(fx.dom.children(Part::ResultTable).unwrap().len(), 3);
}

#[tokio::test]
async fn test_second_render_replaces_first() {
    let mut fx = Fixture::new("select 1");
    fx.toggle();

    let single = StatementResult {
        columns: vec![ColumnInfo::new("x")],
        result: vec![vec![json!("only")]],
        result_count: 1,
        compilation_time: 0.0,
        execution_time: 0.0,
    };
    fx.run(&FakeBackend::answering(Ok(three_nations()))).await;
    fx.run(&FakeBackend::answering(Ok(single))).await;

    assert_eq!(
        fx.dom.table_rows().unwrap(),
        vec![vec!["x"], vec!["only"]]
    );
    assert_eq!(fx.dom.text(Part::RowCount).unwrap(), "1");
}

#[tokio::test]
async fn test_reopening_clears_stale_results() {
    let mut fx = Fixture::new("select 1");
    assert_eq!(fx.toggle(), PanelState::Expanded);
    fx.run(&FakeBackend::answering(Ok(three_nations()))).await;
    assert!(fx.visible(Part::ResultWrapper));

    assert_eq!(fx.toggle(), PanelState::Collapsed);
    assert_eq!(fx.toggle(), PanelState::Expanded);

    assert!(fx.dom.children(Part::ResultTable).unwrap().is_empty());
    assert!(!fx.visible(Part::ResultWrapper));
    assert!(!fx.visible(Part::Progress));
    assert!(fx.visible(Part::Placeholder));
    assert!(fx.visible(Part::RunButton));
}

#[test]
fn test_toggle_round_trip_restores_visibility() {
    let mut fx = Fixture::new("select 1");
    let code_before = fx.visible(Part::CodeBox);
    let editor_before = fx.visible(Part::EditorBox);

    fx.toggle();
    assert_ne!(fx.visible(Part::CodeBox), fx.visible(Part::EditorBox));
    assert_eq!(fx.visible(Part::CodeBox), !code_before);

    fx.toggle();
    assert_eq!(fx.visible(Part::CodeBox), code_before);
    assert_eq!(fx.visible(Part::EditorBox), editor_before);
}

#[test]
fn test_running_state_and_busy_gate() {
    let mut fx = Fixture::new("select 1");
    fx.toggle();

    let ticket = begin_run(&mut fx.session, &mut fx.dom, &mut fx.editors)
        .unwrap()
        .expect("first run starts");
    assert!(!fx.visible(Part::RunButton));
    assert!(fx.visible(Part::StopIndicator));
    assert!(fx.visible(Part::Progress));
    assert!(!fx.visible(Part::Placeholder));
    assert!(!fx.visible(Part::ResultWrapper));

    let second = begin_run(&mut fx.session, &mut fx.dom, &mut fx.editors).unwrap();
    assert!(second.is_none());

    let rendered = complete_run(&mut fx.session, &mut fx.dom, &ticket, Ok(three_nations())).unwrap();
    assert!(rendered);
    assert!(!fx.session.is_busy());
    assert!(begin_run(&mut fx.session, &mut fx.dom, &mut fx.editors)
        .unwrap()
        .is_some());
}

#[test]
fn test_completion_after_reset_is_dropped() {
    let mut fx = Fixture::new("select 1");
    fx.toggle();

    let ticket = begin_run(&mut fx.session, &mut fx.dom, &mut fx.editors)
        .unwrap()
        .unwrap();
    fx.toggle();
    fx.toggle();

    let rendered = complete_run(&mut fx.session, &mut fx.dom, &ticket, Ok(three_nations())).unwrap();
    assert!(!rendered);
    assert!(fx.dom.children(Part::ResultTable).unwrap().is_empty());
    assert!(fx.visible(Part::Placeholder));
    assert!(!fx.visible(Part::ResultWrapper));
}

#[tokio::test]
async fn test_editor_content_is_sent_verbatim() {
    let mut fx = Fixture::new("select 1");
    fx.toggle();
    fx.editors.get_mut("editor-q1").unwrap().value = "SELECT 1;".to_string();

    let backend = FakeBackend::answering(Ok(three_nations()));
    fx.run(&backend).await;

    let queries = backend.queries.borrow();
    assert_eq!(queries.as_slice(), ["SELECT 1;"]);
    assert_eq!(
        build_request_body(DEFAULT_SESSION_PREAMBLE, &queries[0]),
        "set search_path = tpchSf1, public;\nSELECT 1;"
    );
}

#[tokio::test]
async fn test_malformed_response_is_reported() {
    let mut fx = Fixture::new("select 1");
    fx.toggle();

    let backend = FakeBackend::answering(Err(QueryError::MalformedResponse(
        "response contains no results".to_string(),
    )));
    fx.run(&backend).await;

    assert_eq!(
        fx.dom.inner_html(Part::ResultTable).unwrap(),
        "<b>Error: MalformedResponse</b><br><span>response contains no results</span>"
    );
}

#[tokio::test]
async fn test_markup_from_server_is_escaped() {
    let mut fx = Fixture::new("select 1");
    fx.toggle();

    let backend = FakeBackend::answering(Err(QueryError::Server {
        exception: "<script>".to_string(),
        details: "<img src=x onerror=alert(1)>".to_string(),
    }));
    fx.run(&backend).await;

    let html = fx.dom.inner_html(Part::ResultTable).unwrap();
    assert!(!html.contains("<script>"));
    assert!(html.contains("&lt;img src=x onerror=alert(1)&gt;"));
}

#[test]
fn test_missing_progress_element_fails_fast() {
    let mut fx = Fixture::new("select 1");
    fx.dom = MemoryPanel::with_code("q1", "select 1").without(Part::Progress);

    let err = toggle_panel(
        &mut fx.session,
        &mut fx.dom,
        &mut fx.editors,
        &fx.settings,
        ColorScheme::Light,
    )
    .unwrap_err();
    assert_eq!(
        err,
        DomError::MissingElement {
            panel: "q1".to_string(),
            locator: "#editorbox-q1 .progress".to_string(),
        }
    );
    assert_eq!(fx.session.view().panel, PanelState::Collapsed);
}

#[test]
fn test_failed_completion_releases_busy_gate() {
    let mut fx = Fixture::new("select 1");
    fx.dom = MemoryPanel::with_code("q1", "select 1").without(Part::RowCount);
    fx.toggle();

    let ticket = begin_run(&mut fx.session, &mut fx.dom, &mut fx.editors)
        .unwrap()
        .unwrap();
    let err = complete_run(&mut fx.session, &mut fx.dom, &ticket, Ok(three_nations())).unwrap_err();
    assert_eq!(
        err,
        DomError::MissingElement {
            panel: "q1".to_string(),
            locator: "#editorbox-q1 .rowcount".to_string(),
        }
    );

    assert!(!fx.session.is_busy());
    assert!(fx.visible(Part::RunButton));
    assert!(!fx.visible(Part::Progress));
    assert!(begin_run(&mut fx.session, &mut fx.dom, &mut fx.editors)
        .unwrap()
        .is_some());
}

#[test]
fn test_panels_do_not_share_state() {
    let mut a = Fixture::new("select 'a'");
    let mut b = Fixture::new("select 'b'");
    b.session = PanelSession::new("q2");
    b.dom = MemoryPanel::with_code("q2", "select 'b'");

    a.toggle();
    begin_run(&mut a.session, &mut a.dom, &mut a.editors)
        .unwrap()
        .unwrap();

    b.toggle();
    assert!(a.session.is_busy());
    assert!(!b.session.is_busy());
    assert_eq!(b.editors.get("editor-q2").unwrap().value, "select 'b'\n");
}
