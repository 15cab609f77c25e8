use super::models::{ErrorResponse, QueryResponse, StatementResult};
use crate::config::config::ApiConfig;
use crate::error::QueryError;
use async_trait::async_trait;
use reqwest::header::CONTENT_TYPE;
use tracing::{debug, warn};

pub const DEFAULT_ENDPOINT: &str = "https://umbra.db.in.tum.de/api/query";

/// Statement sent ahead of every query so unqualified names hit TPC-H SF1.
pub const DEFAULT_SESSION_PREAMBLE: &str = "set search_path = tpchSf1, public;\n";

/// The endpoint takes the raw statement text as the body; this is the
/// content type browsers send for a plain string payload.
pub const DEFAULT_CONTENT_TYPE: &str = "application/x-www-form-urlencoded; charset=UTF-8";

/// Something that can execute a panel's SQL and hand back the first result.
#[async_trait(?Send)]
pub trait QueryBackend {
    async fn execute(&self, sql: &str) -> Result<StatementResult, QueryError>;
}

#[derive(Clone)]
pub struct ApiClient {
    endpoint: String,
    session_preamble: String,
    content_type: String,
    client: reqwest::Client,
}

impl ApiClient {
    pub fn new(endpoint: &str) -> Self {
        Self {
            endpoint: endpoint.to_string(),
            session_preamble: DEFAULT_SESSION_PREAMBLE.to_string(),
            content_type: DEFAULT_CONTENT_TYPE.to_string(),
            client: reqwest::Client::new(),
        }
    }

    pub fn from_config(config: &ApiConfig) -> Self {
        Self {
            endpoint: config.endpoint.clone(),
            session_preamble: config.session_preamble.clone(),
            content_type: config.content_type.clone(),
            client: reqwest::Client::new(),
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Body actually transmitted for `sql`
    pub fn request_body(&self, sql: &str) -> String {
        build_request_body(&self.session_preamble, sql)
    }
}

/// Session setup statement followed by the editor content, as plain text.
pub fn build_request_body(session_preamble: &str, sql: &str) -> String {
    let mut body = String::with_capacity(session_preamble.len() + sql.len());
    body.push_str(session_preamble);
    body.push_str(sql);
    body
}

/// Map a status code and body onto the first statement result or an error.
pub fn interpret_response(status: u16, body: &str) -> Result<StatementResult, QueryError> {
    if (200..300).contains(&status) {
        let response: QueryResponse = serde_json::from_str(body)
            .map_err(|e| QueryError::MalformedResponse(e.to_string()))?;
        return response.into_first_result();
    }

    match serde_json::from_str::<ErrorResponse>(body) {
        Ok(err) => Err(QueryError::Server {
            exception: err.exception,
            details: err.details,
        }),
        Err(_) => {
            warn!(target: "api", "Status {} without an error document", status);
            Err(QueryError::Http {
                status,
                body: body.to_string(),
            })
        }
    }
}

#[async_trait(?Send)]
impl QueryBackend for ApiClient {
    async fn execute(&self, sql: &str) -> Result<StatementResult, QueryError> {
        let body = self.request_body(sql);
        debug!(target: "api", "POST {} ({} bytes)", self.endpoint, body.len());

        let response = self
            .client
            .post(&self.endpoint)
            .header(CONTENT_TYPE, self.content_type.as_str())
            .body(body)
            .send()
            .await?;

        let status = response.status().as_u16();
        let text = response.text().await?;
        debug!(target: "api", "Response status {} ({} bytes)", status, text.len());

        interpret_response(status, &text)
    }
}
