use crate::error::QueryError;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Successful response of the query endpoint: one entry per statement.
#[derive(Debug, Deserialize, Clone)]
pub struct QueryResponse {
    pub results: Vec<StatementResult>,
}

/// Result of a single statement, stored column-major.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct StatementResult {
    pub columns: Vec<ColumnInfo>,
    /// `result[c][i]` is row `i` of column `c`
    #[serde(default)]
    pub result: Vec<Vec<Value>>,
    pub result_count: usize,
    /// Seconds
    pub compilation_time: f64,
    /// Seconds
    pub execution_time: f64,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct ColumnInfo {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub r#type: Option<String>,
}

/// Error document returned with a non-success status.
#[derive(Debug, Deserialize, Clone)]
pub struct ErrorResponse {
    pub exception: String,
    #[serde(default)]
    pub details: String,
}

impl QueryResponse {
    /// Take the first statement's result, the one the panel displays.
    pub fn into_first_result(self) -> Result<StatementResult, QueryError> {
        let first = self.results.into_iter().next().ok_or_else(|| {
            QueryError::MalformedResponse("response contains no results".to_string())
        })?;
        first.validate()?;
        Ok(first)
    }
}

impl StatementResult {
    /// Check that the data matrix can supply every advertised row.
    pub fn validate(&self) -> Result<(), QueryError> {
        if self.result_count == 0 {
            return Ok(());
        }

        if self.columns.is_empty() {
            return Err(QueryError::MalformedResponse(format!(
                "{} rows advertised but no columns described",
                self.result_count
            )));
        }

        if self.result.len() != self.columns.len() {
            return Err(QueryError::MalformedResponse(format!(
                "{} columns described but {} data columns returned",
                self.columns.len(),
                self.result.len()
            )));
        }

        for (column, values) in self.columns.iter().zip(&self.result) {
            if values.len() < self.result_count {
                return Err(QueryError::MalformedResponse(format!(
                    "column '{}' has {} values, expected {}",
                    column.name,
                    values.len(),
                    self.result_count
                )));
            }
        }

        Ok(())
    }

    pub fn column_names(&self) -> Vec<String> {
        self.columns.iter().map(|c| c.name.clone()).collect()
    }
}

impl ColumnInfo {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            r#type: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_success_document() {
        let body = json!({
            "results": [{
                "columns": [{"name": "n_name", "type": "text"}, {"name": "cnt", "type": "bigint"}],
                "result": [["GERMANY", "FRANCE"], [4, 7]],
                "resultCount": 2,
                "compilationTime": 0.0012,
                "executionTime": 0.00004
            }]
        });

        let response: QueryResponse = serde_json::from_value(body).unwrap();
        let first = response.into_first_result().unwrap();
        assert_eq!(first.column_names(), vec!["n_name", "cnt"]);
        assert_eq!(first.columns[1].r#type.as_deref(), Some("bigint"));
        assert_eq!(first.result_count, 2);
        assert_eq!(first.result[1][1], json!(7));
    }

    #[test]
    fn test_only_first_statement_is_used() {
        let body = json!({
            "results": [
                {"columns": [], "result": [], "resultCount": 0, "compilationTime": 0.0, "executionTime": 0.0},
                {"columns": [{"name": "x"}], "result": [[1]], "resultCount": 1, "compilationTime": 0.0, "executionTime": 0.0}
            ]
        });
        let response: QueryResponse = serde_json::from_value(body).unwrap();
        let first = response.into_first_result().unwrap();
        assert!(first.columns.is_empty());
    }

    #[test]
    fn test_empty_results_is_malformed() {
        let response = QueryResponse { results: vec![] };
        assert!(matches!(
            response.into_first_result(),
            Err(QueryError::MalformedResponse(_))
        ));
    }

    #[test]
    fn test_short_column_is_malformed() {
        let result = StatementResult {
            columns: vec![ColumnInfo::new("a"), ColumnInfo::new("b")],
            result: vec![vec![json!(1), json!(2)], vec![json!(3)]],
            result_count: 2,
            compilation_time: 0.0,
            execution_time: 0.0,
        };
        let err = result.validate().unwrap_err();
        assert_eq!(
            err,
            QueryError::MalformedResponse("column 'b' has 1 values, expected 2".to_string())
        );
    }

    #[test]
    fn test_column_count_mismatch_is_malformed() {
        let result = StatementResult {
            columns: vec![ColumnInfo::new("a")],
            result: vec![vec![json!(1)], vec![json!(2)]],
            result_count: 1,
            compilation_time: 0.0,
            execution_time: 0.0,
        };
        assert!(result.validate().is_err());
    }

    #[test]
    fn test_rows_without_columns_is_malformed() {
        let result = StatementResult {
            columns: vec![],
            result: vec![],
            result_count: 5,
            compilation_time: 0.0,
            execution_time: 0.0,
        };
        assert_eq!(
            result.validate().unwrap_err(),
            QueryError::MalformedResponse("5 rows advertised but no columns described".to_string())
        );
    }

    #[test]
    fn test_error_document_details_optional() {
        let err: ErrorResponse = serde_json::from_str(r#"{"exception":"Timeout"}"#).unwrap();
        assert_eq!(err.exception, "Timeout");
        assert_eq!(err.details, "");
    }
}
