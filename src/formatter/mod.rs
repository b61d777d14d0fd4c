//! Output formatting for query results
//!
//! A successful non-empty result is printed as indented JSON. Empty results
//! print nothing, and errors print their message on a single line.

mod json;

use crate::config::DisplayConfig;
use crate::error::{Result, ShellError};
use crate::executor::ResultData;

pub use json::JsonFormatter;

/// Renders query outcomes for the terminal
#[derive(Debug, Clone, Default)]
pub struct Formatter {
    json: JsonFormatter,
}

impl Formatter {
    /// Create a formatter from display configuration
    pub fn from_config(config: &DisplayConfig) -> Self {
        Self {
            json: JsonFormatter::new(config.indent, config.color_output),
        }
    }

    /// Format a successful result.
    ///
    /// # Returns
    /// * `Result<Option<String>>` - `None` when the result has nothing to show
    pub fn format(&self, data: &ResultData) -> Result<Option<String>> {
        if data.is_empty() {
            return Ok(None);
        }
        match data {
            ResultData::Value(value) => self.json.format_value(value).map(Some),
            ResultData::None => Ok(None),
        }
    }

    /// Format a query error as a single line
    pub fn format_error(&self, error: &ShellError) -> String {
        error
            .to_string()
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .collect::<Vec<_>>()
            .join(" ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::QueryError;
    use serde_json::json;

    fn formatter() -> Formatter {
        Formatter::from_config(&DisplayConfig {
            color_output: false,
            ..DisplayConfig::default()
        })
    }

    #[test]
    fn test_format_value() {
        let output = formatter()
            .format(&ResultData::Value(json!({"count": 3})))
            .unwrap();
        assert_eq!(output.as_deref(), Some("{\n    \"count\": 3\n}"));
    }

    #[test]
    fn test_empty_results_print_nothing() {
        let f = formatter();
        assert_eq!(f.format(&ResultData::None).unwrap(), None);
        assert_eq!(f.format(&ResultData::Value(json!([]))).unwrap(), None);
        assert_eq!(f.format(&ResultData::Value(json!({}))).unwrap(), None);
    }

    #[test]
    fn test_format_error_single_line() {
        let err = ShellError::from(QueryError::Rejected {
            status: 400,
            message: "bad query\n  near 'gett'\n".to_string(),
        });
        assert_eq!(formatter().format_error(&err), "bad query near 'gett'");
    }

    #[test]
    fn test_format_error_message_text() {
        let err = ShellError::from(QueryError::Timeout);
        assert_eq!(formatter().format_error(&err), "Query timed out");
    }
}
