//! Query execution seam
//!
//! The REPL hands every submitted line to a [`QueryExecutor`]. The concrete
//! executor talks to the remote store; the loop only sees the returned
//! [`ResultData`] or an error.

mod result;

use async_trait::async_trait;

use crate::error::Result;

pub use result::ResultData;

/// Executes one line of the query language against the backing store
#[async_trait]
pub trait QueryExecutor: Send {
    /// Run `line` and return its result.
    ///
    /// Errors are per-query and recoverable; the caller keeps running.
    async fn query(&mut self, line: &str) -> Result<ResultData>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    /// Answers every query with the line it was given
    struct EchoExecutor;

    #[async_trait]
    impl QueryExecutor for EchoExecutor {
        async fn query(&mut self, line: &str) -> Result<ResultData> {
            Ok(ResultData::from(json!({ "query": line })))
        }
    }

    #[test]
    fn test_executor_as_trait_object() {
        let mut executor: Box<dyn QueryExecutor> = Box::new(EchoExecutor);
        let result = tokio_test::block_on(executor.query("get database")).unwrap();
        assert_eq!(result, ResultData::Value(json!({ "query": "get database" })));
    }
}
