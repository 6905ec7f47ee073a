//! エラー型定義
//!
//! 統一エラー型（thiserror使用）

use thiserror::Error;

/// Common layer error type
#[derive(Debug, Error)]
pub enum CommonError {
    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Fixture API error type
#[derive(Debug, Error)]
pub enum FixtureApiError {
    /// Common layer error
    #[error(transparent)]
    Common(#[from] CommonError),

    /// Collection not found
    #[error("Collection not found: {0}")]
    CollectionNotFound(String),

    /// Record not found
    #[error("Record not found: {collection}/{id}")]
    RecordNotFound {
        /// コレクション名
        collection: String,
        /// リクエストされたID
        id: String,
    },

    /// A record with the same id already exists
    #[error("Duplicate id in {collection}: {id}")]
    DuplicateId {
        /// コレクション名
        collection: String,
        /// 重複したID
        id: String,
    },

    /// Request body could not be used
    #[error("Invalid request body: {0}")]
    InvalidBody(String),

    /// Fixture file has an unexpected shape
    #[error("Invalid fixture: {0}")]
    InvalidFixture(String),

    /// Persisting the store failed
    #[error("Storage error: {0}")]
    Storage(String),
}

impl FixtureApiError {
    /// 404として扱うべきエラーか
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            FixtureApiError::CollectionNotFound(_) | FixtureApiError::RecordNotFound { .. }
        )
    }
}

impl From<serde_json::Error> for FixtureApiError {
    fn from(err: serde_json::Error) -> Self {
        FixtureApiError::Common(CommonError::Serialization(err))
    }
}

impl From<std::io::Error> for FixtureApiError {
    fn from(err: std::io::Error) -> Self {
        FixtureApiError::Common(CommonError::Io(err))
    }
}

/// Fixture API Result type
pub type FixtureResult<T> = Result<T, FixtureApiError>;
