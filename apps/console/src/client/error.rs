//! API クライアントのエラー型

use shienflow_listview::SourceError;
use thiserror::Error;

/// API クライアントエラー
#[derive(Debug, Clone, Error)]
pub enum ApiClientError {
    /// 認証切れ（401）
    #[error("認証に失敗しました")]
    Unauthorized,

    /// 権限不足（403）
    #[error("権限がありません: {0}")]
    Forbidden(String),

    /// 対象が見つからない（404）
    #[error("対象が見つかりません: {0}")]
    NotFound(String),

    /// バリデーションエラー（400）
    #[error("バリデーションエラー: {0}")]
    ValidationError(String),

    /// 競合（409）
    #[error("競合が発生しました: {0}")]
    Conflict(String),

    /// ネットワークエラー
    #[error("ネットワークエラー: {0}")]
    Network(String),

    /// 予期しないエラー
    #[error("予期しないエラー: {0}")]
    Unexpected(String),
}

impl From<reqwest::Error> for ApiClientError {
    fn from(err: reqwest::Error) -> Self {
        ApiClientError::Network(err.to_string())
    }
}

impl From<ApiClientError> for SourceError {
    fn from(err: ApiClientError) -> Self {
        match err {
            ApiClientError::Unauthorized => SourceError::Unauthorized,
            ApiClientError::Forbidden(detail) => SourceError::Forbidden(detail),
            ApiClientError::NotFound(detail) => SourceError::NotFound(detail),
            ApiClientError::ValidationError(detail) => SourceError::Validation(detail),
            ApiClientError::Conflict(detail) => SourceError::Conflict(detail),
            ApiClientError::Network(detail) => SourceError::Network(detail),
            ApiClientError::Unexpected(detail) => SourceError::Unexpected(detail),
        }
    }
}
