//! API レスポンスの共通ハンドリング

use serde::de::DeserializeOwned;
use shienflow_shared::ErrorResponse;

use super::error::ApiClientError;

/// JSON レスポンスの共通ハンドリング
///
/// 成功時はレスポンスボディを `T` にデシリアライズし、
/// エラー時はステータスコードに応じた `ApiClientError` を返す。
pub(super) async fn handle_response<T: DeserializeOwned>(
    response: reqwest::Response,
) -> Result<T, ApiClientError> {
    let status = response.status();

    if status.is_success() {
        let body = response.json::<T>().await?;
        return Ok(body);
    }

    Err(error_from(status, response).await)
}

/// ボディを使わないレスポンス（変更操作）のハンドリング
pub(super) async fn handle_empty_response(
    response: reqwest::Response,
) -> Result<(), ApiClientError> {
    let status = response.status();

    if status.is_success() {
        return Ok(());
    }

    Err(error_from(status, response).await)
}

async fn error_from(status: reqwest::StatusCode, response: reqwest::Response) -> ApiClientError {
    let body = response.text().await.unwrap_or_default();
    let message = ErrorResponse::message_from_body(&body);

    match status {
        reqwest::StatusCode::BAD_REQUEST => ApiClientError::ValidationError(message),
        reqwest::StatusCode::UNAUTHORIZED => ApiClientError::Unauthorized,
        reqwest::StatusCode::FORBIDDEN => ApiClientError::Forbidden(message),
        reqwest::StatusCode::NOT_FOUND => ApiClientError::NotFound(message),
        reqwest::StatusCode::CONFLICT => ApiClientError::Conflict(message),
        _ => ApiClientError::Unexpected(format!("予期しないステータス {}: {}", status, message)),
    }
}
