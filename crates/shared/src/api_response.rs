//! # API レスポンスエンベロープ
//!
//! 集計 API などが返す統一レスポンス形式 `{ "data": T }` を提供する。

use serde::{Deserialize, Serialize};

/// 単一データ用の統一レスポンス型
///
/// 一覧 API は `ListResponse<T>` を返すが、統計パネル用のエンドポイントや
/// 状態遷移 API は `{ "data": T }` 形式でレスポンスを返す。
///
/// ## 使用例
///
/// ```
/// use shienflow_shared::ApiResponse;
///
/// let response = ApiResponse::new("hello");
/// assert_eq!(response.data, "hello");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    pub data: T,
}

impl<T> ApiResponse<T> {
    /// 新しい `ApiResponse` を作成する
    pub fn new(data: T) -> Self {
        Self { data }
    }

    /// エンベロープを外して中身を取り出す
    pub fn into_inner(self) -> T {
        self.data
    }
}
