//! # データソース
//!
//! 一覧画面が依存するバックエンドの抽象。
//! テスト時にスタブを使用できるようトレイトで定義する。

use async_trait::async_trait;
use shienflow_domain::StatusAction;
use shienflow_shared::PageResult;
use thiserror::Error;

use crate::{filter::QueryString, views::ListView};

/// データソースのエラー
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SourceError {
    /// 認証切れ（401）
    #[error("ログインの有効期限が切れています")]
    Unauthorized,

    /// 権限不足（403）
    #[error("権限がありません: {0}")]
    Forbidden(String),

    /// 対象が見つからない（404）
    #[error("対象が見つかりません: {0}")]
    NotFound(String),

    /// バリデーションエラー（400）
    #[error("入力内容に誤りがあります: {0}")]
    Validation(String),

    /// 競合（409、状態遷移の不整合など）
    #[error("競合が発生しました: {0}")]
    Conflict(String),

    /// ネットワークエラー
    #[error("ネットワークエラー: {0}")]
    Network(String),

    /// 予期しないエラー
    #[error("予期しないエラー: {0}")]
    Unexpected(String),
}

/// 一括操作の結果
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BulkOutcome {
    pub succeeded: Vec<String>,
    pub failed:    Vec<String>,
}

/// 一覧と統計の取得元
#[async_trait]
pub trait ListSource<V: ListView>: Send + Sync {
    /// 絞り込み条件に一致するページを取得する
    async fn fetch_page(&self, query: &QueryString)
    -> Result<PageResult<V::Item>, SourceError>;

    /// 統計パネルの集計値を取得する
    async fn fetch_stats(&self) -> Result<V::Stats, SourceError>;
}

/// 状態遷移操作の実行先
#[async_trait]
pub trait ActionSink<V: ListView>: Send + Sync {
    /// 1 件に操作を実行する
    async fn perform(&self, id: &str, action: StatusAction) -> Result<(), SourceError>;

    /// 複数件に同じ操作を実行する
    async fn perform_bulk(
        &self,
        ids: &[String],
        action: StatusAction,
    ) -> Result<BulkOutcome, SourceError>;
}
