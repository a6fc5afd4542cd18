//! # ドメイン層エラー定義
//!
//! ビジネスルール違反やドメイン固有の例外状態を表現するエラー型。
//!
//! ## エラーの種類
//!
//! | エラー種別 | 用途 |
//! |-----------|------|
//! | `Validation` | 入力値（ID・ステータス文字列など）の検証失敗 |
//! | `InvalidTransition` | 現在のステータスでは実行できない操作 |
//! | `Forbidden` | 権限不足 |

use thiserror::Error;

/// ドメイン層で発生するエラー
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DomainError {
    /// バリデーションエラー
    #[error("バリデーションエラー: {0}")]
    Validation(String),

    /// 状態遷移エラー
    ///
    /// 例: 公開済みのお知らせを再度公開しようとした。
    #[error("{entity_type}（{from}）に対して「{action}」は実行できません")]
    InvalidTransition {
        /// エンティティの種類（"お知らせ", "予算プール" など）
        entity_type: &'static str,
        /// 現在のステータス
        from:        &'static str,
        /// 実行しようとした操作のラベル
        action:      &'static str,
    },

    /// 権限エラー
    #[error("権限がありません: {0}")]
    Forbidden(String),
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_状態遷移エラーのメッセージに操作名とステータスが含まれる() {
        let error = DomainError::InvalidTransition {
            entity_type: "お知らせ",
            from:        "published",
            action:      "公開",
        };

        assert_eq!(
            error.to_string(),
            "お知らせ（published）に対して「公開」は実行できません"
        );
    }
}
