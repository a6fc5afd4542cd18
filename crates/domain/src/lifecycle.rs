//! # ステータスのライフサイクル
//!
//! 各エンティティのステータス列挙型が実装する共通トレイト。
//! 絞り込み条件の選択肢（[`EntityStatus::values`]）と、
//! 操作の実行可否（[`EntityStatus::transition`]）を提供する。

use crate::{DomainError, StatusAction};

/// 操作を適用した結果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition<S> {
    /// 新しいステータスへ遷移する
    To(S),
    /// エンティティが削除される
    Removed,
}

/// エンティティのステータス
pub trait EntityStatus: Copy + Eq + Into<&'static str> + 'static {
    /// エンティティの表示名
    const ENTITY: &'static str;

    /// ワイヤ形式のステータス値の一覧（宣言順）
    fn values() -> &'static [&'static str];

    /// 操作を適用した後のステータスを求める
    ///
    /// 実行できない操作なら `None`。
    fn next(self, action: StatusAction) -> Option<Transition<Self>>;

    /// 操作を適用する
    ///
    /// # エラー
    ///
    /// 現在のステータスで実行できない操作なら `DomainError::InvalidTransition` を返す。
    fn transition(self, action: StatusAction) -> Result<Transition<Self>, DomainError> {
        self.next(action).ok_or_else(|| DomainError::InvalidTransition {
            entity_type: Self::ENTITY,
            from:        self.into(),
            action:      action.label(),
        })
    }

    fn allows(self, action: StatusAction) -> bool {
        self.next(action).is_some()
    }

    /// このステータスで実行できる操作の一覧
    fn available_actions(self) -> Vec<StatusAction> {
        [
            StatusAction::Publish,
            StatusAction::Archive,
            StatusAction::Activate,
            StatusAction::Freeze,
            StatusAction::Cancel,
            StatusAction::Delete,
        ]
        .into_iter()
        .filter(|action| self.allows(*action))
        .collect()
    }
}
