//! # 状態遷移操作
//!
//! 一覧画面から実行できる操作（公開・アーカイブ・有効化・凍結・取り消し・削除）。
//! 実際の変更はバックエンドが行い、ドメインは実行可否の判定のみを担う。

use serde::{Deserialize, Serialize};
use strum::{EnumString, IntoStaticStr, VariantNames};

/// 一覧画面から実行できる操作
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    IntoStaticStr,
    EnumString,
    VariantNames,
    strum::Display,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum StatusAction {
    Publish,
    Archive,
    Activate,
    Freeze,
    Cancel,
    Delete,
}

impl StatusAction {
    /// 操作名（通知メッセージに使う）
    pub fn label(self) -> &'static str {
        match self {
            Self::Publish => "公開",
            Self::Archive => "アーカイブ",
            Self::Activate => "有効化",
            Self::Freeze => "凍結",
            Self::Cancel => "取り消し",
            Self::Delete => "削除",
        }
    }

    /// API パスのセグメント（`/{id}/{segment}`）
    ///
    /// 削除は `DELETE /{id}` で表現するためセグメントを持たない。
    pub fn path_segment(self) -> Option<&'static str> {
        match self {
            Self::Delete => None,
            other => Some(other.into()),
        }
    }
}
