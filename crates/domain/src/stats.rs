//! # ステータス別件数
//!
//! お知らせ・申請・ユーザー・支払い画面の統計パネルが表示する集計値。

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// ステータス別の件数集計
///
/// 取得に失敗した場合はデフォルト値（すべてゼロ）を表示する。
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct StatusSummary {
    pub total:     u64,
    pub by_status: BTreeMap<String, u64>,
}

impl StatusSummary {
    /// 指定ステータスの件数（集計に含まれなければ 0）
    pub fn count(&self, status: &str) -> u64 {
        self.by_status.get(status).copied().unwrap_or(0)
    }
}
