//! # URL 同期（URL Synchronizer）
//!
//! 絞り込み状態と URL クエリを相互に一致させる。
//!
//! - `pull`: URL → 絞り込み状態。現在の状態と異なる場合のみ新しい状態を返す
//! - `push`: 絞り込み状態 → URL。生成したクエリが現在の URL と異なる場合のみ書き込む
//!
//! どちらも差分がなければ何もしないため、`push` → `pull` → `push` を繰り返しても
//! 履歴エントリは増えない。

use std::sync::Arc;

use crate::filter::{FilterField, FilterState, QueryString};

/// URL 更新時の履歴の扱い
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HistoryMode {
    /// 新しい履歴エントリを追加する（ユーザー操作による変更）
    Push,
    /// 現在のエントリを置き換える（マウント時の正規化）
    Replace,
}

/// 現在位置のクエリを読み書きするナビゲーション機能
///
/// ブラウザの `window.location.search` と History API に相当する。
pub trait Navigator: Send + Sync {
    /// 現在のクエリ文字列（空なら `""`、それ以外は `?` 付き）
    fn search(&self) -> String;

    /// 現在位置のクエリを更新する
    fn navigate(&self, search: &str, mode: HistoryMode);
}

/// 絞り込み状態と URL の同期を担う
pub struct QuerySynchronizer {
    navigator: Arc<dyn Navigator>,
    schema:    &'static [FilterField],
}

impl QuerySynchronizer {
    pub fn new(navigator: Arc<dyn Navigator>, schema: &'static [FilterField]) -> Self {
        Self { navigator, schema }
    }

    /// 現在の URL から絞り込み状態を導出する
    pub fn read(&self) -> FilterState {
        FilterState::from_query(self.schema, &QueryString::parse(&self.navigator.search()))
    }

    /// URL の状態を取り込む
    ///
    /// # 戻り値
    ///
    /// URL から導出した状態が `current` と異なる場合のみ `Some`
    pub fn pull(&self, current: &FilterState) -> Option<FilterState> {
        let derived = self.read();
        (derived != *current).then_some(derived)
    }

    /// 絞り込み状態を URL に書き込む
    ///
    /// # 戻り値
    ///
    /// 実際に URL を更新したかどうか
    pub fn push(&self, state: &FilterState, mode: HistoryMode) -> bool {
        let search = state.to_query().to_search();
        if search == self.navigator.search() {
            return false;
        }

        tracing::debug!(%search, ?mode, "URL を更新します");
        self.navigator.navigate(&search, mode);
        true
    }
}
