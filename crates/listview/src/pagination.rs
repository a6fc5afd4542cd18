//! # ページ情報（Pagination Tracker）
//!
//! 最後に取得に成功した [`PageResult`] から導出する読み取り専用のビュー。
//! 独自の状態は持たず、ページ移動は絞り込み状態の `page` を書き換えるだけ。

use shienflow_shared::PageResult;

use crate::filter::FilterState;

/// 現在のページ情報
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    pub current_page:  u64,
    pub total_pages:   u64,
    pub total_count:   u64,
    pub has_next_page: bool,
    pub has_prev_page: bool,
}

impl Pagination {
    pub fn of<T>(result: &PageResult<T>) -> Self {
        Self {
            current_page:  result.current_page,
            total_pages:   result.total_pages,
            total_count:   result.total_count,
            has_next_page: result.has_next_page,
            has_prev_page: result.has_prev_page,
        }
    }

    /// 要求されたページ番号を `[1, total_pages]` に丸める
    ///
    /// 結果が 0 件（`total_pages == 0`）の場合は 1 ページとみなす。
    pub fn clamp(&self, requested: i64) -> u64 {
        let upper = i64::try_from(self.total_pages.max(1)).unwrap_or(i64::MAX);
        // 丸めた値は 1 以上なので符号なしへの変換は失敗しない
        requested.clamp(1, upper).unsigned_abs()
    }

    /// 指定ページへ移動する
    ///
    /// 範囲外の要求はエラーにせず丸める。
    ///
    /// # 戻り値
    ///
    /// 絞り込み状態が変化したかどうか
    pub fn go_to_page(&self, filters: &mut FilterState, requested: i64) -> bool {
        filters.set_page(self.clamp(requested))
    }
}

impl<T> From<&PageResult<T>> for Pagination {
    fn from(result: &PageResult<T>) -> Self {
        Self::of(result)
    }
}
