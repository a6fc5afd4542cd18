//! # ページ付き一覧レスポンス
//!
//! 一覧 API のワイヤ形式（[`ListResponse`]）と、画面が保持する取得結果
//! （[`PageResult`]）を定義する。
//!
//! ## JSON 形式
//!
//! ```json
//! {
//!   "items": [...],
//!   "pagination": {
//!     "currentPage": 2,
//!     "totalPages": 5,
//!     "totalCount": 93,
//!     "hasNextPage": true,
//!     "hasPrevPage": true
//!   }
//! }
//! ```
//!
//! エンティティによってフィールド名が微妙に異なる（`data` / `page` / `total` など）ため、
//! デシリアライズ時は別名も受け付ける。

use serde::{Deserialize, Serialize};

/// 一覧 API のレスポンス（ワイヤ形式）
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListResponse<T> {
    #[serde(alias = "data")]
    pub items:      Vec<T>,
    pub pagination: PaginationMeta,
}

/// 一覧 API のページ情報（ワイヤ形式）
///
/// `hasNextPage` / `hasPrevPage` を返さないエンドポイントもあるため `Option` で受け、
/// [`PageResult`] への変換時にページ番号から導出する。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaginationMeta {
    #[serde(alias = "page")]
    pub current_page:  u64,
    #[serde(alias = "pages")]
    pub total_pages:   u64,
    #[serde(alias = "total", alias = "totalItems")]
    pub total_count:   u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub has_next_page: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub has_prev_page: Option<bool>,
}

/// 一覧画面が保持する取得結果
///
/// 取得成功のたびに丸ごと置き換えられ、部分的に更新されることはない。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageResult<T> {
    pub items:         Vec<T>,
    pub current_page:  u64,
    pub total_pages:   u64,
    pub total_count:   u64,
    pub has_next_page: bool,
    pub has_prev_page: bool,
}

impl<T> PageResult<T> {
    /// 空の結果（取得失敗時のリセット先）
    pub fn empty() -> Self {
        Self {
            items:         Vec::new(),
            current_page:  1,
            total_pages:   0,
            total_count:   0,
            has_next_page: false,
            has_prev_page: false,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl<T> Default for PageResult<T> {
    fn default() -> Self {
        Self::empty()
    }
}

impl<T> From<ListResponse<T>> for PageResult<T> {
    fn from(response: ListResponse<T>) -> Self {
        let meta = response.pagination;
        let current_page = meta.current_page.max(1);

        Self {
            items: response.items,
            current_page,
            total_pages: meta.total_pages,
            total_count: meta.total_count,
            has_next_page: meta
                .has_next_page
                .unwrap_or(current_page < meta.total_pages),
            has_prev_page: meta.has_prev_page.unwrap_or(current_page > 1),
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    use super::*;

    #[test]
    fn test_標準形式のjsonをデシリアライズする() {
        let json = r#"{
            "items": ["a", "b"],
            "pagination": {
                "currentPage": 2,
                "totalPages": 3,
                "totalCount": 42,
                "hasNextPage": true,
                "hasPrevPage": true
            }
        }"#;

        let response: ListResponse<String> = serde_json::from_str(json).unwrap();
        let result = PageResult::from(response);

        assert_eq!(
            result,
            PageResult {
                items:         vec!["a".to_string(), "b".to_string()],
                current_page:  2,
                total_pages:   3,
                total_count:   42,
                has_next_page: true,
                has_prev_page: true,
            }
        );
    }

    #[test]
    fn test_別名のフィールドも受け付ける() {
        let json = r#"{
            "data": [1],
            "pagination": { "page": 1, "pages": 1, "total": 1 }
        }"#;

        let response: ListResponse<u32> = serde_json::from_str(json).unwrap();

        assert_eq!(response.items, vec![1]);
        assert_eq!(response.pagination.current_page, 1);
        assert_eq!(response.pagination.total_count, 1);
    }

    #[rstest]
    #[case(1, 3, true, false)]
    #[case(2, 3, true, true)]
    #[case(3, 3, false, true)]
    #[case(1, 0, false, false)]
    fn test_前後ページの有無が欠けている場合はページ番号から導出する(
        #[case] current_page: u64,
        #[case] total_pages: u64,
        #[case] has_next: bool,
        #[case] has_prev: bool,
    ) {
        let response = ListResponse::<u32> {
            items:      vec![],
            pagination: PaginationMeta {
                current_page,
                total_pages,
                total_count: 0,
                has_next_page: None,
                has_prev_page: None,
            },
        };

        let result = PageResult::from(response);

        assert_eq!(result.has_next_page, has_next);
        assert_eq!(result.has_prev_page, has_prev);
    }

    #[test]
    fn test_emptyは1ページ目で件数ゼロ() {
        let result = PageResult::<u32>::empty();

        assert!(result.is_empty());
        assert_eq!(result.current_page, 1);
        assert_eq!(result.total_pages, 0);
        assert_eq!(result.total_count, 0);
        assert!(!result.has_next_page);
        assert!(!result.has_prev_page);
    }
}
