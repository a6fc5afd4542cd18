//! # 絞り込み条件（Filter State Store）
//!
//! 一覧画面ごとに固定されたキー集合（[`FilterField`] のスライス）に対して、
//! 現在の絞り込み値を保持する。
//!
//! ## 不変条件
//!
//! - 未設定・空文字・デフォルト値はすべて「条件なし」として同一に扱い、内部には保持しない
//! - そのためクエリ文字列にも現れず、`from_query(to_query(F)) == F` が常に成り立つ
//! - 不正な値（解釈できないページ番号、未知の選択肢）はエラーにせずデフォルトへ戻す
//!
//! ## 使用例
//!
//! ```rust
//! use shienflow_listview::{FilterField, FilterState};
//!
//! const SCHEMA: &[FilterField] = &[
//!     FilterField::choice("status", &["draft", "published"]),
//!     FilterField::text("search"),
//!     FilterField::page(),
//!     FilterField::limit(20),
//! ];
//!
//! let mut filters = FilterState::new(SCHEMA);
//! filters.set("status", "published");
//! filters.set("limit", "20");
//!
//! assert_eq!(filters.to_query().to_search(), "?status=published");
//! ```

use std::{collections::BTreeMap, fmt};

/// ページ番号のキー
pub const PAGE_KEY: &str = "page";

/// 1 ページあたりの件数のキー
pub const LIMIT_KEY: &str = "limit";

/// 絞り込み項目の種類
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    /// 自由入力（前後の空白は除去する）
    Text,
    /// 選択肢のいずれか（未知の値は条件なし扱い）
    Choice(&'static [&'static str]),
    /// 数値（デフォルト値はクエリに出さない）
    Number { default: u64, min: u64, max: u64 },
}

/// 絞り込み項目の定義
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FilterField {
    pub key:  &'static str,
    pub kind: FieldKind,
}

impl FilterField {
    pub const fn text(key: &'static str) -> Self {
        Self {
            key,
            kind: FieldKind::Text,
        }
    }

    pub const fn choice(key: &'static str, values: &'static [&'static str]) -> Self {
        Self {
            key,
            kind: FieldKind::Choice(values),
        }
    }

    pub const fn number(key: &'static str, default: u64, min: u64, max: u64) -> Self {
        Self {
            key,
            kind: FieldKind::Number { default, min, max },
        }
    }

    /// ページ番号（デフォルト 1）
    pub const fn page() -> Self {
        Self::number(PAGE_KEY, 1, 1, u64::MAX)
    }

    /// 1 ページあたりの件数（最大 100）
    pub const fn limit(default: u64) -> Self {
        Self::number(LIMIT_KEY, default, 1, 100)
    }

    /// 入力値を正規化する
    ///
    /// 「条件なし」になる場合は `None` を返す。
    ///
    /// - 数値: 解釈できない・最小値未満ならデフォルト、最大値超過なら最大値に丸める
    /// - 選択肢: 未知の値は条件なし
    fn normalize(&self, raw: &str) -> Option<FilterValue> {
        let value = raw.trim();
        if value.is_empty() {
            return None;
        }

        match self.kind {
            FieldKind::Text => Some(FilterValue::Text(value.to_string())),
            FieldKind::Choice(values) => values
                .contains(&value)
                .then(|| FilterValue::Text(value.to_string())),
            FieldKind::Number { default, min, max } => {
                let number = match value.parse::<u64>() {
                    Ok(n) if n >= min => n.min(max),
                    _ => default,
                };
                (number != default).then_some(FilterValue::Number(number))
            }
        }
    }

    fn default_number(&self) -> Option<u64> {
        match self.kind {
            FieldKind::Number { default, .. } => Some(default),
            _ => None,
        }
    }
}

/// 絞り込み値
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FilterValue {
    Text(String),
    Number(u64),
}

impl FilterValue {
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s),
            Self::Number(_) => None,
        }
    }

    pub fn as_number(&self) -> Option<u64> {
        match self {
            Self::Number(n) => Some(*n),
            Self::Text(_) => None,
        }
    }
}

impl fmt::Display for FilterValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text(s) => f.write_str(s),
            Self::Number(n) => write!(f, "{n}"),
        }
    }
}

/// クイックフィルタの設定値
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuickValue {
    /// 固定値
    Fixed(&'static str),
    /// 操作者自身のユーザー ID
    CurrentUser,
}

/// クイックフィルタ（1 操作で 1 項目を固定値にするショートカット）
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QuickFilter {
    pub name:  &'static str,
    pub label: &'static str,
    pub key:   &'static str,
    pub value: QuickValue,
}

/// URL クエリ文字列
///
/// キーと値の組を保持する。[`FilterState::to_query`] が生成するものは
/// 定義順に並んだ正規形になる。
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct QueryString(Vec<(String, String)>);

impl QueryString {
    /// `?a=1&b=2` 形式（先頭の `?` は省略可）をパースする
    pub fn parse(search: &str) -> Self {
        let raw = search.strip_prefix('?').unwrap_or(search);
        Self(
            url::form_urlencoded::parse(raw.as_bytes())
                .into_owned()
                .collect(),
        )
    }

    /// キーの値を取得する（同じキーが複数あれば最後の値）
    pub fn get(&self, key: &str) -> Option<&str> {
        self.0
            .iter()
            .rev()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    pub fn pairs(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// `window.location.search` と同じ形式（空なら `""`、それ以外は `?` 付き）
    pub fn to_search(&self) -> String {
        if self.is_empty() {
            String::new()
        } else {
            format!("?{self}")
        }
    }
}

impl fmt::Display for QueryString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let encoded = url::form_urlencoded::Serializer::new(String::new())
            .extend_pairs(self.0.iter())
            .finish();
        f.write_str(&encoded)
    }
}

/// 一覧画面の絞り込み状態
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterState {
    schema: &'static [FilterField],
    values: BTreeMap<&'static str, FilterValue>,
}

impl FilterState {
    /// すべて条件なしの状態を作成する
    pub fn new(schema: &'static [FilterField]) -> Self {
        Self {
            schema,
            values: BTreeMap::new(),
        }
    }

    /// クエリ文字列から復元する
    ///
    /// 定義にないキーは無視し、不正な値はデフォルトに戻す。
    pub fn from_query(schema: &'static [FilterField], query: &QueryString) -> Self {
        let values = schema
            .iter()
            .filter_map(|field| {
                let raw = query.get(field.key)?;
                field.normalize(raw).map(|value| (field.key, value))
            })
            .collect();

        Self { schema, values }
    }

    pub fn schema(&self) -> &'static [FilterField] {
        self.schema
    }

    fn field(&self, key: &str) -> Option<&'static FilterField> {
        self.schema.iter().find(|field| field.key == key)
    }

    /// 1 項目を設定する
    ///
    /// 空文字は条件の解除を意味する。ページ番号以外を変更した場合は
    /// ページ番号を先頭に戻す。
    ///
    /// # 戻り値
    ///
    /// 状態が変化したかどうか
    pub fn set(&mut self, key: &str, raw: &str) -> bool {
        let Some(field) = self.field(key) else {
            tracing::warn!(key, "未定義の絞り込み項目を無視しました");
            return false;
        };

        let next = field.normalize(raw);
        if self.values.get(field.key) == next.as_ref() {
            return false;
        }

        match next {
            Some(value) => self.values.insert(field.key, value),
            None => self.values.remove(field.key),
        };

        if field.key != PAGE_KEY {
            self.values.remove(PAGE_KEY);
        }

        true
    }

    /// 1 項目の条件を解除する
    pub fn clear(&mut self, key: &str) -> bool {
        self.set(key, "")
    }

    /// ページ番号を設定する
    pub fn set_page(&mut self, page: u64) -> bool {
        self.set(PAGE_KEY, &page.to_string())
    }

    /// すべての条件を一度に解除する
    pub fn reset(&mut self) -> bool {
        if self.values.is_empty() {
            return false;
        }
        self.values.clear();
        true
    }

    /// クイックフィルタを適用する
    ///
    /// `CurrentUser` は `current_user` が `None` の場合は適用しない。
    pub fn apply_quick_filter(&mut self, quick: &QuickFilter, current_user: Option<&str>) -> bool {
        match quick.value {
            QuickValue::Fixed(value) => self.set(quick.key, value),
            QuickValue::CurrentUser => match current_user {
                Some(user_id) => self.set(quick.key, user_id),
                None => false,
            },
        }
    }

    pub fn get(&self, key: &str) -> Option<&FilterValue> {
        self.values.get(key)
    }

    pub fn text(&self, key: &str) -> Option<&str> {
        self.get(key).and_then(FilterValue::as_text)
    }

    /// 数値項目の実効値（未設定ならデフォルト）
    pub fn number(&self, key: &str) -> Option<u64> {
        self.get(key)
            .and_then(FilterValue::as_number)
            .or_else(|| self.field(key).and_then(FilterField::default_number))
    }

    /// 現在のページ番号（ページ項目がない一覧では常に 1）
    pub fn page(&self) -> u64 {
        self.number(PAGE_KEY).unwrap_or(1)
    }

    /// 条件が 1 つも設定されていないか
    pub fn is_default(&self) -> bool {
        self.values.is_empty()
    }

    /// 設定済みの条件（定義順）
    pub fn active(&self) -> impl Iterator<Item = (&'static str, &FilterValue)> {
        self.schema
            .iter()
            .filter_map(|field| self.values.get(field.key).map(|value| (field.key, value)))
    }

    /// クエリ文字列に射影する（定義順、デフォルト値は含めない）
    pub fn to_query(&self) -> QueryString {
        QueryString(
            self.active()
                .map(|(key, value)| (key.to_string(), value.to_string()))
                .collect(),
        )
    }
}
