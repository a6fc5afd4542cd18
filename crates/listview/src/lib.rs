//! # ShienFlow 一覧画面コントローラ
//!
//! 一覧画面（お知らせ、予算プール、申請、ユーザー、支払い）に共通する
//! 絞り込み・URL 同期・ページ取得の制御を提供する。
//!
//! ## 構成要素
//!
//! ```text
//! 操作 ──▶ FilterState ──▶ QuerySynchronizer ──▶ Navigator（URL）
//!              │
//!              ▼
//!        FetchOrchestrator ──▶ ListSource（REST）
//!              │
//!              ▼
//!          Pagination ──▶ 描画
//! ```
//!
//! - [`filter`] - 絞り込み条件の保持とクエリ文字列への射影
//! - [`query_sync`] - 絞り込み条件と URL クエリの相互同期
//! - [`fetch`] - 取得要求のトークン管理と古いレスポンスの破棄
//! - [`pagination`] - 取得結果から導出するページ情報
//! - [`controller`] - 上記を束ねる一覧画面コントローラ
//! - [`views`] - エンティティごとの一覧画面定義
//!
//! 認証コンテキスト・URL・通知・バックエンドはすべてトレイトとして注入する。

pub mod controller;
pub mod fetch;
pub mod filter;
pub mod history;
pub mod notify;
pub mod pagination;
pub mod query_sync;
pub mod source;
#[cfg(any(test, feature = "test-support"))]
pub mod testing;
pub mod views;

pub use controller::{Dispatch, ListKey, ListViewController};
pub use fetch::{Completion, FetchOrchestrator, FetchTicket, FetchToken, LoadState};
pub use filter::{FieldKind, FilterField, FilterState, FilterValue, QueryString, QuickFilter, QuickValue};
pub use history::MemoryHistory;
pub use notify::{Notice, NoticeLevel, Notifier};
pub use pagination::Pagination;
pub use query_sync::{HistoryMode, Navigator, QuerySynchronizer};
pub use source::{ActionSink, BulkOutcome, ListSource, SourceError};
pub use views::{ListRow, ListView, StatsPanel};
