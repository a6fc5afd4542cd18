//! # API クライアント
//!
//! 一覧画面のデータソース（[`ListSource`](shienflow_listview::ListSource)）と
//! 操作の実行先（[`ActionSink`](shienflow_listview::ActionSink)）を REST API で実装する。

mod error;
mod list_client;
mod response;
mod types;

pub use error::ApiClientError;
pub use list_client::ApiClient;
