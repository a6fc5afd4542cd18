//! # ShienFlow コンソール
//!
//! 一覧画面コントローラを REST API に接続し、対話的に操作するコンソールアプリ。
//!
//! ## モジュール構成
//!
//! - `client`: REST API クライアント
//! - `command`: 入力行の解釈
//! - `config`: 環境変数からの設定読み込み
//! - `notifier`: 通知の出力先
//! - `render`: 画面描画
//! - `session`: 対話セッション
//! - `telemetry`: ログ出力の初期化

pub mod client;
pub mod command;
pub mod config;
pub mod notifier;
pub mod render;
pub mod session;
pub mod telemetry;
