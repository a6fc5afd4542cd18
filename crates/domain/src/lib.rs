//! # ShienFlow ドメイン層
//!
//! 生活支援ケース管理で扱うエンティティと、その状態遷移ルールを定義する。
//!
//! ## 設計方針
//!
//! - **エンティティ DTO**: 一覧 API が返す行データ（お知らせ、予算プール、申請、ユーザー、支払い）
//! - **ステータス**: 各エンティティの状態を列挙型で表現し、絞り込み条件の選択肢としても使う
//! - **状態遷移**: 公開・アーカイブ・有効化・凍結・取り消し・削除の可否をドメインで判定する
//! - **ドメインエラー**: ルール違反を表現するエラー型
//!
//! ## 依存関係の方向
//!
//! ```text
//! console → listview → domain
//!                 └──→ shared
//! ```
//!
//! ドメイン層は HTTP や画面状態に一切依存しない。
//!
//! ## 使用例
//!
//! ```rust
//! use shienflow_domain::{
//!     StatusAction,
//!     announcement::AnnouncementStatus,
//!     lifecycle::{EntityStatus, Transition},
//! };
//!
//! let next = AnnouncementStatus::Draft.transition(StatusAction::Publish).unwrap();
//! assert_eq!(next, Transition::To(AnnouncementStatus::Published));
//! ```

#[macro_use]
mod macros;

pub mod action;
pub mod announcement;
pub mod budget_pool;
pub mod error;
pub mod lifecycle;
pub mod payment;
pub mod principal;
pub mod request;
pub mod stats;
pub mod user;

pub use action::StatusAction;
pub use error::DomainError;
