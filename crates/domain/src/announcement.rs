//! # お知らせ
//!
//! 申請者・職員向けに配信するお知らせ。
//! 下書き → 公開 → アーカイブのライフサイクルを持つ。

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use strum::{EnumString, IntoStaticStr, VariantNames};

use crate::{
    StatusAction,
    lifecycle::{EntityStatus, Transition},
};

define_uuid_id! {
    /// お知らせ ID
    pub struct AnnouncementId("お知らせ ID");
}

/// お知らせステータス
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Serialize,
    Deserialize,
    IntoStaticStr,
    EnumString,
    VariantNames,
    strum::Display,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum AnnouncementStatus {
    /// 下書き（編集中）
    Draft,
    /// 公開済み
    Published,
    /// アーカイブ済み（非表示）
    Archived,
}

impl EntityStatus for AnnouncementStatus {
    const ENTITY: &'static str = "お知らせ";

    fn values() -> &'static [&'static str] {
        Self::VARIANTS
    }

    fn next(self, action: StatusAction) -> Option<Transition<Self>> {
        match (self, action) {
            (Self::Draft, StatusAction::Publish) => Some(Transition::To(Self::Published)),
            (Self::Draft | Self::Published, StatusAction::Archive) => {
                Some(Transition::To(Self::Archived))
            }
            (Self::Draft | Self::Archived, StatusAction::Delete) => Some(Transition::Removed),
            _ => None,
        }
    }
}

/// お知らせ種別
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, IntoStaticStr, VariantNames,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum AnnouncementType {
    General,
    Urgent,
    Event,
    Policy,
}

/// 配信対象
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, IntoStaticStr, VariantNames,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum TargetAudience {
    All,
    Applicants,
    Staff,
    Partners,
}

/// お知らせ一覧の行データ
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Announcement {
    pub id:              AnnouncementId,
    pub title:           String,
    #[serde(rename = "type")]
    pub kind:            AnnouncementType,
    pub target_audience: TargetAudience,
    pub status:          AnnouncementStatus,
    #[serde(default)]
    pub published_at:    Option<DateTime<Utc>>,
    pub created_at:      DateTime<Utc>,
}
