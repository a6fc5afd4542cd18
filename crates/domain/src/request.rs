//! # 支援申請
//!
//! 申請者から提出された支援申請。審査を経て承認・却下され、承認分は支払いに進む。
//! 一覧画面から実行できるのは提出済み・審査中の申請の取り消しのみ。

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use strum::{EnumString, IntoStaticStr, VariantNames};

use crate::{
    StatusAction,
    lifecycle::{EntityStatus, Transition},
    user::UserId,
};

define_uuid_id! {
    /// 支援申請 ID
    pub struct AssistanceRequestId("申請 ID");
}

/// 申請ステータス
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
pub enum RequestStatus {
    /// 提出済み（未着手）
    Submitted,
    /// 審査中
    UnderReview,
    /// 承認済み
    Approved,
    /// 却下
    Rejected,
    /// 取り消し済み
    Cancelled,
    /// 支払い済み
    Paid,
}

impl EntityStatus for RequestStatus {
    const ENTITY: &'static str = "申請";

    fn values() -> &'static [&'static str] {
        Self::VARIANTS
    }

    fn next(self, action: StatusAction) -> Option<Transition<Self>> {
        match (self, action) {
            (Self::Submitted | Self::UnderReview, StatusAction::Cancel) => {
                Some(Transition::To(Self::Cancelled))
            }
            _ => None,
        }
    }
}

/// 申請種別
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, IntoStaticStr, VariantNames,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum RequestType {
    Financial,
    Food,
    Housing,
    Medical,
    Other,
}

/// 申請一覧の行データ
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssistanceRequest {
    pub id:               AssistanceRequestId,
    pub reference_number: String,
    pub applicant_name:   String,
    #[serde(rename = "type")]
    pub kind:             RequestType,
    pub status:           RequestStatus,
    /// 申請金額（円）
    pub amount:           i64,
    #[serde(default)]
    pub assigned_to:      Option<UserId>,
    pub submitted_at:     DateTime<Utc>,
}
