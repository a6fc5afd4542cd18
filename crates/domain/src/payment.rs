//! # 支払い
//!
//! 承認済み申請に対する給付の支払い。処理開始前の支払いのみ取り消せる。

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use strum::{EnumString, IntoStaticStr, VariantNames};

use crate::{
    StatusAction,
    lifecycle::{EntityStatus, Transition},
    request::AssistanceRequestId,
};

define_uuid_id! {
    /// 支払い ID
    pub struct PaymentId("支払い ID");
}

/// 支払いステータス
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
pub enum PaymentStatus {
    Pending,
    Processing,
    Completed,
    Failed,
    Cancelled,
}

impl EntityStatus for PaymentStatus {
    const ENTITY: &'static str = "支払い";

    fn values() -> &'static [&'static str] {
        Self::VARIANTS
    }

    fn next(self, action: StatusAction) -> Option<Transition<Self>> {
        match (self, action) {
            (Self::Pending, StatusAction::Cancel) => Some(Transition::To(Self::Cancelled)),
            _ => None,
        }
    }
}

/// 支払い方法
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, IntoStaticStr, VariantNames,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum PaymentMethod {
    BankTransfer,
    Cash,
    Voucher,
}

/// 支払い一覧の行データ
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Payment {
    pub id:             PaymentId,
    pub request_id:     AssistanceRequestId,
    pub recipient_name: String,
    pub amount:         i64,
    pub method:         PaymentMethod,
    pub status:         PaymentStatus,
    pub scheduled_at:   DateTime<Utc>,
}
