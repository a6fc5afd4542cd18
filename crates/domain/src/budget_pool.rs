//! # 予算プール
//!
//! 支援区分ごとに確保された予算枠。
//! 有効なプールからのみ支払いを割り当てられ、監査時などは凍結できる。

use serde::{Deserialize, Serialize};
use strum::{EnumString, IntoStaticStr, VariantNames};

use crate::{
    StatusAction,
    lifecycle::{EntityStatus, Transition},
};

define_uuid_id! {
    /// 予算プール ID
    pub struct BudgetPoolId("予算プール ID");
}

/// 予算プールステータス
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
pub enum BudgetPoolStatus {
    /// 準備中（割り当て不可）
    Draft,
    /// 有効
    Active,
    /// 凍結中
    Frozen,
    /// 締め済み
    Closed,
}

impl EntityStatus for BudgetPoolStatus {
    const ENTITY: &'static str = "予算プール";

    fn values() -> &'static [&'static str] {
        Self::VARIANTS
    }

    fn next(self, action: StatusAction) -> Option<Transition<Self>> {
        match (self, action) {
            (Self::Draft | Self::Frozen, StatusAction::Activate) => {
                Some(Transition::To(Self::Active))
            }
            (Self::Active, StatusAction::Freeze) => Some(Transition::To(Self::Frozen)),
            (Self::Draft, StatusAction::Delete) => Some(Transition::Removed),
            _ => None,
        }
    }
}

/// 支援区分
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, IntoStaticStr, VariantNames,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum BudgetCategory {
    Food,
    Housing,
    Medical,
    Education,
    Emergency,
}

/// 予算プール一覧の行データ
///
/// 金額は円単位の整数。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BudgetPool {
    pub id:               BudgetPoolId,
    pub name:             String,
    pub category:         BudgetCategory,
    pub status:           BudgetPoolStatus,
    pub total_amount:     i64,
    pub allocated_amount: i64,
}

impl BudgetPool {
    /// 未割り当ての残額
    pub fn remaining_amount(&self) -> i64 {
        self.total_amount - self.allocated_amount
    }
}

/// 予算プール画面の統計パネル
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct BudgetPoolStats {
    pub total_budget:     i64,
    pub allocated_amount: i64,
    pub remaining_amount: i64,
    pub active_pools:     u64,
    pub frozen_pools:     u64,
}
