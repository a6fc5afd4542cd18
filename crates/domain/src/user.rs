//! # ユーザー
//!
//! 職員・申請者のアカウント。
//! 招待中のアカウントは有効化で利用開始となり、不正利用が疑われる場合は凍結できる。

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use strum::{EnumString, IntoStaticStr, VariantNames};

use crate::{
    StatusAction,
    lifecycle::{EntityStatus, Transition},
};

define_uuid_id! {
    /// ユーザー ID
    pub struct UserId("ユーザー ID");
}

/// ユーザーステータス
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
pub enum UserStatus {
    /// 招待中（未ログイン）
    Invited,
    /// 有効
    Active,
    /// 凍結中
    Frozen,
}

impl EntityStatus for UserStatus {
    const ENTITY: &'static str = "ユーザー";

    fn values() -> &'static [&'static str] {
        Self::VARIANTS
    }

    fn next(self, action: StatusAction) -> Option<Transition<Self>> {
        match (self, action) {
            (Self::Invited | Self::Frozen, StatusAction::Activate) => {
                Some(Transition::To(Self::Active))
            }
            (Self::Active, StatusAction::Freeze) => Some(Transition::To(Self::Frozen)),
            _ => None,
        }
    }
}

/// ユーザーロール
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, IntoStaticStr, VariantNames,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum UserRole {
    Admin,
    CaseWorker,
    Auditor,
    Applicant,
}

/// ユーザー一覧の行データ
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id:            UserId,
    pub name:          String,
    pub email:         String,
    pub role:          UserRole,
    pub status:        UserStatus,
    #[serde(default)]
    pub last_login_at: Option<DateTime<Utc>>,
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_招待中は有効化のみ実行できる() {
        assert_eq!(
            UserStatus::Invited.available_actions(),
            vec![StatusAction::Activate]
        );
    }

    #[test]
    fn test_有効なユーザーは凍結できる() {
        assert_eq!(
            UserStatus::Active.transition(StatusAction::Freeze).unwrap(),
            Transition::To(UserStatus::Frozen)
        );
    }

    #[test]
    fn test_ユーザーidは文字列から復元できる() {
        let id = UserId::new();

        assert_eq!(id.to_string().parse::<UserId>().unwrap(), id);
        assert!("not-a-uuid".parse::<UserId>().is_err());
    }
}
