//! # 操作者（プリンシパル）
//!
//! 画面を操作しているユーザーの識別情報と権限判定。
//! 認証コンテキストはグローバルに参照せず、この型を明示的に受け渡す。
//!
//! ## 権限の形式
//!
//! - `resource:action` - 特定リソースの特定アクション（例: `announcements:write`）
//! - `resource:*` - 特定リソースのすべてのアクション
//! - `*` - すべてのリソース・アクション（システム管理者用）

use derive_more::Display;
use serde::{Deserialize, Serialize};

use crate::{DomainError, user::UserId};

/// 権限（値オブジェクト）
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Display)]
#[display("{_0}")]
pub struct Permission(String);

impl Permission {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// この権限が、要求された権限を満たすか判定する
    ///
    /// | 保持権限 | 要求権限 | 結果 |
    /// |---------|---------|------|
    /// | `*` | 任意 | true |
    /// | `users:*` | `users:write` | true |
    /// | `users:read` | `users:read` | true |
    /// | `users:read` | `users:write` | false |
    pub fn satisfies(&self, required: &str) -> bool {
        let held = self.as_str();

        if held == "*" {
            return true;
        }

        if let Some(resource) = held.strip_suffix(":*") {
            return required
                .strip_prefix(resource)
                .is_some_and(|rest| rest.starts_with(':'));
        }

        held == required
    }
}

/// 操作者
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Principal {
    user_id:     Option<UserId>,
    permissions: Vec<Permission>,
}

impl Principal {
    pub fn new(user_id: Option<UserId>, permissions: Vec<Permission>) -> Self {
        Self {
            user_id,
            permissions,
        }
    }

    /// 権限なしの匿名操作者
    pub fn anonymous() -> Self {
        Self::new(None, Vec::new())
    }

    pub fn user_id(&self) -> Option<&UserId> {
        self.user_id.as_ref()
    }

    pub fn has_permission(&self, required: &str) -> bool {
        self.permissions.iter().any(|p| p.satisfies(required))
    }

    /// 権限を要求する
    ///
    /// # エラー
    ///
    /// 権限を持たない場合は `DomainError::Forbidden` を返す。
    pub fn require(&self, required: &str) -> Result<(), DomainError> {
        if self.has_permission(required) {
            Ok(())
        } else {
            Err(DomainError::Forbidden(required.to_string()))
        }
    }
}
