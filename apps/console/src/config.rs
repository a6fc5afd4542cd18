//! # コンソール設定
//!
//! 環境変数からコンソールアプリの設定を読み込む。

use std::{env, str::FromStr, time::Duration};

use shienflow_domain::{principal::Permission, user::UserId};
use strum::{EnumString, IntoStaticStr, VariantNames};
use thiserror::Error;

use crate::telemetry::{self, DEFAULT_LOG_FILTER, LogFormat, LogSettings};

const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// 設定の読み込みエラー
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("{0} が設定されていません")]
    Missing(&'static str),

    #[error("{key} の値が不正です（{value}）: {reason}")]
    Invalid {
        key:    &'static str,
        value:  String,
        reason: String,
    },
}

/// 表示する一覧画面
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumString, IntoStaticStr, VariantNames)]
#[strum(serialize_all = "kebab-case")]
pub enum ViewKind {
    Announcements,
    BudgetPools,
    Requests,
    Users,
    Payments,
}

/// コンソールアプリの設定
#[derive(Debug, Clone)]
pub struct ConsoleConfig {
    /// API のベース URL
    pub api_base_url:  String,
    /// Bearer トークン
    pub api_token:     Option<String>,
    /// 表示する一覧画面
    pub view:          ViewKind,
    /// 起動時のクエリ文字列（ディープリンク）
    pub initial_query: String,
    /// 1 リクエストのタイムアウト
    pub timeout:       Duration,
    /// 操作者のユーザー ID
    pub user_id:       Option<UserId>,
    /// 操作者の権限
    pub permissions:   Vec<Permission>,
    /// ログ出力
    pub log:           LogSettings,
}

impl ConsoleConfig {
    /// 環境変数から設定を読み込む
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// 任意の取得元から設定を読み込む
    ///
    /// 空文字の値は未設定として扱う。
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let get = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        let api_base_url = get("API_BASE_URL").ok_or(ConfigError::Missing("API_BASE_URL"))?;

        let view = match get("CONSOLE_VIEW") {
            Some(value) => parse("CONSOLE_VIEW", &value, |v| {
                ViewKind::from_str(v).map_err(|_| {
                    format!("{} のいずれかを指定してください", ViewKind::VARIANTS.join(", "))
                })
            })?,
            None => ViewKind::Requests,
        };

        let timeout = match get("API_TIMEOUT_SECS") {
            Some(value) => parse("API_TIMEOUT_SECS", &value, |v| match v.parse::<u64>() {
                Ok(0) => Err("1 以上を指定してください".to_string()),
                Ok(secs) => Ok(Duration::from_secs(secs)),
                Err(e) => Err(e.to_string()),
            })?,
            None => Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        };

        let user_id = get("CONSOLE_USER_ID")
            .map(|value| {
                parse("CONSOLE_USER_ID", &value, |v| {
                    UserId::from_str(v).map_err(|e| e.to_string())
                })
            })
            .transpose()?;

        let permissions = get("CONSOLE_PERMISSIONS")
            .map(|value| {
                value
                    .split(',')
                    .map(str::trim)
                    .filter(|p| !p.is_empty())
                    .map(Permission::new)
                    .collect()
            })
            .unwrap_or_default();

        let format = match get("LOG_FORMAT") {
            Some(value) => parse("LOG_FORMAT", &value, |v| {
                LogFormat::from_str(v).map_err(|_| {
                    format!("{} のいずれかを指定してください", LogFormat::VARIANTS.join(", "))
                })
            })?,
            None => LogFormat::default(),
        };
        let filter = match get("RUST_LOG") {
            Some(value) => parse("RUST_LOG", &value, |v| {
                telemetry::validate_filter(v).map(|()| v.to_string())
            })?,
            None => DEFAULT_LOG_FILTER.to_string(),
        };

        Ok(Self {
            api_base_url,
            api_token: get("API_TOKEN"),
            view,
            initial_query: get("CONSOLE_INITIAL_QUERY").unwrap_or_default(),
            timeout,
            user_id,
            permissions,
            log: LogSettings { format, filter },
        })
    }
}

fn parse<T>(
    key: &'static str,
    value: &str,
    f: impl FnOnce(&str) -> Result<T, String>,
) -> Result<T, ConfigError> {
    f(value.trim()).map_err(|reason| ConfigError::Invalid {
        key,
        value: value.to_string(),
        reason,
    })
}
