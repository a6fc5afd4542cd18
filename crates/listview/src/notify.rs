//! # 利用者への通知
//!
//! 取得・操作の成否をトースト相当のメッセージとして伝える。
//! 通知は画面をブロックせず、操作はそのまま続けられる。

use derive_more::Display;

/// 通知の種類
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum NoticeLevel {
    #[display("成功")]
    Success,
    #[display("エラー")]
    Error,
}

/// 通知
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub level:   NoticeLevel,
    pub message: String,
}

impl Notice {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            level:   NoticeLevel::Success,
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            level:   NoticeLevel::Error,
            message: message.into(),
        }
    }

    pub fn is_error(&self) -> bool {
        self.level == NoticeLevel::Error
    }
}

/// 通知の表示先
pub trait Notifier: Send + Sync {
    fn notify(&self, notice: Notice);
}
