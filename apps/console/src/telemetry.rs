//! # ログ出力
//!
//! 標準出力は画面の描画に使うので、ログはすべて標準エラーへ書き出す。
//! 出力形式と絞り込みは [`ConsoleConfig`](crate::config::ConsoleConfig) の
//! `LOG_FORMAT` / `RUST_LOG` から決まる。

use strum::{EnumString, IntoStaticStr, VariantNames};
use tracing_subscriber::{
    EnvFilter,
    Layer as _,
    layer::SubscriberExt,
    util::{SubscriberInitExt, TryInitError},
};

/// `RUST_LOG` 未設定時の絞り込み
///
/// 対話中の画面を崩さないよう、既定では警告以上だけを出す。
pub const DEFAULT_LOG_FILTER: &str = "warn,shienflow_listview=warn,shienflow_console=warn";

/// ログ出力形式
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, EnumString, IntoStaticStr, VariantNames)]
#[strum(serialize_all = "lowercase")]
pub enum LogFormat {
    /// 1 イベント 1 行の JSON（ログ収集向け）
    Json,
    #[default]
    Pretty,
}

/// ログの設定
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogSettings {
    pub format: LogFormat,
    /// `EnvFilter` のディレクティブ（読み込み時に検証済み）
    pub filter: String,
}

impl Default for LogSettings {
    fn default() -> Self {
        Self {
            format: LogFormat::default(),
            filter: DEFAULT_LOG_FILTER.to_string(),
        }
    }
}

/// ディレクティブを検証する
pub fn validate_filter(directives: &str) -> Result<(), String> {
    EnvFilter::try_new(directives)
        .map(|_| ())
        .map_err(|e| e.to_string())
}

/// グローバルなサブスクライバを登録する
///
/// 2 回目以降の呼び出しはエラーになる。
pub fn init_tracing(settings: &LogSettings) -> Result<(), TryInitError> {
    let filter = EnvFilter::new(&settings.filter);

    let fmt_layer = match settings.format {
        LogFormat::Json => tracing_subscriber::fmt::layer()
            .json()
            .flatten_event(true)
            .with_current_span(true)
            .with_span_list(false)
            .with_writer(std::io::stderr)
            .boxed(),
        LogFormat::Pretty => tracing_subscriber::fmt::layer()
            .with_target(false)
            .with_writer(std::io::stderr)
            .boxed(),
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt_layer)
        .try_init()
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use pretty_assertions::assert_eq;
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case("json", Ok(LogFormat::Json))]
    #[case("pretty", Ok(LogFormat::Pretty))]
    #[case("JSON", Err(()))]
    #[case("text", Err(()))]
    fn test_ログ形式を解釈する(#[case] value: &str, #[case] expected: Result<LogFormat, ()>) {
        assert_eq!(LogFormat::from_str(value).map_err(|_| ()), expected);
    }

    #[test]
    fn test_既定の絞り込みは妥当なディレクティブ() {
        assert_eq!(validate_filter(DEFAULT_LOG_FILTER), Ok(()));
        assert_eq!(LogSettings::default().format, LogFormat::Pretty);
    }

    #[test]
    fn test_不正なディレクティブを検出する() {
        assert!(validate_filter("shienflow_listview=loud").is_err());
    }

    #[test]
    fn test_二重に初期化するとエラー() {
        let settings = LogSettings::default();
        let _ = init_tracing(&settings);

        assert!(init_tracing(&settings).is_err());
    }
}
