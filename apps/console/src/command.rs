//! # コマンド
//!
//! 対話セッションで入力する 1 行を解釈する。
//!
//! 行は `shlex` でシェルと同じ規則で単語に分け（引用符で空白を含む値を渡せる）、
//! clap のサブコマンドとして解析する。`<操作> <ID>` の形は外部サブコマンドとして受け、
//! [`StatusAction`] に一致するものだけを操作コマンドにする。

use std::str::FromStr;

use clap::{ColorChoice, CommandFactory, Parser, Subcommand};
use shienflow_domain::StatusAction;
use thiserror::Error;

/// コマンドの解釈エラー
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CommandError {
    #[error("不明なコマンドです: {0}（help で一覧を表示）")]
    Unknown(String),

    #[error("使い方: {0}")]
    Usage(&'static str),

    #[error("引用符が閉じていません")]
    UnclosedQuote,

    /// clap が生成した説明（使い方・値の誤り・`--help`）
    #[error("{0}")]
    Rejected(String),
}

/// 対話セッションのコマンド
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// 絞り込み項目を設定する（値が空なら解除）
    Set { key: String, value: String },
    /// キーワード検索
    Search(String),
    /// クイックフィルタ
    Quick(String),
    /// すべての絞り込みを解除
    Clear,
    Page(i64),
    Next,
    Prev,
    Refresh,
    Back,
    Forward,
    /// URL のクエリを直接開く
    Open(String),
    /// 1 件に操作を実行する
    Action { action: StatusAction, id: String },
    /// 複数件に同じ操作を実行する
    Bulk { action: StatusAction, ids: Vec<String> },
    Help,
    Quit,
}

const ACTION_USAGE: &str = "<操作> <ID>";

#[derive(Debug, Parser)]
#[command(
    name = "shienflow",
    no_binary_name = true,
    disable_help_subcommand = true,
    disable_version_flag = true,
    color = ColorChoice::Never,
    after_help = "<操作> <ID>  1 件に操作を実行（publish / archive / activate / freeze / cancel / delete）"
)]
struct Line {
    #[command(subcommand)]
    input: Input,
}

#[derive(Debug, Subcommand)]
enum Input {
    /// 絞り込み項目を設定（値を省略すると解除）
    Set {
        key:   String,
        #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
        value: Vec<String>,
    },
    /// キーワード検索（省略すると解除）
    Search {
        #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
        words: Vec<String>,
    },
    /// クイックフィルタを適用
    Quick { name: String },
    /// すべての絞り込みを解除
    Clear,
    /// 指定ページへ移動
    Page {
        #[arg(allow_negative_numbers = true)]
        page: i64,
    },
    /// 次のページへ
    Next,
    /// 前のページへ
    Prev,
    /// 再取得
    Refresh,
    /// 履歴を戻る
    Back,
    /// 履歴を進む
    Forward,
    /// クエリ文字列を直接開く（例: open '?status=draft'）
    Open { query: Option<String> },
    /// 複数件に同じ操作を実行
    Bulk {
        action: StatusAction,
        #[arg(required = true)]
        ids:    Vec<String>,
    },
    /// このヘルプを表示
    Help,
    /// 終了
    #[command(visible_alias = "exit")]
    Quit,
    #[command(external_subcommand)]
    External(Vec<String>),
}

impl Command {
    /// 1 行を解釈する
    ///
    /// 空行は `None`。
    pub fn parse(line: &str) -> Result<Option<Self>, CommandError> {
        let words = shlex::split(line).ok_or(CommandError::UnclosedQuote)?;
        if words.is_empty() {
            return Ok(None);
        }

        let line = Line::try_parse_from(words)
            .map_err(|e| CommandError::Rejected(e.render().to_string().trim_end().to_string()))?;

        let command = match line.input {
            Input::Set { key, value } => Command::Set {
                key,
                value: value.join(" "),
            },
            Input::Search { words } => Command::Search(words.join(" ")),
            Input::Quick { name } => Command::Quick(name),
            Input::Clear => Command::Clear,
            Input::Page { page } => Command::Page(page),
            Input::Next => Command::Next,
            Input::Prev => Command::Prev,
            Input::Refresh => Command::Refresh,
            Input::Back => Command::Back,
            Input::Forward => Command::Forward,
            Input::Open { query } => Command::Open(query.unwrap_or_default()),
            Input::Bulk { action, ids } => Command::Bulk { action, ids },
            Input::Help => Command::Help,
            Input::Quit => Command::Quit,
            Input::External(words) => action_command(words)?,
        };

        Ok(Some(command))
    }
}

/// `<操作> <ID>` を操作コマンドにする
fn action_command(words: Vec<String>) -> Result<Command, CommandError> {
    let mut words = words.into_iter();
    let name = words.next().unwrap_or_default();
    let Ok(action) = StatusAction::from_str(&name) else {
        return Err(CommandError::Unknown(name));
    };

    match (words.next(), words.next()) {
        (Some(id), None) => Ok(Command::Action { action, id }),
        _ => Err(CommandError::Usage(ACTION_USAGE)),
    }
}

/// コマンド一覧
pub fn help() -> String {
    Line::command().render_help().to_string()
}
