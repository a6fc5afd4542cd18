//! # 対話セッション
//!
//! 1 つの一覧画面に対してコマンドを受け付け、実行するたびに取得を完了させて再描画する。

use std::{io, sync::Arc};

use shienflow_domain::principal::Principal;
use shienflow_listview::{
    ActionSink,
    ListSource,
    ListView,
    ListViewController,
    MemoryHistory,
    Navigator,
    Notifier,
};
use tokio::io::{AsyncBufRead, AsyncBufReadExt};

use crate::{
    command::{self, Command},
    render::render,
};

/// コマンド実行の結果
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// 画面を再描画する
    Render(String),
    /// メッセージだけを表示する
    Message(String),
    Quit,
}

/// 一覧画面の対話セッション
pub struct Session<V: ListView> {
    controller: ListViewController<V>,
    history:    MemoryHistory,
    sink:       Arc<dyn ActionSink<V>>,
}

impl<V: ListView> Session<V> {
    pub fn new(
        source: Arc<dyn ListSource<V>>,
        sink: Arc<dyn ActionSink<V>>,
        history: MemoryHistory,
        notifier: Arc<dyn Notifier>,
        principal: Principal,
    ) -> Self {
        let controller =
            ListViewController::new(source, Arc::new(history.clone()), notifier, principal);
        Self {
            controller,
            history,
            sink,
        }
    }

    pub fn controller(&self) -> &ListViewController<V> {
        &self.controller
    }

    pub fn history(&self) -> &MemoryHistory {
        &self.history
    }

    /// 画面を開いて初回の取得を完了させる
    pub async fn start(&mut self) -> String {
        let dispatch = self.controller.mount();
        self.controller.settle(dispatch).await;
        self.screen()
    }

    /// 現在の画面
    pub fn screen(&self) -> String {
        render(&self.controller, &self.history.search())
    }

    /// コマンドを 1 つ実行する
    pub async fn execute(&mut self, command: Command) -> Outcome {
        let dispatch = match command {
            Command::Set { key, value } => self.controller.set_filter(&key, &value),
            Command::Search(text) => self.controller.set_filter("search", &text),
            Command::Quick(name) => {
                if V::quick_filter(&name).is_none() {
                    return Outcome::Message(format!("不明なクイックフィルタです: {name}"));
                }
                self.controller.apply_quick_filter(&name)
            }
            Command::Clear => self.controller.reset_filters(),
            Command::Page(page) => self.controller.go_to_page(page),
            Command::Next => self.controller.next_page(),
            Command::Prev => self.controller.prev_page(),
            Command::Refresh => self.controller.refresh(),
            Command::Back => {
                if !self.history.back() {
                    return Outcome::Message("これ以上戻れません".to_string());
                }
                self.controller.on_navigation()
            }
            Command::Forward => {
                if !self.history.forward() {
                    return Outcome::Message("これ以上進めません".to_string());
                }
                self.controller.on_navigation()
            }
            Command::Open(query) => self.controller.open(&query),
            Command::Action { action, id } => {
                let sink = Arc::clone(&self.sink);
                self.controller.perform(sink.as_ref(), &id, action).await;
                return Outcome::Render(self.screen());
            }
            Command::Bulk { action, ids } => {
                let sink = Arc::clone(&self.sink);
                self.controller.perform_bulk(sink.as_ref(), &ids, action).await;
                return Outcome::Render(self.screen());
            }
            Command::Help => return Outcome::Message(command::help()),
            Command::Quit => return Outcome::Quit,
        };

        self.controller.settle(dispatch).await;
        Outcome::Render(self.screen())
    }

    /// 入力が尽きるか `quit` まで、コマンドを読んで実行する
    pub async fn run<R, W>(&mut self, input: R, output: &mut W) -> io::Result<()>
    where
        R: AsyncBufRead + Unpin,
        W: io::Write,
    {
        writeln!(output, "{}", self.start().await)?;

        let mut lines = input.lines();
        loop {
            write!(output, "> ")?;
            output.flush()?;

            let Some(line) = lines.next_line().await? else {
                break;
            };

            let command = match Command::parse(&line) {
                Ok(Some(command)) => command,
                Ok(None) => continue,
                Err(e) => {
                    writeln!(output, "{e}")?;
                    continue;
                }
            };

            tracing::debug!(?command, "コマンドを実行します");
            match self.execute(command).await {
                Outcome::Render(screen) | Outcome::Message(screen) => {
                    writeln!(output, "{screen}")?;
                }
                Outcome::Quit => break,
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use shienflow_domain::{principal::Permission, user::UserId};
    use shienflow_listview::{
        testing::{RecordingNotifier, StubSource},
        views::{BudgetPoolListView, RequestListView},
    };

    use super::*;

    fn session<V: ListView>(initial: &str) -> (Session<V>, Arc<StubSource<V>>) {
        let source = Arc::new(StubSource::<V>::new());
        let session = Session::new(
            source.clone(),
            source.clone(),
            MemoryHistory::new(initial),
            Arc::new(RecordingNotifier::new()),
            Principal::new(
                Some(UserId::new()),
                vec![Permission::new("*")],
            ),
        );
        (session, source)
    }

    #[tokio::test]
    async fn test_起動時にディープリンクの一覧を表示する() {
        let (mut session, source) = session::<RequestListView>("?status=submitted");

        let screen = session.start().await;

        assert!(screen.starts_with("── 申請一覧  ?status=submitted"));
        assert!(screen.contains("該当する申請はありません"));
        assert_eq!(source.queries(), vec!["status=submitted".to_string()]);
    }

    #[tokio::test]
    async fn test_戻ると直前の絞り込みに戻る() {
        let (mut session, source) = session::<BudgetPoolListView>("");
        session.start().await;
        session
            .execute(Command::Set {
                key:   "status".to_string(),
                value: "frozen".to_string(),
            })
            .await;

        session.execute(Command::Back).await;

        assert_eq!(session.controller().filters().text("status"), None);
        assert_eq!(session.history().search(), "");
        assert_eq!(source.queries(), vec!["", "status=frozen", ""]);
    }

    #[tokio::test]
    async fn test_履歴の先頭では戻れない() {
        let (mut session, _) = session::<BudgetPoolListView>("");
        session.start().await;

        let outcome = session.execute(Command::Back).await;

        assert_eq!(outcome, Outcome::Message("これ以上戻れません".to_string()));
    }

    #[tokio::test]
    async fn test_openで指定したクエリを開く() {
        let (mut session, source) = session::<BudgetPoolListView>("");
        session.start().await;

        session
            .execute(Command::Open("?category=food&page=1".to_string()))
            .await;

        assert_eq!(session.history().entries(), vec!["", "?category=food"]);
        assert_eq!(source.queries().last().map(String::as_str), Some("category=food"));
    }

    #[tokio::test]
    async fn test_既定と同じクエリを開いても履歴は増えない() {
        let (mut session, source) = session::<BudgetPoolListView>("");
        session.start().await;

        session.execute(Command::Open("?page=1".to_string())).await;

        assert_eq!(session.history().len(), 1);
        assert_eq!(source.queries(), vec![String::new()]);
    }

    #[tokio::test]
    async fn test_入力を読んで終了まで実行する() {
        let (mut session, source) = session::<RequestListView>("");
        let input: &[u8] = "search 家賃\n\nbogus\nquit\nrefresh\n".as_bytes();
        let mut output = Vec::new();

        session.run(input, &mut output).await.unwrap();

        let output = String::from_utf8(output).unwrap();
        assert!(output.contains("不明なコマンドです: bogus"));
        assert_eq!(source.queries().len(), 2);
        assert_eq!(source.stats_calls(), 1);
    }
}
