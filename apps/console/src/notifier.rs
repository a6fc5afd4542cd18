//! 通知を標準エラーに出力する

use shienflow_listview::{Notice, Notifier};

/// 標準エラーへの通知
///
/// 標準出力は画面描画に使うため、通知は描画と混ざらないよう標準エラーに出す。
#[derive(Debug, Default, Clone, Copy)]
pub struct ConsoleNotifier;

impl Notifier for ConsoleNotifier {
    fn notify(&self, notice: Notice) {
        eprintln!("[{}] {}", notice.level, notice.message);
    }
}
