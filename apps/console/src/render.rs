//! # 画面描画
//!
//! コントローラの現在の状態をテキストにする。

use std::fmt::Write as _;

use shienflow_domain::lifecycle::EntityStatus;
use shienflow_listview::{ListRow, ListView, ListViewController, LoadState, StatsPanel};
use tabled::{builder::Builder, settings::Style};

const ACTIONS_COLUMN: &str = "操作";

/// 一覧画面全体を描画する
///
/// `location` は現在の URL クエリ（`?` 付き、空なら既定の一覧）。
pub fn render<V: ListView>(controller: &ListViewController<V>, location: &str) -> String {
    let mut out = String::new();

    let location = if location.is_empty() { "（既定）" } else { location };
    let _ = writeln!(out, "── {}一覧  {}", V::NAME, location);

    let active: Vec<String> = controller
        .filters()
        .active()
        .map(|(key, value)| format!("{key}={value}"))
        .collect();
    if !active.is_empty() {
        let _ = writeln!(out, "絞り込み: {}", active.join(", "));
    }

    let quick: Vec<String> = V::QUICK_FILTERS
        .iter()
        .map(|quick| format!("{}({})", quick.name, quick.label))
        .collect();
    let _ = writeln!(out, "クイック: {}", quick.join(" "));
    out.push('\n');

    match controller.load_state() {
        LoadState::Loading => {
            let _ = writeln!(out, "読み込み中…");
        }
        LoadState::Errored => {
            let _ = writeln!(out, "一覧を取得できませんでした");
        }
        LoadState::Loaded if controller.items().is_empty() => {
            let _ = writeln!(out, "該当する{}はありません", V::NAME);
        }
        LoadState::Loaded => out.push_str(&rows_table(controller)),
    }

    let pagination = controller.pagination();
    let _ = writeln!(
        out,
        "ページ {} / {}（全 {} 件）{}{}",
        pagination.current_page,
        pagination.total_pages.max(1),
        pagination.total_count,
        if pagination.has_prev_page { "  ≪ prev" } else { "" },
        if pagination.has_next_page { "  next ≫" } else { "" },
    );
    out.push('\n');

    out.push_str(&stats_panel::<V>(controller));
    out
}

/// 統計パネルを描画する
///
/// 取得に失敗した場合はゼロ値とあわせてエラー表示を出す。
pub fn stats_panel<V: ListView>(controller: &ListViewController<V>) -> String {
    let mut out = String::from("── 統計");
    if controller.is_stats_loading() {
        out.push_str("（読み込み中）");
    } else if controller.stats_error().is_some() {
        out.push_str("（取得できませんでした）");
    }
    out.push('\n');

    for (label, value) in controller.stats().lines(V::status_values()) {
        let _ = writeln!(out, "  {label}: {value}");
    }
    out
}

/// 一覧の表
///
/// 変更権限があれば、各行で実行できる操作を末尾の列に並べる。
fn rows_table<V: ListView>(controller: &ListViewController<V>) -> String {
    let with_actions = controller
        .principal()
        .has_permission(&V::write_permission());

    let mut columns: Vec<&str> = V::COLUMNS.to_vec();
    if with_actions {
        columns.push(ACTIONS_COLUMN);
    }

    let rows = controller.items().iter().map(|item| {
        let mut cells = item.cells();
        if with_actions {
            let actions: Vec<&'static str> = item
                .status()
                .available_actions()
                .into_iter()
                .map(<&'static str>::from)
                .collect();
            cells.push(actions.join(" "));
        }
        cells
    });

    table(&columns, rows)
}

/// 表を描画する（全角文字は 2 桁として列を揃える）
fn table(columns: &[&str], rows: impl IntoIterator<Item = Vec<String>>) -> String {
    let mut builder = Builder::default();
    builder.push_record(columns.iter().map(|column| column.to_string()));
    for row in rows {
        builder.push_record(row);
    }

    let mut table = builder.build();
    table.with(Style::psql());
    format!("{table}\n")
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    /// 表示幅（全角は 2 桁）
    fn display_width(s: &str) -> usize {
        s.chars()
            .map(|c| match c as u32 {
                0x3000..=0x9FFF | 0xFF01..=0xFF60 => 2,
                _ => 1,
            })
            .sum()
    }

    /// 各行で列区切りが現れる表示位置
    fn separator_columns(rendered: &str) -> Vec<usize> {
        rendered
            .lines()
            .map(|line| {
                let end = line.find(['|', '+']).unwrap();
                display_width(&line[..end])
            })
            .collect()
    }

    #[test]
    fn test_全角のセルがあっても列区切りが揃う() {
        let rows = vec![
            vec!["食料配布".to_string(), "x".to_string()],
            vec!["ab".to_string(), "y".to_string()],
        ];

        let rendered = table(&["名称", "v"], rows);

        assert_eq!(rendered.lines().count(), 4);
        assert_eq!(separator_columns(&rendered), vec![10; 4], "{rendered}");
        assert!(rendered.contains("食料配布"));
    }

    #[test]
    fn test_見出しと区切り線と行を出す() {
        let rows = vec![
            vec!["1".to_string(), "食料配布".to_string()],
            vec!["22".to_string(), "家賃".to_string()],
        ];

        let rendered = table(&["ID", "名称"], rows);
        let lines: Vec<&str> = rendered.lines().collect();

        assert_eq!(lines[0].split('|').map(str::trim).collect::<Vec<_>>(), vec!["ID", "名称"]);
        assert!(lines[1].chars().all(|c| c == '-' || c == '+'));
        assert_eq!(lines[2].split('|').map(str::trim).collect::<Vec<_>>(), vec!["1", "食料配布"]);
        assert_eq!(lines[3].split('|').map(str::trim).collect::<Vec<_>>(), vec!["22", "家賃"]);
    }
}
