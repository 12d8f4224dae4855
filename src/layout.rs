//! レイアウト計算のヘルパー関数

use ratatui::prelude::*;

/// 各画面共通の3領域
pub struct MainLayout {
    /// 画面本体
    pub body: Rect,
    /// HELPバーの領域
    pub help_bar: Rect,
    /// STATUSバーの領域
    pub status_bar: Rect,
}

/// コミット画面本体の領域
pub struct CommitLayout {
    /// カテゴリ一覧
    pub targets: Rect,
    /// カテゴリ番号欄
    pub selector: Rect,
    /// メッセージ欄
    pub message: Rect,
    /// コミットボタン
    pub button: Rect,
}

/// 画面を Body + HELP + STATUS に分割
pub fn create_main_layout(area: Rect) -> MainLayout {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(1),    // Body
            Constraint::Length(3), // HELPバー
            Constraint::Length(3), // STATUSバー
        ])
        .split(area);

    MainLayout {
        body: chunks[0],
        help_bar: chunks[1],
        status_bar: chunks[2],
    }
}

/// コミット画面本体を分割（カテゴリ一覧は折り返し後の行数ぶん確保）
pub fn create_commit_layout(area: Rect, target_lines: u16) -> CommitLayout {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(target_lines + 2), // 枠線込みのカテゴリ一覧
            Constraint::Length(1),                // 空行
            Constraint::Length(1),                // カテゴリ番号
            Constraint::Length(1),                // メッセージ
            Constraint::Length(1),                // 空行
            Constraint::Length(1),                // ボタン
            Constraint::Min(0),
        ])
        .split(area);

    CommitLayout {
        targets: chunks[0],
        selector: chunks[2],
        message: chunks[3],
        button: chunks[5],
    }
}
