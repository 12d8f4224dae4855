//! TUI描画関連の関数。

use ratatui::{
    Frame,
    prelude::*,
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph, Wrap},
};
use unicode_width::UnicodeWidthStr;

use crate::{
    config::Theme,
    events::Screen,
    input::render_text_field,
    layout,
    shortcuts::{Shortcuts, primary_key},
};

use super::{
    App,
    commit::{CommitScreen, MESSAGE, SELECTOR},
    stage::StageScreen,
};

/// 画面全体を描画する。
pub fn draw(f: &mut Frame, app: &App) {
    let main_layout = layout::create_main_layout(f.area());

    match &app.screen {
        Screen::Stage(stage) => draw_stage(f, main_layout.body, stage, &app.theme),
        Screen::Commit(commit) => draw_commit(f, main_layout.body, commit, app),
    }

    // HELPバー（画面ごとのショートカット）を描画する。
    let help_bar = Paragraph::new(help_text(&app.screen, &app.shortcuts))
        .block(Block::default().borders(Borders::ALL).title("HELP"))
        .wrap(Wrap { trim: true });
    f.render_widget(help_bar, main_layout.help_bar);

    f.render_widget(build_status_bar(app), main_layout.status_bar);
}

/// ファイル一覧を描画する。読み込みエラーは空表示より優先する。
fn draw_stage(f: &mut Frame, area: Rect, stage: &StageScreen, theme: &Theme) {
    let block = Block::default().borders(Borders::ALL).title("FILES");

    if let Some(err) = stage.status_error() {
        let p = Paragraph::new(format!("error: {err}"))
            .block(block)
            .style(Style::default().fg(Color::Red))
            .wrap(Wrap { trim: true });
        f.render_widget(p, area);
        return;
    }
    if stage.files.is_empty() {
        f.render_widget(Paragraph::new("No changes to show.").block(block), area);
        return;
    }

    let items: Vec<ListItem> = stage
        .files
        .iter()
        .map(|file| {
            if file.staged {
                ListItem::new(format!("[S] {}", file.path)).style(Style::default().bold())
            } else {
                ListItem::new(format!("[ ] {}", file.path)).style(Style::default().dim())
            }
        })
        .collect();

    let list = List::new(items)
        .block(block)
        .highlight_symbol("> ")
        .highlight_style(Style::default().fg(theme.focused));

    // カーソル行が見えるようスクロールさせる。
    let mut state = ListState::default();
    state.select(Some(stage.cursor));
    f.render_stateful_widget(list, area, &mut state);
}

/// カテゴリ一覧・入力欄・ボタンを描画する。
fn draw_commit(f: &mut Frame, area: Rect, commit: &CommitScreen, app: &App) {
    let theme = &app.theme;
    let inner_width = area.width.saturating_sub(2) as usize;
    let targets = wrap_targets(app.categories.entries(), inner_width);
    let chunks = layout::create_commit_layout(area, targets.len() as u16);

    let targets =
        Paragraph::new(targets).block(Block::default().borders(Borders::ALL).title("TARGETS"));
    f.render_widget(targets, chunks.targets);

    render_text_field(f, chunks.selector, &commit.fields[SELECTOR], theme);
    render_text_field(f, chunks.message, &commit.fields[MESSAGE], theme);

    let button = if commit.focus.on_action() {
        Line::from(Span::styled("[ Commit ]", Style::default().fg(theme.focused)))
    } else {
        Line::from(vec![
            Span::raw("[ "),
            Span::styled("Commit", Style::default().fg(theme.blurred)),
            Span::raw(" ]"),
        ])
    };
    f.render_widget(Paragraph::new(button), chunks.button);
}

/// `i:[entry]` を表示幅で折り返して行に並べる。
pub fn wrap_targets(entries: &[String], width: usize) -> Vec<Line<'static>> {
    let mut lines = Vec::new();
    let mut current = String::new();
    let mut current_width = 0;

    for (i, entry) in entries.iter().enumerate() {
        let chip = format!("{i}:[{entry}] ");
        // 絵文字は2桁幅になるため文字数ではなく表示幅で数える。
        let chip_width = chip.width();
        if current_width > 0 && current_width + chip_width > width {
            lines.push(Line::from(std::mem::take(&mut current)));
            current_width = 0;
        }
        current.push_str(&chip);
        current_width += chip_width;
    }
    if !current.is_empty() {
        lines.push(Line::from(current));
    }
    lines
}

/// ステータスバーを構築する。
fn build_status_bar(app: &App) -> Paragraph<'static> {
    let (summary, error) = match &app.screen {
        Screen::Stage(stage) => (
            format!(
                "[Stage] {}/{} staged",
                stage.staged_count(),
                stage.files.len()
            ),
            stage.last_error.as_ref().map(|e| e.to_string()),
        ),
        Screen::Commit(commit) => (
            format!("[Commit] cursor: {}", commit.focus.cursor_mode().label()),
            commit.error.as_ref().map(|e| e.to_string()),
        ),
    };

    // エラーの有無でステータス文字列を切り替える。
    let (text, style) = match error {
        Some(err) => (
            format!("{summary} | ERROR: {err}"),
            Style::default().fg(Color::Red),
        ),
        None => (summary, Style::default()),
    };

    Paragraph::new(text)
        .block(Block::default().borders(Borders::ALL).title("STATUS"))
        .style(style)
        .wrap(Wrap { trim: true })
}

/// 現在画面に応じたヘルプ文字列を返す。
fn help_text(screen: &Screen, shortcuts: &Shortcuts) -> String {
    match screen {
        Screen::Stage(_) => {
            let sc = &shortcuts.stage;
            format!(
                "{}/{}: navigate | {}: toggle | {}: stage all | {}: refresh | {}: next | {}: quit",
                primary_key(&sc.up),
                primary_key(&sc.down),
                format_keys(&sc.toggle),
                primary_key(&sc.stage_all),
                primary_key(&sc.refresh),
                primary_key(&sc.next),
                format_keys(&sc.quit),
            )
        }
        Screen::Commit(_) => {
            let sc = &shortcuts.commit;
            format!(
                "{}/{}: navigate | {}: proceed | {}: previous | {}: cursor | {}: quit",
                primary_key(&sc.prev_field),
                primary_key(&sc.next_field),
                primary_key(&sc.confirm),
                primary_key(&sc.back),
                primary_key(&sc.cursor_mode),
                format_keys(&sc.quit),
            )
        }
    }
}

/// ショートカットキーの配列を表示用文字列に変換する。
fn format_keys(keys: &[String]) -> String {
    keys.join("/")
}
