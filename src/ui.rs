//! TUI用端末の初期化と復元。

use std::{
    io::{self, Stdout, Write},
    sync::atomic::{AtomicBool, Ordering},
};

use anyhow::Result;
use crossterm::{
    cursor::{MoveToColumn, SetCursorStyle},
    execute, queue,
    style::Print,
    terminal::{
        Clear, ClearType, EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode,
        enable_raw_mode,
    },
};
use ratatui::{Terminal, backend::CrosstermBackend};

use crate::focus::CursorMode;

/// アプリ全体で使う端末型。
pub type Tui = Terminal<CrosstermBackend<Stdout>>;

/// 代替画面に入っているか。二重に抜けると端末がカーソル位置を巻き戻すため記録する。
static ACTIVE: AtomicBool = AtomicBool::new(false);

/// 代替画面へ切り替え、rawモードを有効化する。
pub fn init_terminal() -> Result<Tui> {
    // キー入力を即時に受け取れるようrawモードへ切り替える。
    enable_raw_mode()?;
    // 標準出力を取得して代替画面へ入る。
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    mark_active();
    // CrosstermバックエンドでTerminalを構築する。
    let backend = CrosstermBackend::new(stdout);
    Ok(Terminal::new(backend)?)
}

/// 終了時に端末状態を元に戻す。既に戻っていれば何もしない。
pub fn restore_terminal() -> Result<()> {
    // suspend 済みなら二度目の LeaveAlternateScreen は送らない。
    if !take_active() {
        return Ok(());
    }
    // rawモードを解除する。
    disable_raw_mode()?;
    // カーソル形状を端末既定に戻し、代替画面を終了する。
    execute!(
        io::stdout(),
        SetCursorStyle::DefaultUserShape,
        LeaveAlternateScreen
    )?;
    Ok(())
}

/// 外部コマンドの出力を通常画面に流すため、一時的にTUIを抜ける。
pub fn suspend(terminal: &mut Tui) -> Result<()> {
    // 通常画面へ戻す。
    restore_terminal()?;
    // 描画中に隠したカーソルを見せる。
    terminal.show_cursor()?;
    Ok(())
}

/// suspend から戻り、画面を描き直せる状態にする。
pub fn resume(terminal: &mut Tui) -> Result<()> {
    // rawモードと代替画面を再開する。
    enable_raw_mode()?;
    execute!(io::stdout(), EnterAlternateScreen)?;
    mark_active();
    // 前回のバッファを捨てて次の描画で全体を描き直す。
    terminal.clear()?;
    Ok(())
}

fn mark_active() {
    ACTIVE.store(true, Ordering::SeqCst);
}

/// 代替画面中なら非アクティブにして true を返す。
fn take_active() -> bool {
    ACTIVE.swap(false, Ordering::SeqCst)
}

/// カーソル表示モードを端末のカーソル形状へ反映する。
pub fn apply_cursor_mode(mode: CursorMode) -> Result<()> {
    let style = match mode {
        CursorMode::Blink => SetCursorStyle::BlinkingBar,
        // Hidden は描画側でカーソル位置を置かないことで隠す。
        CursorMode::Static | CursorMode::Hidden => SetCursorStyle::SteadyBar,
    };
    execute!(io::stdout(), style)?;
    Ok(())
}

/// 現在行を消してから1行出力する（進捗表示の残骸を残さない）。
pub fn print_over_line(line: &str) -> io::Result<()> {
    let mut out = io::stdout().lock();
    // 行頭へ戻ってから書き、改行で確定させる。
    queue!(
        out,
        Clear(ClearType::CurrentLine),
        MoveToColumn(0),
        Print(line),
        Print("\n")
    )?;
    out.flush()
}
