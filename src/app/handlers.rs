//! キー入力ハンドラー関数。

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::events::{Effect, Screen};

use super::{App, commit::CommitKeys};

/// キー入力を現在の画面へ渡し、遷移要求を返す。
pub async fn handle_key(app: &mut App, k: KeyEvent) -> Effect {
    // どの画面でもCtrl+Cで終了できるようにする。
    if is_ctrl_c(&k) {
        return Effect::Quit;
    }

    match &mut app.screen {
        Screen::Stage(stage) => {
            stage
                .handle_key(&k, &app.shortcuts.stage, app.vcs.as_ref())
                .await
        }
        Screen::Commit(commit) => {
            let keys = CommitKeys {
                commit: &app.shortcuts.commit,
                text: &app.shortcuts.text,
            };
            commit.handle_key(&k, &keys, &app.categories)
        }
    }
}

/// Ctrl+Cかどうかを判定する。
pub fn is_ctrl_c(k: &KeyEvent) -> bool {
    k.modifiers.contains(KeyModifiers::CONTROL) && k.code == KeyCode::Char('c')
}
