//! コミット画面の状態遷移。

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::{
    category::CategoryIndex,
    config::LimitsCfg,
    error::AppError,
    events::Effect,
    focus::{Direction, FocusState},
    input::TextField,
    shortcuts::{CommitShortcuts, TextShortcuts, matches_shortcut},
};

/// カテゴリ番号欄の位置。
pub const SELECTOR: usize = 0;
/// メッセージ欄の位置。
pub const MESSAGE: usize = 1;

/// 入力欄2つとコミットボタン。
#[derive(Debug)]
pub struct CommitScreen {
    /// [カテゴリ番号, メッセージ]
    pub fields: [TextField; 2],
    pub focus: FocusState,
    /// 直近の失敗（番号の解決失敗、コミット起動失敗）。
    pub error: Option<AppError>,
}

/// コミット画面のキー設定一式。
pub struct CommitKeys<'a> {
    pub commit: &'a CommitShortcuts,
    pub text: &'a TextShortcuts,
}

impl CommitScreen {
    pub fn new(limits: &LimitsCfg) -> Self {
        let mut fields = [
            TextField::new("Emoji target", limits.selector),
            TextField::new("Commit message", limits.message),
        ];
        let focus = FocusState::new(&mut fields);
        Self {
            fields,
            focus,
            error: None,
        }
    }

    /// `<token> | <message>` を組み立てる。番号はこの時点で初めて解決する。
    pub fn compose_message(&self, categories: &CategoryIndex) -> Result<String, AppError> {
        let token = categories.resolve(&self.fields[SELECTOR].value)?;
        Ok(format!("{} | {}", token, self.fields[MESSAGE].value))
    }

    /// キー入力を1件処理する。
    pub fn handle_key(
        &mut self,
        k: &KeyEvent,
        keys: &CommitKeys<'_>,
        categories: &CategoryIndex,
    ) -> Effect {
        let sc = keys.commit;

        if matches_shortcut(k, &sc.quit) {
            return Effect::Quit;
        }

        // エラー表示は次の操作で消す。
        self.error = None;

        if matches_shortcut(k, &sc.cursor_mode) {
            let mode = self.focus.cursor_mode().next();
            self.focus.set_cursor_mode(mode, &mut self.fields);
        } else if matches_shortcut(k, &sc.back) {
            // 先頭の欄からさらに戻るとステージ画面へ。
            if self.focus.focus_index() == 0 {
                return Effect::EnterStage;
            }
            self.focus.advance(Direction::Backward, &mut self.fields);
        } else if matches_shortcut(k, &sc.confirm) {
            if !self.focus.on_action() {
                // 入力欄での確定は次の欄への移動として扱う。
                self.focus.advance(Direction::Forward, &mut self.fields);
                return Effect::None;
            }
            match self.compose_message(categories) {
                Ok(message) => {
                    tracing::info!("commit message composed: {message:?}");
                    return Effect::Commit(message);
                }
                Err(e) => {
                    tracing::warn!("commit blocked: {e}");
                    self.error = Some(e);
                }
            }
        } else if matches_shortcut(k, &sc.next_field) {
            self.focus.advance(Direction::Forward, &mut self.fields);
        } else if matches_shortcut(k, &sc.prev_field) {
            self.focus.advance(Direction::Backward, &mut self.fields);
        } else if let Some(field) = self.fields.iter_mut().find(|f| f.focused) {
            edit_field(field, k, keys.text);
        }

        Effect::None
    }
}

/// フォーカス中の欄へ編集キーを渡す。
fn edit_field(field: &mut TextField, k: &KeyEvent, sc: &TextShortcuts) {
    if matches_shortcut(k, &sc.backspace) {
        field.backspace();
    } else if matches_shortcut(k, &sc.delete) {
        field.delete();
    } else if matches_shortcut(k, &sc.left) {
        field.move_left();
    } else if matches_shortcut(k, &sc.right) {
        field.move_right();
    } else if matches_shortcut(k, &sc.home) {
        field.move_home();
    } else if matches_shortcut(k, &sc.end) {
        field.move_end();
    } else if matches_shortcut(k, &sc.clear_line) {
        field.clear_line();
    } else if let KeyCode::Char(c) = k.code
        && !k
            .modifiers
            .intersects(KeyModifiers::CONTROL | KeyModifiers::ALT)
    {
        field.insert_char(c);
    }
}
