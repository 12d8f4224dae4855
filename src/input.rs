//! 1行テキスト入力欄（TextField）。

use ratatui::{prelude::*, widgets::Paragraph};
use unicode_width::UnicodeWidthStr;

use crate::{config::Theme, focus::CursorMode};

/// 入力欄のプロンプト。
const PROMPT: &str = "> ";

/// 文字数上限付きの入力欄。
#[derive(Clone, Debug)]
pub struct TextField {
    /// 空のときに薄く表示する案内文。
    pub placeholder: String,
    /// 現在の入力値
    pub value: String,
    /// カーソル位置（文字単位）
    pub cursor: usize,
    /// 入力できる最大文字数。
    pub char_limit: usize,
    /// フォーカス中の欄だけがキー入力を受け付ける。
    pub focused: bool,
    /// カーソルの表示方法。
    pub cursor_mode: CursorMode,
}

impl TextField {
    pub fn new(placeholder: &str, char_limit: usize) -> Self {
        Self {
            placeholder: placeholder.into(),
            value: String::new(),
            cursor: 0,
            char_limit,
            focused: false,
            cursor_mode: CursorMode::default(),
        }
    }

    /// 文字を挿入（上限に達していれば無視）
    pub fn insert_char(&mut self, c: char) {
        let mut chars: Vec<char> = self.value.chars().collect();
        if chars.len() >= self.char_limit {
            return;
        }
        chars.insert(self.cursor, c);
        self.value = chars.into_iter().collect();
        self.cursor += 1;
    }

    /// Backspace（カーソル前の文字を削除）
    pub fn backspace(&mut self) {
        if self.cursor > 0 {
            let mut chars: Vec<char> = self.value.chars().collect();
            chars.remove(self.cursor - 1);
            self.value = chars.into_iter().collect();
            self.cursor -= 1;
        }
    }

    /// Delete（カーソル位置の文字を削除）
    pub fn delete(&mut self) {
        let mut chars: Vec<char> = self.value.chars().collect();
        if self.cursor < chars.len() {
            chars.remove(self.cursor);
            self.value = chars.into_iter().collect();
        }
    }

    pub fn move_left(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    pub fn move_right(&mut self) {
        if self.cursor < self.value.chars().count() {
            self.cursor += 1;
        }
    }

    pub fn move_home(&mut self) {
        self.cursor = 0;
    }

    pub fn move_end(&mut self) {
        self.cursor = self.value.chars().count();
    }

    /// 行全体をクリア
    pub fn clear_line(&mut self) {
        self.value.clear();
        self.cursor = 0;
    }
}

/// 入力欄を1行で描画し、フォーカス中なら端末カーソルを置く。
pub fn render_text_field(f: &mut Frame, area: Rect, field: &TextField, theme: &Theme) {
    let style = if field.focused {
        Style::default().fg(theme.focused)
    } else {
        Style::default()
    };

    // プロンプトを除いた表示幅。
    let display_width = (area.width as usize).saturating_sub(PROMPT.width());

    // カーソルが右端を超えたら横スクロールする。
    let scroll_offset = if field.cursor > display_width.saturating_sub(1) {
        field.cursor + 1 - display_width.max(1)
    } else {
        0
    };

    let chars: Vec<char> = field.value.chars().collect();
    let visible: String = chars
        .iter()
        .skip(scroll_offset)
        .take(display_width)
        .collect();

    let body = if field.value.is_empty() {
        Span::styled(
            field.placeholder.clone(),
            Style::default().fg(theme.blurred),
        )
    } else {
        Span::styled(visible, style)
    };
    let line = Line::from(vec![Span::styled(PROMPT, style), body]);
    f.render_widget(Paragraph::new(line), area);

    if field.focused && field.cursor_mode != CursorMode::Hidden {
        // 可視部分の先頭からカーソルまでの表示幅で位置を決める。
        let before: String = chars
            .iter()
            .skip(scroll_offset)
            .take(field.cursor.saturating_sub(scroll_offset))
            .collect();
        let x = area.x + (PROMPT.width() + before.width()) as u16;
        f.set_cursor_position((x.min(area.right().saturating_sub(1)), area.y));
    }
}
