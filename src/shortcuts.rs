//! ショートカット設定の管理。

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use serde::Deserialize;

/// ショートカット設定の全体。
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Shortcuts {
    pub stage: StageShortcuts,
    pub commit: CommitShortcuts,
    pub text: TextShortcuts,
}

/// ステージ画面のショートカット。
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct StageShortcuts {
    pub quit: Vec<String>,
    pub up: Vec<String>,
    pub down: Vec<String>,
    pub toggle: Vec<String>,
    pub stage_all: Vec<String>,
    pub refresh: Vec<String>,
    pub next: Vec<String>,
}

/// コミット画面のショートカット。
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct CommitShortcuts {
    pub quit: Vec<String>,
    pub cursor_mode: Vec<String>,
    pub next_field: Vec<String>,
    pub prev_field: Vec<String>,
    pub confirm: Vec<String>,
    pub back: Vec<String>,
}

/// 入力欄の編集キー。
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct TextShortcuts {
    pub backspace: Vec<String>,
    pub delete: Vec<String>,
    pub left: Vec<String>,
    pub right: Vec<String>,
    pub home: Vec<String>,
    pub end: Vec<String>,
    pub clear_line: Vec<String>,
}

fn keys(list: &[&str]) -> Vec<String> {
    list.iter().map(|s| s.to_string()).collect()
}

impl Default for StageShortcuts {
    fn default() -> Self {
        Self {
            quit: keys(&["Esc", "q"]),
            up: keys(&["Up", "k"]),
            down: keys(&["Down", "j"]),
            toggle: keys(&["Space", "Enter"]),
            stage_all: keys(&["a"]),
            refresh: keys(&["r"]),
            next: keys(&["Right"]),
        }
    }
}

impl Default for CommitShortcuts {
    fn default() -> Self {
        Self {
            quit: keys(&["Esc"]),
            cursor_mode: keys(&["Ctrl+r"]),
            next_field: keys(&["Tab", "Down"]),
            prev_field: keys(&["Up"]),
            confirm: keys(&["Enter"]),
            back: keys(&["BackTab"]),
        }
    }
}

impl Default for TextShortcuts {
    fn default() -> Self {
        Self {
            backspace: keys(&["Backspace"]),
            delete: keys(&["Delete"]),
            left: keys(&["Left"]),
            right: keys(&["Right"]),
            home: keys(&["Home", "Ctrl+a"]),
            end: keys(&["End", "Ctrl+e"]),
            clear_line: keys(&["Ctrl+u"]),
        }
    }
}

/// KeyEventがいずれかのショートカット文字列と一致するか判定する。
pub fn matches_shortcut(key: &KeyEvent, shortcuts: &[String]) -> bool {
    shortcuts.iter().any(|s| matches_single_shortcut(key, s))
}

/// ヘルプ表示用に先頭のキーだけを返す。
pub fn primary_key(shortcuts: &[String]) -> &str {
    shortcuts.first().map(String::as_str).unwrap_or("-")
}

/// KeyEventが単一のショートカット文字列と一致するか判定する。
fn matches_single_shortcut(key: &KeyEvent, shortcut: &str) -> bool {
    // ショートカット文字列を分解する（例: "Ctrl+u", "a", "Enter"）。
    let parts: Vec<&str> = shortcut.split('+').collect();

    let (modifiers_str, key_str) = if parts.len() > 1 {
        (&parts[0..parts.len() - 1], parts[parts.len() - 1])
    } else {
        (&[][..], parts[0])
    };

    let mut expected_modifiers = KeyModifiers::empty();
    for modifier in modifiers_str {
        match *modifier {
            "Ctrl" | "ctrl" => expected_modifiers |= KeyModifiers::CONTROL,
            "Alt" | "alt" => expected_modifiers |= KeyModifiers::ALT,
            "Shift" | "shift" => expected_modifiers |= KeyModifiers::SHIFT,
            _ => return false,
        }
    }

    // BackTab は端末によって SHIFT 付きで届くので修飾から外して比べる。
    let mut actual_modifiers = key.modifiers;
    if key.code == KeyCode::BackTab {
        actual_modifiers.remove(KeyModifiers::SHIFT);
    }
    if actual_modifiers != expected_modifiers {
        return false;
    }

    match key_str {
        "Enter" | "enter" => key.code == KeyCode::Enter,
        "Esc" | "esc" => key.code == KeyCode::Esc,
        "Tab" | "tab" => key.code == KeyCode::Tab,
        "BackTab" | "backtab" => key.code == KeyCode::BackTab,
        "Space" | "space" => key.code == KeyCode::Char(' '),
        "Backspace" | "backspace" => key.code == KeyCode::Backspace,
        "Delete" | "delete" => key.code == KeyCode::Delete,
        "Up" | "up" => key.code == KeyCode::Up,
        "Down" | "down" => key.code == KeyCode::Down,
        "Left" | "left" => key.code == KeyCode::Left,
        "Right" | "right" => key.code == KeyCode::Right,
        "Home" | "home" => key.code == KeyCode::Home,
        "End" | "end" => key.code == KeyCode::End,
        // 単一文字は Char として比較する。
        s if s.chars().count() == 1 => s
            .chars()
            .next()
            .is_some_and(|c| key.code == KeyCode::Char(c)),
        _ => false,
    }
}
