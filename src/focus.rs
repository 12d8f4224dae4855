//! 入力欄 N 個 + 末尾のアクションボタン 1 個を巡回するフォーカス管理。

use crate::input::TextField;

/// フォーカス移動の向き。
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Direction {
    Forward,
    Backward,
}

/// 全入力欄で共通のカーソル表示。
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum CursorMode {
    /// 点滅カーソル。
    #[default]
    Blink,
    /// 点滅しないカーソル。
    Static,
    /// カーソルを表示しない。
    Hidden,
}

impl CursorMode {
    /// Blink → Static → Hidden → Blink の順に切り替える。
    pub fn next(self) -> Self {
        match self {
            CursorMode::Blink => CursorMode::Static,
            CursorMode::Static => CursorMode::Hidden,
            CursorMode::Hidden => CursorMode::Blink,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            CursorMode::Blink => "blink",
            CursorMode::Static => "static",
            CursorMode::Hidden => "hidden",
        }
    }
}

/// フォーカス位置。`focus_index == field_count` はアクションボタンを指す。
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FocusState {
    focus_index: usize,
    field_count: usize,
    cursor_mode: CursorMode,
}

impl FocusState {
    /// 先頭の入力欄にフォーカスした状態で作る。
    pub fn new(fields: &mut [TextField]) -> Self {
        let state = Self {
            focus_index: 0,
            field_count: fields.len(),
            cursor_mode: CursorMode::default(),
        };
        state.apply(fields);
        state
    }

    pub fn focus_index(&self) -> usize {
        self.focus_index
    }

    pub fn cursor_mode(&self) -> CursorMode {
        self.cursor_mode
    }

    /// アクションボタンにフォーカスがあるか。
    pub fn on_action(&self) -> bool {
        self.focus_index == self.field_count
    }

    /// 循環的に前後へ移動し、各入力欄の focus/blur を更新する。
    pub fn advance(&mut self, direction: Direction, fields: &mut [TextField]) {
        let slots = self.field_count + 1;
        self.focus_index = match direction {
            Direction::Forward => (self.focus_index + 1) % slots,
            Direction::Backward => (self.focus_index + slots - 1) % slots,
        };
        self.apply(fields);
    }

    /// カーソル表示をフォーカスと無関係に全欄へ反映する。
    pub fn set_cursor_mode(&mut self, mode: CursorMode, fields: &mut [TextField]) {
        self.cursor_mode = mode;
        for field in fields.iter_mut() {
            field.cursor_mode = mode;
        }
    }

    fn apply(&self, fields: &mut [TextField]) {
        for (i, field) in fields.iter_mut().enumerate() {
            field.focused = i == self.focus_index;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fields(n: usize) -> Vec<TextField> {
        (0..n).map(|_| TextField::new("", 8)).collect()
    }

    fn focused(fields: &[TextField]) -> Vec<bool> {
        fields.iter().map(|f| f.focused).collect()
    }

    #[test]
    fn test_starts_on_first_field() {
        let mut fs = fields(2);
        let st = FocusState::new(&mut fs);
        assert_eq!(st.focus_index(), 0);
        assert_eq!(focused(&fs), vec![true, false]);
    }

    #[test]
    fn test_forward_cycles_through_action_and_wraps() {
        let mut fs = fields(2);
        let mut st = FocusState::new(&mut fs);

        st.advance(Direction::Forward, &mut fs);
        assert_eq!(focused(&fs), vec![false, true]);

        st.advance(Direction::Forward, &mut fs);
        assert!(st.on_action());
        // ボタン選択中はどの欄もフォーカスを持たない。
        assert_eq!(focused(&fs), vec![false, false]);

        st.advance(Direction::Forward, &mut fs);
        assert_eq!(st.focus_index(), 0);
    }

    #[test]
    fn test_backward_from_first_lands_on_action() {
        let mut fs = fields(2);
        let mut st = FocusState::new(&mut fs);
        st.advance(Direction::Backward, &mut fs);
        assert!(st.on_action());
    }

    #[test]
    fn test_n_plus_one_forwards_is_identity() {
        for n in 0..5 {
            let mut fs = fields(n);
            let mut st = FocusState::new(&mut fs);
            for start in 0..=n {
                while st.focus_index() != start {
                    st.advance(Direction::Forward, &mut fs);
                }
                for _ in 0..=n {
                    st.advance(Direction::Forward, &mut fs);
                }
                assert_eq!(st.focus_index(), start);
            }
        }
    }

    #[test]
    fn test_backward_undoes_forward() {
        let mut fs = fields(3);
        let mut st = FocusState::new(&mut fs);
        for _ in 0..7 {
            let before = st.focus_index();
            st.advance(Direction::Forward, &mut fs);
            st.advance(Direction::Backward, &mut fs);
            assert_eq!(st.focus_index(), before);
            st.advance(Direction::Forward, &mut fs);
        }
    }

    #[test]
    fn test_cursor_mode_applies_to_all_fields() {
        let mut fs = fields(2);
        let mut st = FocusState::new(&mut fs);
        let mode = st.cursor_mode().next();
        st.set_cursor_mode(mode, &mut fs);

        assert_eq!(st.cursor_mode(), CursorMode::Static);
        assert!(fs.iter().all(|f| f.cursor_mode == CursorMode::Static));
        // フォーカスは変わらない。
        assert_eq!(st.focus_index(), 0);
    }

    #[test]
    fn test_cursor_mode_wraps() {
        assert_eq!(CursorMode::Hidden.next(), CursorMode::Blink);
    }
}
