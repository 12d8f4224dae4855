//! ステージ画面の状態遷移。

use crossterm::event::KeyEvent;

use crate::{
    error::AppError,
    events::Effect,
    git::Vcs,
    shortcuts::{StageShortcuts, matches_shortcut},
    staging::{StagingController, StagingOutcome},
    status::FileStatusRecord,
};

/// 変更ファイル一覧とカーソル。
#[derive(Debug, Default)]
pub struct StageScreen {
    /// 直近に読み込んだ一覧。読み込み失敗時は空。
    pub files: Vec<FileStatusRecord>,
    /// 選択行。空の一覧では 0。
    pub cursor: usize,
    /// 直近の読み込み/操作エラー。
    pub last_error: Option<AppError>,
}

impl StageScreen {
    /// 現在のステータスを読み込んで画面を作る。
    pub async fn load(vcs: &dyn Vcs) -> Self {
        let mut screen = Self::default();
        let files = StagingController::new(vcs).refresh().await;
        screen.set_files(files);
        screen
    }

    /// ステータス読み込みに失敗しているか（一覧より優先して表示する）。
    pub fn status_error(&self) -> Option<&AppError> {
        self.last_error
            .as_ref()
            .filter(|e| matches!(e, AppError::StatusRead(_)))
    }

    pub fn staged_count(&self) -> usize {
        self.files.iter().filter(|f| f.staged).count()
    }

    /// キー入力を1件処理する。
    pub async fn handle_key(
        &mut self,
        k: &KeyEvent,
        sc: &StageShortcuts,
        vcs: &dyn Vcs,
    ) -> Effect {
        let ctl = StagingController::new(vcs);

        if matches_shortcut(k, &sc.quit) {
            return Effect::Quit;
        } else if matches_shortcut(k, &sc.up) {
            self.cursor = self.cursor.saturating_sub(1);
        } else if matches_shortcut(k, &sc.down) {
            if self.cursor + 1 < self.files.len() {
                self.cursor += 1;
            }
        } else if matches_shortcut(k, &sc.toggle) {
            // 空の一覧では何もしない。
            let Some(record) = self.files.get(self.cursor).cloned() else {
                return Effect::None;
            };
            let outcome = ctl.toggle(&record).await;
            self.apply_outcome(outcome);
        } else if matches_shortcut(k, &sc.stage_all) {
            let outcome = ctl.stage_all(&self.files).await;
            self.apply_outcome(outcome);
            self.cursor = 0;
        } else if matches_shortcut(k, &sc.refresh) {
            self.set_files(ctl.refresh().await);
        } else if matches_shortcut(k, &sc.next) {
            return Effect::EnterCommit;
        }

        Effect::None
    }

    fn apply_outcome(&mut self, outcome: StagingOutcome) {
        self.set_files(outcome.files);
        // 再読み込みに成功しても操作の失敗は残して表示する。
        if let Some(e) = outcome.mutation_error
            && self.last_error.is_none()
        {
            self.last_error = Some(e);
        }
    }

    /// 一覧を丸ごと置き換え、カーソルを範囲内に収める。
    fn set_files(&mut self, files: Result<Vec<FileStatusRecord>, AppError>) {
        match files {
            Ok(files) => {
                self.files = files;
                self.last_error = None;
            }
            Err(e) => {
                // 古い一覧は残さない。
                self.files.clear();
                self.last_error = Some(e);
            }
        }
        self.clamp_cursor();
    }

    fn clamp_cursor(&mut self) {
        if self.cursor >= self.files.len() {
            self.cursor = self.files.len().saturating_sub(1);
        }
    }
}
