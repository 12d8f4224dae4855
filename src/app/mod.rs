//! TUIのイベントループと画面遷移。

pub mod commit;
mod handlers;
mod render;
pub mod stage;

use std::sync::Arc;

use anyhow::Result;
use crossterm::event::{self, Event, KeyEventKind};

use crate::{
    category::CategoryIndex,
    config::{Config, LimitsCfg, Theme},
    error::AppError,
    events::{Effect, Screen},
    focus::CursorMode,
    git::Vcs,
    shortcuts::Shortcuts,
    ui::{self, Tui},
};

use commit::CommitScreen;
use handlers::handle_key;
use render::draw;
use stage::StageScreen;

/// 起動時に決まる読み取り専用の設定と、現在の画面。
pub struct App {
    /// 現在の画面。
    pub screen: Screen,
    /// 色設定（起動時に一度だけ解釈する）。
    pub theme: Theme,
    /// ショートカットキー設定。
    pub shortcuts: Shortcuts,
    /// カテゴリ表。
    pub categories: CategoryIndex,
    /// 入力欄の文字数上限。
    pub limits: LimitsCfg,
    /// true ならコミットせずメッセージを表示するだけ。
    pub dry_run: bool,
    /// git 呼び出し口。
    pub vcs: Arc<dyn Vcs>,
}

/// イベントループの終わり方。
#[derive(Debug, PartialEq, Eq)]
pub enum Outcome {
    /// コミットせずに終了した。
    Quit,
    /// dry-run で組み立てたメッセージ。
    DryRun(String),
    /// git commit を実行した（成否は git の出力で伝わる）。
    Committed { success: bool },
}

impl App {
    /// 設定から App を作る。最初の画面は空のステージ画面。
    pub fn new(cfg: &Config, vcs: Arc<dyn Vcs>, dry_run: bool) -> Result<Self> {
        Ok(Self {
            screen: Screen::Stage(StageScreen::default()),
            theme: cfg.theme()?,
            shortcuts: cfg.shortcuts.clone(),
            categories: cfg.category_index(),
            limits: cfg.limits.clone(),
            dry_run,
            vcs,
        })
    }

    /// 遷移要求を処理する。遷移先は常に新しく作る。
    async fn apply(&mut self, effect: Effect) -> Option<Pending> {
        match effect {
            Effect::None => None,
            Effect::Quit => Some(Pending::Finish(Outcome::Quit)),
            // 入力欄とフォーカスは常に空から始める。
            Effect::EnterCommit => {
                tracing::info!("stage -> commit");
                self.screen = Screen::Commit(CommitScreen::new(&self.limits));
                None
            }
            // 戻るたびにステータスを読み直す。
            Effect::EnterStage => {
                tracing::info!("commit -> stage");
                self.screen = Screen::Stage(StageScreen::load(self.vcs.as_ref()).await);
                None
            }
            // dry-run ではコミットせずメッセージを持って終了する。
            Effect::Commit(message) if self.dry_run => {
                Some(Pending::Finish(Outcome::DryRun(message)))
            }
            // 実際のコミットは端末を切り替えるためループ側で行う。
            Effect::Commit(message) => Some(Pending::Commit(message)),
        }
    }

    /// コミット起動の失敗をコミット画面に表示する。
    fn report_commit_failure(&mut self, e: AppError) {
        tracing::error!("{e}");
        // ステージ画面に戻っていれば表示先は無い。
        if let Screen::Commit(commit) = &mut self.screen {
            commit.error = Some(e);
        }
    }

    fn cursor_mode(&self) -> Option<CursorMode> {
        match &self.screen {
            Screen::Commit(commit) => Some(commit.focus.cursor_mode()),
            Screen::Stage(_) => None,
        }
    }
}

/// イベントループ外で行う処理。
enum Pending {
    Finish(Outcome),
    Commit(String),
}

/// ユーザーが終了するまでメインTUIループを回す。
pub async fn run_app(terminal: &mut Tui, app: &mut App) -> Result<Outcome> {
    // 起動時のステータスを読み込む。
    app.screen = Screen::Stage(StageScreen::load(app.vcs.as_ref()).await);
    // 最後に端末へ反映したカーソル形状。
    let mut applied_cursor = None;

    loop {
        // コミット画面のカーソル形状を端末へ反映する。
        let mode = app.cursor_mode();
        if let Some(mode) = mode
            && applied_cursor != Some(mode)
        {
            ui::apply_cursor_mode(mode)?;
        }
        applied_cursor = mode;

        // 現在の画面を描画する。
        terminal.draw(|f| draw(f, app))?;

        // 入力が来るまで待つ。タイマーによる再描画はしない。
        let Event::Key(k) = event::read()? else {
            continue;
        };
        // 押下以外（リピート・離し）は無視する。
        if k.kind != KeyEventKind::Press {
            continue;
        }

        // キーを画面に渡し、返ってきた遷移要求を適用する。
        let effect = handle_key(app, k).await;
        match app.apply(effect).await {
            None => {}
            // 終了要求ならループを抜ける。
            Some(Pending::Finish(outcome)) => return Ok(outcome),
            Some(Pending::Commit(message)) => {
                // git の出力を通常画面へ流すため TUI を抜ける。
                ui::suspend(terminal)?;
                match app.vcs.commit(&message).await {
                    // 成否にかかわらず git の出力を残したまま終了する。
                    Ok(success) => return Ok(Outcome::Committed { success }),
                    Err(e) => {
                        // 起動できなかったので TUI に戻り、エラーを表示する。
                        ui::resume(terminal)?;
                        // 代替画面に入り直したのでカーソル形状を再適用させる。
                        applied_cursor = None;
                        app.report_commit_failure(AppError::CommitInvocation(e));
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::git::testing::FakeVcs;

    fn app(vcs: Arc<FakeVcs>, dry_run: bool) -> App {
        App::new(&Config::default(), vcs, dry_run).unwrap()
    }

    #[tokio::test]
    async fn test_enter_commit_builds_fresh_screen() {
        let mut app = app(Arc::new(FakeVcs::default()), false);

        assert!(app.apply(Effect::EnterCommit).await.is_none());

        let Screen::Commit(commit) = &app.screen else {
            panic!("expected commit screen");
        };
        assert_eq!(commit.focus.focus_index(), 0);
        assert!(commit.fields.iter().all(|f| f.value.is_empty()));
        assert_eq!(commit.fields[1].char_limit, 72);
    }

    #[tokio::test]
    async fn test_enter_stage_rereads_status() {
        let vcs = Arc::new(FakeVcs::with_report("M  a.txt\n"));
        let mut app = app(vcs.clone(), false);
        app.apply(Effect::EnterCommit).await;

        app.apply(Effect::EnterStage).await;

        let Screen::Stage(stage) = &app.screen else {
            panic!("expected stage screen");
        };
        assert_eq!(stage.files.len(), 1);
        assert_eq!(vcs.calls(), vec!["status"]);
    }

    #[tokio::test]
    async fn test_commit_effect_respects_dry_run() {
        let vcs = Arc::new(FakeVcs::default());
        let mut app = app(vcs.clone(), true);

        let pending = app.apply(Effect::Commit("🐛 | fix".into())).await;

        assert!(matches!(
            pending,
            Some(Pending::Finish(Outcome::DryRun(ref m))) if m == "🐛 | fix"
        ));
        assert!(vcs.calls().is_empty());
    }

    #[tokio::test]
    async fn test_commit_effect_defers_to_loop() {
        let mut app = app(Arc::new(FakeVcs::default()), false);
        let pending = app.apply(Effect::Commit("msg".into())).await;
        assert!(matches!(pending, Some(Pending::Commit(ref m)) if m == "msg"));
    }

    #[tokio::test]
    async fn test_commit_spawn_failure_is_shown_on_commit_screen() {
        let vcs = Arc::new(FakeVcs {
            fail_commit_spawn: true,
            ..FakeVcs::default()
        });
        let mut app = app(vcs.clone(), false);
        app.apply(Effect::EnterCommit).await;

        let err = vcs.commit("msg").await.unwrap_err();
        app.report_commit_failure(AppError::CommitInvocation(err));

        let Screen::Commit(commit) = &app.screen else {
            panic!("expected commit screen");
        };
        assert!(matches!(commit.error, Some(AppError::CommitInvocation(_))));
    }

    #[tokio::test]
    async fn test_quit() {
        let mut app = app(Arc::new(FakeVcs::default()), false);
        assert!(matches!(
            app.apply(Effect::Quit).await,
            Some(Pending::Finish(Outcome::Quit))
        ));
    }
}
