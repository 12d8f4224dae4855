//! 画面状態と、キー処理が返す遷移要求。

use crate::app::{commit::CommitScreen, stage::StageScreen};

/// TUIで現在表示中の画面。各画面は自分の状態だけを持つ。
#[derive(Debug)]
pub enum Screen {
    /// ファイルのステージ画面。
    Stage(StageScreen),
    /// カテゴリとメッセージの入力画面。
    Commit(CommitScreen),
}

/// キー処理の結果としてイベントループに依頼する動作。
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Effect {
    /// 画面内で完結した。
    None,
    /// プログラムを終了する。
    Quit,
    /// 新しいコミット画面へ進む。
    EnterCommit,
    /// ステータスを読み直した新しいステージ画面へ戻る。
    EnterStage,
    /// 組み立てたメッセージでコミットして終了する。
    Commit(String),
}
