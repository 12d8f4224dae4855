//! アプリ全体で扱うエラー型。

use std::io;

use thiserror::Error;

/// git サブプロセス1回分の失敗。
#[derive(Error, Debug)]
pub enum CommandError {
    /// 実行ファイルを起動できなかった。
    #[error("failed to run git: {0}")]
    Spawn(#[from] io::Error),

    /// 0 以外の終了コードで終わった。
    #[error("git {args} exited with {code}: {stderr}")]
    Exit {
        args: String,
        code: String,
        stderr: String,
    },
}

/// 画面に表示する、またはプロセスを止めるエラーの分類。
#[derive(Error, Debug)]
pub enum AppError {
    /// git が無い、またはリポジトリ外で起動された（起動時のみ、致命的）。
    #[error("{0}")]
    Environment(String),

    /// `git status` の読み取りに失敗した。
    #[error("git status failed: {0}")]
    StatusRead(#[source] CommandError),

    /// add / reset が失敗した。
    #[error("{0}")]
    Mutation(#[source] CommandError),

    /// カテゴリ番号が数値でない、または範囲外。
    #[error("invalid selector {selector:?}: expected a number in 0..{len}")]
    SelectorResolution { selector: String, len: usize },

    /// `git commit` を起動できなかった。
    #[error("could not start git commit: {0}")]
    CommitInvocation(#[source] CommandError),
}
