//! アプリケーションのエントリポイントとランタイム初期化。

use std::{path::PathBuf, process::ExitCode, sync::Arc};

use anyhow::Result;
use clap::Parser;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;

mod app;
mod category;
mod config;
mod error;
mod events;
mod focus;
mod git;
mod input;
mod layout;
mod shortcuts;
mod staging;
mod status;
mod ui;

use app::{App, Outcome};
use config::Config;
use git::GitCli;

/// `version` で表示する文字列。
const VERSION: &str = concat!("v", env!("CARGO_PKG_VERSION"));

/// 絵文字付きコミットメッセージを作るためのステージング TUI。
#[derive(Parser, Debug)]
#[command(name = "emogit", disable_version_flag = true)]
struct Cli {
    /// `version` / `v` でバージョンを表示して終了する。
    mode: Option<String>,
    /// コミットせず、組み立てたメッセージを表示する。
    #[arg(long)]
    dry_run: bool,
    /// 設定ファイルのパス（既定は $EMOGIT_CONFIG か ./.emogit.toml）。
    #[arg(long)]
    config: Option<PathBuf>,
    /// カレントディレクトリの代わりに使うリポジトリ（git -C と同じ）。
    #[arg(short = 'C', long = "repo", value_name = "DIR")]
    repo: Option<PathBuf>,
}

/// ファイルロギングを初期化し、非同期ガードを生存させる。
fn init_logging() -> Result<WorkerGuard> {
    // 作業ツリーに置くと git status に出てしまうため一時ディレクトリへ書く。
    let log_dir = std::env::temp_dir();
    // ログ出力先ファイル名を決める。
    let log_file = "emogit.log";
    // TUIの標準出力を汚さないよう、ファイルへ直接書き込む。
    let file_appender = tracing_appender::rolling::never(&log_dir, log_file);
    // 非同期書き込み用のラッパーとガードを用意する。
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);
    // RUST_LOG があれば優先し、無ければ info で初期化する。
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .with_writer(non_blocking)
        .with_ansi(false)
        .with_target(false)
        .try_init()
        .map_err(|e| anyhow::anyhow!("failed to init logging: {e}"))?;
    // ログの保存先を通知しておく。
    tracing::info!("logging to {}", log_dir.join(log_file).display());
    Ok(guard)
}

#[tokio::main]
/// エントリポイント：環境確認→UI開始→端末復元→コミット結果の表示。
async fn main() -> ExitCode {
    // 引数を解析する（不正な引数は clap が表示して終了する）。
    let cli = Cli::parse();

    // バージョン表示はリポジトリ外でも動くよう最初に処理する。
    if matches!(cli.mode.as_deref(), Some("version" | "v")) {
        println!("{VERSION}");
        return ExitCode::SUCCESS;
    }

    // 失敗は標準エラーへ出して非0で終了する。
    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("emogit: {e:#}");
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<()> {
    // ロガーを初期化し、ガードを保持して書き込みを継続させる。
    let _log_guard = init_logging()?;
    // 起動ログを出力する。
    tracing::info!("emogit {VERSION} starting");

    // 設定ファイルは任意。無ければ既定値を使う。
    let cfg = Config::load(cli.config.as_deref())?;

    // git が無い、またはリポジトリ外なら UI に入らない。
    let git = match cli.repo {
        Some(dir) => GitCli::in_dir(dir),
        None => GitCli::default(),
    };
    git.check_environment().await?;

    // 設定を解釈してアプリ状態を作る。
    let mut app = App::new(&cfg, Arc::new(git), cli.dry_run)?;

    // TUI用の端末状態へ切り替える。
    let mut terminal = ui::init_terminal()?;
    // メインアプリを実行する。
    let res = app::run_app(&mut terminal, &mut app).await;
    // 端末の状態を必ず元に戻す。コミット後は既に戻っているので何も送らない。
    if let Err(e) = ui::restore_terminal() {
        tracing::warn!("failed to restore terminal: {e}");
    }

    // 終わり方に応じて結果を出力する。
    match &res {
        Ok(Outcome::Quit) => tracing::info!("quit without committing"),
        Ok(Outcome::DryRun(message)) => println!("Message: {message}"),
        Ok(Outcome::Committed { success }) => {
            tracing::info!("commit finished (success: {success})");
        }
        Err(e) => tracing::error!("app error: {e}"),
    }
    // 終了ログを出力する。
    tracing::info!("emogit exiting");
    res.map(|_| ())
}
