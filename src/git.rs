//! Thin wrapper around the `git` executable.
//!
//! Every repository read or write goes through [`Vcs`]; nothing here parses
//! beyond collecting stdout/stderr.

use std::path::PathBuf;
use std::process::Stdio;
use std::time::Duration;

use async_trait::async_trait;
use tokio::io::{AsyncBufReadExt, AsyncRead, BufReader};
use tokio::process::Command;

use crate::error::{AppError, CommandError};

/// How long to wait for the output readers once `git commit` has exited.
const DRAIN_GRACE: Duration = Duration::from_secs(1);

/// External version-control operations used by the UI.
#[async_trait]
pub trait Vcs: Send + Sync {
    /// Raw porcelain v1 status report, untracked files included.
    async fn status(&self) -> Result<String, CommandError>;
    /// Stage the given paths in a single call.
    async fn add(&self, paths: &[String]) -> Result<(), CommandError>;
    /// Unstage one path, leaving the working tree untouched.
    async fn reset(&self, path: &str) -> Result<(), CommandError>;
    /// Record a signed-off commit, streaming git's output to the terminal.
    /// Returns whether git reported success.
    async fn commit(&self, message: &str) -> Result<bool, CommandError>;
}

/// [`Vcs`] backed by the `git` binary on `PATH`.
#[derive(Clone, Debug)]
pub struct GitCli {
    program: String,
    /// Repository to run in; the process cwd when unset.
    workdir: Option<PathBuf>,
}

impl Default for GitCli {
    fn default() -> Self {
        Self {
            program: "git".into(),
            workdir: None,
        }
    }
}

impl GitCli {
    /// Run every git invocation inside `dir` instead of the cwd.
    pub fn in_dir(dir: impl Into<PathBuf>) -> Self {
        Self {
            workdir: Some(dir.into()),
            ..Self::default()
        }
    }

    fn command(&self) -> Command {
        let mut cmd = Command::new(&self.program);
        if let Some(dir) = &self.workdir {
            cmd.current_dir(dir);
        }
        cmd.stdin(Stdio::null());
        cmd
    }

    /// Fail early when git is missing or the cwd is not a work tree.
    pub async fn check_environment(&self) -> Result<(), AppError> {
        if let Err(e) = self.run(&["--version"]).await {
            tracing::error!("git not available: {e}");
            return Err(AppError::Environment(format!(
                "`{}` was not found on PATH",
                self.program
            )));
        }
        match self.run(&["rev-parse", "--is-inside-work-tree"]).await {
            Ok(out) if out.trim() == "true" => Ok(()),
            Ok(_) | Err(_) => Err(AppError::Environment(
                "current directory is not inside a git work tree".into(),
            )),
        }
    }

    /// Run git to completion and return stdout.
    async fn run(&self, args: &[&str]) -> Result<String, CommandError> {
        tracing::debug!("git {}", args.join(" "));
        let output = self.command().args(args).output().await?;

        if !output.status.success() {
            return Err(CommandError::Exit {
                args: args.join(" "),
                code: output
                    .status
                    .code()
                    .map_or_else(|| "signal".to_string(), |c| c.to_string()),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }
        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}

#[async_trait]
impl Vcs for GitCli {
    async fn status(&self) -> Result<String, CommandError> {
        self.run(&["status", "--porcelain=v1", "--untracked-files=all"])
            .await
    }

    async fn add(&self, paths: &[String]) -> Result<(), CommandError> {
        let mut args = vec!["add", "--"];
        args.extend(paths.iter().map(String::as_str));
        self.run(&args).await.map(|_| ())
    }

    async fn reset(&self, path: &str) -> Result<(), CommandError> {
        self.run(&["reset", "--", path]).await.map(|_| ())
    }

    async fn commit(&self, message: &str) -> Result<bool, CommandError> {
        tracing::info!("git commit -s -m {message:?}");
        let mut child = self
            .command()
            .args(["commit", "-s", "-m", message])
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()?;

        // Both streams are drained concurrently with the wait below.
        let stdout = child.stdout.take().map(|s| tokio::spawn(echo_lines(s)));
        let stderr = child.stderr.take().map(|s| tokio::spawn(echo_lines(s)));

        let status = child.wait().await?;

        for task in [stdout, stderr].into_iter().flatten() {
            // A grandchild may keep a pipe open; give up on it after a grace period.
            if tokio::time::timeout(DRAIN_GRACE, task).await.is_err() {
                tracing::warn!("output reader abandoned after git exited");
            }
        }

        tracing::info!("git commit finished: {status}");
        Ok(status.success())
    }
}

/// Print each line, clearing whatever transient output is on the current line.
async fn echo_lines<R: AsyncRead + Unpin>(reader: R) {
    let mut lines = BufReader::new(reader).lines();
    loop {
        match lines.next_line().await {
            Ok(Some(line)) => {
                if let Err(e) = crate::ui::print_over_line(&line) {
                    tracing::warn!("failed to echo git output: {e}");
                }
            }
            Ok(None) => break,
            Err(e) => {
                tracing::warn!("failed to read git output: {e}");
                break;
            }
        }
    }
}

#[cfg(test)]
pub mod testing {
    //! Recording test double for [`Vcs`].

    use std::collections::VecDeque;
    use std::sync::Mutex;

    use super::*;

    /// Returns scripted status reports and records every call.
    #[derive(Default)]
    pub struct FakeVcs {
        /// Reports handed out by successive `status` calls; the last one repeats.
        pub reports: Mutex<VecDeque<String>>,
        pub calls: Mutex<Vec<String>>,
        pub fail_status: bool,
        pub fail_mutation: bool,
        pub fail_commit_spawn: bool,
    }

    impl FakeVcs {
        pub fn with_report(report: &str) -> Self {
            Self::with_reports(&[report])
        }

        pub fn with_reports(reports: &[&str]) -> Self {
            Self {
                reports: Mutex::new(reports.iter().map(|r| r.to_string()).collect()),
                ..Self::default()
            }
        }

        pub fn calls(&self) -> Vec<String> {
            self.calls.lock().unwrap().clone()
        }

        /// Calls other than `status`.
        pub fn mutations(&self) -> Vec<String> {
            self.calls()
                .into_iter()
                .filter(|c| c != "status")
                .collect()
        }

        fn record(&self, call: String) {
            self.calls.lock().unwrap().push(call);
        }

        fn failure(args: &str) -> CommandError {
            CommandError::Exit {
                args: args.into(),
                code: "128".into(),
                stderr: "fatal: scripted failure".into(),
            }
        }
    }

    #[async_trait]
    impl Vcs for FakeVcs {
        async fn status(&self) -> Result<String, CommandError> {
            self.record("status".into());
            if self.fail_status {
                return Err(Self::failure("status"));
            }
            let mut reports = self.reports.lock().unwrap();
            let report = if reports.len() > 1 {
                reports.pop_front().unwrap_or_default()
            } else {
                reports.front().cloned().unwrap_or_default()
            };
            Ok(report)
        }

        async fn add(&self, paths: &[String]) -> Result<(), CommandError> {
            self.record(format!("add {}", paths.join(" ")));
            if self.fail_mutation {
                return Err(Self::failure("add"));
            }
            Ok(())
        }

        async fn reset(&self, path: &str) -> Result<(), CommandError> {
            self.record(format!("reset {path}"));
            if self.fail_mutation {
                return Err(Self::failure("reset"));
            }
            Ok(())
        }

        async fn commit(&self, message: &str) -> Result<bool, CommandError> {
            self.record(format!("commit {message}"));
            if self.fail_commit_spawn {
                return Err(CommandError::Spawn(std::io::Error::new(
                    std::io::ErrorKind::NotFound,
                    "git",
                )));
            }
            Ok(true)
        }
    }
}
