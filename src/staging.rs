//! ステージ操作と、その後のステータス再取得。

use crate::{
    error::{AppError, CommandError},
    git::Vcs,
    status::{FileStatusRecord, parse_status_report},
};

/// 変更操作の結果。操作の成否に関わらず一覧は取り直す。
#[derive(Debug)]
pub struct StagingOutcome {
    /// add / reset の失敗（あれば）。
    pub mutation_error: Option<AppError>,
    /// 操作後に読み直した一覧。
    pub files: Result<Vec<FileStatusRecord>, AppError>,
}

/// git 経由でインデックスを操作する。
pub struct StagingController<'a> {
    vcs: &'a dyn Vcs,
}

impl<'a> StagingController<'a> {
    pub fn new(vcs: &'a dyn Vcs) -> Self {
        Self { vcs }
    }

    /// ステータスを読み直して一覧を作り直す。
    pub async fn refresh(&self) -> Result<Vec<FileStatusRecord>, AppError> {
        let report = self.vcs.status().await.map_err(|e| {
            tracing::error!("status read failed: {e}");
            AppError::StatusRead(e)
        })?;
        let files = parse_status_report(&report);
        tracing::debug!("status: {} files", files.len());
        Ok(files)
    }

    /// ステージ済みなら reset、未ステージなら add する。
    pub async fn toggle(&self, record: &FileStatusRecord) -> StagingOutcome {
        let result = if record.staged {
            tracing::info!("unstage {}", record.path);
            self.vcs.reset(&record.path).await
        } else {
            tracing::info!("stage {}", record.path);
            self.vcs.add(std::slice::from_ref(&record.path)).await
        };
        self.finish(result.err()).await
    }

    /// 未ステージのファイルを1回の add でまとめてステージする。
    pub async fn stage_all(&self, records: &[FileStatusRecord]) -> StagingOutcome {
        let paths: Vec<String> = records
            .iter()
            .filter(|r| !r.staged)
            .map(|r| r.path.clone())
            .collect();

        // 対象が無ければ git を呼ばない。
        let result = if paths.is_empty() {
            Ok(())
        } else {
            tracing::info!("stage all: {} files", paths.len());
            self.vcs.add(&paths).await
        };
        self.finish(result.err()).await
    }

    async fn finish(&self, error: Option<CommandError>) -> StagingOutcome {
        let mutation_error = error.map(|e| {
            tracing::error!("staging failed: {e}");
            AppError::Mutation(e)
        });
        StagingOutcome {
            mutation_error,
            files: self.refresh().await,
        }
    }
}
