use crate::error::ShipError;
use crate::file_processor::{process_file, FileSummary};
use crate::uploader::Uploader;
use log::{debug, error, info};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::fs;
use tokio::sync::Semaphore;
use tokio::task::JoinSet;

/// Totals for one pass over a directory.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub files: usize,
    pub skipped_files: usize,
    pub uploaded: usize,
    pub failed: usize,
    pub malformed: usize,
}

impl RunSummary {
    fn record(&mut self, file: FileSummary) {
        self.files += 1;
        self.uploaded += file.uploaded;
        self.failed += file.failed;
        self.malformed += file.malformed;
        if file.skipped {
            self.skipped_files += 1;
        }
    }
}

/// Ships every regular file directly inside `dir`; subdirectories are not
/// descended into.
///
/// Each file gets its own task. At most `max_concurrent` of them run at once,
/// `0` meaning no limit. Returns once every task has finished. Only a failure
/// to list `dir` is an error.
pub async fn ship_directory(
    dir: &Path,
    application_id: &str,
    uploader: Arc<Uploader>,
    max_concurrent: usize,
) -> Result<RunSummary, ShipError> {
    let files = list_files(dir).await?;
    info!("Found {} files in {}", files.len(), dir.display());

    let permits = match max_concurrent {
        0 => files.len().max(1),
        n => n,
    };
    let semaphore = Arc::new(Semaphore::new(permits));
    let application_id: Arc<str> = Arc::from(application_id);

    let mut tasks = JoinSet::new();
    for path in files {
        let semaphore = Arc::clone(&semaphore);
        let uploader = Arc::clone(&uploader);
        let application_id = Arc::clone(&application_id);

        tasks.spawn(async move {
            // The semaphore is never closed.
            let _permit = semaphore.acquire_owned().await.ok();
            process_file(&path, &application_id, &uploader).await
        });
    }

    let mut summary = RunSummary::default();
    while let Some(joined) = tasks.join_next().await {
        match joined {
            Ok(file) => summary.record(file),
            Err(e) => {
                error!("File task failed: {}", e);
                summary.record(FileSummary::skipped());
            }
        }
    }

    Ok(summary)
}

/// Lists the regular files in `dir`, sorted by path. Symlinks are followed.
async fn list_files(dir: &Path) -> Result<Vec<PathBuf>, ShipError> {
    let list_error = |source: std::io::Error| ShipError::DirectoryList {
        path: dir.to_path_buf(),
        source,
    };

    let mut entries = fs::read_dir(dir).await.map_err(list_error)?;
    let mut files = Vec::new();

    while let Some(entry) = entries.next_entry().await.map_err(list_error)? {
        let path = entry.path();
        match fs::metadata(&path).await {
            Ok(metadata) if metadata.is_file() => files.push(path),
            Ok(metadata) if metadata.is_dir() => debug!("Skipping directory {}", path.display()),
            Ok(_) => debug!("Skipping non-regular file {}", path.display()),
            // Dangling symlink or a file removed since listing; the open will report it.
            Err(_) => files.push(path),
        }
    }

    files.sort();
    Ok(files)
}
