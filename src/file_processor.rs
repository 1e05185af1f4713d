use crate::error::ShipError;
use crate::log_record::parse_line;
use crate::uploader::Uploader;
use log::{debug, error, info, warn};
use std::path::Path;
use tokio::fs::File;
use tokio::io::{AsyncBufReadExt, BufReader};

/// Per-file outcome counters. Only ever logged.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FileSummary {
    pub uploaded: usize,
    pub failed: usize,
    pub malformed: usize,
    /// The file could not be opened, or a read error cut it short.
    pub skipped: bool,
}

impl FileSummary {
    pub fn skipped() -> Self {
        Self {
            skipped: true,
            ..Self::default()
        }
    }
}

/// Ships every line of one file, in order, one upload at a time.
///
/// Never fails: open errors skip the file, I/O errors while reading stop
/// it, and line errors are logged before moving on to the next line.
pub async fn process_file(path: &Path, application_id: &str, uploader: &Uploader) -> FileSummary {
    let file = match File::open(path).await {
        Ok(file) => file,
        Err(source) => {
            let e = ShipError::FileOpen {
                path: path.to_path_buf(),
                source,
            };
            error!("{}", e);
            return FileSummary::skipped();
        }
    };

    let mut summary = FileSummary::default();
    let mut reader = BufReader::new(file);
    let mut buf = Vec::new();

    loop {
        buf.clear();
        match reader.read_until(b'\n', &mut buf).await {
            Ok(0) => break,
            Ok(_) => {}
            Err(source) => {
                let e = ShipError::FileRead {
                    path: path.to_path_buf(),
                    source,
                };
                error!("{}", e);
                summary.skipped = true;
                break;
            }
        }

        // Bytes that are not UTF-8 become U+FFFD instead of ending the file.
        let line = String::from_utf8_lossy(strip_line_ending(&buf));
        if line.is_empty() {
            continue;
        }

        let record = match parse_line(&line, application_id) {
            Ok(record) => record,
            Err(e) => {
                warn!("invalid log format in file {} ({}): {}", path.display(), e, line);
                summary.malformed += 1;
                continue;
            }
        };

        match uploader.upload(&record).await {
            Ok(()) => {
                info!(
                    "successfully uploaded log from file {}: {}",
                    path.display(),
                    record.log_message
                );
                summary.uploaded += 1;
            }
            Err(e) => {
                error!("failed to upload log from file {}: {}", path.display(), e);
                summary.failed += 1;
            }
        }
    }

    debug!("Finished file {}: {:?}", path.display(), summary);
    summary
}

fn strip_line_ending(buf: &[u8]) -> &[u8] {
    let line = buf.strip_suffix(b"\n").unwrap_or(buf);
    line.strip_suffix(b"\r").unwrap_or(line)
}
