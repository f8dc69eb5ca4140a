use std::fs;
use std::path::{Path, PathBuf};

use chrono::Local;
use tracing::{info, warn};
use uartcap_demux::{validate, ImageRecord, Verdict};

/// Persists completed image payloads, one file per record.
///
/// Files are named `img_<timestamp>_<index>.jpg` and written with the
/// payload's exact byte sequence, no transformation.
pub struct ImageStore {
    dir: PathBuf,
}

impl ImageStore {
    /// Create the store, making the output directory if needed.
    pub fn create(dir: impl Into<PathBuf>) -> std::io::Result<Self> {
        let dir = dir.into();
        if !dir.exists() {
            fs::create_dir_all(&dir)?;
            info!(path = %dir.display(), "created output directory");
        }
        Ok(Self { dir })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Validate and persist one record.
    ///
    /// Returns the written path, or `None` when the verdict dropped the
    /// payload.
    pub fn save(&self, record: &ImageRecord) -> std::io::Result<Option<PathBuf>> {
        match validate(&record.payload) {
            Verdict::Reject(reason) => {
                warn!(index = record.index, %reason, "dropping image payload");
                return Ok(None);
            }
            Verdict::AcceptWithWarning(reason) => {
                warn!(index = record.index, %reason, "saving image anyway");
            }
            Verdict::Accept => {}
        }

        let stamp = Local::now().format("%Y%m%d_%H%M%S");
        let path = self
            .dir
            .join(format!("img_{stamp}_{:04}.jpg", record.index));
        fs::write(&path, &record.payload)?;
        info!(path = %path.display(), bytes = record.payload.len(), "saved image");
        Ok(Some(path))
    }
}
