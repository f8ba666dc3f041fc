use std::future::Future;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};

use crate::error::AppError;
use crate::models::Listing;
use crate::site::Category;

/// Fetches raw HTML content from a URL.
pub trait Fetcher: Send + Sync + Clone {
    fn fetch(&self, url: &str) -> impl Future<Output = Result<String, AppError>> + Send;
}

/// One CSV snapshot file in the snapshot folder.
#[derive(Debug, Clone)]
pub struct SnapshotFile {
    pub path: PathBuf,
    pub size_bytes: u64,
    pub modified: DateTime<Utc>,
}

impl SnapshotFile {
    pub fn name(&self) -> &str {
        self.path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or("?")
    }
}

/// Persists scraped listings as per-page snapshots and reads them back
/// for the file listing and the dashboard.
pub trait SnapshotStore {
    /// Write one category page's listings. Returns the snapshot path.
    fn save(
        &self,
        category: Category,
        page: u32,
        listings: &[Listing],
    ) -> Result<PathBuf, AppError>;

    /// Snapshot files currently in the folder, sorted by name.
    /// A missing folder yields an empty list, not an error.
    fn list(&self) -> Result<Vec<SnapshotFile>, AppError>;

    /// Read a snapshot back into listings.
    fn load(&self, path: &Path) -> Result<Vec<Listing>, AppError>;
}
