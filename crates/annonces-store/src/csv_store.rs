use std::fs;
use std::path::{Path, PathBuf};

use annonces_core::error::AppError;
use annonces_core::models::{CSV_HEADERS, Listing};
use annonces_core::site::Category;
use annonces_core::traits::{SnapshotFile, SnapshotStore};
use chrono::{DateTime, Utc};

/// CSV-backed snapshot store over a local folder.
///
/// One file per scraped category page, named `<slug>_page_<N>.csv`.
/// Saving the same page again overwrites the previous snapshot.
#[derive(Debug, Clone)]
pub struct CsvStore {
    dir: PathBuf,
}

impl CsvStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn snapshot_path(&self, category: Category, page: u32) -> PathBuf {
        self.dir
            .join(format!("{}_page_{}.csv", category.slug(), page))
    }
}

impl SnapshotStore for CsvStore {
    fn save(
        &self,
        category: Category,
        page: u32,
        listings: &[Listing],
    ) -> Result<PathBuf, AppError> {
        fs::create_dir_all(&self.dir)?;
        let path = self.snapshot_path(category, page);

        let mut writer = csv::Writer::from_path(&path)?;
        if listings.is_empty() {
            // serialize() emits the header row; with no records it must
            // be written explicitly.
            writer.write_record(CSV_HEADERS)?;
        }
        for listing in listings {
            writer.serialize(listing)?;
        }
        writer.flush()?;

        tracing::info!("Saved {} listings to {}", listings.len(), path.display());
        Ok(path)
    }

    fn list(&self) -> Result<Vec<SnapshotFile>, AppError> {
        if !self.dir.exists() {
            tracing::warn!("snapshot folder {} does not exist", self.dir.display());
            return Ok(Vec::new());
        }

        let mut files = Vec::new();
        for entry in fs::read_dir(&self.dir)? {
            let entry = entry?;
            let path = entry.path();
            if path.extension().and_then(|e| e.to_str()) != Some("csv") {
                continue;
            }
            let meta = entry.metadata()?;
            let modified: DateTime<Utc> = meta.modified()?.into();
            files.push(SnapshotFile {
                path,
                size_bytes: meta.len(),
                modified,
            });
        }
        files.sort_by(|a, b| a.path.cmp(&b.path));
        Ok(files)
    }

    fn load(&self, path: &Path) -> Result<Vec<Listing>, AppError> {
        let mut reader = csv::Reader::from_path(path)?;
        let mut listings = Vec::new();
        for record in reader.deserialize() {
            listings.push(record?);
        }
        Ok(listings)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use annonces_core::testutil::make_listing;

    fn store() -> (tempfile::TempDir, CsvStore) {
        let dir = tempfile::tempdir().unwrap();
        let store = CsvStore::new(dir.path());
        (dir, store)
    }

    #[test]
    fn test_saved_snapshot_is_discoverable() {
        let (_dir, store) = store();
        let listings = vec![
            make_listing("Frigo", "Neuf", 250_000.0),
            make_listing("Congélateur", "Occasion", 120_000.0),
        ];

        let path = store
            .save(Category::Refrigerateurs, 2, &listings)
            .unwrap();
        assert_eq!(
            path.file_name().unwrap(),
            "refrigerateurs-congelateurs_page_2.csv"
        );

        let files = store.list().unwrap();
        assert_eq!(files.len(), 1);
        assert_eq!(files[0].path, path);
        assert!(files[0].size_bytes > 0);
    }

    #[test]
    fn test_header_row_is_exact() {
        let (_dir, store) = store();
        let path = store
            .save(Category::Climatisation, 1, &[make_listing("Clim", "Neuf", 1.0)])
            .unwrap();

        let contents = fs::read_to_string(path).unwrap();
        assert_eq!(
            contents.lines().next().unwrap(),
            "Details,Condition,Price (F Cfa),Address,Image Link"
        );
    }

    #[test]
    fn test_empty_snapshot_still_has_headers() {
        let (_dir, store) = store();
        let path = store.save(Category::Cuisinieres, 5, &[]).unwrap();

        let contents = fs::read_to_string(&path).unwrap();
        assert_eq!(
            contents.trim_end(),
            "Details,Condition,Price (F Cfa),Address,Image Link"
        );
        assert!(store.load(&path).unwrap().is_empty());
    }

    #[test]
    fn test_load_roundtrip() {
        let (_dir, store) = store();
        let listings = vec![
            make_listing("Machine à laver LG", "Venant de l'étranger", 175_000.0),
            make_listing("Lave-linge", "Pas Disponible", 0.0),
        ];

        let path = store.save(Category::MachinesALaver, 1, &listings).unwrap();
        let back = store.load(&path).unwrap();
        assert_eq!(back, listings);
    }

    #[test]
    fn test_save_overwrites_previous_snapshot() {
        let (_dir, store) = store();
        store
            .save(Category::Climatisation, 1, &[make_listing("a", "Neuf", 1.0)])
            .unwrap();
        let path = store
            .save(Category::Climatisation, 1, &[make_listing("b", "Occasion", 2.0)])
            .unwrap();

        let back = store.load(&path).unwrap();
        assert_eq!(back.len(), 1);
        assert_eq!(back[0].title, "b");
        assert_eq!(store.list().unwrap().len(), 1);
    }

    #[test]
    fn test_list_missing_folder_is_empty() {
        let store = CsvStore::new("/nonexistent/annonces-test");
        assert!(store.list().unwrap().is_empty());
    }

    #[test]
    fn test_list_ignores_non_csv_files() {
        let (dir, store) = store();
        fs::write(dir.path().join("notes.txt"), "pas un snapshot").unwrap();
        store
            .save(Category::Climatisation, 1, &[make_listing("a", "Neuf", 1.0)])
            .unwrap();

        let files = store.list().unwrap();
        assert_eq!(files.len(), 1);
        assert_eq!(files[0].name(), "climatisation_page_1.csv");
    }

    #[test]
    fn test_list_sorted_by_name() {
        let (_dir, store) = store();
        store
            .save(Category::MachinesALaver, 1, &[make_listing("a", "Neuf", 1.0)])
            .unwrap();
        store
            .save(Category::Climatisation, 2, &[make_listing("b", "Neuf", 1.0)])
            .unwrap();

        let names: Vec<_> = store.list().unwrap().iter().map(|f| f.name().to_string()).collect();
        assert_eq!(
            names,
            vec!["climatisation_page_2.csv", "machines-a-laver_page_1.csv"]
        );
    }
}
