//! File-backed dataset store

use crate::error::StoreError;
use gleaner_domain::{Category, Dataset, EventRecord};
use std::collections::BTreeSet;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// Tags and sub-event ids already present across every dataset file
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct KnownHints {
    /// Sorted, unique tags
    pub tags: Vec<String>,

    /// Sorted, unique sub-event ids
    pub ids: Vec<String>,
}

/// Reads and writes one YAML file per category under a data directory
///
/// Writes overwrite the whole file and take no lock: concurrent writers race
/// and the last one wins.
#[derive(Debug, Clone)]
pub struct DatasetStore {
    data_dir: PathBuf,
}

impl DatasetStore {
    /// Create a store rooted at `data_dir`
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    /// Data directory
    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    /// Path of a category's dataset file
    pub fn path_for(&self, category: Category) -> PathBuf {
        self.data_dir.join(category.file_name())
    }

    /// Load a category's dataset
    ///
    /// A missing or empty file is an empty dataset.
    pub fn load(&self, category: Category) -> Result<Dataset, StoreError> {
        let path = self.path_for(category);
        let dataset = read_dataset(&path)?;
        debug!("Loaded {} records from {}", dataset.len(), path.display());
        Ok(dataset)
    }

    /// Overwrite a category's dataset file
    pub fn save(&self, category: Category, dataset: &Dataset) -> Result<PathBuf, StoreError> {
        let path = self.path_for(category);
        let contents = render(dataset)?;
        fs::write(&path, contents).map_err(|source| StoreError::Io {
            path: path.clone(),
            source,
        })?;
        info!("Wrote {} records to {}", dataset.len(), path.display());
        Ok(path)
    }

    /// Collect tags and sub-event ids from every `*.yml` file in the data directory
    ///
    /// Files that cannot be read or parsed are skipped with a warning.
    pub fn known_hints(&self) -> Result<KnownHints, StoreError> {
        let entries = fs::read_dir(&self.data_dir).map_err(|source| StoreError::Io {
            path: self.data_dir.clone(),
            source,
        })?;

        let mut files: Vec<PathBuf> = entries
            .filter_map(|entry| entry.ok().map(|e| e.path()))
            .filter(|p| p.is_file() && p.extension().is_some_and(|ext| ext == "yml"))
            .collect();
        files.sort();

        let mut tags = BTreeSet::new();
        let mut ids = BTreeSet::new();
        for path in files {
            match read_dataset(&path) {
                Ok(dataset) => {
                    for record in dataset.records() {
                        tags.extend(record.tags.iter().cloned());
                        ids.extend(record.event_ids().map(str::to_string));
                    }
                }
                Err(e) => warn!("Skipping {}: {}", path.display(), e),
            }
        }

        Ok(KnownHints {
            tags: tags.into_iter().collect(),
            ids: ids.into_iter().collect(),
        })
    }
}

/// Serialize a dataset to YAML
pub fn render(dataset: &Dataset) -> Result<String, StoreError> {
    serde_yaml::to_string(dataset).map_err(|e| StoreError::Serialize(e.to_string()))
}

/// Serialize one record as a single-item YAML sequence, as it would appear in a file
pub fn render_record(record: &EventRecord) -> Result<String, StoreError> {
    serde_yaml::to_string(std::slice::from_ref(record))
        .map_err(|e| StoreError::Serialize(e.to_string()))
}

fn read_dataset(path: &Path) -> Result<Dataset, StoreError> {
    let contents = match fs::read_to_string(path) {
        Ok(contents) => contents,
        Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Dataset::new()),
        Err(source) => {
            return Err(StoreError::Io {
                path: path.to_path_buf(),
                source,
            })
        }
    };

    if contents.trim().is_empty() {
        return Ok(Dataset::new());
    }

    let records: Option<Vec<EventRecord>> =
        serde_yaml::from_str(&contents).map_err(|e| StoreError::Parse {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;

    Ok(Dataset::from_records(records.unwrap_or_default()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use gleaner_domain::SubEvent;
    use tempfile::TempDir;

    fn record(title: &str, ids: &[&str]) -> EventRecord {
        EventRecord {
            title: title.to_string(),
            description: String::new(),
            category: Category::Activity,
            tags: vec!["meetup".to_string()],
            website: None,
            location: None,
            start_date: None,
            end_date: None,
            events: ids.iter().map(|id| SubEvent::new(*id)).collect(),
        }
    }

    #[test]
    fn test_path_for_uses_plural_file_name() {
        let store = DatasetStore::new("/data");
        assert_eq!(store.path_for(Category::Activity), PathBuf::from("/data/activities.yml"));
    }

    #[test]
    fn test_missing_file_is_empty_dataset() {
        let dir = TempDir::new().unwrap();
        let store = DatasetStore::new(dir.path());
        let dataset = store.load(Category::Conference).unwrap();
        assert!(dataset.is_empty());
    }

    #[test]
    fn test_whitespace_file_is_empty_dataset() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("conferences.yml"), "\n  \n").unwrap();
        let store = DatasetStore::new(dir.path());
        assert!(store.load(Category::Conference).unwrap().is_empty());
    }

    #[test]
    fn test_unparsable_file_is_an_error() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("conferences.yml"), "title: not a list\n").unwrap();
        let store = DatasetStore::new(dir.path());
        let result = store.load(Category::Conference);
        assert!(matches!(result, Err(StoreError::Parse { .. })));
    }

    #[test]
    fn test_render_record_is_a_sequence() {
        let yaml = render_record(&record("Meetup", &["m1"])).unwrap();
        assert!(yaml.starts_with("- title: Meetup"));
    }

    #[test]
    fn test_known_hints_skips_broken_files() {
        let dir = TempDir::new().unwrap();
        let store = DatasetStore::new(dir.path());
        store
            .save(Category::Activity, &Dataset::from_records(vec![record("Meetup", &["m2", "m1"])]))
            .unwrap();
        fs::write(dir.path().join("conferences.yml"), "{ broken").unwrap();
        fs::write(dir.path().join("notes.txt"), "- title: ignored").unwrap();

        let hints = store.known_hints().unwrap();
        assert_eq!(hints.tags, vec!["meetup"]);
        assert_eq!(hints.ids, vec!["m1", "m2"]);
    }
}
