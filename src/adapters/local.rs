use crate::domain::model::City;
use crate::domain::ports::{ConfigProvider, DatasetSource};
use crate::utils::error::{ExplorerError, Result};
use std::collections::HashMap;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

/// 從本機資料夾讀取各城市的 CSV
#[derive(Debug, Clone)]
pub struct LocalDatasets {
    base_path: String,
    files: HashMap<City, String>,
}

impl LocalDatasets {
    pub fn new(base_path: String) -> Self {
        let files = City::ALL
            .into_iter()
            .map(|city| (city, city.default_file().to_string()))
            .collect();
        Self { base_path, files }
    }

    pub fn from_config<C: ConfigProvider>(config: &C) -> Self {
        let files = City::ALL
            .into_iter()
            .map(|city| (city, config.dataset_file(city)))
            .collect();
        Self {
            base_path: config.data_dir().to_string(),
            files,
        }
    }

    pub fn path_for(&self, city: City) -> PathBuf {
        let file = self
            .files
            .get(&city)
            .map(String::as_str)
            .unwrap_or_else(|| city.default_file());
        Path::new(&self.base_path).join(file)
    }
}

impl DatasetSource for LocalDatasets {
    fn read_dataset(&self, city: City) -> Result<Vec<u8>> {
        let full_path = self.path_for(city);
        tracing::debug!("Reading dataset for {} from {}", city, full_path.display());

        fs::read(&full_path).map_err(|e| match e.kind() {
            ErrorKind::NotFound => ExplorerError::DatasetNotFound {
                city: city.title().to_string(),
                path: full_path.display().to_string(),
            },
            _ => ExplorerError::IoError(e),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_reads_default_file_names() {
        let temp_dir = TempDir::new().unwrap();
        fs::write(temp_dir.path().join("washington.csv"), b"Start Time\n").unwrap();

        let datasets = LocalDatasets::new(temp_dir.path().to_str().unwrap().to_string());
        let data = datasets.read_dataset(City::Washington).unwrap();
        assert_eq!(data, b"Start Time\n");
    }

    #[test]
    fn test_missing_file_is_dataset_not_found() {
        let temp_dir = TempDir::new().unwrap();
        let datasets = LocalDatasets::new(temp_dir.path().to_str().unwrap().to_string());

        match datasets.read_dataset(City::Chicago) {
            Err(ExplorerError::DatasetNotFound { city, path }) => {
                assert_eq!(city, "Chicago");
                assert!(path.ends_with("chicago.csv"));
            }
            other => panic!("expected DatasetNotFound, got {:?}", other),
        }
    }
}
