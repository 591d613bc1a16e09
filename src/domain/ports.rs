use crate::domain::model::City;
use crate::utils::error::Result;

/// 互動式輸入輸出。`ask` 在輸入結束時回傳 `None`
pub trait Console {
    fn ask(&mut self, prompt: &str) -> Result<Option<String>>;
    fn say(&mut self, line: &str) -> Result<()>;
}

/// 依城市取得原始資料集內容
pub trait DatasetSource {
    fn read_dataset(&self, city: City) -> Result<Vec<u8>>;
}

pub trait ConfigProvider {
    fn data_dir(&self) -> &str;
    fn dataset_file(&self, city: City) -> String;
    fn pause_seconds(&self) -> u64;
    fn page_size(&self) -> usize;
    fn report_path(&self) -> Option<&str>;
}
