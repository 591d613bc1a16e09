use crate::domain::model::City;
use crate::domain::ports::ConfigProvider;
use crate::utils::error::Result;
use crate::utils::validation::{self, Validate};
use clap::Parser;
use serde::{Deserialize, Serialize};

pub const MAX_PAUSE_SECONDS: u64 = 60;

#[derive(Debug, Clone, Serialize, Deserialize, Parser)]
#[command(name = "bikeshare-explorer")]
#[command(about = "Explore US bikeshare trip data interactively")]
pub struct CliConfig {
    /// Folder holding chicago.csv, new_york_city.csv and washington.csv
    #[arg(long, default_value = ".")]
    pub data_dir: String,

    /// TOML configuration file; its settings replace the dataset, session and output flags
    #[arg(short, long)]
    pub config: Option<String>,

    #[arg(long, default_value = "5")]
    pub pause_seconds: u64,

    #[arg(long, default_value = "5")]
    pub page_size: usize,

    /// Write each session's statistics as JSON to this file
    #[arg(long)]
    pub report_path: Option<String>,

    #[arg(long, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, help = "Log CPU and memory usage between reports")]
    pub monitor: bool,
}

impl ConfigProvider for CliConfig {
    fn data_dir(&self) -> &str {
        &self.data_dir
    }

    fn dataset_file(&self, city: City) -> String {
        city.default_file().to_string()
    }

    fn pause_seconds(&self) -> u64 {
        self.pause_seconds
    }

    fn page_size(&self) -> usize {
        self.page_size
    }

    fn report_path(&self) -> Option<&str> {
        self.report_path.as_deref()
    }
}

impl Validate for CliConfig {
    fn validate(&self) -> Result<()> {
        validation::validate_path("data_dir", &self.data_dir)?;
        validation::validate_positive_number("page_size", self.page_size, 1)?;
        validation::validate_range("pause_seconds", self.pause_seconds, 0, MAX_PAUSE_SECONDS)?;
        if let Some(report_path) = &self.report_path {
            validation::validate_report_path("report_path", report_path)?;
        }
        Ok(())
    }
}
