pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;
pub use config::TomlConfig;

pub use adapters::{LocalDatasets, StdConsole};
pub use crate::core::{explorer::Explorer, filters::Flow};
pub use domain::model::{City, Month, Selection, SessionFilters};
pub use utils::error::{ExplorerError, Result};
